use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drug_cache")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Normalized (trimmed, lower-cased) search text
    #[sea_orm(unique)]
    pub query: String,

    #[sea_orm(column_type = "Text")]
    pub payload_json: String,

    pub created_at: String,

    pub expires_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
