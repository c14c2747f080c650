use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saved_medicines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub owner: String,

    pub brand_name: String,

    /// Lower-cased brand name; unique per owner.
    pub brand_key: String,

    pub generic_name: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub details_json: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
