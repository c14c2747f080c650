use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medicines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub active_ingredient: String,

    pub description: String,

    pub simplified_description: String,

    /// JSON array of strings
    #[sea_orm(column_type = "Text")]
    pub common_side_effects: String,

    /// JSON array of strings
    #[sea_orm(column_type = "Text")]
    pub warnings: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
