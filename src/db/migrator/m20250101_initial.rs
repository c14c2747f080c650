use crate::entities::prelude::*;
use crate::entities::{drug_cache, saved_medicines};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(DrugCache)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drug_cache_expires_at")
                    .table(DrugCache)
                    .col(drug_cache::Column::ExpiresAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SavedMedicines)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_medicines_owner_brand")
                    .table(SavedMedicines)
                    .col(saved_medicines::Column::Owner)
                    .col(saved_medicines::Column::BrandKey)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Medicines)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Interactions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Interactions).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Medicines).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SavedMedicines).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DrugCache).to_owned())
            .await?;

        Ok(())
    }
}
