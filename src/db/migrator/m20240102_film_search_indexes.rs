use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_film_title")
                    .table(Film::Table)
                    .col(Film::Title)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Genre/year results are ordered by year first.
        manager
            .create_index(
                Index::create()
                    .name("idx_film_release_year")
                    .table(Film::Table)
                    .col(Film::ReleaseYear)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_film_release_year")
                    .table(Film::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_film_title").table(Film::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Title,
    ReleaseYear,
}
