use crate::entities::prelude::*;
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
                    .create_table_from_entity(Locations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(WeatherReports)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Events)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Movies)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Reviews)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Trails)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weather_reports_location_id")
                    .table(WeatherReportsIden::Table)
                    .col(WeatherReportsIden::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_location_id")
                    .table(EventsIden::Table)
                    .col(EventsIden::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_location_id")
                    .table(MoviesIden::Table)
                    .col(MoviesIden::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_location_id")
                    .table(ReviewsIden::Table)
                    .col(ReviewsIden::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trails_location_id")
                    .table(TrailsIden::Table)
                    .col(TrailsIden::LocationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrailsIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReviewsIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MoviesIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventsIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeatherReportsIden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LocationsIden::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LocationsIden {
    #[sea_orm(iden = "locations")]
    Table,
}

#[derive(DeriveIden)]
enum WeatherReportsIden {
    #[sea_orm(iden = "weather_reports")]
    Table,
    LocationId,
}

#[derive(DeriveIden)]
enum EventsIden {
    #[sea_orm(iden = "events")]
    Table,
    LocationId,
}

#[derive(DeriveIden)]
enum MoviesIden {
    #[sea_orm(iden = "movies")]
    Table,
    LocationId,
}

#[derive(DeriveIden)]
enum ReviewsIden {
    #[sea_orm(iden = "reviews")]
    Table,
    LocationId,
}

#[derive(DeriveIden)]
enum TrailsIden {
    #[sea_orm(iden = "trails")]
    Table,
    LocationId,
}
