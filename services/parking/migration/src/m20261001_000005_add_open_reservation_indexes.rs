use sea_orm_migration::prelude::*;

/// At most one open reservation per user and per spot.
///
/// Partial indexes are not expressible through `Index::create`, so the statements are
/// raw SQL. The syntax is shared by PostgreSQL and SQLite.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_reservations_open_user \
             ON reservations (user_id) WHERE leaving_timestamp IS NULL",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_reservations_open_spot \
             ON reservations (spot_id) WHERE leaving_timestamp IS NULL",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_reservations_open_spot").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uq_reservations_open_user").to_owned())
            .await
    }
}
