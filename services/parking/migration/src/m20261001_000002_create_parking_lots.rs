use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingLots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::PrimeLocationName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingLots::PricePerHour).double().not_null())
                    .col(ColumnDef::new(ParkingLots::Address).string_len(200).not_null())
                    .col(ColumnDef::new(ParkingLots::PinCode).string_len(10).not_null())
                    .col(ColumnDef::new(ParkingLots::MaxSpots).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingLots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ParkingLots {
    Table,
    Id,
    PrimeLocationName,
    PricePerHour,
    Address,
    PinCode,
    MaxSpots,
}
