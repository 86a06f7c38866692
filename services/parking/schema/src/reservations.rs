use sea_orm::entity::prelude::*;

/// One parking session. Open while `leaving_timestamp` is null.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub spot_id: i32,
    pub parking_timestamp: chrono::DateTime<chrono::Utc>,
    pub leaving_timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub cost: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::parking_spots::Entity",
        from = "Column::SpotId",
        to = "super::parking_spots::Column::Id",
        on_delete = "Cascade"
    )]
    ParkingSpot,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::parking_spots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
