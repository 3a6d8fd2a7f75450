use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub property_id: Uuid,
    pub room_id: Option<Uuid>,
    pub status: String,
    pub check_in_date: Date,
    pub check_out_date: Date,
    pub adults: i32,
    pub children: i32,
    pub primary_guest_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::properties::Entity",
        from = "Column::PropertyId",
        to = "super::properties::Column::Id"
    )]
    Properties,
    #[sea_orm(has_many = "super::folios::Entity")]
    Folios,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Properties.def()
    }
}

impl Related<super::folios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
