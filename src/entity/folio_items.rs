use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "folio_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub folio_id: Uuid,
    pub item_type: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub service_date: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::folios::Entity",
        from = "Column::FolioId",
        to = "super::folios::Column::Id"
    )]
    Folios,
}

impl Related<super::folios::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
