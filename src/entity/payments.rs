use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub folio_id: Uuid,
    pub method: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub provider: Option<String>,
    pub provider_ref: Option<String>,
    pub idempotency_key: Option<String>,
    pub received_at: DateTimeWithTimeZone,
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
