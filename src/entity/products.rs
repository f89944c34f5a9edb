use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub mrp: i64,
    pub price: i64,
    pub category: String,
    pub description: String,
    pub image_url: String,
    /// Gallery images stored as a JSON array of strings.
    pub images: Json,
    pub in_stock: bool,
    pub is_featured: bool,
    pub created_at: DateTimeWithTimeZone,
}

// Categories are referenced by name only; there is no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
