use rust_decimal::prelude::FromPrimitive;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub vehicle_type: String,
    pub category_id: i32,
    pub price_per_day: Decimal,
    pub is_offer: bool,
    pub offer_percentage: f64,
    pub speed: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_top_selling: bool,
    pub available_for_rent: bool,
    /// JSON array of relative media paths, in upload order
    #[sea_orm(column_type = "Text")]
    pub image_paths: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Price after the offer discount. Never stored.
    ///
    /// The percentage is not range checked; a discount that does not fit in a
    /// `Decimal` leaves the base price.
    pub fn discounted_price(&self) -> Decimal {
        if !self.is_offer || self.offer_percentage <= 0.0 {
            return self.price_per_day;
        }
        Decimal::from_f64(self.offer_percentage)
            .and_then(|pct| pct.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|ratio| self.price_per_day.checked_mul(ratio))
            .and_then(|discount| self.price_per_day.checked_sub(discount))
            .unwrap_or(self.price_per_day)
    }
}
