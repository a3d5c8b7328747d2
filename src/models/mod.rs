use crate::entities::{categories, vehicles};
use bytes::Bytes;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative").with_message("must not be negative".into()));
    }
    Ok(())
}

/// Outward shape of a category. The vehicle back-relation is never emitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_path: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image_path: model.image_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub category_id: i32,
    pub category: Option<CategoryResponse>,
    #[schema(value_type = f64)]
    pub price_per_day: Decimal,
    pub is_offer: bool,
    pub offer_percentage: f64,
    /// Recomputed on every read
    #[schema(value_type = f64)]
    pub discounted_price: Decimal,
    pub speed: String,
    pub description: String,
    pub is_top_selling: bool,
    pub available_for_rent: bool,
    /// JSON array string of relative media paths
    pub image_paths: String,
}

impl VehicleResponse {
    pub fn new(model: vehicles::Model, category: Option<categories::Model>) -> Self {
        let discounted_price = model.discounted_price();
        Self {
            id: model.id,
            name: model.name,
            vehicle_type: model.vehicle_type,
            category_id: model.category_id,
            category: category.map(CategoryResponse::from),
            price_per_day: model.price_per_day,
            is_offer: model.is_offer,
            offer_percentage: model.offer_percentage,
            discounted_price,
            speed: model.speed,
            description: model.description,
            is_top_selling: model.is_top_selling,
            available_for_rent: model.available_for_rent,
            image_paths: model.image_paths,
        }
    }
}

/// Raw bytes of one uploaded file plus the client-side name
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedImage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: String,
    pub image: Option<UploadedImage>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Validate)]
pub struct NewVehicle {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub vehicle_type: String,
    pub category_id: i32,
    #[validate(custom(function = "non_negative"))]
    pub price_per_day: Decimal,
    pub speed: String,
    pub description: String,
    pub is_offer: bool,
    pub offer_percentage: f64,
    pub is_top_selling: bool,
    pub available_for_rent: bool,
    /// Image1, Image2, Image3 in that order
    pub images: [Option<UploadedImage>; 3],
}

impl Default for NewVehicle {
    fn default() -> Self {
        Self {
            name: String::new(),
            vehicle_type: "Car".to_string(),
            category_id: 0,
            price_per_day: Decimal::ZERO,
            speed: String::new(),
            description: String::new(),
            is_offer: false,
            offer_percentage: 0.0,
            is_top_selling: false,
            available_for_rent: true,
            images: [None, None, None],
        }
    }
}

/// Partial vehicle update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatchRequest {
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "non_negative"))]
    pub price_per_day: Option<Decimal>,
    pub is_offer: Option<bool>,
    pub offer_percentage: Option<f64>,
    pub is_top_selling: Option<bool>,
    pub available_for_rent: Option<bool>,
}
