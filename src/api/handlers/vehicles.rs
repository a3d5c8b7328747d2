use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::form::FormData;
use crate::api::response::ApiResponse;
use crate::models::{NewVehicle, VehiclePatchRequest, VehicleResponse};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
};

const NOT_FOUND: &str = "Vehicle not found";

#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "All vehicles with their category", body = [VehicleResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
    Ok(ApiResponse::ok(state.vehicles.list_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/offers",
    responses(
        (status = 200, description = "Vehicles currently on offer", body = [VehicleResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn list_offers(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
    Ok(ApiResponse::ok(state.vehicles.list_offers().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/top-selling",
    responses(
        (status = 200, description = "Top selling vehicles", body = [VehicleResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn list_top_selling(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
    Ok(ApiResponse::ok(state.vehicles.list_top_selling().await?))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    params(
        ("id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "The vehicle, or a not-found envelope", body = VehicleResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<VehicleResponse>, AppError> {
    Ok(match state.vehicles.get_by_id(id).await? {
        Some(vehicle) => ApiResponse::ok(vehicle),
        None => ApiResponse::not_found(NOT_FOUND),
    })
}

/// Multipart fields: name, type, categoryId, pricePerDay, speed, description,
/// isOffer, offerPercentage, isTopSelling, availableForRent, image1..image3.
///
/// Faults other than input validation are reported as transport 200 with
/// `success=false`, `statusCode=500` and the fault text.
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body(content = Multipart, description = "Vehicle fields plus up to three images"),
    responses(
        (status = 201, description = "Vehicle created", body = VehicleResponse),
        (status = 200, description = "Creation failed; envelope carries the fault"),
        (status = 400, description = "Invalid form"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn create_vehicle(State(state): State<AppState>, multipart: Multipart) -> Response {
    let result: Result<VehicleResponse, AppError> = async {
        let mut form = FormData::read(multipart).await?;
        let defaults = NewVehicle::default();

        let input = NewVehicle {
            name: form.string_or("name", ""),
            vehicle_type: form.string_or("type", &defaults.vehicle_type),
            category_id: form.parse_or("categoryId", defaults.category_id)?,
            price_per_day: form.decimal_or("pricePerDay", defaults.price_per_day)?,
            speed: form.string_or("speed", ""),
            description: form.string_or("description", ""),
            is_offer: form.bool_or("isOffer", defaults.is_offer)?,
            offer_percentage: form.parse_or("offerPercentage", defaults.offer_percentage)?,
            is_top_selling: form.bool_or("isTopSelling", defaults.is_top_selling)?,
            available_for_rent: form.bool_or("availableForRent", defaults.available_for_rent)?,
            images: [
                form.take_file("image1"),
                form.take_file("image2"),
                form.take_file("image3"),
            ],
        };

        state.vehicles.create(input).await
    }
    .await;

    match result {
        Ok(vehicle) => ApiResponse::created(vehicle).into_response(),
        Err(e @ (AppError::BadRequest(_) | AppError::PayloadTooLarge(_))) => e.into_response(),
        Err(e) => ApiResponse::<()>::error(e.to_string(), 500).into_response(),
    }
}

/// Only the fields present in the body are changed
#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}",
    params(
        ("id" = i32, Path, description = "Vehicle ID")
    ),
    request_body = VehiclePatchRequest,
    responses(
        (status = 200, description = "Vehicle updated, or a not-found envelope", body = VehicleResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn patch_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<VehiclePatchRequest>,
) -> Result<ApiResponse<VehicleResponse>, AppError> {
    Ok(match state.vehicles.update(id, patch).await? {
        Some(vehicle) => ApiResponse::ok_with_message(vehicle, "Vehicle updated"),
        None => ApiResponse::not_found(NOT_FOUND),
    })
}

#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    params(
        ("id" = i32, Path, description = "Vehicle ID")
    ),
    responses(
        (status = 200, description = "Vehicle and its media deleted, or a not-found envelope"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "vehicles"
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<()>, AppError> {
    Ok(if state.vehicles.delete(id).await? {
        ApiResponse::<()>::message("Vehicle deleted")
    } else {
        ApiResponse::not_found(NOT_FOUND)
    })
}
