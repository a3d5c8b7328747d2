use crate::AppState;
use crate::api::error::AppError;
use crate::api::handlers::form::FormData;
use crate::api::response::ApiResponse;
use crate::models::{CategoryResponse, NewCategory, UpdateCategoryRequest};
use axum::{
    Json,
    extract::{Multipart, Path, State},
};

const NOT_FOUND: &str = "Category not found";

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryResponse>>, AppError> {
    Ok(ApiResponse::ok(state.categories.list_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "The category, or a not-found envelope", body = CategoryResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    Ok(match state.categories.get_by_id(id).await? {
        Some(category) => ApiResponse::ok(category),
        None => ApiResponse::not_found(NOT_FOUND),
    })
}

/// Multipart fields: `name`, `description`, optional `image` file
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body(content = Multipart, description = "name, description, optional image"),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid form"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    let mut form = FormData::read(multipart).await?;

    let input = NewCategory {
        name: form.string_or("name", ""),
        description: form.string_or("description", ""),
        image: form.take_file("image"),
    };

    let category = state.categories.create(input).await?;
    Ok(ApiResponse::created(category))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated, or a not-found envelope", body = CategoryResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<ApiResponse<CategoryResponse>, AppError> {
    Ok(match state.categories.update(id, req).await? {
        Some(category) => ApiResponse::ok_with_message(category, "Category updated"),
        None => ApiResponse::not_found(NOT_FOUND),
    })
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category and its vehicles deleted, or a not-found envelope"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiResponse<()>, AppError> {
    Ok(if state.categories.delete(id).await? {
        ApiResponse::<()>::message("Category deleted")
    } else {
        ApiResponse::not_found(NOT_FOUND)
    })
}
