pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::auth_service::AuthService;
use crate::services::category_service::CategoryService;
use crate::services::credentials::{CredentialVerifier, StaticCredentials};
use crate::services::revocation::{InMemoryRevocationStore, RevocationStore};
use crate::services::storage::{MEDIA_BASE, MediaStore};
use crate::services::vehicle_service::VehicleService;
use crate::utils::auth::JwtKeys;
use axum::{
    Router,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::health::health_check,
        api::handlers::categories::list_categories,
        api::handlers::categories::get_category,
        api::handlers::categories::create_category,
        api::handlers::categories::update_category,
        api::handlers::categories::delete_category,
        api::handlers::vehicles::list_vehicles,
        api::handlers::vehicles::list_offers,
        api::handlers::vehicles::list_top_selling,
        api::handlers::vehicles::get_vehicle,
        api::handlers::vehicles::create_vehicle,
        api::handlers::vehicles::patch_vehicle,
        api::handlers::vehicles::delete_vehicle,
    ),
    components(
        schemas(
            api::handlers::auth::LoginRequest,
            api::handlers::auth::TokenResponse,
            api::handlers::health::HealthResponse,
            models::CategoryResponse,
            models::UpdateCategoryRequest,
            models::VehicleResponse,
            models::VehiclePatchRequest,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "categories", description = "Vehicle category management"),
        (name = "vehicles", description = "Vehicle catalog management"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: Arc<dyn MediaStore>,
    pub categories: Arc<CategoryService>,
    pub vehicles: Arc<VehicleService>,
    pub auth: Arc<AuthService>,
    pub revocations: Arc<dyn RevocationStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Wire the services with the fixed administrative identity from `config`
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaStore>, config: AppConfig) -> Self {
        let credentials = Arc::new(StaticCredentials::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
        ));
        Self::with_credentials(db, media, config, credentials)
    }

    pub fn with_credentials(
        db: DatabaseConnection,
        media: Arc<dyn MediaStore>,
        config: AppConfig,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let revocations: Arc<dyn RevocationStore> = Arc::new(InMemoryRevocationStore::new());
        let auth = Arc::new(AuthService::new(
            credentials,
            revocations.clone(),
            JwtKeys::from_config(&config),
        ));

        Self {
            categories: Arc::new(CategoryService::new(db.clone(), media.clone())),
            vehicles: Arc::new(VehicleService::new(db.clone(), media.clone())),
            db,
            media,
            auth,
            revocations,
            config,
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    if config.allows_any_origin() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

pub fn create_app(state: AppState) -> Router {
    use api::handlers::{auth, categories, health, vehicles};

    let protected = Router::new()
        .route("/logout", post(auth::logout))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/api/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/api/vehicles/offers", get(vehicles::list_offers))
        .route("/api/vehicles/top-selling", get(vehicles::list_top_selling))
        .route(
            "/api/vehicles/:id",
            get(vehicles::get_vehicle)
                .patch(vehicles::patch_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            api::middleware::auth::auth_middleware,
        ));

    let uploads = ServeDir::new(state.config.media_root.join(MEDIA_BASE));
    info!(
        "🛡️  Upload limit: {}MB, CORS origins: {:?}",
        state.config.max_upload_size / 1024 / 1024,
        state.config.allowed_origins
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/login", post(auth::login))
        .merge(protected)
        .nest_service(&format!("/{}", MEDIA_BASE), uploads)
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_upload_size,
        ))
        .layer(cors_layer(&state.config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        info!(
                            "📤 Finished in {:?} with status {}",
                            latency,
                            response.status()
                        );
                    },
                ),
        )
        // Outermost, so the trace span already sees the id
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .with_state(state)
}
