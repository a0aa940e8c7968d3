//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, EmptyData};
use super::middleware::{auth_middleware, AuthState};
use super::modules::{auth, health, users};
use crate::application::identity::UserService;
use crate::infrastructure::crypto::jwt::JwtConfig;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /usuarios/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        users::register,
        users::get_all,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::AddressDto,
            users::RegisterUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login and bearer token issuance"),
        (name = "Users", description = "Registration with address validation, lookup, replacement and deletion"),
    ),
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "User accounts with addresses checked against the Spanish province/municipality catalogue",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(user_service: Arc<UserService>, jwt_config: JwtConfig) -> Router {
    let middleware_state = AuthState { jwt_config };
    let user_state = users::UserHandlerState { user_service };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes
    let public_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(auth::login));

    // Protected routes
    let protected_routes = Router::new()
        .route("/all", get(users::get_all))
        .route(
            "/{username}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ));

    let user_routes = public_routes.merge(protected_routes).with_state(user_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState::new());

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/usuarios", user_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
