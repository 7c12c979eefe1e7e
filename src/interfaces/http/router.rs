//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AccountService, GenerationService, LedgerService, StreamNotifier};
use crate::domain::FieldError;
use crate::interfaces::http::common::{ErrorBody, MessageResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};

use super::modules::{accounts, balance, generation, health, stream};

/// Unified state for every route. Each handler extracts its own slice
/// via `FromRef`.
#[derive(Clone)]
pub struct GatewayState {
    pub accounts: Arc<AccountService>,
    pub ledger: Arc<LedgerService>,
    pub generation: Arc<GenerationService>,
    pub notifier: StreamNotifier,
    pub auth: AuthState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<GatewayState> for accounts::AccountsState {
    fn from_ref(s: &GatewayState) -> Self {
        accounts::AccountsState {
            accounts: Arc::clone(&s.accounts),
        }
    }
}

impl FromRef<GatewayState> for balance::BalanceState {
    fn from_ref(s: &GatewayState) -> Self {
        balance::BalanceState {
            accounts: Arc::clone(&s.accounts),
            ledger: Arc::clone(&s.ledger),
        }
    }
}

impl FromRef<GatewayState> for generation::GenerationState {
    fn from_ref(s: &GatewayState) -> Self {
        generation::GenerationState {
            generation: Arc::clone(&s.generation),
        }
    }
}

impl FromRef<GatewayState> for stream::StreamState {
    fn from_ref(s: &GatewayState) -> Self {
        stream::StreamState {
            notifier: s.notifier.clone(),
        }
    }
}

impl FromRef<GatewayState> for AuthState {
    fn from_ref(s: &GatewayState) -> Self {
        s.auth.clone()
    }
}

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
                        .description(Some("Token returned by /register or /login"))
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
        accounts::register,
        accounts::login,
        accounts::get_current_user,
        balance::get_balance,
        balance::set_balance,
        generation::generate,
        generation::generate_text,
        stream::stream_events,
    ),
    components(
        schemas(
            ErrorBody,
            FieldError,
            MessageResponse,
            health::HealthResponse,
            accounts::RegisterRequest,
            accounts::LoginRequest,
            accounts::UserDto,
            accounts::AuthResponse,
            balance::BalanceResponse,
            balance::SetBalanceRequest,
            balance::UpdatedUserResponse,
            generation::GenerateRequest,
            generation::GenerateTextRequest,
            generation::GeneratedTextResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Accounts", description = "Registration, login and the current user"),
        (name = "Balance", description = "Credit balance"),
        (name = "Generation", description = "Metered and flat-rate text generation"),
        (name = "Stream", description = "Server-sent progress events"),
    ),
    info(
        title = "Text Generation Gateway API",
        version = "0.1.0",
        description = "Credit-metered gateway in front of a text-generation provider"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: GatewayState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/stream", get(stream::stream_events));

    let protected_routes = Router::new()
        .route("/user", get(accounts::get_current_user))
        .route(
            "/balance",
            get(balance::get_balance).put(balance::set_balance),
        )
        .route("/generate", post(generation::generate))
        .route("/generate-text", post(generation::generate_text))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let swagger_routes =
        SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
