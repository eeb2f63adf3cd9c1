pub mod appresult;
pub mod config;
pub mod removal;
pub mod store;
pub mod users;

use std::sync::Arc;

use axum::{debug_handler, extract::FromRef, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use appresult::{AppError, AppResult};
pub use config::Config;

use removal::{CredentialResolver, RemovalPolicy, UserIdCredentials};
use store::Stores;

pub type SharedStores = Arc<RwLock<Stores>>;
pub type SharedPolicy = RemovalPolicy<Arc<dyn CredentialResolver>>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub stores: SharedStores,
    pub policy: SharedPolicy,
}

impl AppState {
    pub fn new(stores: Stores) -> Self {
        Self::with_resolver(stores, UserIdCredentials)
    }

    /// Swaps how admin codes are turned into users.
    pub fn with_resolver(stores: Stores, resolver: impl CredentialResolver + 'static) -> Self {
        let resolver: Arc<dyn CredentialResolver> = Arc::new(resolver);
        Self {
            stores: Arc::new(RwLock::new(stores)),
            policy: RemovalPolicy::new(resolver),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Stores::seeded())
    }
}

pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_origins.iter().cloned()))
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/", get(root))
        .nest("/users", users::router());

    #[cfg(feature = "test-harness")]
    let router = router.route("/_test/reset", axum::routing::post(reset));

    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(appresult::panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
struct RootOk {
    ok: bool,
}

#[debug_handler]
async fn root() -> Json<RootOk> {
    Json(RootOk { ok: true })
}

async fn not_found() -> AppError {
    AppError::not_found()
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

#[cfg(feature = "test-harness")]
#[debug_handler(state = AppState)]
async fn reset(
    axum::extract::State(stores): axum::extract::State<SharedStores>,
) -> axum::http::StatusCode {
    stores.write().await.reset();
    tracing::info!("stores reset to seed");
    axum::http::StatusCode::NO_CONTENT
}
