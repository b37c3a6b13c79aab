//! MatreshkaVPN API server.
//!
//! Users, the server catalog, VPN sessions and Premium subscriptions over an
//! embedded Aurora database.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use matreshka_shared::{
    AUTH_PATH, CONNECT_PATH, DISCONNECT_PATH, ROOT_PATH, SERVERS_PATH, SUBSCRIBE_PATH,
    USER_STATS_ROUTE,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod access;
pub mod config;
pub mod db;
pub mod error;
pub mod frontend;
pub mod routes;
pub mod state;

use config::{CorsOrigins, ServerConfig};
use state::AppState;

/// The API routes with CORS and request tracing.
pub fn router(state: AppState, origins: &CorsOrigins) -> Router {
    Router::new()
        .route(ROOT_PATH, get(routes::root::service_info))
        .route(AUTH_PATH, post(routes::auth::authenticate))
        .route(SERVERS_PATH, get(routes::servers::list_servers))
        .route(CONNECT_PATH, post(routes::connections::connect))
        .route(DISCONNECT_PATH, post(routes::connections::disconnect))
        .route(SUBSCRIBE_PATH, post(routes::subscriptions::subscribe))
        .route(USER_STATS_ROUTE, get(routes::stats::user_stats))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::from(Any),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Open the database, seed the catalog if asked, and assemble the full app.
pub async fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let db = db::init_database(&config.db_path)?;
    if config.seed_servers {
        db::seed_servers(&db).await?;
    }

    let app = router(AppState::new(db), &config.cors_origins);
    Ok(frontend::with_frontend_fallback(app, &config.frontend))
}
