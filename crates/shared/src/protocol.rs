//! Endpoint paths of the MatreshkaVPN HTTP API.
//!
//! Both the client facade and the server router are built from these
//! constants so the two sides cannot drift apart.

/// Service banner (`GET /`)
pub const ROOT_PATH: &str = "/";
/// `POST` - register or refresh the Telegram user
pub const AUTH_PATH: &str = "/api/auth";
/// `GET` - active server catalog
pub const SERVERS_PATH: &str = "/api/servers";
/// `POST` - open a connection to a server
pub const CONNECT_PATH: &str = "/api/connect";
/// `POST` - close the user's open connection
pub const DISCONNECT_PATH: &str = "/api/disconnect";
/// `POST` - activate a premium plan
pub const SUBSCRIBE_PATH: &str = "/api/subscribe";
/// Router pattern for the stats endpoint.
pub const USER_STATS_ROUTE: &str = "/api/user/{telegram_id}/stats";

/// Concrete stats path for a user (`GET /api/user/{id}/stats`).
pub fn user_stats_path(telegram_id: i64) -> String {
    format!("/api/user/{}/stats", telegram_id)
}

/// Default JSON content type attached to every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Number of recent connections returned with the usage statistics.
pub const RECENT_CONNECTIONS_LIMIT: usize = 5;
