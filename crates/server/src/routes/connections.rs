//! Opening and closing VPN sessions.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use matreshka_shared::{ActionResponse, ConnectRequest, DisconnectRequest};

use crate::access::check_access;
use crate::db;
use crate::error::{ApiFailure, ApiResult};
use crate::state::AppState;

/// Connect the user to a server. Any session still open is closed first with
/// a zero duration, so a user has at most one open connection.
pub async fn connect(
    State(state): State<AppState>,
    Json(payload): Json<ConnectRequest>,
) -> ApiResult<ActionResponse> {
    let telegram_id = payload.telegram_id;
    let server_id = payload.server_id.trim().to_string();
    if telegram_id == 0 || server_id.is_empty() {
        return Err(ApiFailure::bad_request("Missing required fields"));
    }

    let user = db::find_user(&state.db, telegram_id)
        .await?
        .ok_or_else(ApiFailure::user_not_found)?;
    let server = db::find_active_server(&state.db, &server_id)
        .await?
        .ok_or_else(|| ApiFailure::not_found("Server not found"))?;

    check_access(db::flag(&user, "is_premium"), server.is_premium, &server.country)?;

    let now = db::timestamp();
    for open in db::open_connections(&state.db, telegram_id).await? {
        db::close_connection(&state.db, &open, &now, 0).await?;
    }

    state
        .db
        .insert_into(
            db::CONNECTIONS,
            vec![
                ("user_id", telegram_id.to_string().into()),
                ("server_id", server_id.clone().into()),
                ("connected_at", now.into()),
                ("disconnected_at", "".into()),
                ("duration", "0".into()),
            ],
        )
        .await
        .map_err(ApiFailure::storage)?;

    tracing::info!("User {} connected to {}", telegram_id, server_id);
    Ok(Json(ActionResponse {
        success: true,
        message: "Connected successfully".to_string(),
    }))
}

/// Close every open connection of the user, recording how long it lasted.
pub async fn disconnect(
    State(state): State<AppState>,
    Json(payload): Json<DisconnectRequest>,
) -> ApiResult<ActionResponse> {
    let telegram_id = payload.telegram_id;
    if telegram_id == 0 {
        return Err(ApiFailure::bad_request("Missing telegram_id"));
    }

    db::find_user(&state.db, telegram_id)
        .await?
        .ok_or_else(ApiFailure::user_not_found)?;

    let now = Utc::now();
    let stamp = db::timestamp();
    let open = db::open_connections(&state.db, telegram_id).await?;
    for doc in &open {
        let duration = elapsed_seconds(db::text(doc, "connected_at"), now);
        db::close_connection(&state.db, doc, &stamp, duration).await?;
    }

    tracing::info!("User {} disconnected ({} open sessions closed)", telegram_id, open.len());
    Ok(Json(ActionResponse {
        success: true,
        message: "Disconnected successfully".to_string(),
    }))
}

/// Whole seconds from `connected_at` to `now`; 0 when the stamp is unreadable
/// or in the future.
pub fn elapsed_seconds(connected_at: &str, now: DateTime<Utc>) -> u64 {
    DateTime::parse_from_rfc3339(connected_at)
        .map(|start| (now - start.with_timezone(&Utc)).num_seconds().max(0) as u64)
        .unwrap_or(0)
}
