//! Telegram user registration and login.

use axum::{extract::State, Json};
use matreshka_shared::{AuthRequest, AuthResponse};

use crate::db;
use crate::error::{ApiFailure, ApiResult};
use crate::state::AppState;

/// Register the Telegram user on first sight, otherwise record the login.
///
/// Profile fields are only written at registration; later logins keep them.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> ApiResult<AuthResponse> {
    let telegram_id = payload.telegram_id;
    if telegram_id == 0 {
        return Err(ApiFailure::bad_request("Missing telegram_id"));
    }

    let now = db::timestamp();

    match db::find_user(&state.db, telegram_id).await? {
        Some(doc) => {
            state
                .db
                .update_document(db::USERS, &doc.id, vec![("last_login", now.into())])
                .await
                .map_err(ApiFailure::storage)?;
            tracing::info!("User {} logged in", telegram_id);
        }
        None => {
            state
                .db
                .insert_into(
                    db::USERS,
                    vec![
                        ("telegram_id", telegram_id.to_string().into()),
                        ("username", payload.username.unwrap_or_default().into()),
                        ("first_name", payload.first_name.unwrap_or_default().into()),
                        ("last_name", payload.last_name.unwrap_or_default().into()),
                        ("is_premium", db::flag_value(false).into()),
                        ("subscription_until", "".into()),
                        ("created_at", now.clone().into()),
                        ("last_login", now.into()),
                    ],
                )
                .await
                .map_err(ApiFailure::storage)?;
            tracing::info!("Registered user {}", telegram_id);
        }
    }

    let doc = db::find_user(&state.db, telegram_id)
        .await?
        .ok_or_else(|| ApiFailure::storage(format!("user {} missing after write", telegram_id)))?;

    Ok(Json(AuthResponse {
        success: true,
        user: db::account_from(&doc),
    }))
}
