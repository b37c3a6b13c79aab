use axum::{extract::State, Json};
use chrono::{Duration, SecondsFormat, Utc};
use matreshka_shared::{Plan, SubscribeRequest, SubscribeResponse};

use crate::db;
use crate::error::{ApiFailure, ApiResult};
use crate::state::AppState;

/// Activate Premium for the plan's length, counted from now.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> ApiResult<SubscribeResponse> {
    let telegram_id = payload.telegram_id;
    let plan = payload.plan.trim();
    if telegram_id == 0 || plan.is_empty() {
        return Err(ApiFailure::bad_request("Missing required fields"));
    }
    let plan: Plan = plan
        .parse()
        .map_err(|_| ApiFailure::bad_request("Invalid plan"))?;

    let user = db::find_user(&state.db, telegram_id)
        .await?
        .ok_or_else(ApiFailure::user_not_found)?;

    let until = (Utc::now() + Duration::days(plan.duration_days()))
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    state
        .db
        .update_document(
            db::USERS,
            &user.id,
            vec![
                ("is_premium", db::flag_value(true).into()),
                ("subscription_until", until.clone().into()),
            ],
        )
        .await
        .map_err(ApiFailure::storage)?;

    tracing::info!("User {} subscribed to {} until {}", telegram_id, plan, until);
    Ok(Json(SubscribeResponse {
        success: true,
        message: "Subscription activated".to_string(),
        subscription_until: Some(until),
    }))
}
