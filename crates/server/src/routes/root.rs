use axum::Json;
use matreshka_shared::ServiceInfo;

/// Liveness banner.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "MatreshkaVPN API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
