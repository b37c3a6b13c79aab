use axum::{extract::State, Json};
use matreshka_shared::{Server, ServerList};

use crate::db;
use crate::error::{ApiFailure, ApiResult};
use crate::state::AppState;

/// Active servers, recommended first, then by ping.
pub async fn list_servers(State(state): State<AppState>) -> ApiResult<ServerList> {
    let docs = state
        .db
        .query(db::SERVERS)
        .filter(|f| f.eq("is_active", "true"))
        .collect()
        .await
        .map_err(ApiFailure::storage)?;

    let mut servers: Vec<Server> = docs.iter().map(db::server_from).collect();
    sort_for_listing(&mut servers);

    tracing::info!("Listing {} servers", servers.len());
    Ok(Json(ServerList { servers }))
}

pub fn sort_for_listing(servers: &mut [Server]) {
    servers.sort_by(|a, b| {
        b.is_recommended
            .cmp(&a.is_recommended)
            .then(a.ping.cmp(&b.ping))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, ping: u32, recommended: bool) -> Server {
        Server {
            id: id.to_string(),
            name: id.to_string(),
            country: String::new(),
            city: String::new(),
            flag: String::new(),
            ping,
            load: 0,
            is_premium: false,
            is_recommended: recommended,
        }
    }

    #[test]
    fn recommended_servers_lead_then_ping_ascending() {
        let mut servers = vec![
            server("slow", 200, false),
            server("fast", 20, false),
            server("pick", 90, true),
            server("mid", 60, false),
        ];
        sort_for_listing(&mut servers);
        let ids: Vec<_> = servers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["pick", "fast", "mid", "slow"]);
    }

    #[test]
    fn equal_pings_are_ordered_by_id() {
        let mut servers = vec![server("b", 65, false), server("a", 65, false)];
        sort_for_listing(&mut servers);
        assert_eq!(servers[0].id, "a");
    }
}
