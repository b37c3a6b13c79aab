use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Path, State},
    Json,
};
use matreshka_shared::{RecentConnection, UserStats, RECENT_CONNECTIONS_LIMIT};

use crate::db;
use crate::error::{ApiFailure, ApiResult};
use crate::state::AppState;

/// One stored connection, as far as the statistics care.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEntry {
    pub server_id: String,
    pub connected_at: String,
    pub duration: u64,
}

/// Usage counters plus the latest sessions. Unknown users get zeros.
pub async fn user_stats(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> ApiResult<UserStats> {
    let docs = state
        .db
        .query(db::CONNECTIONS)
        .filter(move |f| f.eq("user_id", telegram_id.to_string()))
        .collect()
        .await
        .map_err(ApiFailure::storage)?;

    let entries: Vec<ConnectionEntry> = docs
        .iter()
        .map(|doc| ConnectionEntry {
            server_id: db::text(doc, "server_id").to_string(),
            connected_at: db::text(doc, "connected_at").to_string(),
            duration: db::number(doc, "duration"),
        })
        .collect();

    // Server names for the recent list
    let mut servers = HashMap::new();
    for id in entries.iter().map(|e| e.server_id.clone()).collect::<HashSet<_>>() {
        let lookup = id.clone();
        let docs = state
            .db
            .query(db::SERVERS)
            .filter(move |f| f.eq("id", lookup.clone()))
            .collect()
            .await
            .map_err(ApiFailure::storage)?;
        if let Some(doc) = docs.first() {
            servers.insert(id, (db::text(doc, "name").to_string(), db::text(doc, "country").to_string()));
        }
    }

    tracing::info!("Stats for user {}: {} connections", telegram_id, entries.len());
    Ok(Json(summarize(entries, &servers)))
}

/// Fold connections into counters. Entries whose server is gone still count,
/// but are left out of the recent list.
pub fn summarize(
    mut entries: Vec<ConnectionEntry>,
    servers: &HashMap<String, (String, String)>,
) -> UserStats {
    let total_connections = entries.len() as u64;
    let total_time = entries.iter().map(|e| e.duration).sum();
    let servers_used = entries
        .iter()
        .map(|e| e.server_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    entries.sort_by(|a, b| b.connected_at.cmp(&a.connected_at));
    let recent_connections = entries
        .into_iter()
        .filter_map(|entry| {
            let (name, country) = servers.get(&entry.server_id)?;
            Some(RecentConnection {
                server_name: name.clone(),
                country: country.clone(),
                connected_at: entry.connected_at,
                duration: entry.duration,
            })
        })
        .take(RECENT_CONNECTIONS_LIMIT)
        .collect();

    UserStats {
        total_connections,
        total_time,
        servers_used,
        recent_connections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(server_id: &str, minute: u32, duration: u64) -> ConnectionEntry {
        ConnectionEntry {
            server_id: server_id.to_string(),
            connected_at: format!("2024-05-01T12:{minute:02}:00.000000Z"),
            duration,
        }
    }

    fn names() -> HashMap<String, (String, String)> {
        HashMap::from([
            ("minsk-1".to_string(), ("Минск #1".to_string(), "Беларусь".to_string())),
            ("almaty-1".to_string(), ("Алматы #1".to_string(), "Казахстан".to_string())),
        ])
    }

    #[test]
    fn no_connections_gives_zeros() {
        assert_eq!(summarize(Vec::new(), &names()), UserStats::default());
    }

    #[test]
    fn counts_time_and_distinct_servers() {
        let stats = summarize(
            vec![entry("minsk-1", 0, 60), entry("almaty-1", 5, 0), entry("minsk-1", 10, 30)],
            &names(),
        );
        assert_eq!(stats.total_connections, 3);
        assert_eq!(stats.total_time, 90);
        assert_eq!(stats.servers_used, 2);
    }

    #[test]
    fn recent_list_is_newest_first_and_capped() {
        let entries = (0..8).map(|m| entry("minsk-1", m, m as u64)).collect();
        let stats = summarize(entries, &names());
        assert_eq!(stats.recent_connections.len(), RECENT_CONNECTIONS_LIMIT);
        let durations: Vec<_> = stats.recent_connections.iter().map(|c| c.duration).collect();
        assert_eq!(durations, vec![7, 6, 5, 4, 3]);
        assert_eq!(stats.recent_connections[0].server_name, "Минск #1");
        assert_eq!(stats.recent_connections[0].country, "Беларусь");
    }

    #[test]
    fn connections_to_removed_servers_only_count() {
        let stats = summarize(vec![entry("gone-1", 0, 10), entry("minsk-1", 1, 5)], &names());
        assert_eq!(stats.total_connections, 2);
        assert_eq!(stats.total_time, 15);
        assert_eq!(stats.recent_connections.len(), 1);
    }
}
