//! Shared data models for the MatreshkaVPN API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// --- Identity ---

/// A Telegram user as exposed by the Mini App host (`initDataUnsafe.user`),
/// or the synthetic stand-in used outside Telegram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

impl Identity {
    /// "First Last", or just the first name.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

// --- Auth ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&Identity> for AuthRequest {
    fn from(identity: &Identity) -> Self {
        Self {
            telegram_id: identity.id,
            username: identity.username.clone(),
            first_name: Some(identity.first_name.clone()),
            last_name: identity.last_name.clone(),
        }
    }
}

/// Account record echoed back by `POST /api/auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountInfo {
    pub telegram_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub subscription_until: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub success: bool,
    pub user: AccountInfo,
}

// --- Servers ---

/// Server descriptor. Supplied by the API, never mutated by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub flag: String,
    /// Round-trip latency estimate in milliseconds.
    pub ping: u32,
    /// Load percentage, 0-100.
    pub load: u32,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    #[serde(rename = "isRecommended", default)]
    pub is_recommended: bool,
}

/// Coarse quality grade used to color load and ping figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl Server {
    /// Whether a user with the given premium status may pick this server.
    pub fn is_accessible(&self, premium_user: bool) -> bool {
        premium_user || !self.is_premium
    }

    pub fn load_grade(&self) -> Grade {
        match self.load {
            0..=29 => Grade::Good,
            30..=69 => Grade::Fair,
            _ => Grade::Poor,
        }
    }

    pub fn ping_grade(&self) -> Grade {
        match self.ping {
            0..=49 => Grade::Good,
            50..=99 => Grade::Fair,
            _ => Grade::Poor,
        }
    }

    /// "City, Country"
    pub fn location(&self) -> String {
        match (self.city.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            _ => self.country.clone(),
        }
    }
}

/// Body of `GET /api/servers`. A missing `servers` key decodes as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerList {
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// Pick the server the dashboard selects by default.
///
/// Prefers the first free recommended server, then the first free server.
/// Premium servers are never chosen.
pub fn default_server(servers: &[Server]) -> Option<&Server> {
    servers
        .iter()
        .find(|s| !s.is_premium && s.is_recommended)
        .or_else(|| servers.iter().find(|s| !s.is_premium))
}

// --- Connections ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectRequest {
    pub telegram_id: i64,
    pub server_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisconnectRequest {
    pub telegram_id: i64,
}

/// `{success, message}` reply shared by connect and disconnect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// --- Subscriptions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Monthly,
    Yearly,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Monthly, Plan::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Monthly => "monthly",
            Plan::Yearly => "yearly",
        }
    }

    /// Length of the subscription granted by the plan.
    pub fn duration_days(&self) -> i64 {
        match self {
            Plan::Monthly => 30,
            Plan::Yearly => 365,
        }
    }

    /// Price in rubles.
    pub fn price_rub(&self) -> u32 {
        match self {
            Plan::Monthly => 59,
            Plan::Yearly => 499,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Plan::Monthly => "1 месяц",
            Plan::Yearly => "1 год",
        }
    }

    /// Rubles saved by the yearly plan against twelve monthly payments, with
    /// the percentage the paywall advertises.
    pub fn yearly_savings() -> (u32, u32) {
        let full = Plan::Monthly.price_rub() * 12;
        let saved = full.saturating_sub(Plan::Yearly.price_rub());
        (saved, (saved * 100 + full / 2) / full)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Plan::Monthly),
            "yearly" => Ok(Plan::Yearly),
            other => Err(format!("unknown plan: {other}")),
        }
    }
}

/// `plan` travels as a plain string so the server can answer unknown plans
/// with its own error instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubscribeRequest {
    pub telegram_id: i64,
    pub plan: String,
}

impl SubscribeRequest {
    pub fn new(telegram_id: i64, plan: Plan) -> Self {
        Self {
            telegram_id,
            plan: plan.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscribeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subscription_until: Option<String>,
}

// --- Stats ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentConnection {
    pub server_name: String,
    #[serde(default)]
    pub country: String,
    pub connected_at: String,
    /// Seconds; zero while the connection is still open.
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    #[serde(default)]
    pub total_connections: u64,
    /// Total online time in seconds.
    #[serde(default)]
    pub total_time: u64,
    #[serde(default)]
    pub servers_used: u64,
    #[serde(default)]
    pub recent_connections: Vec<RecentConnection>,
}

impl UserStats {
    /// Mean session length in seconds.
    pub fn average_session(&self) -> u64 {
        if self.total_connections == 0 {
            0
        } else {
            self.total_time / self.total_connections
        }
    }

    pub fn achievement(&self) -> Option<Achievement> {
        Achievement::for_connections(self.total_connections)
    }
}

/// Badge awarded for the number of connections made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    FirstConnection,
    Regular,
    Expert,
    Master,
}

impl Achievement {
    pub fn for_connections(total: u64) -> Option<Self> {
        match total {
            0 => None,
            1..=9 => Some(Achievement::FirstConnection),
            10..=49 => Some(Achievement::Regular),
            50..=99 => Some(Achievement::Expert),
            _ => Some(Achievement::Master),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::FirstConnection => "🥉",
            Achievement::Regular => "🥈",
            Achievement::Expert => "🥇",
            Achievement::Master => "🏆",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstConnection => "Первое подключение!",
            Achievement::Regular => "VPN Пользователь - 10+ подключений!",
            Achievement::Expert => "VPN Эксперт - 50+ подключений!",
            Achievement::Master => "VPN Мастер - 100+ подключений!",
        }
    }
}

// --- Service ---

/// Banner served at `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, premium: bool, recommended: bool) -> Server {
        Server {
            id: id.to_string(),
            name: id.to_string(),
            country: String::new(),
            city: String::new(),
            flag: String::new(),
            ping: 50,
            load: 40,
            is_premium: premium,
            is_recommended: recommended,
        }
    }

    #[test]
    fn default_selection_skips_premium_recommendations() {
        let servers = vec![
            server("amsterdam-1", true, true),
            server("almaty-1", false, false),
            server("minsk-1", false, true),
        ];
        assert_eq!(default_server(&servers).map(|s| s.id.as_str()), Some("minsk-1"));
    }

    #[test]
    fn default_selection_falls_back_to_first_free_server() {
        let servers = vec![server("london-1", true, false), server("yerevan-1", false, false)];
        assert_eq!(default_server(&servers).map(|s| s.id.as_str()), Some("yerevan-1"));

        let premium_only = vec![server("tokyo-1", true, true)];
        assert!(default_server(&premium_only).is_none());
        assert!(default_server(&[]).is_none());
    }

    #[test]
    fn server_uses_camel_case_flags_on_the_wire() {
        let json = r#"{"id":"minsk-1","name":"Минск #1","country":"Беларусь","city":"Минск",
            "flag":"🇧🇾","ping":42,"load":38,"isPremium":false,"isRecommended":true}"#;
        let parsed: Server = serde_json::from_str(json).unwrap();
        assert!(parsed.is_recommended);
        assert_eq!(parsed.location(), "Минск, Беларусь");

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["isPremium"], false);
        assert!(value.get("is_premium").is_none());
    }

    #[test]
    fn server_list_tolerates_missing_key() {
        let parsed: ServerList = serde_json::from_str("{}").unwrap();
        assert!(parsed.servers.is_empty());
    }

    #[test]
    fn grades_follow_thresholds() {
        let mut s = server("x", false, false);
        s.load = 29;
        s.ping = 49;
        assert_eq!((s.load_grade(), s.ping_grade()), (Grade::Good, Grade::Good));
        s.load = 30;
        s.ping = 99;
        assert_eq!((s.load_grade(), s.ping_grade()), (Grade::Fair, Grade::Fair));
        s.load = 70;
        s.ping = 100;
        assert_eq!((s.load_grade(), s.ping_grade()), (Grade::Poor, Grade::Poor));
    }

    #[test]
    fn plans_parse_and_price() {
        assert_eq!("monthly".parse::<Plan>(), Ok(Plan::Monthly));
        assert!("weekly".parse::<Plan>().is_err());
        assert_eq!(Plan::Yearly.duration_days(), 365);
        assert_eq!(Plan::yearly_savings(), (209, 30));
        assert_eq!(SubscribeRequest::new(7, Plan::Yearly).plan, "yearly");
    }

    #[test]
    fn achievements_by_connection_count() {
        assert_eq!(Achievement::for_connections(0), None);
        assert_eq!(Achievement::for_connections(1), Some(Achievement::FirstConnection));
        assert_eq!(Achievement::for_connections(10), Some(Achievement::Regular));
        assert_eq!(Achievement::for_connections(50), Some(Achievement::Expert));
        assert_eq!(Achievement::for_connections(250), Some(Achievement::Master));
    }

    #[test]
    fn average_session_handles_zero_connections() {
        assert_eq!(UserStats::default().average_session(), 0);
        let stats = UserStats {
            total_connections: 4,
            total_time: 410,
            ..Default::default()
        };
        assert_eq!(stats.average_session(), 102);
    }

    #[test]
    fn auth_request_from_identity() {
        let identity = Identity {
            id: 99,
            first_name: "Иван".into(),
            last_name: None,
            username: Some("ivan".into()),
            language_code: Some("ru".into()),
            is_premium: false,
        };
        let req = AuthRequest::from(&identity);
        assert_eq!(req.telegram_id, 99);
        assert_eq!(req.first_name.as_deref(), Some("Иван"));
        assert_eq!(identity.display_name(), "Иван");
    }
}
