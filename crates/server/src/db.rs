//! Database initialization, schema setup and record mapping.
//!
//! Every field is stored as a string: numbers in decimal, flags as
//! `"true"`/`"false"`, missing optionals as `""`.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use aurora_db::{Aurora, Document, FieldType, Value};
use chrono::{SecondsFormat, Utc};
use matreshka_shared::{AccountInfo, Server};

use crate::error::ApiFailure;

pub const USERS: &str = "users";
pub const SERVERS: &str = "servers";
pub const CONNECTIONS: &str = "connections";

/// Open the Aurora database and create the collections.
pub fn init_database(path: &Path) -> anyhow::Result<Aurora> {
    let db_path = path.to_string_lossy().to_string();
    let db = Aurora::open(&db_path)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // Already-existing collections are fine on restart
    let _ = db.new_collection(
        USERS,
        vec![
            ("telegram_id", FieldType::String, true),
            ("username", FieldType::String, false),
            ("first_name", FieldType::String, false),
            ("last_name", FieldType::String, false),
            ("is_premium", FieldType::String, false),
            ("subscription_until", FieldType::String, false),
            ("created_at", FieldType::String, false),
            ("last_login", FieldType::String, false),
        ],
    );

    let _ = db.new_collection(
        SERVERS,
        vec![
            ("id", FieldType::String, true),
            ("name", FieldType::String, false),
            ("country", FieldType::String, false),
            ("city", FieldType::String, false),
            ("flag", FieldType::String, false),
            ("ping", FieldType::String, false),
            ("load", FieldType::String, false),
            ("is_premium", FieldType::String, false),
            ("is_recommended", FieldType::String, false),
            ("is_active", FieldType::String, false),
        ],
    );

    let _ = db.new_collection(
        CONNECTIONS,
        vec![
            ("user_id", FieldType::String, false),
            ("server_id", FieldType::String, false),
            ("connected_at", FieldType::String, false),
            ("disconnected_at", FieldType::String, false), // "" while open
            ("duration", FieldType::String, false),
        ],
    );

    Ok(db)
}

/// One row of the built-in catalog:
/// (id, name, country, city, flag, ping, load, premium, recommended).
type CatalogRow = (&'static str, &'static str, &'static str, &'static str, &'static str, u32, u32, bool, bool);

pub const SERVER_CATALOG: [CatalogRow; 33] = [
    // Free: CIS outside Russia
    ("minsk-1", "Минск #1", "Беларусь", "Минск", "🇧🇾", 42, 38, false, true),
    ("almaty-1", "Алматы #1", "Казахстан", "Алматы", "🇰🇿", 58, 29, false, false),
    ("tashkent-1", "Ташкент #1", "Узбекистан", "Ташкент", "🇺🇿", 65, 34, false, false),
    ("yerevan-1", "Ереван #1", "Армения", "Ереван", "🇦🇲", 48, 41, false, false),
    ("tbilisi-1", "Тбилиси #1", "Грузия", "Тбилиси", "🇬🇪", 52, 36, false, false),
    // Europe
    ("amsterdam-1", "Амстердам #1", "Нидерланды", "Амстердам", "🇳🇱", 75, 55, true, false),
    ("amsterdam-2", "Амстердам #2", "Нидерланды", "Амстердам", "🇳🇱", 78, 43, true, false),
    ("london-1", "Лондон #1", "Великобритания", "Лондон", "🇬🇧", 85, 62, true, false),
    ("paris-1", "Париж #1", "Франция", "Париж", "🇫🇷", 82, 47, true, false),
    ("berlin-1", "Берлин #1", "Германия", "Берлин", "🇩🇪", 89, 51, true, false),
    ("zurich-1", "Цюрих #1", "Швейцария", "Цюрих", "🇨🇭", 95, 33, true, false),
    ("vienna-1", "Вена #1", "Австрия", "Вена", "🇦🇹", 91, 39, true, false),
    ("prague-1", "Прага #1", "Чехия", "Прага", "🇨🇿", 88, 44, true, false),
    ("warsaw-1", "Варшава #1", "Польша", "Варшава", "🇵🇱", 72, 48, true, false),
    // Asia
    ("singapore-1", "Сингапур #1", "Сингапур", "Сингапур", "🇸🇬", 145, 28, true, false),
    ("tokyo-1", "Токио #1", "Япония", "Токио", "🇯🇵", 165, 41, true, false),
    ("seoul-1", "Сеул #1", "Южная Корея", "Сеул", "🇰🇷", 155, 36, true, false),
    ("dubai-1", "Дубай #1", "ОАЭ", "Дубай", "🇦🇪", 125, 52, true, false),
    ("hongkong-1", "Гонконг #1", "Гонконг", "Гонконг", "🇭🇰", 135, 46, true, false),
    ("mumbai-1", "Мумбаи #1", "Индия", "Мумбаи", "🇮🇳", 185, 53, true, false),
    // Americas
    ("usa-1", "Нью-Йорк #1", "США", "Нью-Йорк", "🇺🇸", 220, 67, true, false),
    ("usa-2", "Лос-Анджелес #1", "США", "Лос-Анджелес", "🇺🇸", 245, 58, true, false),
    ("usa-3", "Чикаго #1", "США", "Чикаго", "🇺🇸", 235, 61, true, false),
    ("canada-1", "Торонто #1", "Канада", "Торонто", "🇨🇦", 215, 44, true, false),
    ("brazil-1", "Сан-Паулу #1", "Бразилия", "Сан-Паулу", "🇧🇷", 280, 39, true, false),
    ("mexico-1", "Мехико #1", "Мексика", "Мехико", "🇲🇽", 265, 42, true, false),
    // Oceania and Africa
    ("australia-1", "Сидней #1", "Австралия", "Сидней", "🇦🇺", 320, 31, true, false),
    ("newzealand-1", "Окленд #1", "Новая Зеландия", "Окленд", "🇳🇿", 340, 28, true, false),
    ("southafrica-1", "Кейптаун #1", "ЮАР", "Кейптаун", "🇿🇦", 298, 27, true, false),
    // Scandinavia
    ("sweden-1", "Стокгольм #1", "Швеция", "Стокгольм", "🇸🇪", 68, 35, true, false),
    ("norway-1", "Осло #1", "Норвегия", "Осло", "🇳🇴", 71, 32, true, false),
    ("finland-1", "Хельсинки #1", "Финляндия", "Хельсинки", "🇫🇮", 65, 37, true, false),
    ("denmark-1", "Копенгаген #1", "Дания", "Копенгаген", "🇩🇰", 73, 40, true, false),
];

/// Insert or refresh every catalog server. Returns the number written.
pub async fn seed_servers(db: &Aurora) -> anyhow::Result<usize> {
    for (id, name, country, city, emoji, ping, load, premium, recommended) in SERVER_CATALOG {
        let fields: Vec<(&str, Value)> = vec![
            ("name", name.into()),
            ("country", country.into()),
            ("city", city.into()),
            ("flag", emoji.into()),
            ("ping", ping.to_string().into()),
            ("load", load.to_string().into()),
            ("is_premium", flag_value(premium).into()),
            ("is_recommended", flag_value(recommended).into()),
            ("is_active", flag_value(true).into()),
        ];

        let existing = db
            .query(SERVERS)
            .filter(move |f| f.eq("id", id.to_string()))
            .collect()
            .await
            .map_err(|e| anyhow::anyhow!("failed to look up server {id}: {e}"))?;

        match existing.into_iter().next() {
            Some(doc) => {
                db.update_document(SERVERS, &doc.id, fields)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to update server {id}: {e}"))?;
            }
            None => {
                let mut fields = fields;
                fields.insert(0, ("id", id.into()));
                db.insert_into(SERVERS, fields)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to insert server {id}: {e}"))?;
            }
        }
    }

    tracing::info!("Seeded {} servers", SERVER_CATALOG.len());
    Ok(SERVER_CATALOG.len())
}

/// Timestamp format for every stored instant. Fixed precision keeps the
/// strings ordered the same way as the instants.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn flag_value(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn text<'a>(doc: &'a Document, key: &str) -> &'a str {
    doc.data.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

pub fn optional_text(doc: &Document, key: &str) -> Option<String> {
    Some(text(doc, key))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn flag(doc: &Document, key: &str) -> bool {
    text(doc, key) == "true"
}

pub fn number<T: FromStr + Default>(doc: &Document, key: &str) -> T {
    text(doc, key).parse().unwrap_or_default()
}

pub fn account_from(doc: &Document) -> AccountInfo {
    AccountInfo {
        telegram_id: number(doc, "telegram_id"),
        username: optional_text(doc, "username"),
        first_name: optional_text(doc, "first_name"),
        last_name: optional_text(doc, "last_name"),
        is_premium: flag(doc, "is_premium"),
        subscription_until: optional_text(doc, "subscription_until"),
    }
}

pub fn server_from(doc: &Document) -> Server {
    Server {
        id: text(doc, "id").to_string(),
        name: text(doc, "name").to_string(),
        country: text(doc, "country").to_string(),
        city: text(doc, "city").to_string(),
        flag: text(doc, "flag").to_string(),
        ping: number(doc, "ping"),
        load: number(doc, "load"),
        is_premium: flag(doc, "is_premium"),
        is_recommended: flag(doc, "is_recommended"),
    }
}

pub async fn find_user(db: &Aurora, telegram_id: i64) -> Result<Option<Document>, ApiFailure> {
    let docs = db
        .query(USERS)
        .filter(move |f| f.eq("telegram_id", telegram_id.to_string()))
        .collect()
        .await
        .map_err(ApiFailure::storage)?;
    Ok(docs.into_iter().next())
}

pub async fn find_active_server(db: &Aurora, server_id: &str) -> Result<Option<Server>, ApiFailure> {
    let id = server_id.to_string();
    let docs = db
        .query(SERVERS)
        .filter(move |f| f.eq("id", id.clone()) & f.eq("is_active", "true"))
        .collect()
        .await
        .map_err(ApiFailure::storage)?;
    Ok(docs.first().map(server_from))
}

/// Connections of a user that have not been closed yet.
pub async fn open_connections(db: &Aurora, telegram_id: i64) -> Result<Vec<Document>, ApiFailure> {
    db.query(CONNECTIONS)
        .filter(move |f| f.eq("user_id", telegram_id.to_string()) & f.eq("disconnected_at", ""))
        .collect()
        .await
        .map_err(ApiFailure::storage)
}

pub async fn close_connection(
    db: &Aurora,
    doc: &Document,
    disconnected_at: &str,
    duration: u64,
) -> Result<(), ApiFailure> {
    db.update_document(
        CONNECTIONS,
        &doc.id,
        vec![
            ("disconnected_at", disconnected_at.into()),
            ("duration", duration.to_string().into()),
        ],
    )
    .await
    .map_err(ApiFailure::storage)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::is_restricted_country;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_five_free_and_twenty_eight_premium_servers() {
        let free = SERVER_CATALOG.iter().filter(|row| !row.7).count();
        assert_eq!(free, 5);
        assert_eq!(SERVER_CATALOG.len() - free, 28);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<_> = SERVER_CATALOG.iter().map(|row| row.0).collect();
        assert_eq!(ids.len(), SERVER_CATALOG.len());
    }

    #[test]
    fn only_minsk_is_recommended() {
        let recommended: Vec<_> = SERVER_CATALOG
            .iter()
            .filter(|row| row.8)
            .map(|row| row.0)
            .collect();
        assert_eq!(recommended, vec!["minsk-1"]);
    }

    #[test]
    fn free_servers_are_outside_restricted_countries() {
        for row in SERVER_CATALOG.iter().filter(|row| !row.7) {
            assert!(!is_restricted_country(row.2), "{} is restricted", row.0);
        }
    }

    #[test]
    fn timestamps_have_fixed_width() {
        let a = timestamp();
        let b = timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
        assert!(a <= b);
    }
}
