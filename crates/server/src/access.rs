//! Which servers a user may connect to.

/// Countries free users are kept out of, whatever the server's own tier.
pub const RESTRICTED_COUNTRIES: [&str; 25] = [
    "США",
    "Великобритания",
    "Германия",
    "Франция",
    "Швейцария",
    "Япония",
    "Австралия",
    "Канада",
    "Швеция",
    "Норвегия",
    "Дания",
    "Финляндия",
    "Австрия",
    "Нидерланды",
    "Сингапур",
    "Южная Корея",
    "ОАЭ",
    "Гонконг",
    "Индия",
    "Бразилия",
    "Мексика",
    "Новая Зеландия",
    "ЮАР",
    "Чехия",
    "Польша",
];

pub fn is_restricted_country(country: &str) -> bool {
    RESTRICTED_COUNTRIES.contains(&country)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    PremiumServer,
    RestrictedCountry,
}

impl AccessDenied {
    pub fn detail(self) -> &'static str {
        match self {
            AccessDenied::PremiumServer => "Premium subscription required",
            AccessDenied::RestrictedCountry => "Premium subscription required for this country",
        }
    }
}

/// Premium users go anywhere. Free users need a free server outside the
/// restricted countries; the tier check comes first.
pub fn check_access(
    user_is_premium: bool,
    server_is_premium: bool,
    country: &str,
) -> Result<(), AccessDenied> {
    if user_is_premium {
        return Ok(());
    }
    if server_is_premium {
        return Err(AccessDenied::PremiumServer);
    }
    if is_restricted_country(country) {
        return Err(AccessDenied::RestrictedCountry);
    }
    Ok(())
}
