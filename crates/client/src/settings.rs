//! In-memory app settings. Nothing here is persisted between launches.

use matreshka_shared::Server;

use crate::catalog::ServerCatalog;
use crate::host::HostBridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    AutoConnect,
    Notifications,
    Haptics,
}

impl Toggle {
    pub const ALL: [Toggle; 3] = [Toggle::AutoConnect, Toggle::Notifications, Toggle::Haptics];

    pub fn label(&self) -> &'static str {
        match self {
            Toggle::AutoConnect => "Автоподключение",
            Toggle::Notifications => "Уведомления",
            Toggle::Haptics => "Виброотклик",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Toggle::AutoConnect => "Подключаться к рекомендуемому серверу при запуске",
            Toggle::Notifications => "Сообщать о смене состояния подключения",
            Toggle::Haptics => "Тактильная отдача при нажатиях",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub auto_connect: bool,
    pub notifications: bool,
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_connect: false,
            notifications: true,
            haptics: true,
        }
    }
}

impl Settings {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::AutoConnect => self.auto_connect,
            Toggle::Notifications => self.notifications,
            Toggle::Haptics => self.haptics,
        }
    }

    pub fn set(&mut self, toggle: Toggle, value: bool) {
        match toggle {
            Toggle::AutoConnect => self.auto_connect = value,
            Toggle::Notifications => self.notifications = value,
            Toggle::Haptics => self.haptics = value,
        }
    }

    /// Flip `toggle` and return its new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let value = !self.get(toggle);
        self.set(toggle, value);
        value
    }

    /// Push the settings the bridge cares about into it.
    pub fn apply_to(&self, bridge: &HostBridge) {
        bridge.set_haptics_enabled(self.haptics);
    }

    /// Server to connect to when the dashboard opens, if any.
    pub fn auto_connect_target<'a>(
        &self,
        catalog: &'a ServerCatalog,
        connected: bool,
    ) -> Option<&'a Server> {
        if !self.auto_connect || connected {
            return None;
        }
        catalog.default_selection()
    }

    /// Message describing the outcome of a connect or disconnect.
    ///
    /// `connected_to` is the session's server after the call. `None` when
    /// notifications are off.
    pub fn connection_notice(&self, connected_to: Option<&Server>, ok: bool) -> Option<String> {
        if !self.notifications {
            return None;
        }
        Some(match (ok, connected_to) {
            (false, _) => "Не удалось изменить подключение".to_string(),
            (true, Some(server)) => format!("Подключено: {} {}", server.flag, server.name),
            (true, None) => "VPN отключён".to_string(),
        })
    }

    pub fn notify_connection(&self, bridge: &HostBridge, connected_to: Option<&Server>, ok: bool) {
        if let Some(notice) = self.connection_notice(connected_to, ok) {
            bridge.alert(&notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matreshka_shared::ServerList;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert!(!settings.get(Toggle::AutoConnect));
        assert!(settings.get(Toggle::Notifications));
        assert!(settings.get(Toggle::Haptics));
    }

    #[test]
    fn toggle_flips_only_its_field() {
        let mut settings = Settings::default();
        assert!(settings.toggle(Toggle::AutoConnect));
        assert!(!settings.toggle(Toggle::Notifications));
        assert_eq!(
            settings,
            Settings {
                auto_connect: true,
                notifications: false,
                haptics: true,
            }
        );
    }

    #[test]
    fn haptics_setting_reaches_the_bridge() {
        let bridge = HostBridge::new(None);
        let mut settings = Settings::default();

        settings.toggle(Toggle::Haptics);
        settings.apply_to(&bridge);
        assert!(!bridge.haptics_enabled());

        settings.toggle(Toggle::Haptics);
        settings.apply_to(&bridge);
        assert!(bridge.haptics_enabled());
    }

    fn catalog() -> ServerCatalog {
        let server = |id: &str, recommended: bool| Server {
            id: id.to_string(),
            name: format!("{id} #1"),
            country: "Беларусь".into(),
            city: "Минск".into(),
            flag: "🇧🇾".into(),
            ping: 42,
            load: 38,
            is_premium: false,
            is_recommended: recommended,
        };
        ServerCatalog::from_response(Some(ServerList {
            servers: vec![server("minsk-1", true), server("almaty-1", false)],
        }))
    }

    #[test]
    fn auto_connect_picks_the_recommended_server_once_idle() {
        let catalog = catalog();
        let mut settings = Settings::default();
        assert_eq!(settings.auto_connect_target(&catalog, false), None);

        settings.toggle(Toggle::AutoConnect);
        let target = settings.auto_connect_target(&catalog, false);
        assert_eq!(target.map(|s| s.id.as_str()), Some("minsk-1"));

        // Already connected: leave the session alone
        assert_eq!(settings.auto_connect_target(&catalog, true), None);
        assert_eq!(
            settings.auto_connect_target(&ServerCatalog::from_response(None), false),
            None
        );
    }

    #[test]
    fn connection_notices_follow_the_outcome() {
        let catalog = catalog();
        let minsk = catalog.get("minsk-1");
        let mut settings = Settings::default();

        assert_eq!(
            settings.connection_notice(minsk, true).as_deref(),
            Some("Подключено: 🇧🇾 minsk-1 #1")
        );
        assert_eq!(settings.connection_notice(None, true).as_deref(), Some("VPN отключён"));
        assert_eq!(
            settings.connection_notice(minsk, false).as_deref(),
            Some("Не удалось изменить подключение")
        );

        settings.toggle(Toggle::Notifications);
        assert_eq!(settings.connection_notice(minsk, true), None);
        assert_eq!(settings.connection_notice(None, false), None);
    }

    #[test]
    fn every_toggle_is_labelled() {
        for toggle in Toggle::ALL {
            assert!(!toggle.label().is_empty());
            assert!(!toggle.hint().is_empty());
        }
    }
}
