//! Bridge to the embedding Mini App host.
//!
//! Inside Telegram the bridge wraps `window.Telegram.WebApp`. Anywhere else it
//! runs standalone with a placeholder user, so every screen stays usable in a
//! plain browser or desktop window.

mod fallback;
#[cfg(target_arch = "wasm32")]
pub mod telegram;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use futures_channel::oneshot;
use matreshka_shared::Identity;

/// Host theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("dark") {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Haptic pulse kinds understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
    Success,
    Error,
    Warning,
}

impl HapticStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticStyle::Light => "light",
            HapticStyle::Medium => "medium",
            HapticStyle::Heavy => "heavy",
            HapticStyle::Success => "success",
            HapticStyle::Error => "error",
            HapticStyle::Warning => "warning",
        }
    }

    /// `true` for the notification kinds, `false` for impact styles.
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            HapticStyle::Success | HapticStyle::Error | HapticStyle::Warning
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupButtonKind {
    Ok,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupButton {
    pub id: String,
    pub kind: PopupButtonKind,
    pub text: String,
}

/// Native popup shown by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub message: String,
    pub buttons: Vec<PopupButton>,
}

/// Button id that counts as "yes" in a confirmation popup.
pub const CONFIRM_BUTTON_ID: &str = "ok";

impl Popup {
    /// Yes/no confirmation.
    pub fn confirm(message: &str) -> Self {
        Self {
            title: "Подтверждение".to_string(),
            message: message.to_string(),
            buttons: vec![
                PopupButton {
                    id: CONFIRM_BUTTON_ID.to_string(),
                    kind: PopupButtonKind::Ok,
                    text: "Да".to_string(),
                },
                PopupButton {
                    id: "cancel".to_string(),
                    kind: PopupButtonKind::Cancel,
                    text: "Нет".to_string(),
                },
            ],
        }
    }
}

/// Called with the id of the pressed button, or `None` when dismissed.
pub type PopupCallback = Box<dyn FnOnce(Option<String>)>;

/// Operations of an embedding host.
pub trait WebAppHost {
    /// User handed over by the host, if any.
    fn user(&self) -> Option<Identity>;
    fn color_scheme(&self) -> ColorScheme;
    fn ready(&self);
    fn expand(&self);
    fn haptic(&self, style: HapticStyle);
    fn show_alert(&self, message: &str);
    fn show_popup(&self, popup: &Popup, on_close: PopupCallback);
    fn close(&self);
    fn show_main_button(&self, text: &str, on_click: Rc<dyn Fn()>);
    fn hide_main_button(&self);
    fn show_back_button(&self, on_click: Rc<dyn Fn()>);
    fn hide_back_button(&self);
}

/// What the host reported on activation.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSession {
    pub user: Option<Identity>,
    pub color_scheme: ColorScheme,
}

/// Where the app is running.
#[derive(Debug, Clone, PartialEq)]
pub enum HostContext {
    Telegram(HostSession),
    Standalone(Identity),
}

impl HostContext {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            HostContext::Telegram(session) => session.user.as_ref(),
            HostContext::Standalone(identity) => Some(identity),
        }
    }

    pub fn color_scheme(&self) -> ColorScheme {
        match self {
            HostContext::Telegram(session) => session.color_scheme,
            HostContext::Standalone(_) => ColorScheme::default(),
        }
    }
}

/// Placeholder user for runs outside Telegram.
pub fn synthetic_identity() -> Identity {
    Identity {
        id: 123456789,
        first_name: "Тест".to_string(),
        last_name: Some("Пользователь".to_string()),
        username: Some("testuser".to_string()),
        language_code: Some("ru".to_string()),
        is_premium: false,
    }
}

/// Host bridge: uninitialized until [`HostBridge::activate`], ready forever after.
#[derive(Clone)]
pub struct HostBridge {
    host: Option<Rc<dyn WebAppHost>>,
    context: Option<HostContext>,
    haptics_enabled: Rc<Cell<bool>>,
}

impl HostBridge {
    pub fn new(host: Option<Rc<dyn WebAppHost>>) -> Self {
        Self {
            host,
            context: None,
            haptics_enabled: Rc::new(Cell::new(true)),
        }
    }

    /// Bridge over whatever host the current platform exposes.
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        let host = telegram::TelegramWebApp::from_window()
            .map(|app| Rc::new(app) as Rc<dyn WebAppHost>);
        #[cfg(not(target_arch = "wasm32"))]
        let host: Option<Rc<dyn WebAppHost>> = None;

        Self::new(host)
    }

    /// Probe the host and become ready. Later calls return the same context.
    pub fn activate(&mut self) -> &HostContext {
        let host = self.host.clone();
        self.context.get_or_insert_with(|| match host {
            Some(host) => {
                let session = HostSession {
                    user: host.user(),
                    color_scheme: host.color_scheme(),
                };
                host.ready();
                host.expand();
                crate::log_info!(
                    "Telegram WebApp ready (user: {:?}, scheme: {:?})",
                    session.user.as_ref().map(|u| u.id),
                    session.color_scheme
                );
                HostContext::Telegram(session)
            }
            None => {
                crate::log_warn!("Telegram WebApp not found, using test user");
                HostContext::Standalone(synthetic_identity())
            }
        })
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&HostContext> {
        self.context.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.context.as_ref().and_then(HostContext::identity)
    }

    pub fn is_dark(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|c| c.color_scheme() == ColorScheme::Dark)
    }

    /// `true` when running inside Telegram.
    pub fn is_embedded(&self) -> bool {
        self.embedded_host().is_some()
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled.get()
    }

    /// Shared by every clone of this bridge.
    pub fn set_haptics_enabled(&self, enabled: bool) {
        self.haptics_enabled.set(enabled);
    }

    pub fn haptic(&self, style: HapticStyle) {
        if !self.haptics_enabled.get() {
            return;
        }
        if let Some(host) = self.embedded_host() {
            host.haptic(style);
        }
    }

    pub fn alert(&self, message: &str) {
        match self.embedded_host() {
            Some(host) => host.show_alert(message),
            None => fallback::alert(message),
        }
    }

    /// Ask a yes/no question. Resolves `true` only for the confirm button.
    pub async fn confirm(&self, message: &str) -> bool {
        let Some(host) = self.embedded_host() else {
            return fallback::confirm(message);
        };

        let (tx, rx) = oneshot::channel();
        host.show_popup(
            &Popup::confirm(message),
            Box::new(move |button_id| {
                let _ = tx.send(button_id.as_deref() == Some(CONFIRM_BUTTON_ID));
            }),
        );
        rx.await.unwrap_or(false)
    }

    pub fn close(&self) {
        if let Some(host) = self.embedded_host() {
            host.close();
        }
    }

    pub fn show_main_button(&self, text: &str, on_click: impl Fn() + 'static) {
        if let Some(host) = self.embedded_host() {
            host.show_main_button(text, Rc::new(on_click));
        }
    }

    pub fn hide_main_button(&self) {
        if let Some(host) = self.embedded_host() {
            host.hide_main_button();
        }
    }

    pub fn show_back_button(&self, on_click: impl Fn() + 'static) {
        if let Some(host) = self.embedded_host() {
            host.show_back_button(Rc::new(on_click));
        }
    }

    pub fn hide_back_button(&self) {
        if let Some(host) = self.embedded_host() {
            host.hide_back_button();
        }
    }

    fn embedded_host(&self) -> Option<&Rc<dyn WebAppHost>> {
        match self.context {
            Some(HostContext::Telegram(_)) => self.host.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostBridge")
            .field("has_host", &self.host.is_some())
            .field("context", &self.context)
            .field("haptics_enabled", &self.haptics_enabled.get())
            .finish()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeHost {
        user: Option<Identity>,
        dark: bool,
        // `Some(answer)` presses a button right away; `None` keeps the popup open.
        popup_answer: Option<Option<String>>,
        pending_popup: RefCell<Option<PopupCallback>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeHost {
        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl WebAppHost for FakeHost {
        fn user(&self) -> Option<Identity> {
            self.user.clone()
        }

        fn color_scheme(&self) -> ColorScheme {
            if self.dark {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            }
        }

        fn ready(&self) {
            self.record("ready");
        }

        fn expand(&self) {
            self.record("expand");
        }

        fn haptic(&self, style: HapticStyle) {
            self.record(format!("haptic {}", style.as_str()));
        }

        fn show_alert(&self, message: &str) {
            self.record(format!("alert {message}"));
        }

        fn show_popup(&self, popup: &Popup, on_close: PopupCallback) {
            self.record(format!("popup {}", popup.message));
            match &self.popup_answer {
                Some(answer) => on_close(answer.clone()),
                None => *self.pending_popup.borrow_mut() = Some(on_close),
            }
        }

        fn close(&self) {
            self.record("close");
        }

        fn show_main_button(&self, text: &str, on_click: Rc<dyn Fn()>) {
            self.record(format!("main {text}"));
            on_click();
        }

        fn hide_main_button(&self) {
            self.record("main hidden");
        }

        fn show_back_button(&self, _on_click: Rc<dyn Fn()>) {
            self.record("back");
        }

        fn hide_back_button(&self) {
            self.record("back hidden");
        }
    }

    fn telegram_user() -> Identity {
        Identity {
            id: 42,
            first_name: "Иван".into(),
            last_name: None,
            username: Some("ivan".into()),
            language_code: Some("ru".into()),
            is_premium: true,
        }
    }

    fn bridge_over(host: FakeHost) -> (HostBridge, Rc<FakeHost>) {
        let host = Rc::new(host);
        let bridge = HostBridge::new(Some(host.clone() as Rc<dyn WebAppHost>));
        (bridge, host)
    }

    #[test]
    fn uninitialized_bridge_exposes_nothing() {
        let (bridge, host) = bridge_over(FakeHost::default());
        assert!(!bridge.is_ready());
        assert!(bridge.identity().is_none());
        bridge.haptic(HapticStyle::Heavy);
        bridge.close();
        assert!(host.calls().is_empty());
    }

    #[test]
    fn standalone_activation_uses_test_user() {
        let mut bridge = HostBridge::new(None);
        let context = bridge.activate().clone();

        assert_eq!(context, HostContext::Standalone(synthetic_identity()));
        let identity = bridge.identity().cloned().unwrap_or_else(synthetic_identity);
        assert_eq!(identity.id, 123456789);
        assert_eq!(identity.display_name(), "Тест Пользователь");
        assert_eq!(identity.username.as_deref(), Some("testuser"));
        assert!(!identity.is_premium);
        assert!(!bridge.is_embedded());
        assert!(!bridge.is_dark());
    }

    #[test]
    fn telegram_activation_signals_host_once() {
        let (mut bridge, host) = bridge_over(FakeHost {
            user: Some(telegram_user()),
            dark: true,
            ..FakeHost::default()
        });

        bridge.activate();
        bridge.activate();

        assert_eq!(host.calls(), vec!["ready", "expand"]);
        assert!(bridge.is_ready());
        assert!(bridge.is_embedded());
        assert!(bridge.is_dark());
        assert_eq!(bridge.identity().map(|u| u.id), Some(42));
    }

    #[test]
    fn telegram_without_user_has_no_identity() {
        let (mut bridge, _host) = bridge_over(FakeHost::default());
        assert!(matches!(bridge.activate(), HostContext::Telegram(_)));
        assert!(bridge.identity().is_none());
    }

    #[test]
    fn haptics_follow_the_toggle() {
        let (mut bridge, host) = bridge_over(FakeHost::default());
        bridge.activate();

        bridge.haptic(HapticStyle::Light);
        bridge.clone().set_haptics_enabled(false);
        bridge.haptic(HapticStyle::Success);
        bridge.set_haptics_enabled(true);
        bridge.haptic(HapticStyle::Warning);

        assert_eq!(
            host.calls(),
            vec!["ready", "expand", "haptic light", "haptic warning"]
        );
    }

    #[test]
    fn standalone_affordances_are_no_ops() {
        let mut bridge = HostBridge::new(None);
        bridge.activate();
        bridge.haptic(HapticStyle::Medium);
        bridge.show_main_button("Подключиться", || {});
        bridge.hide_back_button();
        bridge.close();
        assert!(!bridge.is_embedded());
    }

    #[test]
    fn main_button_is_forwarded() {
        let (mut bridge, host) = bridge_over(FakeHost::default());
        bridge.activate();

        let clicked = Rc::new(Cell::new(false));
        let flag = clicked.clone();
        bridge.show_main_button("Подключиться", move || flag.set(true));
        bridge.hide_main_button();

        assert!(clicked.get());
        assert!(host.calls().ends_with(&["main Подключиться".to_string(), "main hidden".to_string()]));
    }

    #[tokio::test]
    async fn confirm_is_yes_only_for_ok_button() {
        for (answer, expected) in [
            (Some("ok".to_string()), true),
            (Some("cancel".to_string()), false),
            (None, false),
        ] {
            let (mut bridge, _host) = bridge_over(FakeHost {
                popup_answer: Some(answer),
                ..FakeHost::default()
            });
            bridge.activate();
            assert_eq!(bridge.confirm("Отключиться?").await, expected);
        }
    }

    #[tokio::test]
    async fn confirm_resolves_from_later_callback() {
        let (mut bridge, host) = bridge_over(FakeHost::default());
        bridge.activate();

        let answer = bridge.confirm("Отключиться?");
        futures_util::pin_mut!(answer);
        assert!(futures_util::poll!(&mut answer).is_pending());

        let callback = host.pending_popup.borrow_mut().take();
        if let Some(callback) = callback {
            callback(Some("ok".into()));
        }
        assert!(answer.await);
        assert!(host.calls().contains(&"popup Отключиться?".to_string()));
    }

    #[tokio::test]
    async fn confirm_is_no_when_host_drops_callback() {
        let (mut bridge, host) = bridge_over(FakeHost::default());
        bridge.activate();

        let answer = bridge.confirm("Отключиться?");
        futures_util::pin_mut!(answer);
        assert!(futures_util::poll!(&mut answer).is_pending());

        host.pending_popup.borrow_mut().take();
        assert!(!answer.await);
    }

    #[tokio::test]
    async fn standalone_confirm_declines() {
        let mut bridge = HostBridge::new(None);
        bridge.activate();
        assert!(!bridge.confirm("Отключиться?").await);
    }

    #[test]
    fn popup_confirm_shape() {
        let popup = Popup::confirm("Сменить сервер?");
        assert_eq!(popup.title, "Подтверждение");
        assert_eq!(popup.buttons[0].id, CONFIRM_BUTTON_ID);
        assert_eq!(popup.buttons[1].kind, PopupButtonKind::Cancel);
    }

    #[test]
    fn haptic_kinds() {
        assert!(HapticStyle::Error.is_notification());
        assert!(!HapticStyle::Heavy.is_notification());
        assert_eq!(ColorScheme::parse("dark"), ColorScheme::Dark);
        assert_eq!(ColorScheme::parse("light"), ColorScheme::Light);
    }
}
