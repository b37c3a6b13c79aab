//! `window.Telegram.WebApp`, reached through `js_sys::Reflect`.
//!
//! Every call is best effort: older clients lack some methods, and a missing
//! method is logged at debug level and skipped.

use std::cell::RefCell;
use std::rc::Rc;

use matreshka_shared::Identity;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{self, Array, Function, Object, Reflect};

use super::{ColorScheme, HapticStyle, Popup, PopupButtonKind, PopupCallback, WebAppHost};

pub struct TelegramWebApp {
    app: JsValue,
    main_click: RefCell<Option<Closure<dyn FnMut()>>>,
    back_click: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl TelegramWebApp {
    /// `None` outside Telegram.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let telegram = get(&window, "Telegram")?;
        let app = get(&telegram, "WebApp")?;
        Some(Self {
            app,
            main_click: RefCell::new(None),
            back_click: RefCell::new(None),
        })
    }

    fn button(&self, name: &str) -> Option<JsValue> {
        get(&self.app, name)
    }

    fn rebind_click(
        &self,
        button: &JsValue,
        slot: &RefCell<Option<Closure<dyn FnMut()>>>,
        on_click: Rc<dyn Fn()>,
    ) {
        if let Some(previous) = slot.borrow_mut().take() {
            call(button, "offClick", &[previous.as_ref().clone()]);
        }
        let handler = Closure::<dyn FnMut()>::new(move || on_click());
        call(button, "onClick", &[handler.as_ref().clone()]);
        *slot.borrow_mut() = Some(handler);
    }
}

impl WebAppHost for TelegramWebApp {
    fn user(&self) -> Option<Identity> {
        let user = get(&self.app, "initDataUnsafe").and_then(|data| get(&data, "user"))?;
        let json: String = js_sys::JSON::stringify(&user).ok()?.into();
        match serde_json::from_str(&json) {
            Ok(identity) => Some(identity),
            Err(e) => {
                crate::log_warn!("Unreadable Telegram user: {}", e);
                None
            }
        }
    }

    fn color_scheme(&self) -> ColorScheme {
        get(&self.app, "colorScheme")
            .and_then(|v| v.as_string())
            .map(|s| ColorScheme::parse(&s))
            .unwrap_or_default()
    }

    fn ready(&self) {
        call(&self.app, "ready", &[]);
    }

    fn expand(&self) {
        call(&self.app, "expand", &[]);
    }

    fn haptic(&self, style: HapticStyle) {
        let Some(feedback) = get(&self.app, "HapticFeedback") else {
            return;
        };
        let method = if style.is_notification() {
            "notificationOccurred"
        } else {
            "impactOccurred"
        };
        call(&feedback, method, &[JsValue::from_str(style.as_str())]);
    }

    fn show_alert(&self, message: &str) {
        call(&self.app, "showAlert", &[JsValue::from_str(message)]);
    }

    fn show_popup(&self, popup: &Popup, on_close: PopupCallback) {
        let buttons = Array::new();
        for button in &popup.buttons {
            let kind = match button.kind {
                PopupButtonKind::Ok => "ok",
                PopupButtonKind::Cancel => "cancel",
            };
            buttons.push(&object(&[
                ("id", JsValue::from_str(&button.id)),
                ("type", JsValue::from_str(kind)),
                ("text", JsValue::from_str(&button.text)),
            ]));
        }
        let params = object(&[
            ("title", JsValue::from_str(&popup.title)),
            ("message", JsValue::from_str(&popup.message)),
            ("buttons", buttons.into()),
        ]);

        let callback = Closure::once_into_js(move |button_id: JsValue| {
            on_close(button_id.as_string().filter(|id| !id.is_empty()));
        });
        call(&self.app, "showPopup", &[params.into(), callback]);
    }

    fn close(&self) {
        call(&self.app, "close", &[]);
    }

    fn show_main_button(&self, text: &str, on_click: Rc<dyn Fn()>) {
        let Some(button) = self.button("MainButton") else {
            return;
        };
        call(&button, "setText", &[JsValue::from_str(text)]);
        self.rebind_click(&button, &self.main_click, on_click);
        call(&button, "show", &[]);
    }

    fn hide_main_button(&self) {
        if let Some(button) = self.button("MainButton") {
            call(&button, "hide", &[]);
        }
    }

    fn show_back_button(&self, on_click: Rc<dyn Fn()>) {
        let Some(button) = self.button("BackButton") else {
            return;
        };
        self.rebind_click(&button, &self.back_click, on_click);
        call(&button, "show", &[]);
    }

    fn hide_back_button(&self) {
        if let Some(button) = self.button("BackButton") {
            call(&button, "hide", &[]);
        }
    }
}

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Option<JsValue> {
    let function = get(target, method)?.dyn_into::<Function>().ok()?;
    let args: Array = args.iter().collect();
    match function.apply(target, &args) {
        Ok(value) => Some(value),
        Err(e) => {
            crate::log_debug!("Telegram.WebApp.{} failed: {:?}", method, e);
            None
        }
    }
}

fn object(fields: &[(&str, JsValue)]) -> Object {
    let object = Object::new();
    for (key, value) in fields {
        let _ = Reflect::set(&object, &JsValue::from_str(key), value);
    }
    object
}
