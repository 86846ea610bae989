//! Clipboard and location backed by the page the app runs in.

use super::{Clipboard, Location, ShareError};
use async_trait::async_trait;
use dioxus::prelude::document;

/// Writes through `navigator.clipboard` in the hosting page or webview.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ShareError> {
        let payload = serde_json::to_string(text).map_err(|e| ShareError::Clipboard(e.to_string()))?;
        let script = format!(
            r#"return (async function () {{
                if (!navigator.clipboard || !navigator.clipboard.writeText) {{
                    return "clipboard unavailable";
                }}
                try {{
                    await navigator.clipboard.writeText({payload});
                    return null;
                }} catch (err) {{
                    return String((err && err.message) || err);
                }}
            }})();"#
        );

        match document::eval(&script).join::<Option<String>>().await {
            Ok(None) => Ok(()),
            Ok(Some(reason)) => Err(ShareError::Clipboard(reason)),
            Err(err) => Err(ShareError::Clipboard(err.to_string())),
        }
    }
}

/// Current page location.
///
/// `origin` overrides what the page reports; desktop builds always set it
/// because their webview origin is not the backend's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserLocation {
    pub origin: Option<String>,
}

impl BrowserLocation {
    pub fn new(origin: Option<String>) -> Self {
        Self { origin }
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_text(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Location for BrowserLocation {
    fn origin(&self) -> String {
        if let Some(origin) = self.origin.clone() {
            return origin;
        }
        web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default()
    }

    async fn navigate(&self, url: &str) -> Result<(), ShareError> {
        let window = web_sys::window()
            .ok_or_else(|| ShareError::Navigation("no window available".to_string()))?;
        window
            .location()
            .set_href(url)
            .map_err(|err| ShareError::Navigation(js_error_text(err)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Location for BrowserLocation {
    fn origin(&self) -> String {
        self.origin.clone().unwrap_or_default()
    }

    async fn navigate(&self, url: &str) -> Result<(), ShareError> {
        let target = serde_json::to_string(url).map_err(|e| ShareError::Navigation(e.to_string()))?;
        let script = format!(
            r#"return (function () {{
                window.location.href = {target};
                return true;
            }})();"#
        );
        document::eval(&script)
            .join::<bool>()
            .await
            .map(|_| ())
            .map_err(|err| ShareError::Navigation(err.to_string()))
    }
}
