use super::{Platform, QueryParams};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// The real page: `window.location`, `window.history` and `localStorage`.
///
/// Holds no JS handles; the window is looked up per call so the platform can
/// be shared like the others. JS exceptions are logged and the operation is
/// skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    /// `Some` only when running inside a page with a `window`.
    pub fn detect() -> Option<Self> {
        web_sys::window().map(|_| Self)
    }

    fn window(&self) -> Option<Window> {
        web_sys::window()
    }

    fn local_storage(&self) -> Option<Storage> {
        match self.window()?.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn!(?err, "localStorage is not accessible");
                None
            }
        }
    }

    fn current_query(window: &Window) -> Option<QueryParams> {
        match window.location().search() {
            Ok(search) => Some(QueryParams::parse(&search)),
            Err(err) => {
                warn!(?err, "failed to read location.search");
                None
            }
        }
    }

    fn replace_url(window: &Window, params: &QueryParams) -> Result<(), JsValue> {
        let location = window.location();
        let pathname = location.pathname()?;
        let hash = location.hash()?;
        let url = if params.is_empty() {
            format!("{pathname}{hash}")
        } else {
            format!("{pathname}?{params}{hash}")
        };
        window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
    }
}

impl Platform for BrowserPlatform {
    fn name(&self) -> &'static str {
        "browser"
    }

    fn query_param(&self, key: &str) -> Option<String> {
        let window = self.window()?;
        Self::current_query(&window)?.get(key).map(str::to_string)
    }

    fn replace_query(&self, edit: &mut dyn FnMut(&mut QueryParams)) {
        let Some(window) = self.window() else {
            return;
        };
        let Some(mut params) = Self::current_query(&window) else {
            return;
        };
        edit(&mut params);
        if let Err(err) = Self::replace_url(&window, &params) {
            warn!(?err, "history.replaceState failed");
        }
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        match self.local_storage()?.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, ?err, "localStorage.getItem failed");
                None
            }
        }
    }

    fn storage_set(&self, key: &str, value: &str) {
        if let Some(storage) = self.local_storage() {
            if let Err(err) = storage.set_item(key, value) {
                warn!(key, ?err, "localStorage.setItem failed");
            }
        }
    }

    fn storage_remove(&self, key: &str) {
        if let Some(storage) = self.local_storage() {
            if let Err(err) = storage.remove_item(key) {
                warn!(key, ?err, "localStorage.removeItem failed");
            }
        }
    }
}
