//! JavaScript bindings for the scorecard page
//!
//! The page calls into `Tracker` for every gesture and re-renders from the
//! JSON it gets back.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::export::{self, EXPORT_FILE_NAME};
use crate::persistence::LocalStorage;
use crate::round::ScoreStore;
use crate::settings::Settings;
use crate::view::RoundView;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    register_offline_cache("./sw.js");
}

/// Register the service worker that caches the static assets.
///
/// Fire-and-forget: failures are logged and never touch the round.
#[wasm_bindgen]
pub fn register_offline_cache(script_url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        log::info!("Service workers unsupported, running without offline cache");
        return;
    }

    let promise = navigator.service_worker().register(script_url);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("Offline cache registered"),
            Err(err) => log::warn!("Offline cache registration failed: {err:?}"),
        }
    });
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("Could not serialize for the page: {err}");
        "null".to_string()
    })
}

/// The scorecard as seen from JavaScript
#[wasm_bindgen]
pub struct Tracker {
    store: ScoreStore<LocalStorage>,
    settings: Settings,
}

#[wasm_bindgen]
impl Tracker {
    /// Load (and repair) the stored round
    #[wasm_bindgen(constructor)]
    pub fn new() -> Tracker {
        let store = ScoreStore::load(LocalStorage);
        let settings = Settings::load(store.storage());
        Tracker { store, settings }
    }

    /// JSON `RoundView` of the selected player
    pub fn view(&self) -> String {
        to_json(&RoundView::of(self.store.state()))
    }

    /// JSON of the whole round state
    pub fn state(&self) -> String {
        to_json(self.store.state())
    }

    pub fn scores(&self) -> Vec<u32> {
        self.store.current_scores().to_vec()
    }

    pub fn total(&self) -> f64 {
        self.store.current_total() as f64
    }

    #[wasm_bindgen(js_name = adjustScore)]
    pub fn adjust_score(&mut self, hole: u32, delta: i32) -> Option<u32> {
        self.store.adjust_score(hole as usize, i64::from(delta))
    }

    /// Wipe the card; the page asks for confirmation first
    #[wasm_bindgen(js_name = resetRound)]
    pub fn reset_round(&mut self) -> String {
        self.store.reset_round();
        self.view()
    }

    /// JSON `Selection` for the new player
    #[wasm_bindgen(js_name = selectPlayer)]
    pub fn select_player(&mut self, index: i32) -> String {
        to_json(&self.store.select_player(i64::from(index)))
    }

    pub fn reconfigure(&mut self, num_holes: i32, num_players: i32, names: Vec<String>) -> String {
        self.store
            .reconfigure(i64::from(num_holes), i64::from(num_players), names.as_slice());
        self.view()
    }

    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> String {
        self.store.export_text()
    }

    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        EXPORT_FILE_NAME.to_string()
    }

    /// `mailto:` URL for the export. A blank `recipient` uses the saved one;
    /// a valid address is remembered for next time.
    #[wasm_bindgen(js_name = mailDraft)]
    pub fn mail_draft(&mut self, recipient: &str) -> Result<String, JsValue> {
        let recipient = match recipient.trim() {
            "" => self.settings.export_recipient.clone().unwrap_or_default(),
            given => given.to_string(),
        };
        let url = export::mail_draft(&recipient, self.store.state())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        if self.settings.export_recipient.as_deref() != Some(recipient.trim()) {
            self.settings.set_export_recipient(&recipient);
            if let Err(err) = self.settings.save(self.store.storage_mut()) {
                log::warn!("Could not remember export address: {err}");
            }
        }
        Ok(url)
    }

    #[wasm_bindgen(js_name = confirmNewRound)]
    pub fn confirm_new_round(&self) -> bool {
        self.settings.confirm_new_round
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
