//! Browser bindings

use wasm_bindgen::prelude::*;

use crate::levelgen::{GenerationRequest, Viewport, generate_level};
use crate::persistence::{LocalStorage, StoreError};
use crate::{HighScore, Settings};

#[wasm_bindgen(start)]
pub fn start() {
    super::init_logging();
    log::info!("Brick Breaker core loaded");
}

/// Generate a level and return it as JSON
/// (`{grid, meta: {cols, rows, cell, pattern}, modifiers: {ballSpeed}}`).
#[wasm_bindgen(js_name = generateLevel)]
pub fn generate_level_json(
    level_number: i32,
    width: f64,
    height: f64,
    seed: Option<String>,
) -> Result<String, JsValue> {
    let mut request = GenerationRequest::new(level_number.max(1) as u32, Viewport::new(width, height));
    request.seed = seed;
    let result = generate_level(&request);
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Persisted settings as JSON (defaults if storage is unavailable)
#[wasm_bindgen(js_name = loadSettings)]
pub fn load_settings_json() -> Result<String, JsValue> {
    let settings = match LocalStorage::open() {
        Ok(store) => Settings::load(&store),
        Err(err) => {
            log::warn!("{}; using default settings", err);
            Settings::default()
        }
    };
    serde_json::to_string(&settings).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Persist settings given as JSON; missing fields take their defaults
#[wasm_bindgen(js_name = saveSettings)]
pub fn save_settings_json(json: &str) -> Result<(), JsValue> {
    let settings: Settings =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut store = open_store()?;
    settings.save(&mut store).map_err(to_js)
}

/// Flip mute and persist it; returns the new muted state
#[wasm_bindgen(js_name = toggleSound)]
pub fn toggle_sound() -> Result<bool, JsValue> {
    let mut store = open_store()?;
    let settings = Settings::update(&mut store, |s| {
        s.toggle_sound();
    })
    .map_err(to_js)?;
    Ok(settings.sound_muted)
}

/// Flip between generated and configured levels and persist it; returns true
/// when generated levels are now selected
#[wasm_bindgen(js_name = toggleProceduralLevels)]
pub fn toggle_procedural_levels() -> Result<bool, JsValue> {
    let mut store = open_store()?;
    let settings = Settings::update(&mut store, |s| {
        s.toggle_level_source();
    })
    .map_err(to_js)?;
    Ok(settings.procedural_levels)
}

fn open_store() -> Result<LocalStorage, JsValue> {
    LocalStorage::open().map_err(to_js)
}

fn to_js(err: StoreError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Record a score; returns true if it is a new best
#[wasm_bindgen(js_name = recordScore)]
pub fn record_score(score: f64) -> Result<bool, JsValue> {
    let mut store = open_store()?;
    let mut high = HighScore::load(&store);
    if !high.record(score.max(0.0) as u64) {
        return Ok(false);
    }
    high.save(&mut store).map_err(to_js)?;
    Ok(true)
}
