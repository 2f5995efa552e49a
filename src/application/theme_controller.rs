// Theme controller - Light/dark mode and accent palette backed by preferences
use crate::application::error::PreferenceError;
use crate::domain::theme::{Palette, ThemeMode};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

pub const MODE_KEY: &str = "theme.mode";
pub const HUE_KEY: &str = "theme.hue";
pub const INTENSITY_KEY: &str = "theme.intensity";

/// Flat string key/value persistence, the server-side stand-in for browser
/// local storage.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Write every entry or none of them.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.set_all(&[(key, value)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    pub hue: u16,
    pub intensity: u8,
    pub accent: String,
    pub body_class: Option<&'static str>,
    pub toggle_icon: &'static str,
    pub css_variables: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, Copy)]
struct ThemeState {
    mode: ThemeMode,
    palette: Palette,
}

pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    state: RwLock<ThemeState>,
    palette_tx: watch::Sender<Palette>,
}

impl ThemeController {
    /// Restore saved theme settings, falling back to defaults key by key.
    pub fn load(store: Arc<dyn PreferenceStore>, fallback: Palette) -> Self {
        let mode = ThemeMode::from_stored(read_key(store.as_ref(), MODE_KEY).as_deref());
        let hue = read_key(store.as_ref(), HUE_KEY)
            .and_then(|v| Palette::parse_hue(&v))
            .unwrap_or(fallback.hue as i64);
        let intensity = read_key(store.as_ref(), INTENSITY_KEY)
            .and_then(|v| Palette::parse_intensity(&v))
            .unwrap_or(fallback.intensity as i64);
        let palette = Palette::new(hue, intensity);

        tracing::debug!("Loaded theme: mode={}, accent={}", mode.as_str(), palette.accent());
        let (palette_tx, _) = watch::channel(palette);
        Self {
            store,
            state: RwLock::new(ThemeState { mode, palette }),
            palette_tx,
        }
    }

    /// Receiver that always holds the current palette.
    pub fn palette_updates(&self) -> watch::Receiver<Palette> {
        self.palette_tx.subscribe()
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        let state = *self.state.read().unwrap_or_else(|e| e.into_inner());
        state.snapshot()
    }

    /// Apply a mode. The mode applies even if it cannot be persisted.
    pub fn set_mode(&self, mode: ThemeMode) -> ThemeSnapshot {
        let state = self.update(|state| state.mode = mode);
        self.persist_mode(mode);
        state.snapshot()
    }

    pub fn toggle(&self) -> ThemeSnapshot {
        let state = self.update(|state| state.mode = state.mode.toggled());
        self.persist_mode(state.mode);
        state.snapshot()
    }

    pub fn set_palette(&self, hue: i64, intensity: i64) -> Result<ThemeSnapshot, PreferenceError> {
        let palette = Palette::new(hue, intensity);
        let state = self.update(|state| {
            state.palette = palette;
            self.palette_tx.send_replace(palette);
        });

        let (hue, intensity) = (palette.hue_value(), palette.intensity_value());
        self.store
            .set_all(&[(HUE_KEY, hue.as_str()), (INTENSITY_KEY, intensity.as_str())])?;
        Ok(state.snapshot())
    }

    // Read-modify-write under a single write lock.
    fn update(&self, apply: impl FnOnce(&mut ThemeState)) -> ThemeState {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        apply(&mut state);
        *state
    }

    fn persist_mode(&self, mode: ThemeMode) {
        if let Err(e) = self.store.set(MODE_KEY, mode.as_str()) {
            tracing::warn!("Could not persist theme mode: {}", e);
        }
    }
}

impl ThemeState {
    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            mode: self.mode,
            hue: self.palette.hue,
            intensity: self.palette.intensity,
            accent: self.palette.accent(),
            body_class: self.mode.body_class(),
            toggle_icon: self.mode.toggle_icon(),
            css_variables: self.palette.css_variables(),
        }
    }
}

fn read_key(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Could not read preference {}: {}", key, e);
            None
        }
    }
}
