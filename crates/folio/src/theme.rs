use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Preference key under which the chosen mode is stored.
pub const THEME_KEY: &str = "theme";

const APP_DIR: &str = "folio";
const PREFERENCES_FILE: &str = "preferences.yaml";

/// What the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// The next mode in the light, dark, system cycle.
    pub fn cycled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    pub fn resolve(self, system_dark: bool) -> Appearance {
        match self {
            Self::Light => Appearance::Light,
            Self::Dark => Appearance::Dark,
            Self::System if system_dark => Appearance::Dark,
            Self::System => Appearance::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is actually shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub appearance: Appearance,
    pub background: Rgb,
    pub foreground: Rgb,
    pub title: Rgb,
    pub subtitle: Rgb,
    pub accent: Rgb,
    pub muted: Rgb,
    /// Progress bar fill, start to end.
    pub gradient: [Rgb; 3],
    pub track: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            appearance: Appearance::Dark,
            background: Rgb::new(0x11, 0x18, 0x27),
            foreground: Rgb::new(0xE5, 0xE7, 0xEB),
            title: Rgb::new(0xE9, 0x0B, 0x5D),
            subtitle: Rgb::new(0xF9, 0x61, 0xA3),
            accent: Rgb::new(0xE9, 0x0B, 0x5D),
            muted: Rgb::new(0x9C, 0xA3, 0xAF),
            gradient: [
                Rgb::new(0xBA, 0x09, 0x4A),
                Rgb::new(0xE9, 0x0B, 0x5D),
                Rgb::new(0x8C, 0x07, 0x38),
            ],
            track: Rgb::new(0x37, 0x41, 0x51),
        }
    }

    pub fn light() -> Self {
        Self {
            appearance: Appearance::Light,
            background: Rgb::new(0xFF, 0xFF, 0xFF),
            foreground: Rgb::new(0x1F, 0x29, 0x37),
            title: Rgb::new(0x5D, 0x04, 0x25),
            subtitle: Rgb::new(0xBA, 0x09, 0x4A),
            accent: Rgb::new(0xBA, 0x09, 0x4A),
            muted: Rgb::new(0x6B, 0x72, 0x80),
            gradient: [
                Rgb::new(0xBA, 0x09, 0x4A),
                Rgb::new(0xE9, 0x0B, 0x5D),
                Rgb::new(0x8C, 0x07, 0x38),
            ],
            track: Rgb::new(0xE5, 0xE7, 0xEB),
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Dark => Self::dark(),
            Appearance::Light => Self::light(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not determine a preferences directory")]
    NoLocation,

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("corrupt preferences file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// String key/value persistence for session preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Preferences that live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Preferences kept in a flat YAML map on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<PathBuf, StoreError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(PREFERENCES_FILE))
            .ok_or(StoreError::NoLocation)
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(Self::default_location()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_yaml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let yaml = serde_yaml::to_string(values)?;
        std::fs::write(&self.path, yaml).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read()?;
        values.insert(key.to_string(), value.to_string());
        self.write(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read()?;
        if values.remove(key).is_some() {
            self.write(&values)?;
        }
        Ok(())
    }
}

/// Owner of the theme preference for a session.
///
/// `light` and `dark` are persisted under [`THEME_KEY`]; `system` removes the
/// key. If the store fails at any point the controller switches to an
/// in-memory store for the rest of the session.
pub struct ThemeController {
    store: Box<dyn PreferenceStore>,
    persistent: bool,
    /// Whether the mode came from the store.
    stored: bool,
    mode: ThemeMode,
    system_dark: bool,
}

impl ThemeController {
    pub fn new(store: Box<dyn PreferenceStore>, system_dark: bool) -> Self {
        let mut controller = Self {
            store,
            persistent: true,
            stored: false,
            mode: ThemeMode::System,
            system_dark,
        };

        controller.mode = match controller.store.get(THEME_KEY) {
            Ok(Some(stored)) => match ThemeMode::from_name(&stored) {
                Some(mode) => {
                    controller.stored = true;
                    mode
                }
                None => {
                    log::warn!("ignoring unknown stored theme '{stored}'");
                    ThemeMode::System
                }
            },
            Ok(None) => ThemeMode::System,
            Err(e) => {
                controller.fall_back(&e);
                ThemeMode::System
            }
        };
        log::debug!(
            "theme: mode {} resolves to {:?}",
            controller.mode,
            controller.appearance()
        );
        controller
    }

    /// A controller that never touches disk.
    pub fn in_memory(system_dark: bool) -> Self {
        let mut controller = Self::new(Box::new(MemoryStore::default()), system_dark);
        controller.persistent = false;
        controller
    }

    /// Mode to use when nothing has been saved yet. Not persisted.
    pub fn with_default(mut self, mode: ThemeMode) -> Self {
        if !self.stored {
            self.mode = mode;
        }
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn appearance(&self) -> Appearance {
        self.mode.resolve(self.system_dark)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_appearance(self.appearance())
    }

    /// Whether choices survive the session.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
        let result = match mode {
            ThemeMode::System => self.store.remove(THEME_KEY),
            explicit => self.store.set(THEME_KEY, explicit.as_str()),
        };
        if let Err(e) = result {
            self.fall_back(&e);
        }
        log::debug!("theme: set to {mode}, showing {:?}", self.appearance());
    }

    /// Flip between light and dark, pinning an explicit mode.
    pub fn toggle(&mut self) {
        let next = match self.appearance() {
            Appearance::Dark => ThemeMode::Light,
            Appearance::Light => ThemeMode::Dark,
        };
        self.set_mode(next);
    }

    /// OS dark-mode change notification. Only matters in system mode.
    pub fn set_system_dark(&mut self, dark: bool) {
        self.system_dark = dark;
    }

    fn fall_back(&mut self, error: &StoreError) {
        if self.persistent {
            log::warn!("theme preference will not be saved: {error}");
        }
        self.store = Box::new(MemoryStore::default());
        self.persistent = false;
        if self.mode != ThemeMode::System {
            let _ = self.store.set(THEME_KEY, self.mode.as_str());
        }
    }
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.mode)
            .field("system_dark", &self.system_dark)
            .field("persistent", &self.persistent)
            .finish()
    }
}

/// Read the terminal's dark-background hint from `COLORFGBG` (`fg;bg`).
///
/// Background colors 0-6 and 8 are dark in the standard 16-color table.
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
        .unwrap_or(false)
}

fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store whose every operation fails.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::NoLocation)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::NoLocation)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::NoLocation)
        }
    }

    /// A store that reads fine but refuses writes.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::NoLocation)
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::NoLocation)
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("folio-test-{}-{name}", std::process::id()))
            .join(PREFERENCES_FILE)
    }

    #[test]
    fn system_mode_follows_os_signal() {
        let mut t = ThemeController::in_memory(true);
        assert_eq!(t.mode(), ThemeMode::System);
        assert_eq!(t.appearance(), Appearance::Dark);
        t.set_system_dark(false);
        assert_eq!(t.appearance(), Appearance::Light);
    }

    #[test]
    fn explicit_mode_ignores_os_signal() {
        let mut t = ThemeController::in_memory(true);
        t.set_mode(ThemeMode::Light);
        t.set_system_dark(true);
        assert_eq!(t.appearance(), Appearance::Light);
    }

    #[test]
    fn system_removes_key() {
        let path = temp_path("system");
        let mut t = ThemeController::new(Box::new(FileStore::new(&path)), false);
        t.set_mode(ThemeMode::Dark);
        assert_eq!(
            FileStore::new(&path).get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
        t.set_mode(ThemeMode::System);
        assert_eq!(FileStore::new(&path).get(THEME_KEY).unwrap(), None);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn choice_survives_restart() {
        let path = temp_path("restart");
        {
            let mut t = ThemeController::new(Box::new(FileStore::new(&path)), false);
            t.set_mode(ThemeMode::Dark);
            assert!(t.is_persistent());
        }
        let t = ThemeController::new(Box::new(FileStore::new(&path)), false);
        assert_eq!(t.mode(), ThemeMode::Dark);
        assert_eq!(t.palette(), Palette::dark());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn broken_store_falls_back_silently() {
        let mut t = ThemeController::new(Box::new(BrokenStore), false);
        assert!(!t.is_persistent());
        assert_eq!(t.mode(), ThemeMode::System);
        t.set_mode(ThemeMode::Dark);
        assert_eq!(t.mode(), ThemeMode::Dark);
        assert_eq!(t.appearance(), Appearance::Dark);
    }

    #[test]
    fn failed_write_keeps_choice_for_session() {
        let mut t = ThemeController::new(Box::new(ReadOnlyStore::default()), false);
        assert!(t.is_persistent());
        t.set_mode(ThemeMode::Dark);
        assert!(!t.is_persistent());
        assert_eq!(t.mode(), ThemeMode::Dark);
    }

    #[test]
    fn unknown_stored_value_means_system() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        let t = ThemeController::new(Box::new(store), true);
        assert_eq!(t.mode(), ThemeMode::System);
    }

    #[test]
    fn toggle_pins_opposite_appearance() {
        let mut t = ThemeController::in_memory(true);
        t.toggle();
        assert_eq!(t.mode(), ThemeMode::Light);
        t.toggle();
        assert_eq!(t.mode(), ThemeMode::Dark);
    }

    #[test]
    fn default_applies_only_without_saved_choice() {
        let t = ThemeController::in_memory(false).with_default(ThemeMode::Dark);
        assert_eq!(t.mode(), ThemeMode::Dark);

        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "light").unwrap();
        let t = ThemeController::new(Box::new(store), false).with_default(ThemeMode::Dark);
        assert_eq!(t.mode(), ThemeMode::Light);
    }

    #[test]
    fn mode_cycle_visits_all() {
        let m = ThemeMode::Light;
        assert_eq!(m.cycled().cycled().cycled(), m);
        assert_eq!(ThemeMode::from_name("system"), Some(ThemeMode::System));
    }

    #[test]
    fn palette_colors() {
        assert_eq!(Palette::dark().title.to_string(), "#e90b5d");
        assert_eq!(Palette::light().title.to_string(), "#5d0425");
        assert_eq!(Palette::for_appearance(Appearance::Light), Palette::light());
    }

    #[test]
    fn colorfgbg_parsing() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("garbage"), None);
    }
}
