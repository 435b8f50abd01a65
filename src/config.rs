//! User configuration: keybindings, stage options and persistence.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/showreel/config.toml` (default
//! `~/.config/showreel/config.toml`).  Every table is optional; missing
//! values take their defaults.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::geometry::FanConfig;
use crate::core::item::Item;
use crate::core::morph::MorphConfig;
use crate::core::spring::Spring;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Prev,
    Next,
    First,
    Last,
    ScrollUp,
    ScrollDown,
    OpenLink,
    OpenLightbox,
    ToggleAutoplay,
    PrevSection,
    NextSection,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::Prev,
        Action::Next,
        Action::First,
        Action::Last,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::OpenLink,
        Action::OpenLightbox,
        Action::ToggleAutoplay,
        Action::PrevSection,
        Action::NextSection,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Prev => "Previous Card",
            Action::Next => "Next Card",
            Action::First => "First Card",
            Action::Last => "Last Card",
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::OpenLink => "Open Link",
            Action::OpenLightbox => "Open Preview",
            Action::ToggleAutoplay => "Toggle Autoplay",
            Action::PrevSection => "Previous Section",
            Action::NextSection => "Next Section",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the `[keys]` table.
    fn config_key(self) -> &'static str {
        match self {
            Action::Prev => "prev",
            Action::Next => "next",
            Action::First => "first",
            Action::Last => "last",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::OpenLink => "open_link",
            Action::OpenLightbox => "open_lightbox",
            Action::ToggleAutoplay => "toggle_autoplay",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        Self {
            code: event.code,
            modifiers: event.modifiers & mask,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "S-Tab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Left"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::KeyBinding(s.to_string());
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last().ok_or_else(invalid)?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => {
                let n: u8 = k[1..].parse().map_err(|_| invalid())?;
                KeyCode::F(n)
            }
            // Single characters keep their case ("G" differs from "g").
            _ if key_part.chars().count() == 1 => {
                KeyCode::Char(key_part.chars().next().ok_or_else(invalid)?)
            }
            _ => return Err(invalid()),
        };

        Ok(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── sections ──────────

/// `[stack]`: the card-stack carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
    pub interval_ms: u64,
    pub pause_on_hover: bool,
    pub show_dots: bool,
    pub initial_index: i64,
    pub spring: Spring,
    pub fan: FanConfig,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            looping: true,
            autoplay: true,
            interval_ms: 2800,
            pause_on_hover: true,
            show_dots: true,
            initial_index: 0,
            spring: Spring::default(),
            fan: FanConfig::default(),
        }
    }
}

/// `[tools]`: the circle → arc showcase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub tile_spring: Spring,
    pub parallax_spring: Spring,
    pub morph: MorphConfig,
    /// Tiles; empty means the built-in set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tile_spring: Spring::new(40.0, 15.0),
            parallax_spring: Spring::new(30.0, 20.0),
            morph: MorphConfig::default(),
            items: Vec::new(),
        }
    }
}

/// `[hero]`: the morphing title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub texts: Vec<String>,
    pub morph_time: f64,
    pub cooldown: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            texts: vec!["SHOWREEL".into(), "PORTFOLIO".into()],
            morph_time: 1.5,
            cooldown: 0.5,
        }
    }
}

/// `[about]`: the about page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    /// Stacked headline, one entry per line.
    pub title: Vec<String>,
    pub bio: String,
    /// Portrait image; a missing or broken file leaves a placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portrait: Option<PathBuf>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            title: vec!["ABOUT".into(), "ME".into()],
            bio: "Design is where strategy meets soul. For over five years I have been a \
                  visual storyteller turning big ideas into memorable digital moments: \
                  AI image and video generation, product photography, videography and \
                  social media, tied together by clean aesthetics and a feel for colour."
                .into(),
            portrait: None,
            skills: [
                "ADOBE CREATIVE SUITE",
                "REELS CREATION",
                "AI IMAGE & VIDEO GENERATION",
                "PRODUCT PHOTOGRAPHY",
                "VIDEOGRAPHY",
                "SOCIAL MEDIA HANDLING",
            ]
            .map(String::from)
            .to_vec(),
            experience: vec!["STUDIO WORK (2025-PRESENT)".into(), "FREELANCING (2020-2025)".into()],
        }
    }
}

/// One titled paragraph beside the gallery grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub label: String,
    pub text: String,
}

/// `[gallery]`: the photo grid page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub title: String,
    pub tagline: String,
    pub text: String,
    pub highlights: Vec<Highlight>,
    pub columns: u16,
    /// Delay between consecutive tile reveals.
    pub stagger_ms: u64,
    /// Tiles; empty means the built-in set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let highlight = |label: &str, text: &str| Highlight {
            label: label.into(),
            text: text.into(),
        };
        Self {
            title: "PHOTOGRAPHY".into(),
            tagline: "Smartphone and camera work that captures high-quality, impactful images".into(),
            text: "Composition, lighting and visual storytelling, from food and product shots \
                   to brand lifestyle imagery."
                .into(),
            highlights: vec![
                highlight("Product Photography", "Textures, materials and the details that sell."),
                highlight("Food & Beverage", "Cafe aesthetics, menus and social food content."),
                highlight("Brand Lifestyle", "Authentic stories that connect a brand with its audience."),
            ],
            columns: 2,
            stagger_ms: 150,
            items: Vec::new(),
        }
    }
}

/// On-disk shape of the config file.  Bindings are kept as strings here
/// and resolved into [`KeyBind`]s by [`AppConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    reduced_motion: bool,
    double_click_ms: u64,
    fps: u32,
    stack: StackConfig,
    tools: ToolsConfig,
    hero: HeroConfig,
    about: AboutConfig,
    gallery: GalleryConfig,
    keys: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<Item>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            double_click_ms: 250,
            fps: 30,
            stack: StackConfig::default(),
            tools: ToolsConfig::default(),
            hero: HeroConfig::default(),
            about: AboutConfig::default(),
            gallery: GalleryConfig::default(),
            keys: BTreeMap::new(),
            items: Vec::new(),
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Springs snap, autoplay and the intro are skipped.
    pub reduced_motion: bool,
    /// Double-click detection window for opening a card's link.
    pub double_click_ms: u64,
    /// Frame rate of the animation tick.
    pub fps: u32,
    pub stack: StackConfig,
    pub tools: ToolsConfig,
    pub hero: HeroConfig,
    pub about: AboutConfig,
    pub gallery: GalleryConfig,
    /// Card-stack items; empty means the built-in set.
    pub items: Vec<Item>,
    /// Where [`AppConfig::save`] writes.
    pub path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_file(ConfigFile::default(), config_path())
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(Prev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(First, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Last, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(OpenLink, vec![KeyBind::new(Char('o'), n)]);
        m.insert(OpenLightbox, vec![KeyBind::new(Enter, n)]);
        m.insert(ToggleAutoplay, vec![KeyBind::new(Char(' '), n), KeyBind::new(Char('p'), n)]);
        m.insert(PrevSection, vec![KeyBind::new(BackTab, shift), KeyBind::new(PageUp, n)]);
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(PageDown, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    fn from_file(file: ConfigFile, path: PathBuf) -> Self {
        let mut bindings = Self::default_bindings();
        for (key, values) in &file.keys {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("ignoring unknown action `{key}` in [keys]");
                continue;
            };
            let mut parsed = Vec::new();
            for value in values {
                match KeyBind::parse(value) {
                    Ok(bind) => parsed.push(bind),
                    Err(e) => tracing::warn!("{e}"),
                }
            }
            // An explicit empty list unbinds the action.
            if values.is_empty() || !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }

        Self {
            bindings,
            reduced_motion: file.reduced_motion,
            // Keep this bounded for predictable UX.
            double_click_ms: file.double_click_ms.clamp(100, 2000),
            fps: file.fps.clamp(10, 120),
            stack: file.stack,
            tools: file.tools,
            hero: file.hero,
            about: file.about,
            gallery: file.gallery,
            items: file.items,
            path,
        }
    }

    fn to_file(&self) -> ConfigFile {
        let mut keys = BTreeMap::new();
        for &action in Action::ALL {
            let binds = self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[]);
            keys.insert(
                action.config_key().to_string(),
                binds.iter().map(KeyBind::to_config_string).collect(),
            );
        }
        ConfigFile {
            reduced_motion: self.reduced_motion,
            double_click_ms: self.double_click_ms,
            fps: self.fps,
            stack: self.stack.clone(),
            tools: self.tools.clone(),
            hero: self.hero.clone(),
            about: self.about.clone(),
            gallery: self.gallery.clone(),
            keys,
            items: self.items.clone(),
        }
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match (shouldn't happen after conflict resolution), the one with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for (_, binds) in self.bindings.iter_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"← / h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: cards | {}: section | {}: preview | {}: link | {}: autoplay | {}: settings",
            self.short_binding(Action::Prev),
            self.short_binding(Action::Next),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::OpenLightbox),
            self.short_binding(Action::OpenLink),
            self.short_binding(Action::ToggleAutoplay),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path` (or the default location), falling back to
    /// defaults when the file is missing or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        if !path.exists() {
            return Self::from_file(ConfigFile::default(), path);
        }
        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::from_file(ConfigFile::default(), path)
            }
        }
    }

    /// Strict variant of [`AppConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_file(file, path.to_path_buf()))
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.serialise()?)?;
        tracing::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    /// Save, logging instead of failing.  Used from settings callbacks.
    pub fn save_or_warn(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("cannot save config: {e:#}");
        }
    }

    fn serialise(&self) -> Result<String> {
        let body = toml::to_string_pretty(&self.to_file())?;
        Ok(format!(
            "# showreel configuration\n\
             # Keys: Ctrl+, Alt+, Shift+ prefixes; Up, Down, Left, Right, Enter, Esc, Tab,\n\
             #   BackTab, Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12\n\n{body}"
        ))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/showreel/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("showreel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_key_strings() {
        let bind = KeyBind::parse("Ctrl+c").unwrap();
        assert_eq!(bind, KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(KeyBind::parse("PgDn").unwrap().code, KeyCode::PageDown);
        assert_eq!(KeyBind::parse("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(KeyBind::parse("G").unwrap().code, KeyCode::Char('G'));
        assert!(matches!(KeyBind::parse("Hyper+x"), Err(Error::KeyBinding(_))));
        assert!(KeyBind::parse("nonsense").is_err());
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(press(KeyCode::Right, KeyModifiers::NONE)),
            Some(Action::Next)
        );
        assert_eq!(
            config.match_key(press(KeyCode::Char('?'), KeyModifiers::NONE)),
            Some(Action::OpenSettings)
        );
        assert_eq!(config.match_key(press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn rebinding_steals_the_key() {
        let mut config = AppConfig::default();
        let bind = KeyBind::new(KeyCode::Char('o'), KeyModifiers::NONE);
        config.add_binding(Action::Quit, bind.clone());
        assert!(!config.bindings[&Action::OpenLink].contains(&bind));
        assert_eq!(
            config.match_key(press(KeyCode::Char('o'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
reduced_motion = true
fps = 500

[stack]
interval_ms = 1500
loop = false

[stack.fan]
max_visible = 5

[keys]
quit = ["x", "Ctrl+q"]
next = ["Bogus+z"]
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.reduced_motion);
        assert_eq!(config.fps, 120);
        assert_eq!(config.stack.interval_ms, 1500);
        assert!(!config.stack.looping);
        assert!(config.stack.autoplay);
        assert_eq!(config.stack.fan.max_visible, 5);
        assert_eq!(config.stack.fan.card_width, 320.0);
        assert_eq!(config.hero, HeroConfig::default());
        assert_eq!(config.bindings[&Action::Quit].len(), 2);
        // Unparseable entries leave the default binding alone.
        assert_eq!(config.bindings[&Action::Next], AppConfig::default_bindings()[&Action::Next]);
    }

    #[test]
    fn about_and_gallery_tables_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[about]
portrait = "me.png"
skills = ["COLOUR"]

[gallery]
columns = 3

[[gallery.items]]
id = "one"
title = "One"
media = { kind = "image", src = "one.jpg" }
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.about.portrait, Some(PathBuf::from("me.png")));
        assert_eq!(config.about.skills, vec!["COLOUR".to_string()]);
        assert_eq!(config.about.title, AboutConfig::default().title);
        assert_eq!(config.gallery.columns, 3);
        assert_eq!(config.gallery.stagger_ms, 150);
        assert_eq!(config.gallery.items.len(), 1);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "stack = 3").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(Error::ConfigParse { .. })));

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.stack, StackConfig::default());
        assert_eq!(config.path, path);
    }

    #[test]
    fn save_round_trips_bindings_and_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::load(Some(&path));
        config.add_binding(Action::ToggleAutoplay, KeyBind::new(KeyCode::F(2), KeyModifiers::NONE));
        config.bindings.insert(Action::OpenLink, Vec::new());
        config.stack.show_dots = false;
        config.items = vec![Item::new("a", "Alpha").href("https://example.org")];
        config.save().unwrap();

        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.bindings, config.bindings);
        assert!(!reloaded.stack.show_dots);
        assert_eq!(reloaded.items, config.items);
        assert_eq!(reloaded.display_bindings(Action::OpenLink), "unbound");
    }
}
