//! Page-context enhancements: theme toggle, responsive header, modal state,
//! scroll reveal, and the lazy video embed.
//!
//! Like the carousel, each piece holds its own state behind a small
//! capability seam instead of reaching into the page directly. A host whose
//! markup omits a feature simply constructs nothing for it.

use serde::{Deserialize, Serialize};

/// Color theme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// Default theme.
    Dark,
    /// Light theme.
    Light,
}

impl Theme {
    /// Parses a persisted value, falling back to the dark default.
    #[must_use]
    pub fn from_saved(saved: Option<&str>) -> Self {
        match saved {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The value written to the page's `data-theme` attribute and persisted.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Returns the opposite theme.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Glyph shown on the toggle button.
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        match self {
            Self::Dark => "🌙",
            Self::Light => "☀️",
        }
    }

    /// `aria-pressed` state of the toggle button.
    #[must_use]
    pub const fn is_light(&self) -> bool {
        matches!(self, Self::Light)
    }
}

/// Persistence seam for the chosen theme (the localStorage analog).
pub trait ThemePersist {
    /// Returns the previously saved theme value, if any.
    fn load(&self) -> Option<String>;

    /// Saves the theme value.
    fn save(&mut self, value: &str);
}

/// Theme toggle: restores the saved theme on init, flips and persists on
/// every toggle.
pub struct ThemeToggle<P: ThemePersist> {
    persist: P,
    current: Theme,
}

impl<P: ThemePersist> ThemeToggle<P> {
    /// Restores the saved theme, defaulting to dark.
    #[must_use]
    pub fn new(persist: P) -> Self {
        let current = Theme::from_saved(persist.load().as_deref());
        Self { persist, current }
    }

    /// Returns the active theme.
    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme, persists the new value, and returns it.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.persist.save(self.current.as_str());
        self.current
    }
}

/// Viewport width below which the header stacks vertically.
pub const HEADER_STACK_BREAKPOINT_PX: u32 = 650;

/// Header layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayout {
    /// Single-row header.
    Inline,
    /// Stacked header for narrow viewports.
    Stacked,
}

/// Picks the header layout for a viewport width; re-evaluated on resize.
#[must_use]
pub const fn header_layout(viewport_width_px: u32) -> HeaderLayout {
    if viewport_width_px < HEADER_STACK_BREAKPOINT_PX {
        HeaderLayout::Stacked
    } else {
        HeaderLayout::Inline
    }
}

/// Modal open/close state with body-scroll locking.
///
/// Closing paths mirror the page: close button, backdrop click, Escape key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalState {
    open: bool,
}

impl ModalState {
    /// Creates a closed modal.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Returns `true` while the modal is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The page body's scroll is locked exactly while the modal is open.
    #[must_use]
    pub const fn body_scroll_locked(&self) -> bool {
        self.open
    }

    /// Opens the modal.
    pub const fn open(&mut self) {
        self.open = true;
    }

    /// Closes the modal.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Backdrop click closes only when the click landed on the backdrop
    /// itself, not on modal content.
    pub const fn on_backdrop_click(&mut self, on_backdrop: bool) {
        if on_backdrop {
            self.open = false;
        }
    }

    /// Escape closes an open modal; returns `true` if the key was consumed.
    pub const fn on_escape(&mut self) -> bool {
        if self.open {
            self.open = false;
            true
        } else {
            false
        }
    }
}

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Once-only scroll reveal tracker.
///
/// An element reveals the first time its visible fraction reaches the
/// threshold and is then dropped from observation, so it never un-reveals.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: std::collections::HashSet<String>,
}

impl RevealTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports an intersection observation. Returns `true` exactly once per
    /// element, when it first crosses the threshold.
    pub fn on_intersection(&mut self, element_id: &str, visible_fraction: f64) -> bool {
        if visible_fraction < REVEAL_THRESHOLD || self.revealed.contains(element_id) {
            return false;
        }
        self.revealed.insert(element_id.to_string());
        true
    }

    /// Returns `true` if the element has already revealed.
    #[must_use]
    pub fn is_revealed(&self, element_id: &str) -> bool {
        self.revealed.contains(element_id)
    }
}

/// Builds the embed URL for the lazily loaded video player.
///
/// The iframe is only materialized on first click; until then the page shows
/// a static thumbnail. The video loops as a single-entry playlist.
#[must_use]
pub fn video_embed_url(video_id: &str, autoplay: bool) -> String {
    format!(
        "https://www.youtube.com/embed/{video_id}?autoplay={}&controls=1&loop=1&playlist={video_id}",
        u8::from(autoplay)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryPersist {
        value: Option<String>,
    }

    impl ThemePersist for MemoryPersist {
        fn load(&self) -> Option<String> {
            self.value.clone()
        }

        fn save(&mut self, value: &str) {
            self.value = Some(value.to_string());
        }
    }

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(Theme::from_saved(None), Theme::Dark);
        assert_eq!(Theme::from_saved(Some("garbage")), Theme::Dark);
        assert_eq!(Theme::from_saved(Some("light")), Theme::Light);
    }

    #[test]
    fn toggle_restores_saved_theme() {
        let persist = MemoryPersist {
            value: Some("light".to_string()),
        };
        let toggle = ThemeToggle::new(persist);
        assert_eq!(toggle.current(), Theme::Light);
        assert!(toggle.current().is_light());
        assert_eq!(toggle.current().indicator(), "☀️");
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut toggle = ThemeToggle::new(MemoryPersist::default());
        assert_eq!(toggle.current(), Theme::Dark);

        assert_eq!(toggle.toggle(), Theme::Light);
        assert_eq!(toggle.persist.value.as_deref(), Some("light"));
        assert_eq!(toggle.toggle(), Theme::Dark);
        assert_eq!(toggle.persist.value.as_deref(), Some("dark"));
    }

    #[test]
    fn header_stacks_below_breakpoint() {
        assert_eq!(header_layout(649), HeaderLayout::Stacked);
        assert_eq!(header_layout(650), HeaderLayout::Inline);
        assert_eq!(header_layout(1920), HeaderLayout::Inline);
    }

    #[test]
    fn modal_lifecycle() {
        let mut modal = ModalState::new();
        assert!(!modal.is_open());
        assert!(!modal.body_scroll_locked());

        modal.open();
        assert!(modal.is_open());
        assert!(modal.body_scroll_locked());

        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn modal_backdrop_click_only_closes_on_backdrop() {
        let mut modal = ModalState::new();
        modal.open();
        modal.on_backdrop_click(false);
        assert!(modal.is_open());
        modal.on_backdrop_click(true);
        assert!(!modal.is_open());
    }

    #[test]
    fn modal_escape_consumed_only_when_open() {
        let mut modal = ModalState::new();
        assert!(!modal.on_escape());
        modal.open();
        assert!(modal.on_escape());
        assert!(!modal.is_open());
    }

    #[test]
    fn reveal_fires_once_at_threshold() {
        let mut tracker = RevealTracker::new();
        assert!(!tracker.on_intersection("hero", 0.05));
        assert!(!tracker.is_revealed("hero"));

        assert!(tracker.on_intersection("hero", 0.1));
        assert!(tracker.is_revealed("hero"));

        // Already revealed: never fires again, even at full visibility.
        assert!(!tracker.on_intersection("hero", 1.0));
    }

    #[test]
    fn reveal_tracks_elements_independently() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.on_intersection("a", 0.5));
        assert!(!tracker.is_revealed("b"));
        assert!(tracker.on_intersection("b", 0.5));
    }

    #[test]
    fn video_embed_url_shape() {
        let url = video_embed_url("dQw4w9WgXcQ", true);
        assert!(url.starts_with("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"));
        assert!(url.contains("loop=1"));
        assert!(url.contains("playlist=dQw4w9WgXcQ"));

        let url = video_embed_url("dQw4w9WgXcQ", false);
        assert!(url.contains("autoplay=0"));
    }
}
