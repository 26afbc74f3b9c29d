//! Carousel state machine: current slide index plus an auto-advance timer.
//!
//! The controller owns its state explicitly (no shared globals) and reaches
//! the page only through the injected [`Surface`] capability, so the state
//! machine runs and tests without a browser. The timer is an explicit
//! deadline driven by the host's event loop via [`CarouselController::poll`];
//! ticks and manual navigation never overlap, so index mutation is race-free.
//!
//! A host that cannot locate the carousel's DOM simply constructs no
//! controller. A surface reporting zero slides makes every operation a
//! permanent no-op.

use std::time::Instant;

use crate::config::CarouselConfig;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the next slide.
    Forward,
    /// Towards the previous slide.
    Backward,
}

/// Capability interface the controller uses to reach the page.
///
/// `slide_offset` must return the slide's *current* layout offset: slide
/// width varies per breakpoint, so positioning is offset-based, never a
/// fixed pixel step.
pub trait Surface {
    /// Number of slides in the track.
    fn slide_count(&self) -> usize;

    /// Layout offset of the slide at `index`, relative to the track start.
    fn slide_offset(&self, index: usize) -> f64;

    /// Smooth-scrolls the viewport to `offset`. Non-blocking; the animation
    /// is the host's concern and is never awaited.
    fn scroll_to(&mut self, offset: f64);
}

/// Carousel controller with reset-on-interact auto-advance.
pub struct CarouselController<S: Surface> {
    surface: S,
    config: CarouselConfig,
    index: usize,
    next_tick: Option<Instant>,
}

impl<S: Surface> CarouselController<S> {
    /// Creates a controller starting at slide 0 with the auto-advance timer
    /// running. With zero slides the timer never starts and all operations
    /// are no-ops.
    #[must_use]
    pub fn new(surface: S, config: CarouselConfig) -> Self {
        let next_tick = (surface.slide_count() > 0).then(|| Instant::now() + config.interval());
        Self {
            surface,
            config,
            index: 0,
            next_tick,
        }
    }

    /// Returns the current slide index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of slides.
    pub fn slide_count(&self) -> usize {
        self.surface.slide_count()
    }

    /// Returns a reference to the injected surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Scrolls the current slide into view using its current layout offset.
    fn apply(&mut self) {
        let offset = self.surface.slide_offset(self.index);
        self.surface.scroll_to(offset);
    }

    /// Wrapping index step plus scroll. The backward case adds `count`
    /// before the modulo so the intermediate never goes negative.
    fn step(&mut self, direction: Direction) {
        let count = self.surface.slide_count();
        if count == 0 {
            return;
        }
        self.index = match direction {
            Direction::Forward => (self.index + 1) % count,
            Direction::Backward => (self.index + count - 1) % count,
        };
        self.apply();
    }

    /// Manual navigation: advance, then restart the timer so the next
    /// auto-tick lands a full interval after `now`. A manual action is never
    /// undone by an imminent auto-tick.
    pub fn navigate(&mut self, direction: Direction, now: Instant) {
        if self.surface.slide_count() == 0 {
            return;
        }
        self.step(direction);
        self.next_tick = Some(now + self.config.interval());
    }

    /// Timer poll, called by the host's event loop. Fires at most one
    /// auto-advance per call; returns `true` if a tick fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.step(Direction::Forward);
                self.next_tick = Some(now + self.config.interval());
                true
            }
            _ => false,
        }
    }

    /// Re-applies the current slide's position after a reflow. Layout
    /// offsets change when the viewport resizes; the displayed slide must
    /// remain the current one.
    pub fn on_resize(&mut self) {
        if self.surface.slide_count() > 0 {
            self.apply();
        }
    }
}
