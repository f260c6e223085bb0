//! Smooth-scroll controller
//!
//! One controller is constructed by the root layout when it mounts and is
//! handed by `&mut` reference to every component that scrolls or watches
//! scrolling: navigation, back-to-top button, progress bar. Nothing reaches
//! it through a global. Unmounting calls [`ScrollController::destroy`]
//! (also run on drop), which detaches every listener.
//!
//! The controller is a pure state machine. The host drives it with
//! animation-frame timestamps through [`ScrollController::raf`]; there is no
//! I/O, no clock and no thread.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Easing curve mapping linear progress `t ∈ [0, 1]` to eased progress
pub type Easing = fn(f64) -> f64;

/// Exponential ease-out, clamped so it lands exactly on 1
pub fn expo_out(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

// ── Configuration ─────────────────────────────────────────

/// Timing and offsets for the site's scroll helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Duration of a plain `scroll_to`, in seconds
    pub duration: f64,
    /// Duration of in-page anchor and section scrolls, in seconds
    pub anchor_duration: f64,
    /// Offset for `#anchor` links, clearing the fixed header
    pub anchor_offset: f64,
    /// Offset for section navigation, leaving room for section headings
    pub section_offset: f64,
    /// Scroll distance after which the back-to-top button appears
    pub back_to_top_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            anchor_duration: 1.5,
            anchor_offset: -80.0,
            section_offset: -100.0,
            back_to_top_threshold: 300.0,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("duration", self.duration),
            ("anchor_duration", self.anchor_duration),
            ("back_to_top_threshold", self.back_to_top_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "scroll.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.anchor_offset.is_finite() || !self.section_offset.is_finite() {
            return Err(Error::Config("scroll offsets must be finite".into()));
        }
        Ok(())
    }
}

/// Per-request scroll options
#[derive(Debug, Clone, Copy)]
pub struct ScrollOptions {
    pub offset: f64,
    /// Seconds; zero jumps immediately
    pub duration: f64,
    pub easing: Easing,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            offset: 0.0,
            duration: 1.2,
            easing: expo_out,
        }
    }
}

/// Where to scroll
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollTarget {
    Top,
    Position(f64),
    /// A registered anchor, by id (without the leading `#`)
    Anchor(String),
}

// ── Events and listeners ──────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Still,
}

/// Emitted to every listener whenever the scroll position changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollEvent {
    pub scroll: f64,
    pub limit: f64,
    pub velocity: f64,
    pub direction: Direction,
    /// `scroll / limit`, zero when the page cannot scroll
    pub progress: f64,
}

impl ScrollEvent {
    /// The progress bar fades in once the page has moved at all
    pub fn progress_visible(&self) -> bool {
        self.progress > 0.01
    }
}

/// Handle returned by [`ScrollController::on_scroll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ScrollEvent)>;

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f64,
    to: f64,
    duration_ms: f64,
    easing: Easing,
    started_at: Option<f64>,
}

// ── Controller ────────────────────────────────────────────

pub struct ScrollController {
    config: ScrollConfig,
    scroll: f64,
    limit: f64,
    velocity: f64,
    direction: Direction,
    anchors: BTreeMap<String, f64>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    animation: Option<Animation>,
    stopped: bool,
    destroyed: bool,
}

impl std::fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ScrollController")
            .field("scroll", &self.scroll)
            .field("limit", &self.limit)
            .field("anchors", &self.anchors)
            .field("listeners", &self.listeners.len())
            .field("animating", &self.animation.is_some())
            .field("stopped", &self.stopped)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl ScrollController {
    /// Mount a controller for a page that can scroll `limit` pixels
    pub fn new(config: ScrollConfig, limit: f64) -> Self {
        Self {
            config,
            scroll: 0.0,
            limit: limit.max(0.0),
            velocity: 0.0,
            direction: Direction::Still,
            anchors: BTreeMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
            animation: None,
            stopped: false,
            destroyed: false,
        }
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Page height changed; keep the current position within range
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        if self.scroll > self.limit {
            let clamped = self.limit;
            self.move_to(clamped);
        }
    }

    /// Record where a section starts so `#id` targets can find it
    pub fn register_anchor(&mut self, id: impl Into<String>, position: f64) {
        self.anchors.insert(id.into(), position);
    }

    pub fn unregister_anchor(&mut self, id: &str) -> bool {
        self.anchors.remove(id).is_some()
    }

    pub fn on_scroll(&mut self, listener: impl FnMut(&ScrollEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener; returns false if it was not attached
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Start a scroll. Zero duration jumps immediately.
    ///
    /// A stopped controller ignores the request.
    ///
    /// # Errors
    /// `UnknownAnchor` for an unregistered anchor, `ControllerDestroyed`
    /// after [`destroy`](Self::destroy).
    pub fn scroll_to(&mut self, target: ScrollTarget, options: ScrollOptions) -> Result<()> {
        if self.destroyed {
            return Err(Error::ControllerDestroyed);
        }
        let base = match &target {
            ScrollTarget::Top => 0.0,
            ScrollTarget::Position(position) => *position,
            ScrollTarget::Anchor(id) => *self
                .anchors
                .get(id)
                .ok_or_else(|| Error::UnknownAnchor(id.clone()))?,
        };
        if self.stopped {
            debug!(?target, "scroll request ignored, controller stopped");
            return Ok(());
        }

        let to = (base + options.offset).clamp(0.0, self.limit);
        if options.duration <= 0.0 {
            self.animation = None;
            self.move_to(to);
            return Ok(());
        }
        self.animation = Some(Animation {
            from: self.scroll,
            to,
            duration_ms: options.duration * 1000.0,
            easing: options.easing,
            started_at: None,
        });
        Ok(())
    }

    /// Default request options, timed by the configured duration
    pub fn options(&self) -> ScrollOptions {
        ScrollOptions {
            duration: self.config.duration,
            ..ScrollOptions::default()
        }
    }

    pub fn scroll_to_top(&mut self) -> Result<()> {
        let options = ScrollOptions {
            offset: self.config.anchor_offset,
            ..self.options()
        };
        self.scroll_to(ScrollTarget::Top, options)
    }

    pub fn scroll_to_section(&mut self, section: &str) -> Result<()> {
        let options = ScrollOptions {
            offset: self.config.section_offset,
            duration: self.config.anchor_duration,
            easing: expo_out,
        };
        self.scroll_to(ScrollTarget::Anchor(section.to_string()), options)
    }

    /// Handle a click on a link. In-page `#id` links scroll smoothly and
    /// return `true`; any other href is left to the router.
    pub fn follow_anchor_link(&mut self, href: &str) -> Result<bool> {
        let Some(id) = href.strip_prefix('#') else {
            return Ok(false);
        };
        let options = ScrollOptions {
            offset: self.config.anchor_offset,
            duration: self.config.anchor_duration,
            easing: expo_out,
        };
        self.scroll_to(ScrollTarget::Anchor(id.to_string()), options)?;
        Ok(true)
    }

    /// Advance the active animation to frame time `time_ms`
    pub fn raf(&mut self, time_ms: f64) {
        if self.destroyed || self.stopped {
            return;
        }
        let Some(mut animation) = self.animation else {
            return;
        };
        let started_at = *animation.started_at.get_or_insert(time_ms);
        let t = ((time_ms - started_at) / animation.duration_ms).clamp(0.0, 1.0);

        if t >= 1.0 {
            self.animation = None;
            self.move_to(animation.to);
        } else {
            self.animation = Some(animation);
            let eased = (animation.easing)(t);
            self.move_to(animation.from + (animation.to - animation.from) * eased);
        }
    }

    /// Freeze scrolling; any running animation is cancelled
    pub fn stop(&mut self) {
        self.stopped = true;
        self.animation = None;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Whether the back-to-top button should be shown
    pub fn show_back_to_top(&self) -> bool {
        self.scroll > self.config.back_to_top_threshold
    }

    pub fn event(&self) -> ScrollEvent {
        ScrollEvent {
            scroll: self.scroll,
            limit: self.limit,
            velocity: self.velocity,
            direction: self.direction,
            progress: if self.limit > 0.0 {
                self.scroll / self.limit
            } else {
                0.0
            },
        }
    }

    /// Tear down on unmount: detach every listener and cancel animation
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!(listeners = self.listeners.len(), "destroying scroll controller");
        self.listeners.clear();
        self.anchors.clear();
        self.animation = None;
        self.destroyed = true;
    }

    fn move_to(&mut self, position: f64) {
        if position == self.scroll {
            return;
        }
        self.velocity = position - self.scroll;
        self.direction = if self.velocity > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        self.scroll = position;

        let event = self.event();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl Drop for ScrollController {
    fn drop(&mut self) {
        self.destroy();
    }
}
