use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Record;

pub const DEFAULT_HOVER_THROTTLE: Duration = Duration::from_millis(25);

/// Pointer position in client (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Position relative to a container whose top-left corner sits at `origin`.
    #[must_use]
    pub fn relative_to(self, origin: (f64, f64)) -> (f64, f64) {
        (self.client_x - origin.0, self.client_y - origin.1)
    }
}

/// What the pointer is over, with enough context to build a tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct HoveredDatum {
    /// Shape identity, or the index value of a line slice.
    pub identity: String,
    pub key: Option<String>,
    pub value: Option<f64>,
    pub color: Option<String>,
    pub record: Option<Record>,
    /// Whether the hovered series holds the largest value of its slice.
    pub is_max: bool,
}

impl HoveredDatum {
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            key: None,
            value: None,
            color: None,
            record: None,
            is_max: false,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_record(mut self, record: Option<Record>) -> Self {
        self.record = record;
        self
    }
}

/// Public hover state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoverState {
    pub visible: bool,
    /// Pointer position relative to the chart container.
    pub position: (f64, f64),
    pub datum: Option<HoveredDatum>,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingMove {
    position: (f64, f64),
    datum: HoveredDatum,
}

/// Per-chart hover tracking with a leading + trailing throttle.
///
/// The first move after a quiet period applies at once; moves inside the
/// throttle window replace a single pending update which [`flush`] applies
/// once the window has elapsed. Leaving is never throttled.
///
/// [`flush`]: HoverRegistry::flush
#[derive(Debug, Clone, PartialEq)]
pub struct HoverRegistry {
    state: HoverState,
    throttle: Duration,
    last_applied: Option<Duration>,
    pending: Option<PendingMove>,
}

impl Default for HoverRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_THROTTLE)
    }
}

impl HoverRegistry {
    #[must_use]
    pub fn new(throttle: Duration) -> Self {
        Self {
            state: HoverState::default(),
            throttle,
            last_applied: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &HoverState {
        &self.state
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_open(&self, now: Duration) -> bool {
        self.last_applied
            .is_none_or(|last| now.saturating_sub(last) >= self.throttle)
    }

    fn apply(&mut self, position: (f64, f64), datum: HoveredDatum, now: Duration) {
        self.state = HoverState {
            visible: true,
            position,
            datum: Some(datum),
        };
        self.last_applied = Some(now);
        self.pending = None;
    }

    /// Records a pointer move over `datum`. Returns whether the visible state
    /// changed now (as opposed to being deferred).
    pub fn on_pointer_move(
        &mut self,
        event: PointerEvent,
        origin: (f64, f64),
        datum: HoveredDatum,
        now: Duration,
    ) -> bool {
        let position = event.relative_to(origin);
        if self.window_open(now) {
            self.apply(position, datum, now);
            true
        } else {
            trace!(x = position.0, y = position.1, "hover update deferred");
            self.pending = Some(PendingMove { position, datum });
            false
        }
    }

    /// Hides the tooltip immediately and drops any deferred move.
    pub fn on_pointer_leave(&mut self) -> bool {
        self.pending = None;
        let changed = self.state.visible;
        self.state.visible = false;
        changed
    }

    /// Applies the deferred move once the throttle window has elapsed.
    pub fn flush(&mut self, now: Duration) -> bool {
        if self.pending.is_none() || !self.window_open(now) {
            return false;
        }
        match self.pending.take() {
            Some(PendingMove { position, datum }) => {
                self.apply(position, datum, now);
                true
            }
            None => false,
        }
    }

    /// Forgets everything, including the throttle window.
    pub fn clear(&mut self) {
        self.state = HoverState::default();
        self.last_applied = None;
        self.pending = None;
    }
}
