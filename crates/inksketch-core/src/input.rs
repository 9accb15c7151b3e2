//! Raw pointer/touch events and their mapping to host-local coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    /// Modifier state with only shift held.
    pub fn shift() -> Self {
        Self { shift: true }
    }

    /// Whether the line-constrain modifier is held.
    pub fn constrain(&self) -> bool {
        self.shift
    }
}

/// Where the coordinates of a raw event come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    /// Mouse or pen, positioned relative to the nearest positioned ancestor.
    Mouse { layer: Point },
    /// Touch input.
    Touch {
        /// Page positions of the touches that changed with this event.
        changed: Vec<Point>,
        /// Number of contacts currently on the target element.
        contacts: usize,
    },
}

/// A pointer event as delivered by the canvas host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub input: PointerInput,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl RawEvent {
    /// Mouse event at the given layer position.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            input: PointerInput::Mouse {
                layer: Point::new(x, y),
            },
            modifiers: Modifiers::default(),
        }
    }

    /// Single-contact touch event at the given page position.
    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            input: PointerInput::Touch {
                changed: vec![Point::new(x, y)],
                contacts: 1,
            },
            modifiers: Modifiers::default(),
        }
    }

    /// Touch event with several contacts on the target.
    pub fn multi_touch(points: Vec<Point>) -> Self {
        let contacts = points.len();
        Self {
            input: PointerInput::Touch {
                changed: points,
                contacts,
            },
            modifiers: Modifiers::default(),
        }
    }

    /// Replace the modifier state.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Hold the line-constrain modifier for this event.
    pub fn constrained(self) -> Self {
        self.with_modifiers(Modifiers::shift())
    }

    /// Whether this event came from touch input.
    pub fn is_touch(&self) -> bool {
        matches!(self.input, PointerInput::Touch { .. })
    }

    /// Whether more than one contact is on the target.
    pub fn is_multi_touch(&self) -> bool {
        match &self.input {
            PointerInput::Touch { contacts, .. } => *contacts > 1,
            PointerInput::Mouse { .. } => false,
        }
    }

    /// Whether the line-constrain modifier is held.
    pub fn constrain(&self) -> bool {
        self.modifiers.constrain()
    }
}

/// Position of the host element, subtracted from every event coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HostOffset {
    pub left: f64,
    pub top: f64,
}

impl HostOffset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Map a raw event to host-local coordinates.
///
/// Touch input uses the first changed touch, mouse input the layer position.
/// Returns `None` for a touch event without any changed touches.
pub fn map_event(event: &RawEvent, offset: HostOffset) -> Option<Point> {
    let raw = match &event.input {
        PointerInput::Mouse { layer } => *layer,
        PointerInput::Touch { changed, .. } => *changed.first()?,
    };

    Some(Point::new(raw.x - offset.left, raw.y - offset.top))
}
