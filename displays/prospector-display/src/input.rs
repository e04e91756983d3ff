//! Touch events routed back from the widget toolkit

use crate::surface::WidgetId;

/// Raw touch coordinate in panel pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Widget-level input event
///
/// Press/drag/release carry raw coordinates: the panel is mounted rotated,
/// so slider values are recomputed from them rather than taken from the
/// toolkit's own drag handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Short tap released over the widget
    Clicked(WidgetId),
    /// Finger went down on the widget
    Pressed { target: WidgetId, point: Point },
    /// Finger moved while pressed
    Pressing { target: WidgetId, point: Point },
    /// Finger lifted
    Released { target: WidgetId, point: Point },
    /// Switch changed state
    Toggled { target: WidgetId, checked: bool },
}

impl UiEvent {
    /// Widget the event was delivered to
    pub fn target(&self) -> WidgetId {
        match *self {
            UiEvent::Clicked(target) => target,
            UiEvent::Pressed { target, .. }
            | UiEvent::Pressing { target, .. }
            | UiEvent::Released { target, .. }
            | UiEvent::Toggled { target, .. } => target,
        }
    }

    /// Touch point, for pointer events
    pub fn point(&self) -> Option<Point> {
        match *self {
            UiEvent::Pressed { point, .. }
            | UiEvent::Pressing { point, .. }
            | UiEvent::Released { point, .. } => Some(point),
            _ => None,
        }
    }
}
