//! Slider drag tracking
//!
//! The touch panel is mounted rotated, so the toolkit's own slider handling
//! produces wrong values. Values are recomputed here from the press point and
//! the current point instead. A mostly vertical movement is a swipe that
//! started on the slider: the drag is cancelled and the start value restored,
//! and the gesture is let through.

use prospector_display::{Point, WidgetId};

/// Vertical travel (px) beyond which a drag turns into a swipe
pub const SWIPE_THRESHOLD: i32 = 30;

/// Result of a pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DragStep {
    /// New value to show
    Value(i32),
    /// Drag turned into a swipe; restore this value
    Cancelled(i32),
    /// Already cancelled, or a different widget
    Ignored,
}

/// An in-progress slider drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Drag {
    target: WidgetId,
    start: Point,
    start_value: i32,
    value: i32,
    min: i32,
    max: i32,
    width: i32,
    cancelled: bool,
}

impl Drag {
    /// Record the press
    pub fn begin(target: WidgetId, start: Point, start_value: i32, min: i32, max: i32, width: u16) -> Self {
        Self {
            target,
            start,
            start_value,
            value: start_value,
            min,
            max,
            width: (width as i32).max(1),
            cancelled: false,
        }
    }

    pub fn target(&self) -> WidgetId {
        self.target
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether the drag still blocks gesture processing
    pub fn blocks_gestures(&self) -> bool {
        !self.cancelled
    }

    /// Pointer moved to `point` while pressing `target`
    pub fn moved(&mut self, target: WidgetId, point: Point) -> DragStep {
        if target != self.target || self.cancelled {
            return DragStep::Ignored;
        }

        let dx = point.x as i32 - self.start.x as i32;
        let dy = point.y as i32 - self.start.y as i32;

        if dy.abs() > SWIPE_THRESHOLD && dy.abs() > dx.abs() * 2 {
            self.cancelled = true;
            self.value = self.start_value;
            return DragStep::Cancelled(self.start_value);
        }

        let delta = dx * (self.max - self.min) / self.width;
        self.value = (self.start_value + delta).clamp(self.min, self.max);
        DragStep::Value(self.value)
    }

    /// Finger lifted: the value to commit, `None` if the drag was cancelled
    pub fn release(self) -> Option<i32> {
        if self.cancelled {
            None
        } else {
            Some(self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SLIDER: WidgetId = WidgetId::new(4, 0);

    fn brightness_drag() -> Drag {
        // 1-100 over 200 px, pressed at 50%
        Drag::begin(SLIDER, Point::new(100, 120), 50, 1, 100, 200)
    }

    #[test]
    fn test_horizontal_drag_maps_pixels() {
        let mut drag = brightness_drag();
        assert_eq!(drag.moved(SLIDER, Point::new(140, 122)), DragStep::Value(69));
        assert_eq!(drag.moved(SLIDER, Point::new(60, 118)), DragStep::Value(31));
        assert_eq!(drag.release(), Some(31));
    }

    #[test]
    fn test_value_clamped() {
        let mut drag = brightness_drag();
        assert_eq!(drag.moved(SLIDER, Point::new(400, 120)), DragStep::Value(100));
        assert_eq!(drag.moved(SLIDER, Point::new(-300, 120)), DragStep::Value(1));
    }

    #[test]
    fn test_vertical_swipe_cancels() {
        let mut drag = brightness_drag();
        drag.moved(SLIDER, Point::new(120, 120));
        assert_eq!(drag.moved(SLIDER, Point::new(110, 160)), DragStep::Cancelled(50));
        assert!(!drag.blocks_gestures());
        // Later moves are ignored
        assert_eq!(drag.moved(SLIDER, Point::new(200, 120)), DragStep::Ignored);
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn test_diagonal_is_not_a_swipe() {
        let mut drag = brightness_drag();
        // dy 40 but not more than twice dx 30
        assert_eq!(drag.moved(SLIDER, Point::new(130, 160)), DragStep::Value(64));
    }

    #[test]
    fn test_other_widget_ignored() {
        let mut drag = brightness_drag();
        assert_eq!(
            drag.moved(WidgetId::new(5, 0), Point::new(150, 120)),
            DragStep::Ignored
        );
        assert_eq!(drag.value(), 50);
    }

    proptest! {
        #[test]
        fn value_always_in_range(
            start in 4i32..=10,
            moves in proptest::collection::vec((-300i16..300, -300i16..300), 0..20),
        ) {
            let mut drag = Drag::begin(SLIDER, Point::new(0, 0), start, 4, 10, 180);
            for (x, y) in moves {
                if let DragStep::Value(v) | DragStep::Cancelled(v) = drag.moved(SLIDER, Point::new(x, y)) {
                    prop_assert!((4..=10).contains(&v));
                }
            }
            if let Some(v) = drag.release() {
                prop_assert!((4..=10).contains(&v));
            }
        }
    }
}
