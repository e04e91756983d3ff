//! Widget animator
//!
//! Finite-duration tweens stored in a fixed table and advanced by the UI loop.
//! A tween may own its widget (`OnFinish::Delete`): the widget is deleted when
//! the tween completes or is cancelled, whichever comes first, so a widget that
//! is sliding out never outlives its screen.
//!
//! Values are interpolated with integer permille progress.

use heapless::Vec;
use prospector_display::{Align, Surface, Transform, WidgetId};

/// Concurrent tween capacity
pub const MAX_TWEENS: usize = 24;

/// Interpolation curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow
    EaseIn,
    /// Ends slow
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress (0-1000) to eased progress (0-1000)
    pub fn apply(self, t: u32) -> u32 {
        let t = t.min(1000);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t / 1000,
            Easing::EaseOut => {
                let r = 1000 - t;
                1000 - r * r / 1000
            }
            Easing::EaseInOut => {
                if t < 500 {
                    2 * t * t / 1000
                } else {
                    let r = 1000 - t;
                    1000 - 2 * r * r / 1000
                }
            }
        }
    }
}

/// Animated widget property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Property {
    /// X offset from an anchor, y held fixed
    AlignX { align: Align, y: i16 },
    /// Absolute x, y held fixed
    PositionX { y: i16 },
    /// Render-time x offset
    TranslateX,
    /// Render-time scale in permille
    Scale,
}

impl Property {
    fn same_channel(&self, other: &Property) -> bool {
        use Property::*;
        // Both position variants move the same coordinate
        matches!(
            (self, other),
            (AlignX { .. } | PositionX { .. }, AlignX { .. } | PositionX { .. })
                | (TranslateX, TranslateX)
                | (Scale, Scale)
        )
    }

    fn apply<S: Surface + ?Sized>(&self, surface: &mut S, target: WidgetId, value: i32) {
        let v = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let _ = match *self {
            Property::AlignX { align, y } => surface.align(target, align, v, y),
            Property::PositionX { y } => surface.set_position(target, v, y),
            Property::TranslateX => surface.set_transform(target, Transform::TranslateX(v)),
            Property::Scale => {
                surface.set_transform(target, Transform::Scale(value.clamp(0, u16::MAX as i32) as u16))
            }
        };
    }
}

/// What happens to the widget once the tween is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnFinish {
    #[default]
    Keep,
    /// The animator owns the widget and deletes it
    Delete,
}

/// One interpolation task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tween {
    pub target: WidgetId,
    pub property: Property,
    pub from: i32,
    pub to: i32,
    pub duration_ms: u32,
    /// Return leg back to `from`; zero for none
    pub playback_ms: u32,
    pub easing: Easing,
    pub on_finish: OnFinish,
}

impl Tween {
    pub fn new(target: WidgetId, property: Property, from: i32, to: i32, duration_ms: u32) -> Self {
        Self {
            target,
            property,
            from,
            to,
            duration_ms,
            playback_ms: 0,
            easing: Easing::Linear,
            on_finish: OnFinish::Keep,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn playback(mut self, playback_ms: u32) -> Self {
        self.playback_ms = playback_ms;
        self
    }

    /// Hand the widget to the animator
    pub fn delete_on_finish(mut self) -> Self {
        self.on_finish = OnFinish::Delete;
        self
    }

    /// Value the property settles at
    pub fn final_value(&self) -> i32 {
        if self.playback_ms > 0 {
            self.from
        } else {
            self.to
        }
    }

    /// Value at `elapsed` ms, or `None` once finished
    pub fn value_at(&self, elapsed: u64) -> Option<i32> {
        let duration = self.duration_ms as u64;
        let playback = self.playback_ms as u64;
        if elapsed < duration {
            let t = (elapsed * 1000 / duration) as u32;
            Some(lerp(self.from, self.to, self.easing.apply(t)))
        } else if elapsed < duration + playback {
            let t = ((elapsed - duration) * 1000 / playback) as u32;
            Some(lerp(self.to, self.from, self.easing.apply(t)))
        } else {
            None
        }
    }
}

fn lerp(from: i32, to: i32, permille: u32) -> i32 {
    from + ((to - from) as i64 * permille as i64 / 1000) as i32
}

#[derive(Debug, Clone, Copy)]
struct Running {
    tween: Tween,
    started: u64,
}

/// Fixed-capacity tween table
pub struct Animator {
    running: Vec<Running, MAX_TWEENS>,
}

impl Animator {
    pub const fn new() -> Self {
        Self {
            running: Vec::new(),
        }
    }

    /// Start a tween, applying its first value immediately
    ///
    /// A tween already running on the same target and property is replaced;
    /// if that one owned the widget, the new one inherits ownership. With the
    /// table full the tween completes instantly instead.
    pub fn start<S: Surface + ?Sized>(&mut self, surface: &mut S, mut tween: Tween, now: u64) {
        if !surface.is_alive(tween.target) {
            return;
        }

        if let Some(pos) = self.running.iter().position(|r| {
            r.tween.target == tween.target && r.tween.property.same_channel(&tween.property)
        }) {
            let replaced = self.running.swap_remove(pos);
            if replaced.tween.on_finish == OnFinish::Delete {
                tween.on_finish = OnFinish::Delete;
            }
        }

        if tween.duration_ms == 0 {
            Self::finish(surface, &tween);
            return;
        }

        tween.property.apply(surface, tween.target, tween.from);
        if let Err(overflow) = self.running.push(Running { tween, started: now }) {
            Self::finish(surface, &overflow.tween);
        }
    }

    /// Advance every tween to `now`
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S, now: u64) {
        let mut i = 0;
        while i < self.running.len() {
            let Running { tween, started } = self.running[i];
            if !surface.is_alive(tween.target) {
                self.running.swap_remove(i);
                continue;
            }
            match tween.value_at(now.saturating_sub(started)) {
                Some(value) => {
                    tween.property.apply(surface, tween.target, value);
                    i += 1;
                }
                None => {
                    self.running.swap_remove(i);
                    Self::finish(surface, &tween);
                }
            }
        }
    }

    /// Stop every tween on `target` where it is
    ///
    /// A widget owned by one of the stopped tweens is deleted now.
    pub fn cancel<S: Surface + ?Sized>(&mut self, surface: &mut S, target: WidgetId) {
        let mut owned = false;
        self.running.retain(|r| {
            if r.tween.target == target {
                owned |= r.tween.on_finish == OnFinish::Delete;
                false
            } else {
                true
            }
        });
        if owned {
            let _ = surface.delete(target);
        }
    }

    /// Stop everything, deleting owned widgets
    pub fn cancel_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for r in self.running.iter() {
            if r.tween.on_finish == OnFinish::Delete {
                let _ = surface.delete(r.tween.target);
            }
        }
        self.running.clear();
    }

    pub fn is_animating(&self, target: WidgetId) -> bool {
        self.running.iter().any(|r| r.tween.target == target)
    }

    /// Number of running tweens
    pub fn active(&self) -> usize {
        self.running.len()
    }

    fn finish<S: Surface + ?Sized>(surface: &mut S, tween: &Tween) {
        match tween.on_finish {
            OnFinish::Keep => tween.property.apply(surface, tween.target, tween.final_value()),
            OnFinish::Delete => {
                let _ = surface.delete(tween.target);
            }
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
