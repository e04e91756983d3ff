//! Active layer row on the main screen
//!
//! Three presentations share the row under the "Layer" title: the fixed list
//! of numerals, a single over-max numeral for layers past the list, and the
//! sliding dial. Fixed mode switches between the first two as the layer
//! crosses `max_layers`; dial mode is picked when the screen is built.

use heapless::Vec;
use prospector_display::{Align, Font, Style, Surface, SurfaceError, SurfaceExt, TextAlign, Transform, WidgetId};

use super::Ctx;
use crate::anim::{Easing, Property, Tween};
use crate::config::DisplaySettings;
use crate::format;
use crate::layout::color::{hue_color, layer_color};
use crate::layout::dial::{slot_position, slot_style, DialWindow, DIAL_INACTIVE_COLOR, DIAL_SLOTS, SLOT_SPACING};
use crate::layout::layers::{
    fixed_change, list_label_x, FixedChange, Side, LAYER_Y, LIST_INACTIVE_COLOR, LIST_INACTIVE_OPACITY,
    LIST_LABEL_WIDTH, LIST_SLIDE_IN_OFFSET, MAX_LIST_LAYERS, OVER_MAX_SLIDE,
};

/// Numeral row height
const ROW_HEIGHT: u16 = 32;

const PULSE_MS: u32 = 100;
/// Pulse peak in permille
const PULSE_SCALE: i32 = 1250;
const SLIDE_OUT_MS: u32 = 80;
const SLIDE_IN_MS: u32 = 150;
const SCROLL_MS: u32 = 150;

#[derive(Debug, Clone)]
enum Mode {
    List(Vec<WidgetId, { MAX_LIST_LAYERS as usize }>),
    OverMax(WidgetId),
    Dial {
        labels: [WidgetId; DIAL_SLOTS],
        window: DialWindow,
    },
}

/// Widgets and state of the layer row
#[derive(Debug, Clone)]
pub struct LayerDisplay {
    mode: Mode,
    layer: u8,
}

impl LayerDisplay {
    /// Build the row showing `layer` without animating
    pub fn create<S: Surface + ?Sized>(
        ctx: &mut Ctx<'_, S>,
        layer: u8,
        settings: &DisplaySettings,
    ) -> Result<Self, SurfaceError> {
        let mode = if settings.slide_mode {
            let mut labels = [WidgetId::new(0, 0); DIAL_SLOTS];
            for (i, label) in labels.iter_mut().enumerate() {
                let style = slot_style(i);
                let id = ctx.surface.label(None, "", style.font, DIAL_INACTIVE_COLOR)?;
                ctx.surface.set_style(id, Style::TextAlign(TextAlign::Center))?;
                *label = id;
            }
            Mode::Dial {
                labels,
                window: DialWindow::centered_on(layer),
            }
        } else if layer >= settings.max_layers {
            Mode::OverMax(create_over_max(ctx.surface, layer, 0)?)
        } else {
            Mode::List(create_list(ctx.surface, settings.max_layers)?)
        };

        let display = Self { mode, layer };
        match &display.mode {
            Mode::List(labels) => style_list(ctx.surface, labels, layer),
            Mode::Dial { labels, window } => {
                render_dial(ctx.surface, labels, window, layer, settings.slide_max)
            }
            Mode::OverMax(_) => {}
        }
        Ok(display)
    }

    /// Layer currently shown
    pub fn layer(&self) -> u8 {
        self.layer
    }

    pub fn is_over_max(&self) -> bool {
        matches!(self.mode, Mode::OverMax(_))
    }

    pub fn is_dial(&self) -> bool {
        matches!(self.mode, Mode::Dial { .. })
    }

    /// Dial window start, for dial mode
    pub fn dial_start(&self) -> Option<i32> {
        match &self.mode {
            Mode::Dial { window, .. } => Some(window.start()),
            _ => None,
        }
    }

    /// Widget showing the active layer, if one is on screen
    pub fn active_label(&self) -> Option<WidgetId> {
        match &self.mode {
            Mode::List(labels) => labels.get(self.layer as usize).copied(),
            Mode::OverMax(id) => Some(*id),
            Mode::Dial { labels, window } => {
                let slot = window.slot_of(self.layer);
                usize::try_from(slot).ok().and_then(|i| labels.get(i)).copied()
            }
        }
    }

    /// Show a new layer, animating the change
    pub fn update<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, layer: u8, settings: &DisplaySettings) {
        let previous = self.layer;
        self.layer = layer;

        if let Mode::Dial { labels, window } = &mut self.mode {
            let moved = window.follow(layer);
            render_dial(ctx.surface, labels, window, layer, settings.slide_max);
            if layer != previous {
                if let Ok(slot) = usize::try_from(window.slot_of(layer)) {
                    pulse(ctx, labels[slot]);
                }
                if moved != 0 {
                    let from = moved * SLOT_SPACING as i32;
                    for id in labels.iter() {
                        let tween = Tween::new(*id, Property::TranslateX, from, 0, SCROLL_MS).easing(Easing::EaseOut);
                        ctx.anim.start(ctx.surface, tween, ctx.now);
                    }
                }
            }
            return;
        }

        match fixed_change(self.is_over_max(), previous, layer, settings.max_layers) {
            FixedChange::Highlight { layer, pulse: moved } => {
                // A failed over-max label leaves an empty row behind
                let wanted = settings.max_layers.min(MAX_LIST_LAYERS) as usize;
                if matches!(&self.mode, Mode::List(labels) if labels.len() != wanted) {
                    if let Ok(labels) = create_list(ctx.surface, settings.max_layers) {
                        if let Mode::List(old) = core::mem::replace(&mut self.mode, Mode::List(labels)) {
                            for id in old {
                                if ctx.surface.is_alive(id) {
                                    let _ = ctx.surface.delete(id);
                                }
                            }
                        }
                    }
                }
                if let Mode::List(labels) = &self.mode {
                    style_list(ctx.surface, labels, layer);
                    if moved {
                        if let Some(id) = labels.get(layer as usize) {
                            pulse(ctx, *id);
                        }
                    }
                }
            }
            FixedChange::EnterOverMax { layer } => {
                if let Mode::List(labels) = &self.mode {
                    for (i, id) in labels.iter().enumerate() {
                        let x = list_label_x(i as u8, labels.len() as u8) as i32;
                        let tween = Tween::new(*id, Property::PositionX { y: LAYER_Y }, x, x - OVER_MAX_SLIDE as i32, SLIDE_OUT_MS)
                            .easing(Easing::EaseIn)
                            .delete_on_finish();
                        ctx.anim.start(ctx.surface, tween, ctx.now);
                    }
                }
                self.mode = match slide_in_over_max(ctx, layer, Side::Right) {
                    Ok(id) => Mode::OverMax(id),
                    Err(_) => Mode::List(Vec::new()),
                };
            }
            FixedChange::LeaveOverMax { layer } => {
                if let Mode::OverMax(id) = self.mode {
                    slide_out_over_max(ctx, id, Side::Right);
                }
                let labels = create_list(ctx.surface, settings.max_layers).unwrap_or_default();
                style_list(ctx.surface, &labels, layer);
                for (i, id) in labels.iter().enumerate() {
                    let x = list_label_x(i as u8, labels.len() as u8) as i32;
                    let tween = Tween::new(*id, Property::PositionX { y: LAYER_Y }, x - LIST_SLIDE_IN_OFFSET as i32, x, SLIDE_IN_MS)
                        .easing(Easing::EaseOut);
                    ctx.anim.start(ctx.surface, tween, ctx.now);
                }
                self.mode = Mode::List(labels);
            }
            FixedChange::OverMaxStep { layer, exit } => {
                if let Mode::OverMax(id) = self.mode {
                    slide_out_over_max(ctx, id, exit);
                }
                let entry = match exit {
                    Side::Left => Side::Right,
                    Side::Right => Side::Left,
                };
                self.mode = match slide_in_over_max(ctx, layer, entry) {
                    Ok(id) => Mode::OverMax(id),
                    Err(_) => Mode::List(Vec::new()),
                };
            }
            FixedChange::Unchanged => {}
        }
    }

    /// Delete the row's widgets
    ///
    /// Widgets already handed to the animator for deletion are not touched.
    pub fn delete<S: Surface + ?Sized>(self, surface: &mut S) {
        let mut remove = |id: WidgetId| {
            if surface.is_alive(id) {
                let _ = surface.delete(id);
            }
        };
        match self.mode {
            Mode::List(labels) => labels.into_iter().for_each(&mut remove),
            Mode::OverMax(id) => remove(id),
            Mode::Dial { labels, .. } => labels.into_iter().for_each(&mut remove),
        }
    }
}

fn create_list<S: Surface + ?Sized>(
    surface: &mut S,
    count: u8,
) -> Result<Vec<WidgetId, { MAX_LIST_LAYERS as usize }>, SurfaceError> {
    let count = count.min(MAX_LIST_LAYERS);
    let mut labels: Vec<WidgetId, { MAX_LIST_LAYERS as usize }> = Vec::new();
    for i in 0..count {
        match create_list_label(surface, i, count) {
            Ok(id) => {
                // Capacity matches the clamped count
                let _ = labels.push(id);
            }
            Err(e) => {
                for id in labels {
                    let _ = surface.delete(id);
                }
                return Err(e);
            }
        }
    }
    Ok(labels)
}

fn create_list_label<S: Surface + ?Sized>(surface: &mut S, i: u8, count: u8) -> Result<WidgetId, SurfaceError> {
    let id = surface.label(None, &format::number(i as u32), Font::Montserrat28, LIST_INACTIVE_COLOR)?;
    let styled = surface
        .set_size(id, LIST_LABEL_WIDTH, ROW_HEIGHT)
        .and_then(|_| surface.set_style(id, Style::TextAlign(TextAlign::Center)))
        .and_then(|_| surface.set_position(id, list_label_x(i, count), LAYER_Y));
    if let Err(e) = styled {
        let _ = surface.delete(id);
        return Err(e);
    }
    Ok(id)
}

fn style_list<S: Surface + ?Sized>(surface: &mut S, labels: &[WidgetId], layer: u8) {
    for (i, id) in labels.iter().enumerate() {
        let (color, opacity) = if i == layer as usize {
            (layer_color(i as u8), 100)
        } else {
            (LIST_INACTIVE_COLOR, LIST_INACTIVE_OPACITY)
        };
        let _ = surface.set_style(*id, Style::TextColor(color));
        let _ = surface.set_style(*id, Style::TextOpacity(opacity));
    }
}

fn create_over_max<S: Surface + ?Sized>(surface: &mut S, layer: u8, x: i16) -> Result<WidgetId, SurfaceError> {
    let id = surface.label(None, &format::number(layer as u32), Font::Montserrat28, layer_color(layer % 10))?;
    let placed = surface
        .set_style(id, Style::TextAlign(TextAlign::Center))
        .and_then(|_| surface.align(id, Align::TopMid, x, LAYER_Y));
    if let Err(e) = placed {
        let _ = surface.delete(id);
        return Err(e);
    }
    Ok(id)
}

fn slide_in_over_max<S: Surface + ?Sized>(ctx: &mut Ctx<'_, S>, layer: u8, from: Side) -> Result<WidgetId, SurfaceError> {
    let start = from.offset(OVER_MAX_SLIDE);
    let id = create_over_max(ctx.surface, layer, start)?;
    let tween = Tween::new(id, over_max_x(), start as i32, 0, SLIDE_IN_MS).easing(Easing::EaseOut);
    ctx.anim.start(ctx.surface, tween, ctx.now);
    Ok(id)
}

fn slide_out_over_max<S: Surface + ?Sized>(ctx: &mut Ctx<'_, S>, id: WidgetId, exit: Side) {
    let tween = Tween::new(id, over_max_x(), 0, exit.offset(OVER_MAX_SLIDE) as i32, SLIDE_OUT_MS)
        .easing(Easing::EaseIn)
        .delete_on_finish();
    ctx.anim.start(ctx.surface, tween, ctx.now);
}

fn over_max_x() -> Property {
    Property::AlignX {
        align: Align::TopMid,
        y: LAYER_Y,
    }
}

fn pulse<S: Surface + ?Sized>(ctx: &mut Ctx<'_, S>, id: WidgetId) {
    let tween = Tween::new(id, Property::Scale, 1000, PULSE_SCALE, PULSE_MS)
        .playback(PULSE_MS)
        .easing(Easing::EaseInOut);
    ctx.anim.start(ctx.surface, tween, ctx.now);
}

/// Restyle every dial slot for the current window
fn render_dial<S: Surface + ?Sized>(
    surface: &mut S,
    labels: &[WidgetId; DIAL_SLOTS],
    window: &DialWindow,
    layer: u8,
    slide_max: u8,
) {
    for (i, id) in labels.iter().enumerate() {
        let style = slot_style(i);
        let (x, y) = slot_position(i);
        let _ = surface.set_style(*id, Style::Font(style.font));
        let _ = surface.set_size(*id, style.width, ROW_HEIGHT);
        let _ = surface.set_position(*id, x, y);
        let _ = surface.set_transform(*id, Transform::TranslateX(0));

        let shown = window.slot_layer(i);
        if shown < 0 {
            let _ = surface.set_text(*id, "");
            let _ = surface.set_style(*id, Style::TextOpacity(0));
            continue;
        }
        let _ = surface.set_text(*id, &format::number(shown as u32));
        if shown == layer as i32 {
            let _ = surface.set_style(*id, Style::TextColor(hue_color(layer, slide_max)));
            let _ = surface.set_style(*id, Style::TextOpacity(100));
        } else {
            let _ = surface.set_style(*id, Style::TextColor(DIAL_INACTIVE_COLOR));
            let _ = surface.set_style(*id, Style::TextOpacity(style.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Animator;
    use crate::layout::dial::{LARGE_ZONE_END, LARGE_ZONE_START};
    use prospector_display::Scene;
    use proptest::prelude::*;

    type TestScene = Scene<64>;

    fn fixed(max_layers: u8) -> DisplaySettings {
        DisplaySettings {
            max_layers,
            slide_mode: false,
            ..DisplaySettings::default()
        }
    }

    fn dial(slide_max: u8) -> DisplaySettings {
        DisplaySettings {
            slide_mode: true,
            slide_max,
            ..DisplaySettings::default()
        }
    }

    #[test]
    fn test_list_highlights_active() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);
        let display = LayerDisplay::create(&mut ctx, 2, &fixed(5)).unwrap();
        assert!(!display.is_over_max());

        let active = display.active_label().unwrap();
        let node = scene.node(active).unwrap();
        assert_eq!(node.text.as_str(), "2");
        assert_eq!(node.text_color, layer_color(2));
        assert_eq!(node.text_opacity, 100);

        let first = scene.find_text("0").unwrap();
        assert_eq!(scene.node(first).unwrap().text_opacity, LIST_INACTIVE_OPACITY);
        assert_eq!(scene.widget_count(), 5);
    }

    #[test]
    fn test_layer_change_pulses() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = fixed(7);
        let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 0, &settings).unwrap();

        display.update(&mut Ctx::new(&mut scene, &mut anim, 10), 3, &settings);
        let active = display.active_label().unwrap();
        assert!(anim.is_animating(active));

        // Pulse returns to full size
        anim.step(&mut scene, 500);
        assert_eq!(scene.node(active).unwrap().scale, 1000);
        assert_eq!(anim.active(), 0);
    }

    #[test]
    fn test_over_max_round_trip() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = fixed(7);
        let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 1, &settings).unwrap();

        display.update(&mut Ctx::new(&mut scene, &mut anim, 0), 9, &settings);
        assert!(display.is_over_max());
        let over = display.active_label().unwrap();
        let node = scene.node(over).unwrap();
        assert_eq!(node.text.as_str(), "9");
        // Slides in from the right
        assert_eq!((node.align, node.x), (Some(Align::TopMid), OVER_MAX_SLIDE));
        assert_eq!(node.text_color, layer_color(9));

        anim.step(&mut scene, 1000);
        assert_eq!(scene.node(over).unwrap().x, 0);
        // The old list deleted itself
        assert_eq!(scene.widget_count(), 1);

        display.update(&mut Ctx::new(&mut scene, &mut anim, 1000), 3, &settings);
        assert!(!display.is_over_max());
        anim.step(&mut scene, 2000);
        assert!(!scene.is_alive(over));
        assert_eq!(scene.widget_count(), 7);
        let three = display.active_label().unwrap();
        assert_eq!(scene.node(three).unwrap().x, list_label_x(3, 7));
    }

    #[test]
    fn test_over_max_steps_direction() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = fixed(4);
        let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 5, &settings).unwrap();
        assert!(display.is_over_max());
        let five = display.active_label().unwrap();

        // Falling layer: new numeral comes in from the left
        display.update(&mut Ctx::new(&mut scene, &mut anim, 0), 4, &settings);
        let four = display.active_label().unwrap();
        assert_ne!(four, five);
        assert_eq!(scene.node(four).unwrap().x, -OVER_MAX_SLIDE);
        assert_eq!(scene.node(four).unwrap().text_color, layer_color(4));

        anim.step(&mut scene, 1000);
        assert!(!scene.is_alive(five));

        // Same layer again changes nothing
        display.update(&mut Ctx::new(&mut scene, &mut anim, 1000), 4, &settings);
        assert_eq!(display.active_label(), Some(four));
        assert_eq!(anim.active(), 0);
    }

    #[test]
    fn test_over_max_color_wraps() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 13, &fixed(7)).unwrap();
        let id = display.active_label().unwrap();
        assert_eq!(scene.node(id).unwrap().text_color, layer_color(3));
        assert_eq!(scene.text(id), Some("13"));
    }

    #[test]
    fn test_dial_negative_slots_empty() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 0, &dial(7)).unwrap();
        assert_eq!(display.dial_start(), Some(-2));
        assert_eq!(scene.widget_count(), DIAL_SLOTS);

        let empty = scene.iter().filter(|(_, n)| n.text.is_empty()).count();
        assert_eq!(empty, 2);
        let active = display.active_label().unwrap();
        assert_eq!(scene.text(active), Some("0"));
        assert_eq!(scene.node(active).unwrap().text_color, hue_color(0, 7));
    }

    #[test]
    fn test_dial_scroll_animates() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = dial(10);
        let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 2, &settings).unwrap();

        // Slot of layer 9 would be 9 with start 0; window moves by 3
        display.update(&mut Ctx::new(&mut scene, &mut anim, 0), 9, &settings);
        assert_eq!(display.dial_start(), Some(3));
        let active = display.active_label().unwrap();
        assert_eq!(scene.node(active).unwrap().translate_x, 3 * SLOT_SPACING);

        anim.step(&mut scene, 1000);
        assert!(scene.iter().all(|(_, n)| n.translate_x == 0));
        assert_eq!(anim.active(), 0);
    }

    #[test]
    fn test_delete_cleans_row() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 1, &fixed(10)).unwrap();
        assert_eq!(scene.widget_count(), 10);
        display.delete(&mut scene);
        assert_eq!(scene.widget_count(), 0);
    }

    #[test]
    fn test_list_returns_after_over_max_failure() {
        // Only room for the list, so the over-max numeral cannot be built
        let mut scene = Scene::<7>::new();
        let mut anim = Animator::new();
        let settings = fixed(7);
        let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), 1, &settings).unwrap();

        display.update(&mut Ctx::new(&mut scene, &mut anim, 0), 9, &settings);
        assert!(!display.is_over_max());
        anim.step(&mut scene, 1000);
        assert_eq!(scene.widget_count(), 0);

        display.update(&mut Ctx::new(&mut scene, &mut anim, 1000), 3, &settings);
        assert_eq!(scene.widget_count(), 7);
        let active = display.active_label().unwrap();
        let node = scene.node(active).unwrap();
        assert_eq!(node.text.as_str(), "3");
        assert_eq!(node.text_color, layer_color(3));
    }

    proptest! {
        #[test]
        fn dial_active_stays_in_zone(layers in proptest::collection::vec(0u8..=40, 1..30)) {
            let mut scene = TestScene::new();
            let mut anim = Animator::new();
            let settings = dial(41);
            let mut display = LayerDisplay::create(&mut Ctx::new(&mut scene, &mut anim, 0), layers[0], &settings).unwrap();
            for (t, layer) in layers.iter().enumerate() {
                display.update(&mut Ctx::new(&mut scene, &mut anim, t as u64 * 10), *layer, &settings);
                let start = display.dial_start().unwrap();
                let slot = *layer as i32 - start;
                prop_assert!((LARGE_ZONE_START..=LARGE_ZONE_END).contains(&slot));
                let active = display.active_label().unwrap();
                let expected = format::number(*layer as u32);
                prop_assert_eq!(scene.text(active), Some(expected.as_str()));
            }
        }
    }
}
