//! Display settings screen
//!
//! Brightness (auto switch and manual slider), scanner battery visibility,
//! max fixed layers and dial mode. The screen only edits widgets and reports
//! what the user changed; the app applies it.

use prospector_display::{Align, Color, Font, Surface, SurfaceError, UiEvent, WidgetId};

use super::{label_aligned, label_at, nav_hint, set_disabled, slider, toggle, Ctx, Owned, GLYPH_UP, SLIDER_WIDTH};
use crate::config::{DisplaySettings, MAX_MANUAL_BRIGHTNESS, MAX_MAX_LAYERS, MIN_MANUAL_BRIGHTNESS, MIN_MAX_LAYERS};
use crate::format;
use crate::slider::{Drag, DragStep};

const VALUE_BLUE: Color = Color::hex(0x007AFF);
const SUBTLE: Color = Color::hex(0xAAAAAA);

/// A setting the user changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsAction {
    AutoBrightness(bool),
    /// Slider moving; apply to the backlight without storing
    PreviewBrightness(u8),
    /// Slider released
    ManualBrightness(u8),
    BatteryVisible(bool),
    MaxLayers(u8),
    SlideMode(bool),
}

pub struct DisplaySettingsWidgets {
    owned: Owned<16>,
    auto_switch: WidgetId,
    brightness_slider: WidgetId,
    brightness_value: WidgetId,
    battery_switch: WidgetId,
    layer_slider: WidgetId,
    layer_value: WidgetId,
    slide_switch: WidgetId,
    /// Auto brightness is on and a sensor backs it
    auto_active: bool,
}

impl DisplaySettingsWidgets {
    pub fn create<S: Surface + ?Sized>(
        ctx: &mut Ctx<'_, S>,
        settings: &DisplaySettings,
        sensor_available: bool,
    ) -> Result<Self, SurfaceError> {
        let s = &mut *ctx.surface;
        let mut owned = Owned::new();

        owned.add(label_aligned(s, "Display Settings", Font::Montserrat18, Color::WHITE, Align::TopMid, 0, 15)?)?;

        // Brightness row
        let mut y = 50;
        owned.add(label_at(s, "Brightness", Font::Montserrat16, Color::WHITE, 15, y)?)?;
        let auto_text = if sensor_available { "Auto" } else { "Auto (No sensor)" };
        owned.add(label_at(s, auto_text, Font::Montserrat12, SUBTLE, 195, y + 4)?)?;
        let auto_active = settings.auto_brightness && sensor_available;
        let auto_switch = owned.add(toggle(s, 230, y, auto_active)?)?;
        if !sensor_available {
            set_disabled(s, auto_switch, true);
        }

        y += 35;
        let brightness_slider = owned.add(slider(
            s,
            15,
            y + 8,
            MIN_MANUAL_BRIGHTNESS as i32,
            MAX_MANUAL_BRIGHTNESS as i32,
            settings.manual_brightness as i32,
        )?)?;
        if auto_active {
            set_disabled(s, brightness_slider, true);
        }
        let brightness_value = owned.add(label_at(
            s,
            &format::percent(settings.manual_brightness),
            Font::Montserrat16,
            VALUE_BLUE,
            230,
            y,
        )?)?;

        // Scanner battery row
        y += 30;
        owned.add(label_at(s, "Scanner Battery", Font::Montserrat16, Color::WHITE, 15, y)?)?;
        let battery_switch = owned.add(toggle(s, 230, y - 3, settings.battery_visible)?)?;

        // Layers row
        y += 35;
        owned.add(label_at(s, "Max Layers", Font::Montserrat16, Color::WHITE, 15, y)?)?;
        owned.add(label_at(s, "Slide", Font::Montserrat12, SUBTLE, 195, y + 4)?)?;
        let slide_switch = owned.add(toggle(s, 230, y, settings.slide_mode)?)?;

        y += 35;
        let layer_slider = owned.add(slider(
            s,
            15,
            y + 8,
            MIN_MAX_LAYERS as i32,
            MAX_MAX_LAYERS as i32,
            settings.max_layers as i32,
        )?)?;
        let layer_value = owned.add(label_at(
            s,
            &format::number(settings.max_layers as u32),
            Font::Montserrat16,
            VALUE_BLUE,
            230,
            y,
        )?)?;

        owned.add(nav_hint(s, GLYPH_UP)?)?;

        Ok(Self {
            owned,
            auto_switch,
            brightness_slider,
            brightness_value,
            battery_switch,
            layer_slider,
            layer_value,
            slide_switch,
            auto_active,
        })
    }

    /// React to a touch event
    ///
    /// `drag` is the loop's slider drag slot: set on press, cleared on
    /// release.
    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        ctx: &mut Ctx<'_, S>,
        event: UiEvent,
        settings: &DisplaySettings,
        drag: &mut Option<Drag>,
    ) -> Option<SettingsAction> {
        match event {
            UiEvent::Pressed { target, point } => {
                let (start, min, max) = if target == self.brightness_slider && !self.auto_active {
                    (settings.manual_brightness, MIN_MANUAL_BRIGHTNESS, MAX_MANUAL_BRIGHTNESS)
                } else if target == self.layer_slider {
                    (settings.max_layers, MIN_MAX_LAYERS, MAX_MAX_LAYERS)
                } else {
                    return None;
                };
                *drag = Some(Drag::begin(target, point, start as i32, min as i32, max as i32, SLIDER_WIDTH));
                None
            }
            UiEvent::Pressing { target, point } => {
                let step = drag.as_mut()?.moved(target, point);
                match step {
                    DragStep::Value(v) | DragStep::Cancelled(v) => self.show_drag(ctx, target, v),
                    DragStep::Ignored => None,
                }
            }
            UiEvent::Released { target, .. } => {
                let finished = drag.take()?;
                let value = finished.release()? as u8;
                if finished.target() != target {
                    return None;
                }
                if target == self.brightness_slider {
                    Some(SettingsAction::ManualBrightness(value))
                } else {
                    Some(SettingsAction::MaxLayers(value))
                }
            }
            UiEvent::Toggled { target, checked } => {
                if target == self.auto_switch {
                    self.auto_active = checked;
                    set_disabled(ctx.surface, self.brightness_slider, checked);
                    Some(SettingsAction::AutoBrightness(checked))
                } else if target == self.battery_switch {
                    Some(SettingsAction::BatteryVisible(checked))
                } else if target == self.slide_switch {
                    Some(SettingsAction::SlideMode(checked))
                } else {
                    None
                }
            }
            UiEvent::Clicked(_) => None,
        }
    }

    /// Move a slider and its value label to `value`
    fn show_drag<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, target: WidgetId, value: i32) -> Option<SettingsAction> {
        let _ = ctx.surface.set_value(target, value);
        let value = value as u8;
        if target == self.brightness_slider {
            let _ = ctx.surface.set_text(self.brightness_value, &format::percent(value));
            Some(SettingsAction::PreviewBrightness(value))
        } else {
            let _ = ctx.surface.set_text(self.layer_value, &format::number(value as u32));
            None
        }
    }

    pub fn destroy<S: Surface + ?Sized>(self, ctx: &mut Ctx<'_, S>) {
        ctx.anim.cancel_all(ctx.surface);
        let mut owned = self.owned;
        owned.delete_all(ctx.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Animator;
    use prospector_display::{Point, Scene};

    type TestScene = Scene<32>;

    fn build(scene: &mut TestScene, anim: &mut Animator, settings: &DisplaySettings, sensor: bool) -> DisplaySettingsWidgets {
        DisplaySettingsWidgets::create(&mut Ctx::new(scene, anim, 0), settings, sensor).unwrap()
    }

    #[test]
    fn test_layout_reflects_settings() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings {
            battery_visible: false,
            slide_mode: true,
            ..DisplaySettings::default()
        };
        let w = build(&mut scene, &mut anim, &settings, true);

        assert_eq!(scene.text(w.brightness_value), Some("65%"));
        assert_eq!(scene.text(w.layer_value), Some("7"));
        assert!(!scene.node(w.battery_switch).unwrap().checked);
        assert!(scene.node(w.slide_switch).unwrap().checked);
        let layer_slider = scene.node(w.layer_slider).unwrap();
        assert_eq!((layer_slider.min, layer_slider.max, layer_slider.value), (4, 10, 7));
        assert!(scene.find_text("Auto").is_some());
        assert!(scene.find_text("\u{F077} Main").is_some());
    }

    #[test]
    fn test_no_sensor_disables_auto() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let w = build(&mut scene, &mut anim, &DisplaySettings::default(), false);
        let switch = scene.node(w.auto_switch).unwrap();
        assert!(!switch.enabled);
        assert_eq!(switch.opacity, 50);
        assert!(scene.find_text("Auto (No sensor)").is_some());
    }

    #[test]
    fn test_auto_toggle_greys_slider() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings::default();
        let mut w = build(&mut scene, &mut anim, &settings, true);
        let mut drag = None;

        let action = w.handle_event(
            &mut Ctx::new(&mut scene, &mut anim, 0),
            UiEvent::Toggled {
                target: w.auto_switch,
                checked: true,
            },
            &settings,
            &mut drag,
        );
        assert_eq!(action, Some(SettingsAction::AutoBrightness(true)));
        let slider = scene.node(w.brightness_slider).unwrap();
        assert_eq!((slider.enabled, slider.opacity), (false, 50));
    }

    #[test]
    fn test_brightness_drag_previews_then_commits() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings::default();
        let mut w = build(&mut scene, &mut anim, &settings, true);
        let target = w.brightness_slider;
        let mut drag = None;
        let mut send = |w: &mut DisplaySettingsWidgets, drag: &mut Option<Drag>, event| {
            w.handle_event(&mut Ctx::new(&mut scene, &mut anim, 0), event, &settings, drag)
        };

        send(&mut w, &mut drag, UiEvent::Pressed { target, point: Point::new(100, 90) });
        assert!(drag.is_some());
        // 36 px of 180 over a range of 99: +19
        let action = send(&mut w, &mut drag, UiEvent::Pressing { target, point: Point::new(136, 92) });
        assert_eq!(action, Some(SettingsAction::PreviewBrightness(84)));
        let action = send(&mut w, &mut drag, UiEvent::Released { target, point: Point::new(136, 92) });
        assert_eq!(action, Some(SettingsAction::ManualBrightness(84)));
        assert!(drag.is_none());
        assert_eq!(scene.text(w.brightness_value), Some("84%"));
        assert_eq!(scene.node(target).unwrap().value, 84);
    }

    #[test]
    fn test_vertical_swipe_restores_slider() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings::default();
        let mut w = build(&mut scene, &mut anim, &settings, true);
        let target = w.layer_slider;
        let mut drag = None;
        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);

        w.handle_event(&mut ctx, UiEvent::Pressed { target, point: Point::new(50, 150) }, &settings, &mut drag);
        w.handle_event(&mut ctx, UiEvent::Pressing { target, point: Point::new(110, 150) }, &settings, &mut drag);
        assert_eq!(ctx.surface.text(w.layer_value), Some("9"));
        w.handle_event(&mut ctx, UiEvent::Pressing { target, point: Point::new(55, 220) }, &settings, &mut drag);
        assert!(!drag.unwrap().blocks_gestures());
        let action = w.handle_event(&mut ctx, UiEvent::Released { target, point: Point::new(55, 220) }, &settings, &mut drag);
        assert_eq!(action, None);
        assert_eq!(scene.node(target).unwrap().value, 7);
        assert_eq!(scene.text(w.layer_value), Some("7"));
    }

    #[test]
    fn test_disabled_brightness_slider_ignores_press() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings {
            auto_brightness: true,
            ..DisplaySettings::default()
        };
        let mut w = build(&mut scene, &mut anim, &settings, true);
        let mut drag = None;
        let target = w.brightness_slider;
        w.handle_event(
            &mut Ctx::new(&mut scene, &mut anim, 0),
            UiEvent::Pressed { target, point: Point::new(10, 10) },
            &settings,
            &mut drag,
        );
        assert!(drag.is_none());
    }

    #[test]
    fn test_auto_without_sensor_keeps_slider_usable() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let settings = DisplaySettings {
            auto_brightness: true,
            ..DisplaySettings::default()
        };
        let mut w = build(&mut scene, &mut anim, &settings, false);
        let switch = scene.node(w.auto_switch).unwrap();
        assert!(!switch.enabled && !switch.checked);
        assert!(scene.node(w.brightness_slider).unwrap().enabled);

        let mut drag = None;
        let target = w.brightness_slider;
        w.handle_event(
            &mut Ctx::new(&mut scene, &mut anim, 0),
            UiEvent::Pressed { target, point: Point::new(100, 90) },
            &settings,
            &mut drag,
        );
        assert!(drag.is_some());
    }

    #[test]
    fn test_destroy() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let w = build(&mut scene, &mut anim, &DisplaySettings::default(), true);
        w.destroy(&mut Ctx::new(&mut scene, &mut anim, 0));
        assert_eq!(scene.widget_count(), 0);
    }
}
