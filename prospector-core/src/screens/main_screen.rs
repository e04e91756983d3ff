//! Main status screen
//!
//! Device name, scanner battery, WPM, transport, active layer, modifiers,
//! keyboard batteries and the signal row. Built from the display cache so a
//! return from a side screen shows the last known state at once.

use prospector_display::{Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, TextAlign, WidgetId, WidgetKind};
use prospector_protocol::{BatterySnapshot, SignalSnapshot, TelemetrySnapshot, MAX_BATTERIES};

use super::{label_aligned, label_at, Ctx, LayerDisplay, Owned};
use crate::cache::DisplayCache;
use crate::config::DisplaySettings;
use crate::format;
use crate::layout::battery::{BAR_HEIGHT, BAR_Y, LABEL_Y};
use crate::layout::color::{
    battery_icon, keyboard_battery_color, rssi_bars, rssi_gray, scanner_battery_color, CHARGE_GLYPH,
    CHARGING_COLOR,
};
use crate::layout::{BatteryLayout, BatterySlot, BatteryTracker, SlotState};
use crate::state::ChannelFilter;

/// Shown until a keyboard is heard
pub const SCANNING_TEXT: &str = "Scanning...";

/// Close icon shown for a disconnected battery
const CLOSE_GLYPH: &str = "\u{F00D}";

const LABEL_GRAY: Color = Color::hex(0xA0A0A0);
const DIM_GRAY: Color = Color::hex(0x808080);
const BAR_TRACK: Color = Color::hex(0x202020);
const DISCONNECTED_BAR: Color = Color::hex(0x9E2121);
const DISCONNECTED_TEXT: Color = Color::hex(0xE63030);

const BATTERY_ICON_X: i16 = 216;
const BATTERY_ICON_CHARGING_X: i16 = 213;
const BATTERY_ICON_Y: i16 = 4;

const SIGNAL_Y: i16 = 219;

/// One keyboard battery slot
#[derive(Debug, Clone, Copy)]
struct BatteryWidgets {
    bar: WidgetId,
    percent: WidgetId,
    name: WidgetId,
    nc_bar: WidgetId,
    nc_label: WidgetId,
}

impl BatteryWidgets {
    fn create<S: Surface + ?Sized>(surface: &mut S, owned: &mut Owned<MAIN_WIDGETS>) -> Result<Self, SurfaceError> {
        let bar = owned.add(surface.create(WidgetKind::Bar, None)?)?;
        surface.set_range(bar, 0, 100)?;
        surface.styles(
            bar,
            &[
                Style::BgColor(BAR_TRACK),
                Style::BgOpacity(100),
                Style::Radius(1),
                Style::Opacity(0),
            ],
        )?;

        let percent = owned.add(surface.label(None, "0", Font::Montserrat12, Color::WHITE)?)?;
        surface.set_style(percent, Style::Opacity(0))?;

        let name = owned.add(surface.label(None, "", Font::Montserrat12, DIM_GRAY)?)?;
        surface.styles(name, &[Style::TextAlign(TextAlign::Right), Style::Opacity(0)])?;

        let nc_bar = owned.add(surface.create(WidgetKind::Container, None)?)?;
        surface.styles(
            nc_bar,
            &[
                Style::BgColor(DISCONNECTED_BAR),
                Style::BgOpacity(100),
                Style::Radius(1),
                Style::Opacity(0),
            ],
        )?;

        let nc_label = owned.add(surface.label(None, CLOSE_GLYPH, Font::Montserrat12, DISCONNECTED_TEXT)?)?;
        surface.set_style(nc_label, Style::Opacity(0))?;

        Ok(Self {
            bar,
            percent,
            name,
            nc_bar,
            nc_label,
        })
    }

    fn place<S: Surface + ?Sized>(&self, surface: &mut S, slot: &BatterySlot, visible: bool) {
        let x = slot.x_offset;
        for bar in [self.bar, self.nc_bar] {
            let _ = surface.set_size(bar, slot.width, BAR_HEIGHT);
            let _ = surface.align(bar, Align::BottomMid, x, BAR_Y);
        }
        let _ = surface.align(self.percent, Align::BottomMid, x, LABEL_Y);
        let _ = surface.align(self.nc_label, Align::BottomMid, x, LABEL_Y);
        let _ = surface.align(self.name, Align::BottomMid, slot.name_x(), LABEL_Y);
        let _ = surface.set_text(self.name, if visible { slot.name } else { "" });
    }

    fn show<S: Surface + ?Sized>(&self, surface: &mut S, state: SlotState) {
        let (level, disconnected, name) = match state {
            SlotState::Level(value) => {
                let color = keyboard_battery_color(value);
                let _ = surface.set_value(self.bar, value as i32);
                let _ = surface.set_style(self.bar, Style::IndicatorColor(color));
                let _ = surface.set_text(self.percent, &format::number(value as u32));
                let _ = surface.set_style(self.percent, Style::TextColor(color));
                (true, false, true)
            }
            SlotState::Disconnected => (false, true, true),
            SlotState::Hidden => (false, false, false),
        };
        let opacity = |on: bool| Style::Opacity(if on { 100 } else { 0 });
        let _ = surface.set_style(self.bar, opacity(level));
        let _ = surface.set_style(self.percent, opacity(level));
        let _ = surface.set_style(self.name, opacity(name));
        let _ = surface.set_style(self.nc_bar, opacity(disconnected));
        let _ = surface.set_style(self.nc_label, opacity(disconnected));
    }
}

/// Upper bound on the main screen's top-level widgets, layer row excluded
const MAIN_WIDGETS: usize = 40;

/// Handles of the main screen
pub struct MainWidgets {
    owned: Owned<MAIN_WIDGETS>,
    device_name: WidgetId,
    battery_icon: WidgetId,
    battery_percent: WidgetId,
    wpm: WidgetId,
    transport: WidgetId,
    modifiers: WidgetId,
    channel: WidgetId,
    rssi_bar: WidgetId,
    rssi_label: WidgetId,
    rate_label: WidgetId,
    batteries: [BatteryWidgets; MAX_BATTERIES],
    tracker: BatteryTracker,
    layers: LayerDisplay,
}

impl MainWidgets {
    /// Build the screen and restore every cached value
    pub fn create<S: Surface + ?Sized>(
        ctx: &mut Ctx<'_, S>,
        cache: &DisplayCache,
        settings: &DisplaySettings,
        channel: ChannelFilter,
        usb_powered: bool,
    ) -> Result<Self, SurfaceError> {
        let mut owned = Owned::new();
        let s = &mut *ctx.surface;

        let device_name = owned.add(label_aligned(s, SCANNING_TEXT, Font::Unscii16, Color::WHITE, Align::TopMid, 0, 25)?)?;

        let battery_icon = owned.add(label_at(
            s,
            battery_icon(0),
            Font::Montserrat12,
            Color::WHITE,
            BATTERY_ICON_X,
            BATTERY_ICON_Y,
        )?)?;
        let battery_percent = owned.add(label_at(s, "?", Font::Unscii8, Color::WHITE, 238, 7)?)?;

        owned.add(label_at(s, "WPM", Font::Unscii8, LABEL_GRAY, 20, 53)?)?;
        let wpm = owned.add(label_at(s, "0", Font::Montserrat16, Color::WHITE, 8, 66)?)?;
        s.set_size(wpm, 48, 20)?;
        s.set_style(wpm, Style::TextAlign(TextAlign::Center))?;

        let transport = owned.add(label_aligned(s, "", Font::Montserrat12, Color::WHITE, Align::TopRight, -10, 53)?)?;
        s.styles(transport, &[Style::Recolor(true), Style::TextAlign(TextAlign::Right)])?;

        let layer_title = owned.add(label_aligned(s, "Layer", Font::Montserrat16, LABEL_GRAY, Align::TopMid, 0, 82)?)?;
        s.set_style(layer_title, Style::TextOpacity(70))?;

        let modifiers = owned.add(label_aligned(s, "", Font::NerdFont40, Color::WHITE, Align::TopMid, 0, 145)?)?;
        s.set_style(modifiers, Style::LetterSpace(10))?;

        let batteries = [
            BatteryWidgets::create(s, &mut owned)?,
            BatteryWidgets::create(s, &mut owned)?,
            BatteryWidgets::create(s, &mut owned)?,
            BatteryWidgets::create(s, &mut owned)?,
        ];

        let channel_label = owned.add(label_at(s, &format::channel_label(channel), Font::Montserrat12, DIM_GRAY, 62, SIGNAL_Y)?)?;
        owned.add(label_at(s, "RX:", Font::Montserrat12, DIM_GRAY, 102, SIGNAL_Y)?)?;

        let rssi_bar = owned.add(s.create(WidgetKind::Bar, None)?)?;
        s.set_size(rssi_bar, 30, 8)?;
        s.set_position(rssi_bar, 130, 223)?;
        s.set_range(rssi_bar, 0, 5)?;
        s.styles(
            rssi_bar,
            &[
                Style::BgColor(BAR_TRACK),
                Style::BgOpacity(100),
                Style::Radius(2),
                Style::IndicatorColor(rssi_gray(0)),
            ],
        )?;
        let rssi_label = owned.add(label_at(s, "", Font::Montserrat12, LABEL_GRAY, 167, SIGNAL_Y)?)?;
        let rate_label = owned.add(label_at(s, format::UNKNOWN_RATE, Font::Montserrat12, LABEL_GRAY, 222, SIGNAL_Y)?)?;

        let telemetry = cache.telemetry();
        let layers = LayerDisplay::create(ctx, telemetry.layer, settings)?;

        let mut widgets = Self {
            owned,
            device_name,
            battery_icon,
            battery_percent,
            wpm,
            transport,
            modifiers,
            channel: channel_label,
            rssi_bar,
            rssi_label,
            rate_label,
            batteries,
            tracker: BatteryTracker::new(),
            layers,
        };

        // Restore; the layer row was built at the cached layer already
        widgets.show_telemetry(ctx.surface, telemetry);
        widgets.update_batteries(ctx.surface, telemetry.batteries);
        widgets.update_signal(ctx, cache.signal());
        widgets.update_scanner_battery(ctx, cache.scanner_battery(), usb_powered, settings.battery_visible);
        Ok(widgets)
    }

    /// Render a fresh telemetry snapshot
    ///
    /// `keyboard_changed` forces the battery row to be laid out again.
    pub fn update_telemetry<S: Surface + ?Sized>(
        &mut self,
        ctx: &mut Ctx<'_, S>,
        telemetry: &TelemetrySnapshot,
        settings: &DisplaySettings,
        keyboard_changed: bool,
    ) {
        self.show_telemetry(ctx.surface, telemetry);
        self.layers.update(ctx, telemetry.layer, settings);
        if keyboard_changed {
            self.tracker.invalidate();
        }
        self.update_batteries(ctx.surface, telemetry.batteries);
    }

    fn show_telemetry<S: Surface + ?Sized>(&mut self, surface: &mut S, t: &TelemetrySnapshot) {
        let name = if t.device_name.is_empty() {
            SCANNING_TEXT
        } else {
            t.device_name.as_str()
        };
        let _ = surface.set_text(self.device_name, name);
        let _ = surface.set_text(self.wpm, &format::number(t.wpm as u32));
        let _ = surface.set_text(self.transport, &format::transport(&t.transport, t.profile));
        let _ = surface.set_text(self.modifiers, &format::modifiers(t.modifiers));
    }

    fn update_batteries<S: Surface + ?Sized>(&mut self, surface: &mut S, values: [u8; MAX_BATTERIES]) {
        let update = self.tracker.update(values);
        if let Some(layout) = update.relayout {
            self.apply_layout(surface, &layout);
        }
        for (widgets, state) in self.batteries.iter().zip(update.slots) {
            widgets.show(surface, state);
        }
    }

    fn apply_layout<S: Surface + ?Sized>(&self, surface: &mut S, layout: &BatteryLayout) {
        for (i, (widgets, slot)) in self.batteries.iter().zip(layout.slots()).enumerate() {
            widgets.place(surface, slot, layout.is_visible(i));
        }
    }

    /// Link quality row
    pub fn update_signal<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, signal: &SignalSnapshot) {
        let bars = rssi_bars(signal.rssi);
        let s = &mut *ctx.surface;
        let _ = s.set_value(self.rssi_bar, bars as i32);
        let _ = s.set_style(self.rssi_bar, Style::IndicatorColor(rssi_gray(bars)));
        let _ = s.set_text(self.rssi_label, &format::rssi(signal.rssi));
        let _ = s.set_text(self.rate_label, &format::rate(signal));
    }

    /// Scanner's own battery, top right
    ///
    /// `None` keeps the "?" placeholder until the gauge reports.
    pub fn update_scanner_battery<S: Surface + ?Sized>(
        &mut self,
        ctx: &mut Ctx<'_, S>,
        battery: Option<BatterySnapshot>,
        usb_powered: bool,
        visible: bool,
    ) {
        let s = &mut *ctx.surface;
        let opacity = Style::Opacity(if visible { 100 } else { 0 });
        let _ = s.set_style(self.battery_icon, opacity);
        let _ = s.set_style(self.battery_percent, opacity);
        let Some(battery) = battery.filter(|_| visible) else {
            return;
        };

        let level = battery.level;
        let icon = battery_icon(level);
        if usb_powered {
            let mut text: heapless::String<12> = heapless::String::new();
            let _ = text.push_str(CHARGE_GLYPH);
            let _ = text.push_str(icon);
            let _ = s.set_text(self.battery_icon, &text);
            let _ = s.set_position(self.battery_icon, BATTERY_ICON_CHARGING_X, BATTERY_ICON_Y);
        } else {
            let _ = s.set_text(self.battery_icon, icon);
            let _ = s.set_position(self.battery_icon, BATTERY_ICON_X, BATTERY_ICON_Y);
        }
        let color = if usb_powered {
            CHARGING_COLOR
        } else {
            scanner_battery_color(level)
        };
        let _ = s.set_style(self.battery_icon, Style::TextColor(color));
        let _ = s.set_text(self.battery_percent, &format::number(level as u32));
        let _ = s.set_style(self.battery_percent, Style::TextColor(color));
    }

    /// Channel filter changed on the picker
    pub fn update_channel<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, channel: ChannelFilter) {
        let _ = ctx.surface.set_text(self.channel, &format::channel_label(channel));
    }

    pub fn layers(&self) -> &LayerDisplay {
        &self.layers
    }

    /// Active battery count, `None` before the first layout
    pub fn battery_count(&self) -> Option<u8> {
        self.tracker.count()
    }

    pub fn destroy<S: Surface + ?Sized>(self, ctx: &mut Ctx<'_, S>) {
        ctx.anim.cancel_all(ctx.surface);
        self.layers.delete(ctx.surface);
        let mut owned = self.owned;
        owned.delete_all(ctx.surface);
    }
}
