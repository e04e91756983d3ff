//! Application controller
//!
//! Owns the render surface, the board collaborators and the current screen,
//! and drives them from one cooperative loop:
//! - `tick` handles at most one gesture, drains the mailboxes while Main is
//!   showing, runs the per-screen schedules and steps animations
//! - `handle_ui_event` forwards touch events to the current screen
//! - `transition` swaps screens while the relay's busy flag is held
//!
//! Nothing here logs. Whatever the firmware should hear about comes back as
//! `Notices`.

use heapless::Vec;
use prospector_display::{Surface, SurfaceError, UiEvent};
use prospector_protocol::SwipeDirection;

use crate::anim::Animator;
use crate::cache::{DisplayCache, TelemetryChange};
use crate::config::{DisplaySettings, ScannerConfig};
use crate::layout::dial::grow_max;
use crate::pong::STEP_MS;
use crate::relay::Relay;
use crate::screens::display_settings::SettingsAction;
use crate::screens::keyboard_select::REFRESH_MS;
use crate::screens::{
    Ctx, DisplaySettingsWidgets, KeyboardSelectWidgets, MainWidgets, PongWarsScreen, ScreenWidgets,
    SystemSettingsWidgets,
};
use crate::slider::Drag;
use crate::state::{ChannelFilter, ChannelStep, Navigation, ScreenState};
use crate::traits::{
    clamp_brightness, Backlight, BacklightError, KeyboardRoster, LightSensor, Platform, RebootMode,
    SensorError,
};

/// Light sensor poll period
pub const LIGHT_POLL_MS: u64 = 1000;

/// Pong steps run back to back when the loop fell behind
pub const MAX_CATCH_UP_STEPS: u8 = 4;

/// Notices one call can return
pub const MAX_NOTICES: usize = 8;

/// Errors surfaced to the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// Building a screen failed
    Surface(SurfaceError),
    Backlight(BacklightError),
    Sensor(SensorError),
}

impl From<SurfaceError> for UiError {
    fn from(e: SurfaceError) -> Self {
        UiError::Surface(e)
    }
}

impl From<BacklightError> for UiError {
    fn from(e: BacklightError) -> Self {
        UiError::Backlight(e)
    }
}

impl From<SensorError> for UiError {
    fn from(e: SensorError) -> Self {
        UiError::Sensor(e)
    }
}

/// Why a swipe did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// A transition was in progress
    Busy,
    /// A slider is being dragged
    Dragging,
    /// No route for this direction on the current screen
    NoRoute,
}

/// Something the firmware should log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    Transition { from: ScreenState, to: ScreenState },
    GestureIgnored { direction: SwipeDirection, reason: IgnoreReason },
    ChannelChanged(ChannelFilter),
    /// Every keyboard timed out
    ResetToScanning,
    KeyboardChanged,
    BrightnessApplied(u8),
    Reboot(RebootMode),
    Error(UiError),
}

pub type Notices = Vec<Notice, MAX_NOTICES>;

/// Work left over once a screen has seen a touch event
enum Followup {
    Setting(SettingsAction),
    Channel(ChannelFilter),
    Reboot(RebootMode),
}

/// Display engine
pub struct App<S, B, L, K, P> {
    surface: S,
    backlight: B,
    sensor: L,
    roster: K,
    platform: P,
    timeout_brightness: Option<u8>,
    fixed_brightness: Option<u8>,
    settings: DisplaySettings,
    cache: DisplayCache,
    screen: ScreenState,
    widgets: ScreenWidgets,
    anim: Animator,
    drag: Option<Drag>,
    channel: ChannelFilter,
    touch_registered: bool,
    next_refresh: u64,
    next_pong: u64,
    next_light: u64,
}

impl<S, B, L, K, P> App<S, B, L, K, P>
where
    S: Surface,
    B: Backlight,
    L: LightSensor,
    K: KeyboardRoster,
    P: Platform,
{
    pub fn new(surface: S, backlight: B, sensor: L, mut roster: K, platform: P, config: &ScannerConfig) -> Self {
        let config = config.normalized();
        let mut settings = DisplaySettings::from_config(&config);
        // Nothing would ever poll; keep the manual level in charge
        settings.auto_brightness &= sensor.is_available();
        let channel = ChannelFilter::new(config.system.channel);
        roster.set_channel(channel.value());
        Self {
            surface,
            backlight,
            sensor,
            roster,
            platform,
            timeout_brightness: config.timeout_brightness(),
            fixed_brightness: config.fixed_brightness(),
            settings,
            cache: DisplayCache::new(),
            screen: ScreenState::Main,
            widgets: ScreenWidgets::Empty,
            anim: Animator::new(),
            drag: None,
            channel,
            touch_registered: false,
            next_refresh: 0,
            next_pong: 0,
            next_light: 0,
        }
    }

    /// Build Main and light the backlight
    pub fn start(&mut self, now: u64) -> Notices {
        let mut notices = Notices::new();
        self.screen = ScreenState::Main;
        if let Err(e) = self.build(ScreenState::Main, now) {
            push(&mut notices, Notice::Error(e.into()));
        }
        let manual = self.settings.manual_brightness;
        self.apply_brightness(manual, &mut notices);
        self.next_light = now;
        notices
    }

    /// One pass of the UI loop
    pub fn tick(&mut self, relay: &Relay, now: u64) -> Notices {
        let mut notices = Notices::new();

        if let Some(direction) = relay.gesture.take() {
            self.on_gesture(relay, direction, now, &mut notices);
        }

        if self.screen.consumes_telemetry() && !relay.is_simulation_active() {
            self.drain(relay, now, &mut notices);
        }

        self.run_schedules(relay, now);

        if self.settings.auto_brightness && self.sensor.is_available() && now >= self.next_light {
            self.next_light = now + LIGHT_POLL_MS;
            match self.sensor.read() {
                Ok(raw) => {
                    let level = self.sensor.map_to_brightness(raw);
                    self.apply_brightness(level, &mut notices);
                }
                Err(e) => push(&mut notices, Notice::Error(e.into())),
            }
        }

        self.anim.step(&mut self.surface, now);
        notices
    }

    fn on_gesture(&mut self, relay: &Relay, direction: SwipeDirection, now: u64, notices: &mut Notices) {
        let reason = if relay.is_busy() {
            Some(IgnoreReason::Busy)
        } else if self.drag.as_ref().is_some_and(Drag::blocks_gestures) {
            Some(IgnoreReason::Dragging)
        } else {
            None
        };
        if let Some(reason) = reason {
            push(notices, Notice::GestureIgnored { direction, reason });
            return;
        }

        match self.screen.on_swipe(direction) {
            Navigation::Stay => push(
                notices,
                Notice::GestureIgnored {
                    direction,
                    reason: IgnoreReason::NoRoute,
                },
            ),
            Navigation::Goto(to) => self.transition(relay, to, now, notices),
            Navigation::Channel(step) => {
                let channel = match step {
                    ChannelStep::Next => self.channel.next(),
                    ChannelStep::Previous => self.channel.previous(),
                };
                self.set_channel(channel, now, notices);
            }
        }
    }

    fn set_channel(&mut self, channel: ChannelFilter, now: u64, notices: &mut Notices) {
        self.channel = channel;
        self.roster.set_channel(channel.value());
        let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);
        match &mut self.widgets {
            ScreenWidgets::KeyboardSelect(w) => {
                w.close_popup(&mut ctx);
                w.set_channel(&mut ctx, &mut self.roster, channel);
            }
            ScreenWidgets::Main(w) => w.update_channel(&mut ctx, channel),
            _ => {}
        }
        push(notices, Notice::ChannelChanged(channel));
    }

    /// Swap the current screen for `to`
    pub fn transition(&mut self, relay: &Relay, to: ScreenState, now: u64, notices: &mut Notices) {
        let _busy = relay.begin_transition();
        let from = self.screen;

        let widgets = core::mem::take(&mut self.widgets);
        widgets.destroy(&mut Ctx::new(&mut self.surface, &mut self.anim, now));
        self.drag = None;
        if from == ScreenState::PongWars {
            relay.set_simulation_active(false);
        }

        self.screen = to;
        if let Err(e) = self.build(to, now) {
            push(notices, Notice::Error(e.into()));
        }

        match to {
            ScreenState::PongWars => {
                relay.set_simulation_active(true);
                self.next_pong = now + STEP_MS;
            }
            ScreenState::KeyboardSelect => self.next_refresh = now + REFRESH_MS,
            _ => {}
        }
        push(notices, Notice::Transition { from, to });
    }

    /// Clear the surface and build `to`
    ///
    /// On failure the surface is cleared again and the screen is left with
    /// no widgets.
    fn build(&mut self, to: ScreenState, now: u64) -> Result<(), SurfaceError> {
        self.surface.clear(to.background());
        match self.create_widgets(to, now) {
            Ok(widgets) => self.widgets = widgets,
            Err(e) => {
                self.anim.cancel_all(&mut self.surface);
                self.surface.clear(to.background());
                self.widgets = ScreenWidgets::Empty;
                return Err(e);
            }
        }

        if to.needs_touch() && !self.touch_registered {
            self.surface.register_touch_input()?;
            self.touch_registered = true;
        }
        Ok(())
    }

    fn create_widgets(&mut self, to: ScreenState, now: u64) -> Result<ScreenWidgets, SurfaceError> {
        if to == ScreenState::Main && self.settings.slide_mode {
            self.settings.slide_max = grow_max(self.settings.slide_max, self.cache.telemetry().layer);
        }

        let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);
        let widgets = match to {
            ScreenState::Main => ScreenWidgets::Main(MainWidgets::create(
                &mut ctx,
                &self.cache,
                &self.settings,
                self.channel,
                self.platform.usb_powered(),
            )?),
            ScreenState::DisplaySettings => ScreenWidgets::DisplaySettings(DisplaySettingsWidgets::create(
                &mut ctx,
                &self.settings,
                self.sensor.is_available(),
            )?),
            ScreenState::SystemSettings => ScreenWidgets::SystemSettings(SystemSettingsWidgets::create(
                &mut ctx,
                self.platform.firmware_version(),
            )?),
            ScreenState::KeyboardSelect => ScreenWidgets::KeyboardSelect(KeyboardSelectWidgets::create(
                &mut ctx,
                &mut self.roster,
                self.channel,
            )?),
            ScreenState::PongWars => {
                ScreenWidgets::PongWars(PongWarsScreen::create(&mut ctx, self.platform.uptime_ms() as u32)?)
            }
        };
        Ok(widgets)
    }

    /// Take at most one snapshot from each mailbox and render it
    fn drain(&mut self, relay: &Relay, now: u64, notices: &mut Notices) {
        if let Some(snapshot) = relay.telemetry.take() {
            let change = self.cache.apply_telemetry(snapshot);
            match change {
                TelemetryChange::Reset => {
                    push(notices, Notice::ResetToScanning);
                    if let Some(level) = self.timeout_brightness {
                        self.apply_brightness(level, notices);
                    }
                }
                TelemetryChange::KeyboardChanged => {
                    push(notices, Notice::KeyboardChanged);
                    if let Some(level) = self.fixed_brightness {
                        self.apply_brightness(level, notices);
                    }
                }
                TelemetryChange::Updated => {}
            }

            if self.settings.slide_mode {
                self.settings.slide_max = grow_max(self.settings.slide_max, self.cache.telemetry().layer);
            }
            if let ScreenWidgets::Main(w) = &mut self.widgets {
                let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);
                let relayout = change != TelemetryChange::Updated;
                w.update_telemetry(&mut ctx, self.cache.telemetry(), &self.settings, relayout);
            }
        }

        if let Some(signal) = relay.signal.take() {
            self.cache.apply_signal(signal);
            if let ScreenWidgets::Main(w) = &mut self.widgets {
                w.update_signal(&mut Ctx::new(&mut self.surface, &mut self.anim, now), &signal);
            }
        }

        if let Some(battery) = relay.battery.take() {
            self.cache.apply_battery(battery);
            if let ScreenWidgets::Main(w) = &mut self.widgets {
                w.update_scanner_battery(
                    &mut Ctx::new(&mut self.surface, &mut self.anim, now),
                    Some(battery),
                    self.platform.usb_powered(),
                    self.settings.battery_visible,
                );
            }
        }
    }

    fn run_schedules(&mut self, relay: &Relay, now: u64) {
        match &mut self.widgets {
            ScreenWidgets::KeyboardSelect(w) => {
                if now >= self.next_refresh && !relay.is_busy() && self.drag.is_none() {
                    self.next_refresh = now + REFRESH_MS;
                    let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);
                    w.refresh(&mut ctx, &mut self.roster, self.channel);
                }
            }
            ScreenWidgets::PongWars(w) => {
                let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);
                let mut steps = 0;
                while now >= self.next_pong && steps < MAX_CATCH_UP_STEPS {
                    w.step(&mut ctx);
                    self.next_pong += STEP_MS;
                    steps += 1;
                }
                // Too far behind; drop the backlog
                if now >= self.next_pong {
                    self.next_pong = now + STEP_MS;
                }
            }
            _ => {}
        }
    }

    /// Route a touch event to the current screen
    pub fn handle_ui_event(&mut self, event: UiEvent, now: u64) -> Notices {
        let mut notices = Notices::new();
        let mut ctx = Ctx::new(&mut self.surface, &mut self.anim, now);

        let followup = match &mut self.widgets {
            ScreenWidgets::DisplaySettings(w) => w
                .handle_event(&mut ctx, event, &self.settings, &mut self.drag)
                .map(Followup::Setting),
            ScreenWidgets::SystemSettings(w) => w.handle_event(event).map(Followup::Reboot),
            ScreenWidgets::KeyboardSelect(w) => w
                .handle_event(&mut ctx, event, &mut self.roster, self.channel)
                .map(Followup::Channel),
            ScreenWidgets::PongWars(w) => {
                if w.is_arena_tap(&event) {
                    w.reset(&mut ctx, self.platform.uptime_ms() as u32);
                }
                None
            }
            ScreenWidgets::Main(_) | ScreenWidgets::Empty => None,
        };

        match followup {
            Some(Followup::Setting(action)) => self.apply_setting(action, now, &mut notices),
            Some(Followup::Channel(channel)) => self.set_channel(channel, now, &mut notices),
            Some(Followup::Reboot(mode)) => {
                push(&mut notices, Notice::Reboot(mode));
                self.platform.reboot(mode);
            }
            None => {}
        }
        notices
    }

    fn apply_setting(&mut self, action: SettingsAction, now: u64, notices: &mut Notices) {
        match action {
            SettingsAction::AutoBrightness(on) => {
                self.settings.auto_brightness = on;
                if on {
                    self.next_light = now;
                } else {
                    let manual = self.settings.manual_brightness;
                    self.apply_brightness(manual, notices);
                }
            }
            SettingsAction::PreviewBrightness(level) => self.apply_brightness(level, notices),
            SettingsAction::ManualBrightness(level) => {
                self.settings.manual_brightness = clamp_brightness(level);
                self.apply_brightness(level, notices);
            }
            SettingsAction::BatteryVisible(visible) => self.settings.battery_visible = visible,
            SettingsAction::MaxLayers(max) => self.settings.max_layers = max,
            SettingsAction::SlideMode(on) => self.settings.slide_mode = on,
        }
    }

    fn apply_brightness(&mut self, level: u8, notices: &mut Notices) {
        let level = clamp_brightness(level);
        match self.backlight.set_brightness(level) {
            Ok(()) => push(notices, Notice::BrightnessApplied(level)),
            Err(e) => push(notices, Notice::Error(e.into())),
        }
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn widgets(&self) -> &ScreenWidgets {
        &self.widgets
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn cache(&self) -> &DisplayCache {
        &self.cache
    }

    pub fn channel(&self) -> ChannelFilter {
        self.channel
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn backlight(&self) -> &B {
        &self.backlight
    }

    pub fn roster(&self) -> &K {
        &self.roster
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

/// Record a notice; extras beyond capacity are dropped
fn push(notices: &mut Notices, notice: Notice) {
    let _ = notices.push(notice);
}
