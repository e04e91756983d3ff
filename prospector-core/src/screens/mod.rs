//! Screen widget bundles
//!
//! Each screen owns the handles of every widget it created. A bundle is built
//! by `create`, mutated in place by its update functions (which ignore
//! `SurfaceError::StaleHandle`), and consumed by `destroy`, which cancels the
//! screen's animations before deleting anything.

pub mod display_settings;
pub mod keyboard_select;
pub mod layer_display;
pub mod main_screen;
pub mod pong_wars;
pub mod system_settings;

use heapless::Vec;
use prospector_display::{
    Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, WidgetId, WidgetKind,
};

use crate::anim::Animator;
use crate::state::ScreenState;

pub use display_settings::DisplaySettingsWidgets;
pub use keyboard_select::KeyboardSelectWidgets;
pub use layer_display::LayerDisplay;
pub use main_screen::MainWidgets;
pub use pong_wars::PongWarsScreen;
pub use system_settings::SystemSettingsWidgets;

/// Navigation hint glyphs
pub const GLYPH_UP: &str = "\u{F077}";
pub const GLYPH_DOWN: &str = "\u{F078}";
pub const GLYPH_LEFT: &str = "\u{F053}";

/// Secondary text on the settings screens
pub const HINT_GRAY: Color = Color::hex(0x808080);

/// What a screen needs from the loop while it builds or updates
pub struct Ctx<'a, S: Surface + ?Sized> {
    pub surface: &'a mut S,
    pub anim: &'a mut Animator,
    /// Uptime in ms
    pub now: u64,
}

impl<'a, S: Surface + ?Sized> Ctx<'a, S> {
    pub fn new(surface: &'a mut S, anim: &'a mut Animator, now: u64) -> Self {
        Self { surface, anim, now }
    }
}

/// Widgets of the current screen
#[derive(Default)]
pub enum ScreenWidgets {
    /// Nothing built, or building failed
    #[default]
    Empty,
    Main(MainWidgets),
    DisplaySettings(DisplaySettingsWidgets),
    SystemSettings(SystemSettingsWidgets),
    KeyboardSelect(KeyboardSelectWidgets),
    PongWars(PongWarsScreen),
}

impl ScreenWidgets {
    /// Screen these widgets belong to, `None` for `Empty`
    pub fn screen(&self) -> Option<ScreenState> {
        match self {
            ScreenWidgets::Empty => None,
            ScreenWidgets::Main(_) => Some(ScreenState::Main),
            ScreenWidgets::DisplaySettings(_) => Some(ScreenState::DisplaySettings),
            ScreenWidgets::SystemSettings(_) => Some(ScreenState::SystemSettings),
            ScreenWidgets::KeyboardSelect(_) => Some(ScreenState::KeyboardSelect),
            ScreenWidgets::PongWars(_) => Some(ScreenState::PongWars),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScreenWidgets::Empty)
    }

    /// Tear the screen down
    pub fn destroy<S: Surface + ?Sized>(self, ctx: &mut Ctx<'_, S>) {
        match self {
            ScreenWidgets::Empty => {}
            ScreenWidgets::Main(w) => w.destroy(ctx),
            ScreenWidgets::DisplaySettings(w) => w.destroy(ctx),
            ScreenWidgets::SystemSettings(w) => w.destroy(ctx),
            ScreenWidgets::KeyboardSelect(w) => w.destroy(ctx),
            ScreenWidgets::PongWars(w) => w.destroy(ctx),
        }
    }
}

/// Top-level widgets a screen deletes on teardown
///
/// Children are not tracked; deleting a parent deletes them.
#[derive(Debug, Clone)]
pub struct Owned<const N: usize> {
    ids: Vec<WidgetId, N>,
}

impl<const N: usize> Default for Owned<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Owned<N> {
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Track a freshly created widget and hand its handle back
    pub fn add(&mut self, id: WidgetId) -> Result<WidgetId, SurfaceError> {
        self.ids.push(id).map_err(|_| SurfaceError::Exhausted)?;
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Delete every tracked widget still alive
    pub fn delete_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for id in core::mem::take(&mut self.ids) {
            if surface.is_alive(id) {
                let _ = surface.delete(id);
            }
        }
    }
}

/// Label at an absolute position
pub(crate) fn label_at<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: Font,
    color: Color,
    x: i16,
    y: i16,
) -> Result<WidgetId, SurfaceError> {
    let id = surface.label(None, text, font, color)?;
    surface.set_position(id, x, y)?;
    Ok(id)
}

/// Label anchored to the screen
pub(crate) fn label_aligned<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: Font,
    color: Color,
    align: Align,
    x: i16,
    y: i16,
) -> Result<WidgetId, SurfaceError> {
    let id = surface.label(None, text, font, color)?;
    surface.align(id, align, x, y)?;
    Ok(id)
}

/// "<glyph> Main" at the bottom of a side screen
pub(crate) fn nav_hint<S: Surface + ?Sized>(
    surface: &mut S,
    glyph: &str,
) -> Result<WidgetId, SurfaceError> {
    let mut text: heapless::String<12> = heapless::String::new();
    let _ = text.push_str(glyph);
    let _ = text.push_str(" Main");
    label_aligned(surface, &text, Font::Montserrat12, HINT_GRAY, Align::BottomMid, 0, -10)
}

/// Rounded switch, gray when off and green when on
pub(crate) fn toggle<S: Surface + ?Sized>(
    surface: &mut S,
    x: i16,
    y: i16,
    checked: bool,
) -> Result<WidgetId, SurfaceError> {
    let id = surface.create(WidgetKind::Switch, None)?;
    surface.set_size(id, 50, 28)?;
    surface.set_position(id, x, y)?;
    surface.styles(
        id,
        &[
            Style::Radius(14),
            Style::BgColor(Color::hex(0x3A3A3C)),
            Style::BgOpacity(100),
            Style::IndicatorColor(Color::hex(0x34C759)),
            Style::BorderWidth(0),
        ],
    )?;
    surface.set_checked(id, checked)?;
    Ok(id)
}

/// Thin blue slider, 180 px wide
pub(crate) fn slider<S: Surface + ?Sized>(
    surface: &mut S,
    x: i16,
    y: i16,
    min: i32,
    max: i32,
    value: i32,
) -> Result<WidgetId, SurfaceError> {
    let id = surface.create(WidgetKind::Slider, None)?;
    surface.set_size(id, SLIDER_WIDTH, 6)?;
    surface.set_position(id, x, y)?;
    surface.set_range(id, min, max)?;
    surface.set_value(id, value)?;
    surface.styles(
        id,
        &[
            Style::Radius(3),
            Style::BgColor(Color::hex(0x3A3A3C)),
            Style::BgOpacity(100),
            Style::IndicatorColor(Color::hex(0x007AFF)),
        ],
    )?;
    Ok(id)
}

/// Track width of settings sliders
pub const SLIDER_WIDTH: u16 = 180;

/// Grey a control out, or bring it back
pub(crate) fn set_disabled<S: Surface + ?Sized>(surface: &mut S, id: WidgetId, disabled: bool) {
    let _ = surface.set_enabled(id, !disabled);
    let _ = surface.set_style(id, Style::Opacity(if disabled { 50 } else { 100 }));
}
