//! System settings screen: bootloader and reset buttons

use prospector_display::{Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, UiEvent, WidgetId, WidgetKind};

use super::{label_aligned, nav_hint, Ctx, Owned, GLYPH_LEFT, HINT_GRAY};
use crate::traits::RebootMode;

pub struct SystemSettingsWidgets {
    owned: Owned<8>,
    bootloader: WidgetId,
    reset: WidgetId,
}

impl SystemSettingsWidgets {
    pub fn create<S: Surface + ?Sized>(ctx: &mut Ctx<'_, S>, version: &str) -> Result<Self, SurfaceError> {
        let s = &mut *ctx.surface;
        let mut owned = Owned::new();

        owned.add(label_aligned(s, "Quick Actions", Font::Montserrat20, Color::WHITE, Align::TopMid, 0, 20)?)?;
        owned.add(label_aligned(s, version, Font::Montserrat12, HINT_GRAY, Align::TopMid, 0, 52)?)?;

        let bootloader = owned.add(action_button(s, "Enter Bootloader", -15, 0x4A90E2, 0x6AAFF0)?)?;
        let reset = owned.add(action_button(s, "System Reset", 55, 0xE24A4A, 0xF06A6A)?)?;

        owned.add(nav_hint(s, GLYPH_LEFT)?)?;

        Ok(Self {
            owned,
            bootloader,
            reset,
        })
    }

    /// Reboot requested by a tap, if any
    pub fn handle_event(&self, event: UiEvent) -> Option<RebootMode> {
        match event {
            UiEvent::Clicked(target) if target == self.bootloader => Some(RebootMode::Bootloader),
            UiEvent::Clicked(target) if target == self.reset => Some(RebootMode::Warm),
            _ => None,
        }
    }

    pub fn destroy<S: Surface + ?Sized>(self, ctx: &mut Ctx<'_, S>) {
        ctx.anim.cancel_all(ctx.surface);
        let mut owned = self.owned;
        owned.delete_all(ctx.surface);
    }
}

/// 200x60 button centered horizontally, `y` from the screen center
fn action_button<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    y: i16,
    fill: u32,
    border: u32,
) -> Result<WidgetId, SurfaceError> {
    let button = surface.create(WidgetKind::Button, None)?;
    surface.set_size(button, 200, 60)?;
    surface.align(button, Align::Center, 0, y)?;
    surface.styles(
        button,
        &[
            Style::BgColor(Color::hex(fill)),
            Style::BgOpacity(100),
            Style::BorderColor(Color::hex(border)),
            Style::BorderWidth(2),
            Style::Radius(8),
        ],
    )?;
    let label = surface.label(Some(button), text, Font::Montserrat18, Color::WHITE)?;
    surface.align(label, Align::Center, 0, 0)?;
    Ok(button)
}
