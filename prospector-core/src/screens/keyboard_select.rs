//! Keyboard picker screen
//!
//! Lists up to six keyboards from the scanner's roster that pass the channel
//! filter. Tapping an entry makes it the keyboard tracked on the main screen;
//! tapping a channel badge filters to that channel. The header badge opens a
//! popup with every channel.

use heapless::Vec;
use prospector_display::{Align, Color, Font, Style, Surface, SurfaceError, SurfaceExt, UiEvent, WidgetId, WidgetKind};

use super::{label_aligned, nav_hint, Ctx, Owned, GLYPH_DOWN, HINT_GRAY};
use crate::format;
use crate::layout::color::{channel_color, rssi_bars, rssi_color, ACCENT_BLUE};
use crate::state::ChannelFilter;
use crate::traits::{KeyboardRoster, RosterEntry};

/// Entries shown at once
pub const MAX_ENTRIES: usize = 6;

/// Refresh period of the entry list
pub const REFRESH_MS: u64 = 1000;

const ENTRY_Y: i16 = 55;
const ENTRY_SPACING: i16 = 40;

const SELECTED_BG: Color = Color::hex(0x2A4A6A);
const UNSELECTED_BG: Color = Color::hex(0x1A1A1A);
const UNSELECTED_BORDER: Color = Color::hex(0x303030);

const POPUP_BUTTONS: usize = ChannelFilter::ALL_VALUE as usize + 1;
const BADGE_W: u16 = 48;
const BADGE_H: u16 = 28;
const BADGE_GAP: i16 = 6;
const BADGE_TOP: i16 = 35;
const BADGE_LEFT: i16 = 17;

#[derive(Debug, Clone, Copy)]
struct Entry {
    container: WidgetId,
    badge: WidgetId,
    badge_label: WidgetId,
    rssi_bar: WidgetId,
    rssi_label: WidgetId,
    name: WidgetId,
    keyboard: usize,
    channel: u8,
}

impl Entry {
    fn create<S: Surface + ?Sized>(surface: &mut S, row: usize, kb: &RosterEntry) -> Result<Self, SurfaceError> {
        let container = surface.create(WidgetKind::Container, None)?;
        match Self::fill(surface, container, row, kb) {
            Ok(entry) => Ok(entry),
            Err(e) => {
                let _ = surface.delete(container);
                Err(e)
            }
        }
    }

    fn fill<S: Surface + ?Sized>(
        surface: &mut S,
        container: WidgetId,
        row: usize,
        kb: &RosterEntry,
    ) -> Result<Self, SurfaceError> {
        surface.set_size(container, 250, 32)?;
        surface.set_position(container, 15, ENTRY_Y + row as i16 * ENTRY_SPACING)?;
        surface.styles(container, &[Style::BgOpacity(100), Style::Radius(6)])?;
        surface.set_clickable(container, true)?;

        let badge = surface.create(WidgetKind::Container, Some(container))?;
        surface.set_size(badge, 20, 18)?;
        surface.align(badge, Align::LeftMid, 6, 0)?;
        surface.styles(badge, &[Style::BgOpacity(100), Style::Radius(4), Style::BorderWidth(0)])?;
        surface.set_clickable(badge, true)?;
        let badge_label = surface.label(Some(badge), "", Font::Montserrat12, Color::BLACK)?;
        surface.align(badge_label, Align::Center, 0, 0)?;

        let rssi_bar = surface.create(WidgetKind::Bar, Some(container))?;
        surface.set_size(rssi_bar, 30, 8)?;
        surface.set_range(rssi_bar, 0, 5)?;
        surface.styles(
            rssi_bar,
            &[Style::BgColor(Color::hex(0x202020)), Style::BgOpacity(100), Style::Radius(2)],
        )?;
        surface.align(rssi_bar, Align::LeftMid, 30, 0)?;

        let rssi_label = surface.label(Some(container), "", Font::Montserrat12, Color::hex(0xA0A0A0))?;
        surface.align(rssi_label, Align::LeftMid, 64, 0)?;

        let name = surface.label(Some(container), "", Font::Montserrat16, Color::WHITE)?;
        surface.align(name, Align::LeftMid, 122, 0)?;

        let mut entry = Self {
            container,
            badge,
            badge_label,
            rssi_bar,
            rssi_label,
            name,
            keyboard: kb.index,
            channel: kb.channel,
        };
        entry.show(surface, kb);
        Ok(entry)
    }

    fn show<S: Surface + ?Sized>(&mut self, surface: &mut S, kb: &RosterEntry) {
        self.keyboard = kb.index;
        self.channel = kb.channel;
        let _ = surface.set_style(self.badge, Style::BgColor(channel_color(kb.channel)));
        let _ = surface.set_text(self.badge_label, &format::number(kb.channel as u32));

        let bars = rssi_bars(kb.rssi);
        let _ = surface.set_value(self.rssi_bar, bars as i32);
        let _ = surface.set_style(self.rssi_bar, Style::IndicatorColor(rssi_color(bars)));
        let _ = surface.set_text(self.rssi_label, &format::rssi(kb.rssi));
        let _ = surface.set_text(self.name, kb.display_name());
    }

    fn set_selected<S: Surface + ?Sized>(&self, surface: &mut S, selected: bool) {
        let (bg, border, width) = if selected {
            (SELECTED_BG, ACCENT_BLUE, 2)
        } else {
            (UNSELECTED_BG, UNSELECTED_BORDER, 1)
        };
        let _ = surface.set_style(self.container, Style::BgColor(bg));
        let _ = surface.set_style(self.container, Style::BorderColor(border));
        let _ = surface.set_style(self.container, Style::BorderWidth(width));
    }
}

/// Channel chooser overlay
#[derive(Debug, Clone, Copy)]
struct Popup {
    container: WidgetId,
    /// Indexed by channel value; the last one is "All"
    buttons: [WidgetId; POPUP_BUTTONS],
}

impl Popup {
    fn create<S: Surface + ?Sized>(surface: &mut S, current: ChannelFilter) -> Result<Self, SurfaceError> {
        let container = surface.create(WidgetKind::Container, None)?;
        // Anything below must not leak if the overlay is half built
        match Self::fill(surface, container, current) {
            Ok(buttons) => Ok(Self { container, buttons }),
            Err(e) => {
                let _ = surface.delete(container);
                Err(e)
            }
        }
    }

    fn fill<S: Surface + ?Sized>(
        surface: &mut S,
        container: WidgetId,
        current: ChannelFilter,
    ) -> Result<[WidgetId; POPUP_BUTTONS], SurfaceError> {
        surface.set_size(container, 210, 200)?;
        surface.align(container, Align::Center, 0, 0)?;
        surface.styles(
            container,
            &[
                Style::BgColor(UNSELECTED_BG),
                Style::BgOpacity(90),
                Style::Radius(12),
                Style::BorderColor(Color::hex(0x404040)),
                Style::BorderWidth(2),
            ],
        )?;
        surface.bring_to_front(container)?;

        let title = surface.label(Some(container), "Channel Select", Font::Montserrat16, Color::WHITE)?;
        surface.align(title, Align::TopMid, 0, 5)?;

        let mut buttons = [container; POPUP_BUTTONS];
        for (value, slot) in buttons.iter_mut().enumerate() {
            let filter = ChannelFilter::new(value as u8);
            let (x, y, width) = badge_geometry(filter);
            let button = surface.create(WidgetKind::Button, Some(container))?;
            surface.set_size(button, width, BADGE_H)?;
            surface.align(button, Align::TopLeft, x, y)?;
            let fill = if filter.is_all() {
                ACCENT_BLUE
            } else {
                channel_color(filter.value())
            };
            surface.styles(button, &[Style::BgColor(fill), Style::BgOpacity(100), Style::Radius(6)])?;
            if filter == current {
                surface.styles(button, &[Style::BorderColor(Color::WHITE), Style::BorderWidth(2)])?;
            }
            let label = surface.label(Some(button), &format::channel_badge(filter), Font::Montserrat12, Color::BLACK)?;
            surface.align(label, Align::Center, 0, 0)?;
            *slot = button;
        }
        Ok(buttons)
    }

    fn channel_of(&self, target: WidgetId) -> Option<ChannelFilter> {
        self.buttons
            .iter()
            .position(|b| *b == target)
            .map(|value| ChannelFilter::new(value as u8))
    }
}

/// Position and width of a popup badge
///
/// "All" spans two columns next to "0" on the first row; 1-9 fill a 3x3
/// grid below.
fn badge_geometry(filter: ChannelFilter) -> (i16, i16, u16) {
    let col_step = BADGE_W as i16 + BADGE_GAP;
    let row_step = BADGE_H as i16 + BADGE_GAP;
    let all_width = 2 * BADGE_W + BADGE_GAP as u16;
    match filter.value() {
        ChannelFilter::ALL_VALUE => (BADGE_LEFT, BADGE_TOP, all_width),
        0 => (BADGE_LEFT + all_width as i16 + BADGE_GAP, BADGE_TOP, BADGE_W),
        ch => {
            let i = (ch - 1) as i16;
            (BADGE_LEFT + (i % 3) * col_step, BADGE_TOP + row_step * (1 + i / 3), BADGE_W)
        }
    }
}

pub struct KeyboardSelectWidgets {
    owned: Owned<8>,
    prefix: WidgetId,
    badge: WidgetId,
    badge_value: WidgetId,
    entries: Vec<Entry, MAX_ENTRIES>,
    popup: Option<Popup>,
}

impl KeyboardSelectWidgets {
    pub fn create<S: Surface + ?Sized, K: KeyboardRoster>(
        ctx: &mut Ctx<'_, S>,
        roster: &mut K,
        channel: ChannelFilter,
    ) -> Result<Self, SurfaceError> {
        let s = &mut *ctx.surface;
        let mut owned = Owned::new();

        owned.add(label_aligned(s, "Keyboards", Font::Montserrat20, Color::WHITE, Align::TopLeft, 15, 15)?)?;

        let prefix = owned.add(label_aligned(s, "Ch:", Font::Montserrat12, HINT_GRAY, Align::TopRight, -55, 19)?)?;
        s.set_clickable(prefix, true)?;

        let badge = owned.add(s.create(WidgetKind::Button, None)?)?;
        s.set_size(badge, 36, 24)?;
        s.align(badge, Align::TopRight, -15, 16)?;
        s.styles(badge, &[Style::Radius(6), Style::BgOpacity(100)])?;
        let badge_value = s.label(Some(badge), "", Font::Montserrat12, Color::BLACK)?;
        s.align(badge_value, Align::Center, 0, 0)?;
        s.set_clickable(badge_value, true)?;

        owned.add(nav_hint(s, GLYPH_DOWN)?)?;

        let mut widgets = Self {
            owned,
            prefix,
            badge,
            badge_value,
            entries: Vec::new(),
            popup: None,
        };
        widgets.show_channel(ctx.surface, channel);
        widgets.refresh(ctx, roster, channel);
        Ok(widgets)
    }

    fn show_channel<S: Surface + ?Sized>(&self, surface: &mut S, channel: ChannelFilter) {
        let fill = if channel.is_all() {
            ACCENT_BLUE
        } else {
            channel_color(channel.value())
        };
        let _ = surface.set_style(self.badge, Style::BgColor(fill));
        let _ = surface.set_text(self.badge_value, &format::channel_badge(channel));
    }

    /// Re-read the roster
    ///
    /// Entries are rebuilt when the number of visible keyboards changed and
    /// updated in place otherwise. A selection that is no longer visible
    /// falls back to the first visible keyboard.
    pub fn refresh<S: Surface + ?Sized, K: KeyboardRoster>(&mut self, ctx: &mut Ctx<'_, S>, roster: &mut K, channel: ChannelFilter) {
        let visible: Vec<RosterEntry, MAX_ENTRIES> = (0..roster.capacity())
            .filter_map(|i| roster.entry(i))
            .filter(|kb| channel.matches(kb.channel))
            .take(MAX_ENTRIES)
            .collect();

        if let Some(first) = visible.first() {
            let still_visible = roster
                .selected()
                .is_some_and(|sel| visible.iter().any(|kb| kb.index == sel));
            if !still_visible {
                roster.select(first.index);
            }
        }

        if visible.len() != self.entries.len() {
            self.clear_entries(ctx.surface);
            for (row, kb) in visible.iter().enumerate() {
                match Entry::create(ctx.surface, row, kb) {
                    // Capacity matches `visible`
                    Ok(entry) => {
                        let _ = self.entries.push(entry);
                    }
                    Err(_) => break,
                }
            }
        } else {
            for (entry, kb) in self.entries.iter_mut().zip(visible.iter()) {
                entry.show(ctx.surface, kb);
            }
        }

        let selected = roster.selected();
        for entry in self.entries.iter() {
            entry.set_selected(ctx.surface, Some(entry.keyboard) == selected);
        }
        if let Some(popup) = &self.popup {
            let _ = ctx.surface.bring_to_front(popup.container);
        }
    }

    fn clear_entries<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for entry in core::mem::take(&mut self.entries) {
            let _ = surface.delete(entry.container);
        }
    }

    /// The filter changed; show it and re-filter
    pub fn set_channel<S: Surface + ?Sized, K: KeyboardRoster>(&mut self, ctx: &mut Ctx<'_, S>, roster: &mut K, channel: ChannelFilter) {
        self.show_channel(ctx.surface, channel);
        self.refresh(ctx, roster, channel);
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.is_some()
    }

    pub fn close_popup<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>) {
        if let Some(popup) = self.popup.take() {
            let _ = ctx.surface.delete(popup.container);
        }
    }

    fn toggle_popup<S: Surface + ?Sized>(&mut self, ctx: &mut Ctx<'_, S>, channel: ChannelFilter) {
        if self.popup.is_some() {
            self.close_popup(ctx);
        } else {
            self.popup = Popup::create(ctx.surface, channel).ok();
        }
    }

    /// React to a tap
    ///
    /// Returns the channel filter the user picked, if any. Selecting a
    /// keyboard goes straight to the roster.
    pub fn handle_event<S: Surface + ?Sized, K: KeyboardRoster>(
        &mut self,
        ctx: &mut Ctx<'_, S>,
        event: UiEvent,
        roster: &mut K,
        channel: ChannelFilter,
    ) -> Option<ChannelFilter> {
        let UiEvent::Clicked(target) = event else {
            return None;
        };

        if target == self.prefix || target == self.badge || target == self.badge_value {
            self.toggle_popup(ctx, channel);
            return None;
        }

        if let Some(picked) = self.popup.as_ref().and_then(|p| p.channel_of(target)) {
            self.close_popup(ctx);
            return Some(picked);
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.badge == target || e.badge_label == target)
        {
            return Some(ChannelFilter::new(entry.channel));
        }

        if let Some(keyboard) = self.entries.iter().find(|e| e.container == target).map(|e| e.keyboard) {
            roster.select(keyboard);
            for entry in self.entries.iter() {
                entry.set_selected(ctx.surface, entry.keyboard == keyboard);
            }
        }
        None
    }

    /// Keyboards currently listed, by roster index
    pub fn listed(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.keyboard)
    }

    pub fn destroy<S: Surface + ?Sized>(mut self, ctx: &mut Ctx<'_, S>) {
        ctx.anim.cancel_all(ctx.surface);
        self.close_popup(ctx);
        self.clear_entries(ctx.surface);
        self.owned.delete_all(ctx.surface);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::anim::Animator;
    use prospector_display::Scene;

    type TestScene = Scene<96>;

    /// Roster backed by a fixed table
    #[derive(Default)]
    pub(crate) struct TableRoster {
        pub slots: [Option<RosterEntry>; 8],
        pub selected: Option<usize>,
        pub channel: Option<u8>,
    }

    impl TableRoster {
        pub fn with(entries: &[(&str, i8, u8)]) -> Self {
            let mut roster = Self::default();
            for (i, (name, rssi, channel)) in entries.iter().enumerate() {
                roster.slots[i] = Some(RosterEntry::new(i, name, *rssi, *channel));
            }
            roster
        }
    }

    impl KeyboardRoster for TableRoster {
        fn capacity(&self) -> usize {
            self.slots.len()
        }

        fn entry(&self, index: usize) -> Option<RosterEntry> {
            self.slots.get(index).cloned().flatten()
        }

        fn selected(&self) -> Option<usize> {
            self.selected
        }

        fn select(&mut self, index: usize) {
            self.selected = Some(index);
        }

        fn set_channel(&mut self, channel: u8) {
            self.channel = Some(channel);
        }
    }

    fn build(scene: &mut TestScene, anim: &mut Animator, roster: &mut TableRoster, channel: ChannelFilter) -> KeyboardSelectWidgets {
        KeyboardSelectWidgets::create(&mut Ctx::new(scene, anim, 0), roster, channel).unwrap()
    }

    #[test]
    fn test_lists_and_auto_selects() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("Corne", -45, 1), ("", -85, 2)]);
        let w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::ALL);

        assert_eq!(w.listed().collect::<Vec<usize, 6>>().as_slice(), &[0, 1]);
        assert_eq!(roster.selected, Some(0));
        assert!(scene.find_text("Unknown").is_some());
        assert!(scene.find_text("-85dBm").is_some());

        let first = w.entries[0];
        let node = scene.node(first.container).unwrap();
        assert_eq!((node.bg_color, node.border_color, node.border_width), (SELECTED_BG, ACCENT_BLUE, 2));
        let second = scene.node(w.entries[1].container).unwrap();
        assert_eq!(second.border_width, 1);
        assert_eq!(scene.node(first.rssi_bar).unwrap().value, 5);
        assert_eq!(scene.text(w.badge_value), Some("All"));
    }

    #[test]
    fn test_filter_hides_other_channels() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("A", -60, 1), ("B", -60, 2), ("C", -60, 2)]);
        roster.selected = Some(0);
        let w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::new(2));

        assert_eq!(w.listed().collect::<Vec<usize, 6>>().as_slice(), &[1, 2]);
        // Keyboard 0 is filtered out, so selection falls back
        assert_eq!(roster.selected, Some(1));
        assert_eq!(scene.node(w.badge).unwrap().bg_color, channel_color(2));
    }

    #[test]
    fn test_refresh_rebuilds_only_on_count_change() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("A", -60, 1), ("B", -60, 1)]);
        let mut w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::ALL);
        let container = w.entries[0].container;

        roster.slots[0] = Some(RosterEntry::new(0, "A2", -40, 1));
        w.refresh(&mut Ctx::new(&mut scene, &mut anim, 0), &mut roster, ChannelFilter::ALL);
        assert_eq!(w.entries[0].container, container);
        assert!(scene.find_text("A2").is_some());

        roster.slots[2] = Some(RosterEntry::new(2, "C", -60, 1));
        w.refresh(&mut Ctx::new(&mut scene, &mut anim, 0), &mut roster, ChannelFilter::ALL);
        assert_eq!(w.entries.len(), 3);
        assert!(!scene.is_alive(container));
    }

    #[test]
    fn test_taps() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("A", -60, 3), ("B", -60, 4)]);
        let mut w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::ALL);
        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);

        // Entry tap selects
        let second = w.entries[1];
        assert_eq!(w.handle_event(&mut ctx, UiEvent::Clicked(second.container), &mut roster, ChannelFilter::ALL), None);
        assert_eq!(roster.selected, Some(1));

        // Badge tap filters
        let picked = w.handle_event(&mut ctx, UiEvent::Clicked(second.badge), &mut roster, ChannelFilter::ALL);
        assert_eq!(picked, Some(ChannelFilter::new(4)));
    }

    #[test]
    fn test_popup_toggle_and_pick() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::default();
        let mut w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::new(5));
        let before = scene.widget_count();
        let mut ctx = Ctx::new(&mut scene, &mut anim, 0);

        w.handle_event(&mut ctx, UiEvent::Clicked(w.badge), &mut roster, ChannelFilter::new(5));
        assert!(w.is_popup_open());
        let popup = w.popup.unwrap();
        // Container, title and 11 labelled buttons
        assert_eq!(ctx.surface.widget_count(), before + 2 + 2 * POPUP_BUTTONS);
        assert_eq!(ctx.surface.node(popup.buttons[5]).unwrap().border_width, 2);

        let picked = w.handle_event(&mut ctx, UiEvent::Clicked(popup.buttons[10]), &mut roster, ChannelFilter::new(5));
        assert_eq!(picked, Some(ChannelFilter::ALL));
        assert!(!w.is_popup_open());
        assert_eq!(ctx.surface.widget_count(), before);

        // Second tap on the prefix closes an open popup
        w.handle_event(&mut ctx, UiEvent::Clicked(w.prefix), &mut roster, ChannelFilter::ALL);
        w.handle_event(&mut ctx, UiEvent::Clicked(w.prefix), &mut roster, ChannelFilter::ALL);
        assert!(!w.is_popup_open());
    }

    #[test]
    fn test_badge_grid() {
        assert_eq!(badge_geometry(ChannelFilter::ALL), (17, 35, 102));
        assert_eq!(badge_geometry(ChannelFilter::new(0)), (125, 35, 48));
        assert_eq!(badge_geometry(ChannelFilter::new(1)), (17, 69, 48));
        assert_eq!(badge_geometry(ChannelFilter::new(9)), (125, 137, 48));
    }

    #[test]
    fn test_half_built_entry_is_removed() {
        // Room for the header and half an entry
        let mut scene = Scene::<8>::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("Corne", -50, 1)]);
        let mut w =
            KeyboardSelectWidgets::create(&mut Ctx::new(&mut scene, &mut anim, 0), &mut roster, ChannelFilter::ALL)
                .unwrap();
        assert!(w.entries.is_empty());
        let header = scene.widget_count();
        assert!(header < 8);

        for t in 1..=3u64 {
            w.refresh(&mut Ctx::new(&mut scene, &mut anim, t * REFRESH_MS), &mut roster, ChannelFilter::ALL);
            assert_eq!(scene.widget_count(), header);
        }
    }

    #[test]
    fn test_destroy() {
        let mut scene = TestScene::new();
        let mut anim = Animator::new();
        let mut roster = TableRoster::with(&[("A", -60, 3)]);
        let mut w = build(&mut scene, &mut anim, &mut roster, ChannelFilter::ALL);
        w.handle_event(&mut Ctx::new(&mut scene, &mut anim, 0), UiEvent::Clicked(w.badge), &mut roster, ChannelFilter::ALL);
        w.destroy(&mut Ctx::new(&mut scene, &mut anim, 0));
        assert_eq!(scene.widget_count(), 0);
    }
}
