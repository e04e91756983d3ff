//! Headless widget scene
//!
//! A fixed-capacity arena of widget nodes implementing `Surface`. It keeps
//! every property the core sets so host tests can inspect the result, and it
//! serves as the retained tree a pixel renderer walks on target.

use heapless::String;

use crate::surface::{
    Align, Color, Font, Style, Surface, SurfaceError, TextAlign, Transform, WidgetId, WidgetKind,
};

/// Maximum label text length in bytes
pub const TEXT_CAPACITY: usize = 48;

/// A live widget and its properties
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: WidgetKind,
    pub parent: Option<WidgetId>,
    pub x: i16,
    pub y: i16,
    /// Anchor used by the last `align` call, `None` after `set_position`
    pub align: Option<Align>,
    pub width: u16,
    pub height: u16,
    pub text: String<TEXT_CAPACITY>,
    pub bg_color: Color,
    pub bg_opacity: u8,
    pub indicator_color: Color,
    pub text_color: Color,
    pub text_opacity: u8,
    pub opacity: u8,
    pub font: Font,
    pub border_color: Color,
    pub border_width: u8,
    pub radius: u8,
    pub letter_space: u8,
    pub text_align: TextAlign,
    pub recolor: bool,
    pub translate_x: i16,
    /// Permille
    pub scale: u16,
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub checked: bool,
    pub enabled: bool,
    pub hidden: bool,
    pub clickable: bool,
    /// Draw order; higher is on top
    pub z: u16,
}

impl Node {
    fn new(kind: WidgetKind, parent: Option<WidgetId>, z: u16) -> Self {
        Self {
            kind,
            parent,
            x: 0,
            y: 0,
            align: None,
            width: 0,
            height: 0,
            text: String::new(),
            bg_color: Color::BLACK,
            bg_opacity: 0,
            indicator_color: Color::WHITE,
            text_color: Color::WHITE,
            text_opacity: 100,
            opacity: 100,
            font: Font::default(),
            border_color: Color::BLACK,
            border_width: 0,
            radius: 0,
            letter_space: 0,
            text_align: TextAlign::Left,
            recolor: false,
            translate_x: 0,
            scale: 1000,
            min: 0,
            max: 100,
            value: 0,
            checked: false,
            enabled: true,
            hidden: false,
            clickable: kind.is_interactive(),
            z,
        }
    }

    fn apply(&mut self, style: Style) {
        match style {
            Style::BgColor(c) => {
                self.bg_color = c;
                if self.bg_opacity == 0 {
                    self.bg_opacity = 100;
                }
            }
            Style::BgOpacity(o) => self.bg_opacity = o.min(100),
            Style::IndicatorColor(c) => self.indicator_color = c,
            Style::TextColor(c) => self.text_color = c,
            Style::TextOpacity(o) => self.text_opacity = o.min(100),
            Style::Opacity(o) => self.opacity = o.min(100),
            Style::Font(f) => self.font = f,
            Style::BorderColor(c) => self.border_color = c,
            Style::BorderWidth(w) => self.border_width = w,
            Style::Radius(r) => self.radius = r,
            Style::LetterSpace(s) => self.letter_space = s,
            Style::TextAlign(a) => self.text_align = a,
            Style::Recolor(r) => self.recolor = r,
        }
    }
}

/// Fixed-capacity widget arena
pub struct Scene<const N: usize> {
    slots: [Option<Node>; N],
    generations: [u16; N],
    background: Color,
    touch_registrations: u8,
    next_z: u16,
}

impl<const N: usize> Default for Scene<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Scene<N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            generations: [0; N],
            background: Color::BLACK,
            touch_registrations: 0,
            next_z: 0,
        }
    }

    /// Look up a live widget
    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        let slot = self.slots.get(id.index())?;
        if self.generations[id.index()] != id.generation() {
            return None;
        }
        slot.as_ref()
    }

    /// Text of a live widget
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.node(id).map(|n| n.text.as_str())
    }

    /// First live widget whose text equals `text`
    pub fn find_text(&self, text: &str) -> Option<WidgetId> {
        self.iter()
            .find(|(_, node)| node.text.as_str() == text)
            .map(|(id, _)| id)
    }

    /// Iterate over live widgets
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Node)> + '_ {
        self.slots.iter().enumerate().filter_map(move |(i, slot)| {
            slot.as_ref()
                .map(|node| (WidgetId::new(i as u16, self.generations[i]), node))
        })
    }

    /// Current screen background
    pub fn background(&self) -> Color {
        self.background
    }

    /// How many times touch input was registered
    pub fn touch_registrations(&self) -> u8 {
        self.touch_registrations
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node, SurfaceError> {
        let index = id.index();
        if index >= N || self.generations[index] != id.generation() {
            return Err(SurfaceError::StaleHandle);
        }
        self.slots[index].as_mut().ok_or(SurfaceError::StaleHandle)
    }

    fn remove(&mut self, id: WidgetId) {
        let index = id.index();
        self.slots[index] = None;
        self.generations[index] = self.generations[index].wrapping_add(1);

        for child in 0..N {
            let is_child = matches!(&self.slots[child], Some(node) if node.parent == Some(id));
            if is_child {
                self.remove(WidgetId::new(child as u16, self.generations[child]));
            }
        }
    }
}

impl<const N: usize> Surface for Scene<N> {
    fn create(
        &mut self,
        kind: WidgetKind,
        parent: Option<WidgetId>,
    ) -> Result<WidgetId, SurfaceError> {
        if let Some(parent) = parent {
            if !self.is_alive(parent) {
                return Err(SurfaceError::StaleHandle);
            }
        }

        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SurfaceError::Exhausted)?;

        self.next_z = self.next_z.wrapping_add(1);
        self.slots[index] = Some(Node::new(kind, parent, self.next_z));
        Ok(WidgetId::new(index as u16, self.generations[index]))
    }

    fn delete(&mut self, id: WidgetId) -> Result<(), SurfaceError> {
        self.node_mut(id)?;
        self.remove(id);
        Ok(())
    }

    fn is_alive(&self, id: WidgetId) -> bool {
        self.node(id).is_some()
    }

    fn clear(&mut self, background: Color) {
        for index in 0..N {
            if self.slots[index].take().is_some() {
                self.generations[index] = self.generations[index].wrapping_add(1);
            }
        }
        self.background = background;
    }

    fn set_position(&mut self, id: WidgetId, x: i16, y: i16) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.x = x;
        node.y = y;
        node.align = None;
        Ok(())
    }

    fn align(&mut self, id: WidgetId, align: Align, x: i16, y: i16) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.x = x;
        node.y = y;
        node.align = Some(align);
        Ok(())
    }

    fn set_size(&mut self, id: WidgetId, width: u16, height: u16) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.width = width;
        node.height = height;
        Ok(())
    }

    fn set_text(&mut self, id: WidgetId, text: &str) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.text.clear();
        for c in text.chars() {
            if node.text.push(c).is_err() {
                return Err(SurfaceError::TextTooLong);
            }
        }
        Ok(())
    }

    fn set_style(&mut self, id: WidgetId, style: Style) -> Result<(), SurfaceError> {
        self.node_mut(id)?.apply(style);
        Ok(())
    }

    fn set_transform(&mut self, id: WidgetId, transform: Transform) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        match transform {
            Transform::TranslateX(x) => node.translate_x = x,
            Transform::Scale(s) => node.scale = s,
        }
        Ok(())
    }

    fn set_range(&mut self, id: WidgetId, min: i32, max: i32) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.min = min;
        node.max = max;
        node.value = node.value.clamp(min, max);
        Ok(())
    }

    fn set_value(&mut self, id: WidgetId, value: i32) -> Result<(), SurfaceError> {
        let node = self.node_mut(id)?;
        node.value = value.clamp(node.min, node.max);
        Ok(())
    }

    fn set_checked(&mut self, id: WidgetId, checked: bool) -> Result<(), SurfaceError> {
        self.node_mut(id)?.checked = checked;
        Ok(())
    }

    fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), SurfaceError> {
        self.node_mut(id)?.enabled = enabled;
        Ok(())
    }

    fn set_hidden(&mut self, id: WidgetId, hidden: bool) -> Result<(), SurfaceError> {
        self.node_mut(id)?.hidden = hidden;
        Ok(())
    }

    fn set_clickable(&mut self, id: WidgetId, clickable: bool) -> Result<(), SurfaceError> {
        self.node_mut(id)?.clickable = clickable;
        Ok(())
    }

    fn bring_to_front(&mut self, id: WidgetId) -> Result<(), SurfaceError> {
        self.next_z = self.next_z.wrapping_add(1);
        let z = self.next_z;
        self.node_mut(id)?.z = z;
        Ok(())
    }

    fn register_touch_input(&mut self) -> Result<(), SurfaceError> {
        self.touch_registrations = self.touch_registrations.saturating_add(1);
        Ok(())
    }

    fn widget_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceExt;

    #[test]
    fn test_create_and_delete() {
        let mut scene: Scene<8> = Scene::new();
        let id = scene.create(WidgetKind::Label, None).unwrap();
        assert_eq!(scene.widget_count(), 1);
        assert!(scene.is_alive(id));

        scene.delete(id).unwrap();
        assert_eq!(scene.widget_count(), 0);
        assert!(!scene.is_alive(id));
    }

    #[test]
    fn test_stale_handle_detected_after_reuse() {
        let mut scene: Scene<1> = Scene::new();
        let old = scene.create(WidgetKind::Label, None).unwrap();
        scene.delete(old).unwrap();

        let new = scene.create(WidgetKind::Bar, None).unwrap();
        assert_eq!(old.index(), new.index());
        assert_eq!(scene.set_text(old, "x"), Err(SurfaceError::StaleHandle));
        assert_eq!(scene.delete(old), Err(SurfaceError::StaleHandle));
        assert!(scene.is_alive(new));
    }

    #[test]
    fn test_delete_cascades_to_children() {
        let mut scene: Scene<8> = Scene::new();
        let parent = scene.create(WidgetKind::Container, None).unwrap();
        let child = scene.create(WidgetKind::Button, Some(parent)).unwrap();
        let grandchild = scene.create(WidgetKind::Label, Some(child)).unwrap();
        let other = scene.create(WidgetKind::Label, None).unwrap();

        scene.delete(parent).unwrap();
        assert!(!scene.is_alive(child));
        assert!(!scene.is_alive(grandchild));
        assert!(scene.is_alive(other));
        assert_eq!(scene.widget_count(), 1);
    }

    #[test]
    fn test_exhausted() {
        let mut scene: Scene<2> = Scene::new();
        scene.create(WidgetKind::Label, None).unwrap();
        scene.create(WidgetKind::Label, None).unwrap();
        assert_eq!(
            scene.create(WidgetKind::Label, None),
            Err(SurfaceError::Exhausted)
        );
    }

    #[test]
    fn test_clear_sets_background() {
        let mut scene: Scene<4> = Scene::new();
        let id = scene.create(WidgetKind::Label, None).unwrap();
        scene.clear(Color::hex(0x0A0A0A));
        assert_eq!(scene.widget_count(), 0);
        assert!(!scene.is_alive(id));
        assert_eq!(scene.background(), Color::hex(0x0A0A0A));
    }

    #[test]
    fn test_label_helper_and_find() {
        let mut scene: Scene<4> = Scene::new();
        let id = scene
            .label(None, "WPM", Font::Unscii8, Color::gray(0xA0))
            .unwrap();
        let node = scene.node(id).unwrap();
        assert_eq!(node.font, Font::Unscii8);
        assert_eq!(node.text_color, Color::gray(0xA0));
        assert_eq!(scene.find_text("WPM"), Some(id));
    }

    #[test]
    fn test_value_clamped_to_range() {
        let mut scene: Scene<2> = Scene::new();
        let bar = scene.create(WidgetKind::Bar, None).unwrap();
        scene.set_range(bar, 0, 5).unwrap();
        scene.set_value(bar, 9).unwrap();
        assert_eq!(scene.node(bar).unwrap().value, 5);
    }

    #[test]
    fn test_text_too_long() {
        let mut scene: Scene<1> = Scene::new();
        let id = scene.create(WidgetKind::Label, None).unwrap();
        let long = "0123456789012345678901234567890123456789012345678901";
        assert_eq!(scene.set_text(id, long), Err(SurfaceError::TextTooLong));
        assert_eq!(scene.text(id).unwrap().len(), TEXT_CAPACITY);
    }

    #[test]
    fn test_bring_to_front() {
        let mut scene: Scene<4> = Scene::new();
        let a = scene.create(WidgetKind::Container, None).unwrap();
        let b = scene.create(WidgetKind::Container, None).unwrap();
        assert!(scene.node(b).unwrap().z > scene.node(a).unwrap().z);
        scene.bring_to_front(a).unwrap();
        assert!(scene.node(a).unwrap().z > scene.node(b).unwrap().z);
    }
}
