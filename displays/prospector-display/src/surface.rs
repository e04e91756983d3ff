//! Render surface trait
//!
//! Defines the widget vocabulary the display core speaks. Coordinates are in
//! pixels of the rotated 280x240 panel.

/// Panel width after rotation
pub const SCREEN_WIDTH: i16 = 280;

/// Panel height after rotation
pub const SCREEN_HEIGHT: i16 = 240;

/// Surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Handle refers to a widget that has been deleted
    StaleHandle,
    /// No free widget slots left
    Exhausted,
    /// Text did not fit and was truncated
    TextTooLong,
    /// Touch input device could not be registered
    NoInputDevice,
}

/// Generation-checked widget handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetId {
    index: u16,
    generation: u16,
}

impl WidgetId {
    pub const fn new(index: u16, generation: u16) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

/// Primitive widget types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetKind {
    /// Plain rectangle, may hold children
    Container,
    Label,
    /// Horizontal level bar
    Bar,
    /// Draggable horizontal slider
    Slider,
    /// On/off switch
    Switch,
    Button,
}

impl WidgetKind {
    /// Whether the widget reacts to touch by default
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            WidgetKind::Slider | WidgetKind::Switch | WidgetKind::Button
        )
    }
}

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);

    pub const fn hex(value: u32) -> Self {
        Color(value & 0xFF_FFFF)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Gray with equal channels
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }
}

/// Fonts available in the firmware image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 8px monospace
    Unscii8,
    /// 16px monospace
    Unscii16,
    Montserrat12,
    #[default]
    Montserrat16,
    Montserrat18,
    Montserrat20,
    Montserrat28,
    /// Modifier key icons
    NerdFont40,
}

/// Alignment anchor relative to the parent (or the screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    TopLeft,
    TopMid,
    TopRight,
    LeftMid,
    Center,
    RightMid,
    BottomLeft,
    BottomMid,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Style properties
///
/// Opacities are percentages (0 = transparent, 100 = opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Style {
    /// Background of the main part
    BgColor(Color),
    BgOpacity(u8),
    /// Fill of a bar/slider indicator or a checked switch
    IndicatorColor(Color),
    TextColor(Color),
    TextOpacity(u8),
    /// Whole-widget opacity
    Opacity(u8),
    Font(Font),
    BorderColor(Color),
    BorderWidth(u8),
    Radius(u8),
    LetterSpace(u8),
    TextAlign(TextAlign),
    /// Interpret `#rrggbb text#` color markup in label text
    Recolor(bool),
}

/// Render-time transforms (do not affect layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transform {
    /// Horizontal offset in pixels
    TranslateX(i16),
    /// Uniform scale in permille (1000 = 100%)
    Scale(u16),
}

/// Retained-mode widget surface
///
/// All methods taking a `WidgetId` return `SurfaceError::StaleHandle` when
/// the widget no longer exists. Deleting a widget deletes its children.
pub trait Surface {
    /// Create a widget, optionally as a child of `parent`
    fn create(
        &mut self,
        kind: WidgetKind,
        parent: Option<WidgetId>,
    ) -> Result<WidgetId, SurfaceError>;

    /// Delete a widget and all of its children
    fn delete(&mut self, id: WidgetId) -> Result<(), SurfaceError>;

    /// Check whether a handle still refers to a live widget
    fn is_alive(&self, id: WidgetId) -> bool;

    /// Delete every widget and set the screen background
    fn clear(&mut self, background: Color);

    /// Absolute position relative to the parent's top-left corner
    fn set_position(&mut self, id: WidgetId, x: i16, y: i16) -> Result<(), SurfaceError>;

    /// Position relative to an anchor of the parent
    fn align(&mut self, id: WidgetId, align: Align, x: i16, y: i16) -> Result<(), SurfaceError>;

    fn set_size(&mut self, id: WidgetId, width: u16, height: u16) -> Result<(), SurfaceError>;

    fn set_text(&mut self, id: WidgetId, text: &str) -> Result<(), SurfaceError>;

    fn set_style(&mut self, id: WidgetId, style: Style) -> Result<(), SurfaceError>;

    fn set_transform(&mut self, id: WidgetId, transform: Transform) -> Result<(), SurfaceError>;

    /// Value range of a bar or slider
    fn set_range(&mut self, id: WidgetId, min: i32, max: i32) -> Result<(), SurfaceError>;

    /// Current value of a bar or slider
    fn set_value(&mut self, id: WidgetId, value: i32) -> Result<(), SurfaceError>;

    fn set_checked(&mut self, id: WidgetId, checked: bool) -> Result<(), SurfaceError>;

    fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), SurfaceError>;

    fn set_hidden(&mut self, id: WidgetId, hidden: bool) -> Result<(), SurfaceError>;

    fn set_clickable(&mut self, id: WidgetId, clickable: bool) -> Result<(), SurfaceError>;

    /// Draw this widget above its siblings
    fn bring_to_front(&mut self, id: WidgetId) -> Result<(), SurfaceError>;

    /// Attach the touch panel as a pointer input device
    fn register_touch_input(&mut self) -> Result<(), SurfaceError>;

    /// Number of live widgets
    fn widget_count(&self) -> usize;
}

/// Helpers for common widget setups
pub trait SurfaceExt: Surface {
    /// Create a label with text, font and color in one go
    fn label(
        &mut self,
        parent: Option<WidgetId>,
        text: &str,
        font: Font,
        color: Color,
    ) -> Result<WidgetId, SurfaceError> {
        let id = self.create(WidgetKind::Label, parent)?;
        self.set_style(id, Style::Font(font))?;
        self.set_style(id, Style::TextColor(color))?;
        self.set_text(id, text)?;
        Ok(id)
    }

    /// Apply several style properties
    fn styles(&mut self, id: WidgetId, styles: &[Style]) -> Result<(), SurfaceError> {
        for style in styles {
            self.set_style(id, *style)?;
        }
        Ok(())
    }
}

// Blanket implementation for all Surface types
impl<T: Surface + ?Sized> SurfaceExt for T {}
