//! Team color palettes

use prospector_display::Color;

/// Pastel cell colors and saturated ball colors for both teams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    pub cells: [Color; 2],
    pub balls: [Color; 2],
}

impl Palette {
    const fn new(cell0: u32, cell1: u32, ball0: u32, ball1: u32) -> Self {
        Self {
            cells: [Color::hex(cell0), Color::hex(cell1)],
            balls: [Color::hex(ball0), Color::hex(ball1)],
        }
    }

    pub fn cell(&self, team: u8) -> Color {
        self.cells[(team & 1) as usize]
    }

    pub fn ball(&self, team: u8) -> Color {
        self.balls[(team & 1) as usize]
    }
}

pub const PALETTES: [Palette; 6] = [
    // Pink vs blue
    Palette::new(0xFFB5E8, 0xB5DEFF, 0xFF4D6D, 0x2D8CFF),
    // Orange vs green
    Palette::new(0xFFDEB5, 0xB5FFD9, 0xFF8C42, 0x2ECC71),
    // Purple vs yellow
    Palette::new(0xE8B5FF, 0xFFFDB5, 0x9B59B6, 0xF1C40F),
    // Cyan vs red
    Palette::new(0xB5FFE8, 0xFFB5C5, 0x1ABC9C, 0xE74C3C),
    // Violet vs sky
    Palette::new(0xD5B5FF, 0xB5F0FF, 0x8E44AD, 0x3498DB),
    // Peach vs lime
    Palette::new(0xFFE5B5, 0xC5FFB5, 0xE67E22, 0x27AE60),
];
