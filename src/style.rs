//! Colors and default series palette.

use crate::render::Color;

/// Default series colors, assigned by slot index modulo the palette size.
pub const PALETTE: [Color; 19] = [
    Color::rgba8(0xe9, 0xe9, 0xe9, 0xff), // white
    Color::rgba8(0xeb, 0x35, 0x45, 0xff), // red
    Color::rgba8(0x6a, 0xbd, 0x3c, 0xff), // green
    Color::rgba8(0x5e, 0x6a, 0xea, 0xff), // blue
    Color::rgba8(0xf1, 0xa1, 0x29, 0xff), // orange
    Color::rgba8(0xe4, 0xe6, 0x5c, 0xff), // yellow
    Color::rgba8(0xb0, 0x4c, 0xe7, 0xff), // purple
    Color::rgba8(0xec, 0x73, 0x8e, 0xff),
    Color::rgba8(0x95, 0xde, 0x85, 0xff),
    Color::rgba8(0x9e, 0xbc, 0xde, 0xff),
    Color::rgba8(0xeb, 0xba, 0x6f, 0xff),
    Color::rgba8(0xfe, 0xff, 0xb2, 0xff),
    Color::rgba8(0xc0, 0x92, 0xff, 0xff),
    Color::rgba8(0x75, 0x28, 0x28, 0xff),
    Color::rgba8(0x4a, 0x6d, 0x22, 0xff),
    Color::rgba8(0x39, 0x34, 0xa4, 0xff),
    Color::rgba8(0xc4, 0x60, 0x00, 0xff),
    Color::rgba8(0xbf, 0xb6, 0x00, 0xff),
    Color::rgba8(0x69, 0x1c, 0xac, 0xff),
];

/// Palette color for a series slot.
pub fn palette_color(slot: usize) -> Color {
    PALETTE[slot % PALETTE.len()]
}

/// Visual theme for the plot window.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Window background.
    pub background: Color,
    /// Grid lines.
    pub grid: Color,
    /// Plot screen border and tick marks.
    pub border: Color,
    /// x=0 and y=0 coordinate axes.
    pub coordinate_axes: Color,
    /// Tick labels and legend chrome.
    pub text: Color,
}

impl Theme {
    /// Dark theme used by default.
    pub fn dark() -> Self {
        Self {
            background: Color::rgba8(0x25, 0x25, 0x25, 0xff),
            grid: Color::rgba8(0xff, 0xff, 0xff, 0x10),
            border: Color::rgba8(0xff, 0xff, 0xff, 0xff),
            coordinate_axes: Color::rgba8(0xff, 0xff, 0xff, 0x40),
            text: Color::WHITE,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
