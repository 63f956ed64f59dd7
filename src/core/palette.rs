use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Series palette used when no explicit bar color is configured.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::from_hex(0x4F7DF3),
    Color::from_hex(0x2BB3A0),
    Color::from_hex(0xF2A93B),
    Color::from_hex(0xE5566D),
    Color::from_hex(0x8E6BE8),
    Color::from_hex(0x3FA7D6),
    Color::from_hex(0x9BC53D),
    Color::from_hex(0xC3423F),
];

/// Lookup policy for indexes past the end of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaletteWrap {
    /// Reuse palette entries cyclically.
    #[default]
    Cycle,
    /// Repeat the last palette entry.
    Clamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    wrap: PaletteWrap,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.to_vec(),
            wrap: PaletteWrap::Cycle,
        }
    }
}

impl Palette {
    /// Builds a palette; an empty color list falls back to the default palette.
    #[must_use]
    pub fn new(colors: Vec<Color>, wrap: PaletteWrap) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            colors
        };
        Self { colors, wrap }
    }

    #[must_use]
    pub fn with_wrap(mut self, wrap: PaletteWrap) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Total over all indexes.
    #[must_use]
    pub fn color_for_index(&self, index: usize) -> Color {
        let last = self.colors.len() - 1;
        let resolved = match self.wrap {
            PaletteWrap::Cycle => index % self.colors.len(),
            PaletteWrap::Clamp => index.min(last),
        };
        self.colors[resolved]
    }
}

/// Default-palette lookup with cyclic reuse.
#[must_use]
pub fn color_for_index(index: usize) -> Color {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}
