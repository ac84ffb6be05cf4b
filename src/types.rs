use serde::{Deserialize, Serialize};

/// Visual variant of a particle. Only the presentation layer cares about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Star,
    Comet,
    Sparkle,
    Meteor,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Star, Kind::Comet, Kind::Sparkle, Kind::Meteor];

    pub fn index(self) -> u32 {
        self as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA with full alpha.
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Neon greens, white, gold and cyan.
pub const PALETTE: [Color; 5] = [
    Color::rgb(0x39, 0xFF, 0x14),
    Color::rgb(0x00, 0xFF, 0x41),
    Color::rgb(0xFF, 0xFF, 0xFF),
    Color::rgb(0xFF, 0xD7, 0x00),
    Color::rgb(0x00, 0xFF, 0xFF),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(PALETTE[0].to_string(), "#39FF14");
        assert_eq!(PALETTE[3].to_string(), "#FFD700");
    }

    #[test]
    fn test_color_rgba() {
        let [r, g, b, a] = PALETTE[2].to_rgba();
        assert_eq!((r, g, b, a), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_kind_index() {
        for (i, kind) in Kind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i as u32);
        }
    }
}
