use rand::Rng;

/// Body colour of a blob, drawn from a fixed four-entry palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobColor {
    Cyan,
    Magenta,
    Blue,
    Red,
}

impl BlobColor {
    pub const ALL: [BlobColor; 4] = [
        BlobColor::Cyan,
        BlobColor::Magenta,
        BlobColor::Blue,
        BlobColor::Red,
    ];

    /// Uniform draw from the palette
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn hex(self) -> &'static str {
        match self {
            BlobColor::Cyan => "#4ECDC4",
            BlobColor::Magenta => "#E06B9A",
            BlobColor::Blue => "#4A90E2",
            BlobColor::Red => "#E74C3C",
        }
    }

    /// sRGB components in [0, 1]
    pub fn rgb(self) -> [f32; 3] {
        let bytes: [u8; 3] = match self {
            BlobColor::Cyan => [0x4E, 0xCD, 0xC4],
            BlobColor::Magenta => [0xE0, 0x6B, 0x9A],
            BlobColor::Blue => [0x4A, 0x90, 0xE2],
            BlobColor::Red => [0xE7, 0x4C, 0x3C],
        };
        bytes.map(|b| b as f32 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_matches_hex() {
        for color in BlobColor::ALL {
            let hex = u32::from_str_radix(&color.hex()[1..], 16).unwrap();
            let [r, g, b] = color.rgb();
            assert_eq!((r * 255.0).round() as u32, hex >> 16);
            assert_eq!((g * 255.0).round() as u32, (hex >> 8) & 0xFF);
            assert_eq!((b * 255.0).round() as u32, hex & 0xFF);
        }
    }
}
