use crate::raster::rgba;

/// Egg varieties, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggKind {
    Quail,
    White,
    Brown,
    Duck,
    Turkey,
    Goose,
    Emu,
    Ostrich,
}

/// Static description of one variety.
#[derive(Debug, Clone, Copy)]
pub struct EggSpec {
    pub name: &'static str,
    /// Shell color, packed RGBA.
    pub shell: u32,
    /// Yolk color — splatter color in realistic-yolk mode.
    pub yolk: u32,
    /// Body radius in logical pixels.
    pub r: f32,
    pub speckled: bool,
}

pub const ALL_KINDS: [EggKind; 8] = [
    EggKind::Quail,
    EggKind::White,
    EggKind::Brown,
    EggKind::Duck,
    EggKind::Turkey,
    EggKind::Goose,
    EggKind::Emu,
    EggKind::Ostrich,
];

impl EggKind {
    pub fn spec(self) -> EggSpec {
        match self {
            EggKind::Quail => EggSpec {
                name: "quail",
                shell: rgba(0xF0, 0xE6, 0xD2, 0xFF),
                yolk: rgba(0xFF, 0xA5, 0x00, 0xFF),
                r: 12.0,
                speckled: true,
            },
            EggKind::White => EggSpec {
                name: "white",
                shell: rgba(0xFF, 0xF6, 0xF6, 0xFF),
                yolk: rgba(0xFF, 0xD7, 0x00, 0xFF),
                r: 18.0,
                speckled: false,
            },
            EggKind::Brown => EggSpec {
                name: "brown",
                shell: rgba(0xFF, 0xBD, 0x82, 0xFF),
                yolk: rgba(0xFF, 0xC1, 0x07, 0xFF),
                r: 18.0,
                speckled: false,
            },
            EggKind::Duck => EggSpec {
                name: "duck",
                shell: rgba(0xDB, 0xE9, 0xD0, 0xFF),
                yolk: rgba(0xFF, 0x8C, 0x00, 0xFF),
                r: 20.0,
                speckled: false,
            },
            EggKind::Turkey => EggSpec {
                name: "turkey",
                shell: rgba(0xEA, 0xDF, 0xCB, 0xFF),
                yolk: rgba(0xFF, 0xC1, 0x07, 0xFF),
                r: 20.0,
                speckled: true,
            },
            EggKind::Goose => EggSpec {
                name: "goose",
                shell: rgba(0xF5, 0xF5, 0xDC, 0xFF),
                yolk: rgba(0xFF, 0xE0, 0x66, 0xFF),
                r: 25.0,
                speckled: false,
            },
            EggKind::Emu => EggSpec {
                name: "emu",
                shell: rgba(0x4A, 0x88, 0x7B, 0xFF),
                yolk: rgba(0xDA, 0xE8, 0x7C, 0xFF),
                r: 30.0,
                speckled: true,
            },
            EggKind::Ostrich => EggSpec {
                name: "ostrich",
                shell: rgba(0xFA, 0xF0, 0xE6, 0xFF),
                yolk: rgba(0xFF, 0xD9, 0x66, 0xFF),
                r: 35.0,
                speckled: false,
            },
        }
    }

    /// Lookup by key. Unknown keys fall back to `fallback` — dropping an
    /// egg must never fail.
    pub fn from_key(key: &str, fallback: EggKind) -> EggKind {
        ALL_KINDS
            .into_iter()
            .find(|k| k.spec().name == key)
            .unwrap_or(fallback)
    }

    /// Cycle to the next variety (keyboard variety switch).
    pub fn next(self) -> Self {
        let i = ALL_KINDS.iter().position(|&k| k == self).unwrap_or(0);
        ALL_KINDS[(i + 1) % ALL_KINDS.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back() {
        assert_eq!(EggKind::from_key("emu", EggKind::White), EggKind::Emu);
        assert_eq!(EggKind::from_key("dinosaur", EggKind::White), EggKind::White);
        assert_eq!(EggKind::from_key("", EggKind::Goose), EggKind::Goose);
    }

    #[test]
    fn radii_are_positive_and_cycle_covers_all() {
        let mut k = EggKind::Quail;
        for _ in 0..ALL_KINDS.len() {
            assert!(k.spec().r > 0.0);
            k = k.next();
        }
        assert_eq!(k, EggKind::Quail);
    }
}
