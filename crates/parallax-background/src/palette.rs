//! Fixed color palettes picked from during a reset

use rand::Rng;

use crate::math::Rgb;

/// Named set of tints, assigned front to back to the leading layers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    colors: &'static [u32],
}

impl Palette {
    const fn new(name: &'static str, colors: &'static [u32]) -> Self {
        Self { name, colors }
    }

    /// Colors of this palette, nearest layer first
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().map(|hex| Rgb::from_hex(*hex))
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the palette carries no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Every palette a reset can choose from
pub const PALETTES: &[Palette] = &[
    Palette::new(
        "lagoon",
        &[0x1c99ce, 0x00fffb, 0x40e0d0, 0x00ced1, 0x20b2aa, 0x4fab8c, 0x43f9d5],
    ),
    Palette::new(
        "neon",
        &[0x000080, 0xff0099, 0xff0000, 0x00ffaa, 0xff0099, 0x00ffaa, 0xdd7596],
    ),
    Palette::new(
        "dusk",
        &[0x404e5c, 0x4f6272, 0xb7c3f3, 0xdd7596, 0xff0099, 0xd6d6db, 0xd0d0d7],
    ),
    Palette::new(
        "ash",
        &[0x8a8a8f, 0xd0d0d7, 0xd6d6db, 0x4f6272, 0x404e5c, 0x000000, 0x87ceeb],
    ),
];

/// Pick one palette uniformly at random
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static Palette {
    &PALETTES[rng.gen_range(0..PALETTES.len())]
}

/// Look up a palette by name (case-insensitive)
pub fn by_name(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
