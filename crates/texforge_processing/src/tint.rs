//! Metal-type palette tinting for indexed weapon art.
//!
//! Weapon sprites reserve palette indices `0x70..=0x7F` for the blade ramp.
//! Tinting swaps each of those sixteen indices for the matching entry of a
//! per-metal table; every other index is left alone.

use serde::{Deserialize, Serialize};
use texforge_core::IndexedBuffer;

/// First palette index of the tintable ramp.
pub const RAMP_START: u8 = 0x70;
/// Last palette index of the tintable ramp.
pub const RAMP_END: u8 = 0x7F;
/// Number of indices in the ramp.
pub const RAMP_LEN: usize = 16;

/// Swap table that leaves the ramp unchanged.
const IDENTITY: [u8; RAMP_LEN] = [
    0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x7B, 0x7C, 0x7D, 0x7E, 0x7F,
];
const IRON: [u8; RAMP_LEN] = [
    0x77, 0x78, 0x57, 0x79, 0x58, 0x59, 0x7A, 0x5A, 0x7B, 0x5B, 0x7C, 0x5C, 0x7D, 0x5D, 0x5E, 0x5F,
];
const SILVER: [u8; RAMP_LEN] = [
    0xE0, 0x70, 0x50, 0x71, 0x51, 0x72, 0x73, 0x52, 0x74, 0x53, 0x75, 0x54, 0x55, 0x56, 0x57, 0x58,
];
const DWARVEN: [u8; RAMP_LEN] = [
    0x90, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0x9B, 0x9C, 0x9D, 0x9E, 0x9F,
];
const MITHRIL: [u8; RAMP_LEN] = [
    0x67, 0x68, 0x69, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F, 0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE,
];
const ADAMANTIUM: [u8; RAMP_LEN] = [
    0x5A, 0x5B, 0x7C, 0x5C, 0x7D, 0x5D, 0x7E, 0x5E, 0x7F, 0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE,
];
const EBONY: [u8; RAMP_LEN] = [
    0x77, 0x78, 0x79, 0x7A, 0x7B, 0x7C, 0x7D, 0x7E, 0x7F, 0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE,
];
const ORCISH: [u8; RAMP_LEN] = [
    0xA2, 0xA3, 0xC8, 0xC9, 0xCA, 0xCB, 0xCC, 0xCD, 0xCE, 0xCF, 0xD8, 0xD9, 0xDA, 0xDB, 0xDC, 0xDD,
];
const DAEDRIC: [u8; RAMP_LEN] = [
    0xEF, 0xF0, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE,
];

/// Material a weapon sprite is tinted as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    /// No tint.
    #[default]
    None,
    /// Iron.
    Iron,
    /// Steel, drawn with the untinted ramp.
    Steel,
    /// Silver.
    Silver,
    /// Elven, shares the silver ramp.
    Elven,
    /// Dwarven.
    Dwarven,
    /// Mithril.
    Mithril,
    /// Adamantium.
    Adamantium,
    /// Ebony.
    Ebony,
    /// Orcish.
    Orcish,
    /// Daedric.
    Daedric,
}

impl MetalType {
    /// Every metal type, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::None,
        Self::Iron,
        Self::Steel,
        Self::Silver,
        Self::Elven,
        Self::Dwarven,
        Self::Mithril,
        Self::Adamantium,
        Self::Ebony,
        Self::Orcish,
        Self::Daedric,
    ];

    /// Replacement for each ramp index, `table[v - 0x70]`.
    #[must_use]
    pub const fn swap_table(self) -> &'static [u8; RAMP_LEN] {
        match self {
            Self::None | Self::Steel => &IDENTITY,
            Self::Iron => &IRON,
            Self::Silver | Self::Elven => &SILVER,
            Self::Dwarven => &DWARVEN,
            Self::Mithril => &MITHRIL,
            Self::Adamantium => &ADAMANTIUM,
            Self::Ebony => &EBONY,
            Self::Orcish => &ORCISH,
            Self::Daedric => &DAEDRIC,
        }
    }

    /// Tinted value of a single palette index.
    #[inline]
    #[must_use]
    pub const fn swap(self, index: u8) -> u8 {
        if index >= RAMP_START && index <= RAMP_END {
            self.swap_table()[(index - RAMP_START) as usize]
        } else {
            index
        }
    }
}

/// Swaps the ramp indices of `buf` in place for the `metal` table.
///
/// Row padding beyond the visible width is left untouched.
pub fn tint(buf: &mut IndexedBuffer, metal: MetalType) {
    if metal.swap_table() == &IDENTITY {
        return;
    }

    for y in 0..buf.height() {
        for index in buf.row_mut(y) {
            *index = metal.swap(*index);
        }
    }

    tracing::trace!("Tinted {}x{} indexed image as {:?}", buf.width(), buf.height(), metal);
}
