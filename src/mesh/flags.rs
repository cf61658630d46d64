// Copyright 2025 Lars Brubaker
// Per-triangle edge flags.
//
// Bit layout (one byte):
//   bits 0..=2  constrained flag of local edges 0, 1, 2
//   bits 3..=5  Delaunay flag of local edges 0, 1, 2
//   bit  6      interior (set by the finalization flood fill)

const CONSTRAINED_SHIFT: u32 = 0;
const DELAUNAY_SHIFT: u32 = 3;
const DELAUNAY_MASK: u8 = 0b111 << DELAUNAY_SHIFT;
const INTERIOR_BIT: u8 = 1 << 6;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TriFlags(u8);

impl TriFlags {
    #[inline]
    fn get(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    #[inline]
    fn set(&mut self, bit: u32, value: bool) {
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }

    #[inline]
    pub fn is_constrained(self, edge: usize) -> bool {
        debug_assert!(edge < 3);
        self.get(CONSTRAINED_SHIFT + edge as u32)
    }

    #[inline]
    pub fn set_constrained(&mut self, edge: usize, value: bool) {
        debug_assert!(edge < 3);
        self.set(CONSTRAINED_SHIFT + edge as u32, value);
    }

    #[inline]
    pub fn is_delaunay(self, edge: usize) -> bool {
        debug_assert!(edge < 3);
        self.get(DELAUNAY_SHIFT + edge as u32)
    }

    #[inline]
    pub fn set_delaunay(&mut self, edge: usize, value: bool) {
        debug_assert!(edge < 3);
        self.set(DELAUNAY_SHIFT + edge as u32, value);
    }

    #[inline]
    pub fn clear_delaunay(&mut self) {
        self.0 &= !DELAUNAY_MASK;
    }

    #[inline]
    pub fn is_interior(self) -> bool {
        self.0 & INTERIOR_BIT != 0
    }

    #[inline]
    pub fn set_interior(&mut self, value: bool) {
        if value {
            self.0 |= INTERIOR_BIT;
        } else {
            self.0 &= !INTERIOR_BIT;
        }
    }

    /// Raw bit pattern.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}
