use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Sub, SubAssign};

use crate::IndexInt;

// high part of a packed integer, determines its total width
pub trait HighPart:
    Copy + Ord + Send + Sync + 'static + BitOr<Output = Self> + BitAnd<Output = Self>
{
    const BITS: u32;
    const ZERO: Self;
    const ONES: Self;
    const TOP_BIT: Self;
    const TOP_CLEARED: Self;

    fn widen(self) -> u64;

    // takes the high bits already shifted down to the value range of Self
    fn narrow(value: u64) -> Self;
}

impl HighPart for u8 {
    const BITS: u32 = 8;
    const ZERO: Self = 0;
    const ONES: Self = u8::MAX;
    const TOP_BIT: Self = 1 << 7;
    const TOP_CLEARED: Self = !(1 << 7);

    fn widen(self) -> u64 {
        self as u64
    }

    fn narrow(value: u64) -> Self {
        value as u8
    }
}

impl HighPart for u16 {
    const BITS: u32 = 16;
    const ZERO: Self = 0;
    const ONES: Self = u16::MAX;
    const TOP_BIT: Self = 1 << 15;
    const TOP_CLEARED: Self = !(1 << 15);

    fn widen(self) -> u64 {
        self as u64
    }

    fn narrow(value: u64) -> Self {
        value as u16
    }
}

// unsigned integer of 32 + H::BITS bits, stored as a packed low/high pair
// all arithmetic widens to u64 and narrows back, values beyond the packed
// width are caught by debug assertions
#[derive(Clone, Copy)]
#[repr(C, packed)]
pub struct PackedUint<H> {
    low: u32,
    high: H,
}

pub type Uint40 = PackedUint<u8>;
pub type Uint48 = PackedUint<u16>;

impl<H: HighPart> PackedUint<H> {
    pub const BITS: u32 = 32 + H::BITS;
    pub const MIN: Self = Self {
        low: 0,
        high: H::ZERO,
    };
    pub const MAX: Self = Self {
        low: u32::MAX,
        high: H::ONES,
    };

    pub fn from_u64(value: u64) -> Self {
        debug_assert!(value < 1u64 << Self::BITS);

        Self {
            low: value as u32,
            high: H::narrow(value >> 32),
        }
    }

    pub fn to_u64(self) -> u64 {
        let low = self.low;
        let high = self.high;

        low as u64 | (high.widen() << 32)
    }
}

impl<H: HighPart> From<u32> for PackedUint<H> {
    fn from(value: u32) -> Self {
        Self {
            low: value,
            high: H::ZERO,
        }
    }
}

impl<H: HighPart> From<PackedUint<H>> for u64 {
    fn from(value: PackedUint<H>) -> Self {
        value.to_u64()
    }
}

impl<H: HighPart> PartialEq for PackedUint<H> {
    fn eq(&self, other: &Self) -> bool {
        self.to_u64() == other.to_u64()
    }
}

impl<H: HighPart> Eq for PackedUint<H> {}

impl<H: HighPart> PartialOrd for PackedUint<H> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H: HighPart> Ord for PackedUint<H> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u64().cmp(&other.to_u64())
    }
}

impl<H: HighPart> Add for PackedUint<H> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_u64(self.to_u64() + rhs.to_u64())
    }
}

impl<H: HighPart> Sub for PackedUint<H> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert!(self >= rhs);

        Self::from_u64(self.to_u64().wrapping_sub(rhs.to_u64()))
    }
}

impl<H: HighPart> AddAssign for PackedUint<H> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<H: HighPart> SubAssign for PackedUint<H> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<H: HighPart> fmt::Debug for PackedUint<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}

impl<H: HighPart> IndexInt for PackedUint<H> {
    const ZERO: Self = Self::MIN;
    const MAX_VALUE: u64 = (1u64 << (32 + H::BITS)) - 1;
    const FLAG_MASK: Self = Self {
        low: 0,
        high: H::TOP_BIT,
    };
    const VALUE_MASK: Self = Self {
        low: u32::MAX,
        high: H::TOP_CLEARED,
    };

    fn from_usize(value: usize) -> Self {
        Self::from_u64(value as u64)
    }

    fn to_usize(self) -> usize {
        self.to_u64() as usize
    }

    fn bitor(self, rhs: Self) -> Self {
        let (low, high) = (self.low, self.high);
        let (rhs_low, rhs_high) = (rhs.low, rhs.high);

        Self {
            low: low | rhs_low,
            high: high | rhs_high,
        }
    }

    fn bitand(self, rhs: Self) -> Self {
        let (low, high) = (self.low, self.high);
        let (rhs_low, rhs_high) = (rhs.low, rhs.high);

        Self {
            low: low & rhs_low,
            high: high & rhs_high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_layout() {
        assert_eq!(size_of::<Uint40>(), 5);
        assert_eq!(size_of::<Uint48>(), 6);
        assert_eq!(align_of::<Uint40>(), 1);
        assert_eq!(Uint40::BITS, 40);
        assert_eq!(Uint48::BITS, 48);
    }

    #[test]
    fn test_round_trip_full_range() {
        let values = [
            0,
            1,
            42,
            u32::MAX as u64 - 1,
            u32::MAX as u64,
            u32::MAX as u64 + 1,
            (1 << 40) - 2,
            (1 << 40) - 1,
        ];

        for value in values {
            assert_eq!(Uint40::from_u64(value).to_u64(), value);
        }

        assert_eq!(Uint40::MIN.to_u64(), 0);
        assert_eq!(Uint40::MAX.to_u64(), (1 << 40) - 1);
        assert_eq!(Uint48::MAX.to_u64(), (1 << 48) - 1);
    }

    #[test]
    fn test_ordering_across_the_low_high_boundary() {
        let below = Uint40::from_u64(u32::MAX as u64);
        let above = Uint40::from_u64(u32::MAX as u64 + 1);

        assert!(below < above);
        assert!(above > below);
        assert_eq!(below.cmp(&below), Ordering::Equal);
        assert!(Uint40::MIN < Uint40::MAX);
    }

    #[test]
    fn test_arithmetic_via_widening() {
        let mut value = Uint40::from_u64(u32::MAX as u64);
        value += Uint40::from_u64(1);
        assert_eq!(value.to_u64(), u32::MAX as u64 + 1);

        value -= Uint40::from_u64(2);
        assert_eq!(value.to_u64(), u32::MAX as u64 - 1);

        let sum = Uint48::from_u64(1 << 40) + Uint48::from_u64(1 << 40);
        assert_eq!(sum.to_u64(), 1 << 41);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_overflow_is_asserted() {
        let _ = Uint40::MAX + Uint40::from_u64(1);
    }

    #[test]
    fn test_index_int_masks() {
        assert_eq!(<Uint40 as IndexInt>::MAX_VALUE, (1 << 40) - 1);
        assert_eq!(Uint40::FLAG_MASK.to_u64(), 1 << 39);
        assert_eq!(Uint40::VALUE_MASK.to_u64(), (1 << 39) - 1);
        assert_eq!(Uint48::FLAG_MASK.to_u64(), 1 << 47);

        let tagged = Uint40::from_u64(1234).bitor(Uint40::FLAG_MASK);
        assert_eq!(tagged.bitand(Uint40::VALUE_MASK).to_u64(), 1234);
    }
}
