use crate::IndexInt;

// decides whether suffix array entries carry a marker bit in their sign position
pub trait FlagPolicy {
    const ENABLED: bool;

    fn tag<I: IndexInt>(value: I) -> I;

    fn tag_if<I: IndexInt>(condition: bool, value: I) -> I;

    fn untag<I: IndexInt>(value: I) -> I;

    fn is_tagged<I: IndexInt>(value: I) -> bool;
}

pub struct SignBitFlags;

pub struct NoFlags;

impl FlagPolicy for SignBitFlags {
    const ENABLED: bool = true;

    fn tag<I: IndexInt>(value: I) -> I {
        value.bitor(I::FLAG_MASK)
    }

    fn tag_if<I: IndexInt>(condition: bool, value: I) -> I {
        let mask = if condition { I::FLAG_MASK } else { I::ZERO };
        value.bitor(mask)
    }

    fn untag<I: IndexInt>(value: I) -> I {
        value.bitand(I::VALUE_MASK)
    }

    fn is_tagged<I: IndexInt>(value: I) -> bool {
        value.bitand(I::FLAG_MASK) != I::ZERO
    }
}

impl FlagPolicy for NoFlags {
    const ENABLED: bool = false;

    fn tag<I: IndexInt>(value: I) -> I {
        value
    }

    fn tag_if<I: IndexInt>(_condition: bool, value: I) -> I {
        value
    }

    fn untag<I: IndexInt>(value: I) -> I {
        value
    }

    fn is_tagged<I: IndexInt>(_value: I) -> bool {
        false
    }
}
