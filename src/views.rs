use crate::Symbol;

// read-only ordering view of the input text, including its two boundary
// positions, which may be virtual or physically present in the text
pub trait TextOrder: Sync {
    const VIRTUAL_BOUNDS: bool;

    // logical length, bounds included
    fn len(&self) -> usize;

    fn key_at(&self, position: usize) -> u64;
}

// text bracketed by two virtual minimal positions, symbol keys are shifted
// up by one so that the bounds order below every real symbol, zero bytes
// included
pub struct PaddedText<'a, C> {
    text: &'a [C],
}

impl<'a, C> PaddedText<'a, C> {
    pub fn new(text: &'a [C]) -> Self {
        Self { text }
    }
}

impl<C: Symbol> TextOrder for PaddedText<'_, C> {
    const VIRTUAL_BOUNDS: bool = true;

    fn len(&self) -> usize {
        self.text.len() + 2
    }

    fn key_at(&self, position: usize) -> u64 {
        if position == 0 || position == self.len() - 1 {
            return 0;
        }

        let key = self.text[position - 1].widen();
        debug_assert!(key != u64::MAX);

        key + 1
    }
}

// text whose first and last symbols already are distinguished minimal
// sentinels, keys are the raw symbol values
pub struct SentinelText<'a, C> {
    text: &'a [C],
}

impl<'a, C> SentinelText<'a, C> {
    pub fn new(text: &'a [C]) -> Self {
        Self { text }
    }
}

impl<C: Symbol> TextOrder for SentinelText<'_, C> {
    const VIRTUAL_BOUNDS: bool = false;

    fn len(&self) -> usize {
        self.text.len()
    }

    fn key_at(&self, position: usize) -> u64 {
        self.text[position].widen()
    }
}

// suffix array slots in logical coordinates, the two smallest suffixes
// always sit in the side slots and the remaining suffixes in the interior,
// which may live in a caller buffer that has no room for the side slots
pub struct SuffixArrayView<'a, I> {
    side: &'a mut [I],
    interior: &'a mut [I],
}

impl<'a, I: Copy> SuffixArrayView<'a, I> {
    pub fn new(side: &'a mut [I], interior: &'a mut [I]) -> Self {
        assert_eq!(side.len(), 2);

        Self { side, interior }
    }

    pub fn len(&self) -> usize {
        self.interior.len() + 2
    }

    pub fn get(&self, slot: usize) -> I {
        if slot < 2 {
            self.side[slot]
        } else {
            self.interior[slot - 2]
        }
    }

    pub fn set(&mut self, slot: usize, value: I) {
        if slot < 2 {
            self.side[slot] = value;
        } else {
            self.interior[slot - 2] = value;
        }
    }

    pub fn interior_mut(&mut self) -> &mut [I] {
        self.interior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_text_keys() {
        let view = PaddedText::new(b"ab".as_slice());

        assert_eq!(view.len(), 4);
        assert_eq!(view.key_at(0), 0);
        assert_eq!(view.key_at(1), b'a' as u64 + 1);
        assert_eq!(view.key_at(2), b'b' as u64 + 1);
        assert_eq!(view.key_at(3), 0);
    }

    #[test]
    fn test_padded_text_orders_zero_bytes_above_the_bounds() {
        let view = PaddedText::new(b"\0a".as_slice());

        assert!(view.key_at(0) < view.key_at(1));
        assert!(view.key_at(1) < view.key_at(2));
    }

    #[test]
    fn test_sentinel_text_keys_are_raw() {
        let view = SentinelText::new(b"\0ab\0".as_slice());

        assert_eq!(view.len(), 4);
        assert_eq!(view.key_at(0), 0);
        assert_eq!(view.key_at(1), b'a' as u64);
        assert_eq!(view.key_at(3), 0);
    }

    #[test]
    fn test_suffix_array_view_slot_mapping() {
        let mut side = [0usize; 2];
        let mut interior = [0usize; 3];
        let mut sa = SuffixArrayView::new(&mut side, &mut interior);

        assert_eq!(sa.len(), 5);

        for slot in 0..sa.len() {
            sa.set(slot, slot * 10);
        }

        assert_eq!(sa.get(0), 0);
        assert_eq!(sa.get(1), 10);
        assert_eq!(sa.get(4), 40);
        assert_eq!(side, [0, 10]);
        assert_eq!(interior, [20, 30, 40]);
    }
}
