mod algorithm;
mod flags;
mod packed;
mod views;

pub use packed::{HighPart, PackedUint, Uint40, Uint48};

use std::error;
use std::fmt;
use std::marker::PhantomData;

use num_traits::{AsPrimitive, PrimInt};

use flags::{NoFlags, SignBitFlags};
use views::{PaddedText, SentinelText, SuffixArrayView, TextOrder};

pub trait Symbol: Copy + Ord + Sync {
    fn widen(self) -> u64;
}

impl<C> Symbol for C
where
    C: PrimInt + AsPrimitive<u64> + Sync,
{
    fn widen(self) -> u64 {
        self.as_()
    }
}

pub trait IndexInt: Copy + Ord + Send + Sync + 'static {
    const ZERO: Self;
    const MAX_VALUE: u64;
    const FLAG_MASK: Self;
    const VALUE_MASK: Self;

    fn from_usize(value: usize) -> Self;

    fn to_usize(self) -> usize;

    fn bitor(self, rhs: Self) -> Self;

    fn bitand(self, rhs: Self) -> Self;
}

macro_rules! impl_index_int_for_primitives {
    ($($int:ty),*) => {$(
        impl IndexInt for $int {
            const ZERO: Self = 0;
            const MAX_VALUE: u64 = <$int>::MAX as u64;
            const FLAG_MASK: Self = 1 << (<$int>::BITS - 1);
            const VALUE_MASK: Self = !(1 << (<$int>::BITS - 1));

            fn from_usize(value: usize) -> Self {
                debug_assert!(value as u64 <= Self::MAX_VALUE);

                value as $int
            }

            fn to_usize(self) -> usize {
                self as usize
            }

            fn bitor(self, rhs: Self) -> Self {
                self | rhs
            }

            fn bitand(self, rhs: Self) -> Self {
                self & rhs
            }
        }
    )*};
}

impl_index_int_for_primitives!(u8, u16, u32, u64, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    BufferTooSmall { required: usize, len: usize },
    IndexTooNarrow { required: u64, max: u64 },
    MissingSentinels,
    Allocation { bytes: usize },
    ThreadPool { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall { required, len } => {
                write!(
                    f,
                    "suffix array buffer of length {len} cannot hold {required} entries"
                )
            }
            Error::IndexTooNarrow { required, max } => {
                write!(
                    f,
                    "index type cannot store {required}, its largest value is {max}"
                )
            }
            Error::MissingSentinels => {
                write!(
                    f,
                    "text must start and end with equal symbols that are strictly smaller than all others"
                )
            }
            Error::Allocation { bytes } => {
                write!(f, "failed to allocate {bytes} bytes of working memory")
            }
            Error::ThreadPool { reason } => {
                write!(f, "failed to build thread pool: {reason}")
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankStorage {
    Auto,
    SameAsOutput,
    Packed40,
    Packed48,
}

pub struct GsacaBuilder<C = u8, I = usize> {
    threads: usize,
    use_flags: bool,
    rank_storage: RankStorage,
    _marker: PhantomData<(C, I)>,
}

impl<C: Symbol, I: IndexInt> GsacaBuilder<C, I> {
    pub fn new() -> Self {
        Self {
            threads: 0,
            use_flags: true,
            rank_storage: RankStorage::Auto,
            _marker: PhantomData,
        }
    }

    // zero means all available threads, one stays on the calling thread
    pub fn with_threads(&mut self, threads: usize) -> &mut Self {
        self.threads = threads;
        self
    }

    pub fn with_flags(&mut self, use_flags: bool) -> &mut Self {
        self.use_flags = use_flags;
        self
    }

    pub fn with_rank_storage(&mut self, rank_storage: RankStorage) -> &mut Self {
        self.rank_storage = rank_storage;
        self
    }

    pub fn construct_suffix_array(&self, text: &[C]) -> Result<Vec<I>, Error> {
        let mut suffix_array_buffer = try_alloc_buffer(text.len())?;
        self.construct_suffix_array_inplace(text, &mut suffix_array_buffer)?;

        Ok(suffix_array_buffer)
    }

    pub fn construct_suffix_array_inplace(
        &self,
        text: &[C],
        suffix_array_buffer: &mut [I],
    ) -> Result<(), Error> {
        if suffix_array_buffer.len() < text.len() {
            return Err(Error::BufferTooSmall {
                required: text.len(),
                len: suffix_array_buffer.len(),
            });
        }

        if text.is_empty() {
            return Ok(());
        }

        let view = PaddedText::new(text);
        let mut side = [I::ZERO; 2];
        let mut sa = SuffixArrayView::new(&mut side, &mut suffix_array_buffer[..text.len()]);

        self.run(&view, &mut sa)
    }

    pub fn construct_suffix_array_with_sentinels(&self, text: &[C]) -> Result<Vec<I>, Error> {
        let mut suffix_array_buffer = try_alloc_buffer(text.len())?;
        self.construct_suffix_array_with_sentinels_inplace(text, &mut suffix_array_buffer)?;

        Ok(suffix_array_buffer)
    }

    pub fn construct_suffix_array_with_sentinels_inplace(
        &self,
        text: &[C],
        suffix_array_buffer: &mut [I],
    ) -> Result<(), Error> {
        if suffix_array_buffer.len() < text.len() {
            return Err(Error::BufferTooSmall {
                required: text.len(),
                len: suffix_array_buffer.len(),
            });
        }

        validate_sentinels(text)?;

        let view = SentinelText::new(text);
        let (side, interior) = suffix_array_buffer[..text.len()].split_at_mut(2);
        let mut sa = SuffixArrayView::new(side, interior);

        self.run(&view, &mut sa)
    }

    fn run<V: TextOrder>(
        &self,
        text: &V,
        sa: &mut SuffixArrayView<'_, I>,
    ) -> Result<(), Error> {
        let max_stored = (text.len() - 1) as u64;

        if max_stored > I::MAX_VALUE {
            return Err(Error::IndexTooNarrow {
                required: max_stored,
                max: I::MAX_VALUE,
            });
        }

        // a set marker bit must never collide with a position value
        let flag_bit = (I::MAX_VALUE >> 1) + 1;
        let use_flags = self.use_flags && max_stored < flag_bit;

        let rank_storage = match self.rank_storage {
            RankStorage::Auto => {
                let packed_max = <Uint40 as IndexInt>::MAX_VALUE;

                if I::MAX_VALUE > packed_max && max_stored <= packed_max {
                    RankStorage::Packed40
                } else {
                    RankStorage::SameAsOutput
                }
            }
            explicit => explicit,
        };

        match rank_storage {
            RankStorage::Packed40 => {
                let max = <Uint40 as IndexInt>::MAX_VALUE;

                if max_stored > max {
                    return Err(Error::IndexTooNarrow {
                        required: max_stored,
                        max,
                    });
                }

                self.run_with_rank_type::<V, Uint40>(text, sa, use_flags)
            }
            RankStorage::Packed48 => {
                let max = <Uint48 as IndexInt>::MAX_VALUE;

                if max_stored > max {
                    return Err(Error::IndexTooNarrow {
                        required: max_stored,
                        max,
                    });
                }

                self.run_with_rank_type::<V, Uint48>(text, sa, use_flags)
            }
            RankStorage::SameAsOutput | RankStorage::Auto => {
                self.run_with_rank_type::<V, I>(text, sa, use_flags)
            }
        }
    }

    fn run_with_rank_type<V: TextOrder, B: IndexInt>(
        &self,
        text: &V,
        sa: &mut SuffixArrayView<'_, I>,
        use_flags: bool,
    ) -> Result<(), Error> {
        if use_flags {
            algorithm::construct::<V, I, B, SignBitFlags>(text, sa, self.threads)
        } else {
            algorithm::construct::<V, I, B, NoFlags>(text, sa, self.threads)
        }
    }
}

impl<C: Symbol, I: IndexInt> Default for GsacaBuilder<C, I> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_sentinels<C: Symbol>(text: &[C]) -> Result<(), Error> {
    let (&first, rest) = text.split_first().ok_or(Error::MissingSentinels)?;
    let (&last, interior) = rest.split_last().ok_or(Error::MissingSentinels)?;

    if first != last || interior.iter().any(|&symbol| symbol <= first) {
        return Err(Error::MissingSentinels);
    }

    Ok(())
}

pub(crate) fn try_alloc_buffer<T: IndexInt>(len: usize) -> Result<Vec<T>, Error> {
    let mut buffer = Vec::new();

    buffer.try_reserve_exact(len).map_err(|_| Error::Allocation {
        bytes: len * size_of::<T>(),
    })?;
    buffer.resize(len, T::ZERO);

    Ok(buffer)
}
