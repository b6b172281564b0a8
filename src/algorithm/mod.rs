mod bucketing;
mod refinement;
mod resolution;
mod util;


use rayon::prelude::*;

use crate::flags::FlagPolicy;
use crate::views::{SuffixArrayView, TextOrder};
use crate::{Error, IndexInt};

// below this logical length, thread setup costs more than it saves
const PARALLEL_CUTOFF: usize = 10_000;

// a contiguous range of suffix array slots holding suffixes that agree on
// their first `depth` symbols. `left` is the logical slot of the leftmost
// member
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Group {
    pub left: usize,
    pub size: usize,
    pub depth: usize,
}

pub fn construct<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
    threads: usize,
) -> Result<(), Error> {
    debug_assert_eq!(text.len(), sa.len());

    let mut ranks: Vec<B> = crate::try_alloc_buffer(text.len())?;

    if threads == 1 || text.len() < PARALLEL_CUTOFF {
        construct_sequential::<V, I, B, F>(text, sa, &mut ranks);
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|build_error| Error::ThreadPool {
            reason: build_error.to_string(),
        })?;

    pool.install(|| construct_parallel::<V, I, B, F>(text, sa, &mut ranks));

    Ok(())
}

fn construct_sequential<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
) {
    let groups = bucketing::bucket_by_first_symbol::<V, I, F>(text, sa);
    let deferred = refinement::refine_groups::<V, I, B, F>(text, sa, ranks, groups);
    resolution::resolve_deferred::<I, B, F>(sa, ranks, &deferred);

    finalize::<V, I, F>(sa);
}

fn construct_parallel<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
) {
    let groups = bucketing::bucket_by_first_symbol_parallel::<V, I, F>(text, sa);
    let deferred = refinement::refine_groups_parallel::<V, I, B, F>(text, sa, ranks, groups);
    resolution::resolve_deferred_parallel::<I, B, F>(sa, ranks, &deferred);

    finalize_parallel::<V, I, F>(sa);
}

// strips marker bits and translates entries back into caller coordinates.
// under virtual bounds the interior entries shift down by one and the side
// slots are discarded, otherwise all slots keep their positions
fn finalize<V: TextOrder, I: IndexInt, F: FlagPolicy>(sa: &mut SuffixArrayView<'_, I>) {
    if V::VIRTUAL_BOUNDS {
        for entry in sa.interior_mut() {
            *entry = I::from_usize(F::untag(*entry).to_usize() - 1);
        }
    } else {
        for slot in 0..2 {
            let entry = sa.get(slot);
            sa.set(slot, F::untag(entry));
        }
        for entry in sa.interior_mut() {
            *entry = F::untag(*entry);
        }
    }
}

fn finalize_parallel<V: TextOrder, I: IndexInt, F: FlagPolicy>(sa: &mut SuffixArrayView<'_, I>) {
    if V::VIRTUAL_BOUNDS {
        sa.interior_mut().par_iter_mut().for_each(|entry| {
            *entry = I::from_usize(F::untag(*entry).to_usize() - 1);
        });
    } else {
        for slot in 0..2 {
            let entry = sa.get(slot);
            sa.set(slot, F::untag(entry));
        }
        sa.interior_mut().par_iter_mut().for_each(|entry| {
            *entry = F::untag(*entry);
        });
    }
}
