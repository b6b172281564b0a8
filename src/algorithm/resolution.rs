use rayon::prelude::*;

use super::Group;
use crate::IndexInt;
use crate::flags::FlagPolicy;
use crate::views::SuffixArrayView;

// orders the members of every deferred chain. a chain consists of suffixes
// that each extend the next one by a single factor repetition, so its order
// is decided entirely by where the suffix after its last member ended up
pub fn resolve_deferred<I: IndexInt, B: IndexInt, F: FlagPolicy>(
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
    deferred: &[Group],
) {
    let descending: Vec<bool> = deferred
        .iter()
        .map(|group| chain_is_descending::<I, B, F>(sa, ranks, group))
        .collect();

    write_final_order::<I, B, F>(sa, ranks, deferred, &descending);
}

pub fn resolve_deferred_parallel<I: IndexInt, B: IndexInt, F: FlagPolicy>(
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
    deferred: &[Group],
) {
    let sa_snapshot: &SuffixArrayView<'_, I> = sa;
    let ranks_snapshot: &[B] = ranks;

    let descending: Vec<bool> = deferred
        .par_iter()
        .map(|group| chain_is_descending::<I, B, F>(sa_snapshot, ranks_snapshot, group))
        .collect();

    write_final_order::<I, B, F>(sa, ranks, deferred, &descending);
}

// the extending suffix ranks either before or after the whole chain, never
// inside it, and all chain members follow it to the same side
fn chain_is_descending<I: IndexInt, B: IndexInt, F: FlagPolicy>(
    sa: &SuffixArrayView<'_, I>,
    ranks: &[B],
    group: &Group,
) -> bool {
    let last_member = F::untag(sa.get(group.left + group.size - 1)).to_usize();
    let extending_rank = ranks[last_member + group.depth].to_usize();

    debug_assert!(extending_rank < group.left || extending_rank >= group.left + group.size);

    extending_rank < group.left
}

fn write_final_order<I: IndexInt, B: IndexInt, F: FlagPolicy>(
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
    deferred: &[Group],
    descending: &[bool],
) {
    let interior = sa.interior_mut();

    for (group, &descending) in deferred.iter().zip(descending) {
        let segment = &mut interior[group.left - 2..group.left - 2 + group.size];

        if descending {
            segment.reverse();
        }

        for (offset, &entry) in segment.iter().enumerate() {
            ranks[F::untag(entry).to_usize()] = B::from_usize(group.left + offset);
        }
    }
}
