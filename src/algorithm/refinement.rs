use rayon::prelude::*;

use super::{Group, util};
use crate::IndexInt;
use crate::flags::FlagPolicy;
use crate::views::{SuffixArrayView, TextOrder};

// outcome of refining one group, with rank writes staged so that every key
// read of the refinement sees the ranks as they were when the group was taken
struct Refinement<B> {
    rank_writes: Vec<(usize, B)>,
    reopened: Vec<Group>,
    deferred: Vec<Group>,
}

// gives every position the left border of its phase 0 group as initial rank;
// the bound suffixes receive their final ranks directly
pub fn seed_initial_ranks<I: IndexInt, B: IndexInt, F: FlagPolicy>(
    sa: &SuffixArrayView<'_, I>,
    ranks: &mut [B],
    groups: &[Group],
) {
    ranks[sa.len() - 1] = B::ZERO;
    ranks[0] = B::from_usize(1);

    for group in groups {
        for slot in group.left..group.left + group.size {
            let position = F::untag(sa.get(slot)).to_usize();
            ranks[position] = B::from_usize(group.left);
        }
    }
}

// repeatedly takes an open group and partitions it by the ranks found one
// comparison depth further into the suffixes, until only resolved positions
// and deferred chains remain
pub fn refine_groups<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
    groups: Vec<Group>,
) -> Vec<Group> {
    seed_initial_ranks::<I, B, F>(sa, ranks, &groups);

    let mut open: Vec<Group> = groups.into_iter().filter(|group| group.size > 1).collect();
    let mut deferred = Vec::new();
    let mut scratch = Vec::new();
    let interior = sa.interior_mut();

    while let Some(group) = open.pop() {
        let segment = &mut interior[group.left - 2..group.left - 2 + group.size];
        let outcome = refine_group::<V, I, B, F>(text, segment, group, ranks, &mut scratch);

        for &(position, rank) in &outcome.rank_writes {
            ranks[position] = rank;
        }
        open.extend(outcome.reopened);
        deferred.extend(outcome.deferred);
    }

    deferred
}

// same refinement, but one round of independent groups at a time. all groups
// of a round are partitioned against the ranks from the previous round
// border, which refines less eagerly than the group stack but ends in the
// same resolved order
pub fn refine_groups_parallel<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
    ranks: &mut [B],
    groups: Vec<Group>,
) -> Vec<Group> {
    seed_initial_ranks::<I, B, F>(sa, ranks, &groups);

    let mut round: Vec<Group> = groups.into_iter().filter(|group| group.size > 1).collect();
    let mut deferred = Vec::new();
    let interior = sa.interior_mut();

    while !round.is_empty() {
        // reopened groups come out ascending, as split_segments_mut needs them
        let segments = util::split_segments_mut(
            &mut *interior,
            round.iter().map(|group| (group.left - 2, group.size)),
        );

        let ranks_snapshot: &[B] = ranks;
        let outcomes: Vec<Refinement<B>> = round
            .par_iter()
            .zip(segments.into_par_iter())
            .map_init(Vec::new, |scratch, (&group, segment)| {
                refine_group::<V, I, B, F>(text, segment, group, ranks_snapshot, scratch)
            })
            .collect();

        let mut next_round = Vec::new();
        for outcome in outcomes {
            for (position, rank) in outcome.rank_writes {
                ranks[position] = rank;
            }
            next_round.extend(outcome.reopened);
            deferred.extend(outcome.deferred);
        }

        round = next_round;
    }

    deferred
}

fn refine_group<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    segment: &mut [I],
    group: Group,
    ranks: &[B],
    scratch: &mut Vec<(B, I)>,
) -> Refinement<B> {
    debug_assert_eq!(segment.len(), group.size);

    scratch.clear();
    scratch.extend(segment.iter().map(|&entry| {
        let position = F::untag(entry).to_usize();
        debug_assert!(position + group.depth < text.len());

        (ranks[position + group.depth], entry)
    }));

    // stable, so tied entries keep their ascending position order
    scratch.sort_by(|a, b| a.0.cmp(&b.0));

    for (entry, &(_, sorted_entry)) in segment.iter_mut().zip(scratch.iter()) {
        *entry = sorted_entry;
    }

    let mut outcome = Refinement {
        rank_writes: Vec::new(),
        reopened: Vec::new(),
        deferred: Vec::new(),
    };

    let mut run_start = 0;
    while run_start < group.size {
        let mut run_end = run_start + 1;
        while run_end < group.size && scratch[run_end].0 == scratch[run_start].0 {
            run_end += 1;
        }

        resolve_or_reopen_run::<V, I, B, F>(
            text,
            &mut segment[run_start..run_end],
            group.left + run_start,
            group.depth,
            &mut outcome,
        );
        run_start = run_end;
    }

    outcome
}

fn resolve_or_reopen_run<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    run: &mut [I],
    left: usize,
    depth: usize,
    outcome: &mut Refinement<B>,
) {
    if run.len() == 1 {
        let position = F::untag(run[0]).to_usize();
        outcome.rank_writes.push((position, B::from_usize(left)));
        return;
    }

    if is_uniform_chain::<I, F>(run, depth) {
        if depth == 1 {
            resolve_same_symbol_chain::<V, I, B, F>(text, run, left, outcome);
            return;
        }

        for &entry in run.iter() {
            outcome
                .rank_writes
                .push((F::untag(entry).to_usize(), B::from_usize(left)));
        }
        outcome.deferred.push(Group {
            left,
            size: run.len(),
            depth,
        });
        return;
    }

    for &entry in run.iter() {
        outcome
            .rank_writes
            .push((F::untag(entry).to_usize(), B::from_usize(left)));
    }
    outcome.reopened.push(Group {
        left,
        size: run.len(),
        depth: depth + 1,
    });
}

// a run forms a chain when its positions step by exactly the comparison
// depth, so each member starts one factor repetition before the next. a
// tagged member after the first disproves that its factor is self-repeating
fn is_uniform_chain<I: IndexInt, F: FlagPolicy>(run: &[I], depth: usize) -> bool {
    if F::ENABLED && run[1..].iter().any(|&entry| F::is_tagged(entry)) {
        return false;
    }

    run.windows(2)
        .all(|pair| F::untag(pair[1]).to_usize() - F::untag(pair[0]).to_usize() == depth)
}

// chain members at depth one are consecutive positions of a single symbol
// run. the two symbols right after the run decide whether the repetition
// count sorts ascending or descending
fn resolve_same_symbol_chain<V: TextOrder, I: IndexInt, B: IndexInt, F: FlagPolicy>(
    text: &V,
    run: &mut [I],
    left: usize,
    outcome: &mut Refinement<B>,
) {
    let exit = F::untag(run[run.len() - 1]).to_usize() + 1;
    debug_assert!(exit + 1 < text.len());

    if text.key_at(exit) >= text.key_at(exit + 1) {
        run.reverse();
    }

    for (offset, &entry) in run.iter().enumerate() {
        outcome
            .rank_writes
            .push((F::untag(entry).to_usize(), B::from_usize(left + offset)));
    }
}
