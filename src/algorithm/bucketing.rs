use std::cmp::Ordering;

use rayon::prelude::*;

use super::Group;
use crate::IndexInt;
use crate::flags::FlagPolicy;
use crate::views::{SuffixArrayView, TextOrder};

// places every interior position into its first symbol bucket and returns the
// resulting depth 1 groups, leftmost first. the side slots receive their final
// values immediately, because the bound suffixes are the two smallest ones
pub fn bucket_by_first_symbol<V: TextOrder, I: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
) -> Vec<Group> {
    write_side_slots(sa);

    let interior = sa.interior_mut();

    for (offset, entry) in interior.iter_mut().enumerate() {
        *entry = I::from_usize(offset + 1);
    }

    interior.sort_unstable_by(|&a, &b| compare_first_symbols(text, a, b));

    let groups = scan_group_borders(text, interior);

    if F::ENABLED {
        for entry in interior.iter_mut() {
            *entry = tag_ascent::<V, I, F>(text, *entry);
        }
    }

    groups
}

pub fn bucket_by_first_symbol_parallel<V: TextOrder, I: IndexInt, F: FlagPolicy>(
    text: &V,
    sa: &mut SuffixArrayView<'_, I>,
) -> Vec<Group> {
    write_side_slots(sa);

    let interior = sa.interior_mut();

    interior
        .par_iter_mut()
        .enumerate()
        .for_each(|(offset, entry)| {
            *entry = I::from_usize(offset + 1);
        });

    interior.par_sort_unstable_by(|&a, &b| compare_first_symbols(text, a, b));

    let groups = scan_group_borders(text, interior);

    if F::ENABLED {
        interior.par_iter_mut().for_each(|entry| {
            *entry = tag_ascent::<V, I, F>(text, *entry);
        });
    }

    groups
}

fn write_side_slots<I: IndexInt>(sa: &mut SuffixArrayView<'_, I>) {
    let last_position = sa.len() - 1;
    sa.set(0, I::from_usize(last_position));
    sa.set(1, I::ZERO);
}

fn compare_first_symbols<V: TextOrder, I: IndexInt>(text: &V, a: I, b: I) -> Ordering {
    let a = a.to_usize();
    let b = b.to_usize();

    text.key_at(a).cmp(&text.key_at(b)).then(a.cmp(&b))
}

fn scan_group_borders<V: TextOrder, I: IndexInt>(text: &V, interior: &[I]) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut run_start = 0;

    for offset in 1..=interior.len() {
        let border_reached = offset == interior.len()
            || text.key_at(interior[offset].to_usize())
                != text.key_at(interior[run_start].to_usize());

        if border_reached {
            groups.push(Group {
                left: run_start + 2,
                size: offset - run_start,
                depth: 1,
            });
            run_start = offset;
        }
    }

    groups
}

// marks positions preceded by a strictly smaller symbol, which can never
// continue a factor chain
fn tag_ascent<V: TextOrder, I: IndexInt, F: FlagPolicy>(text: &V, entry: I) -> I {
    let position = entry.to_usize();

    F::tag_if(text.key_at(position - 1) < text.key_at(position), entry)
}
