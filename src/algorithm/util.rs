// splits the slice into disjoint mutable windows given as (start, len) pairs,
// which must be ascending and non-overlapping
pub fn split_segments_mut<'a, T>(
    mut slice: &'a mut [T],
    windows: impl Iterator<Item = (usize, usize)>,
) -> Vec<&'a mut [T]> {
    let mut segments = Vec::new();
    let mut consumed = 0;

    for (start, len) in windows {
        debug_assert!(start >= consumed);

        let rest = slice.split_at_mut(start - consumed).1;
        let (segment, rest) = rest.split_at_mut(len);

        segments.push(segment);
        slice = rest;
        consumed = start + len;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_segments_mut() {
        let mut array = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let windows = [(1, 2), (3, 1), (7, 3)];

        let segments = split_segments_mut(&mut array, windows.into_iter());
        assert_eq!(segments, [&[1, 2][..], &[3], &[7, 8, 9]]);

        for segment in segments {
            for value in segment.iter_mut() {
                *value += 100;
            }
        }

        assert_eq!(array, [0, 101, 102, 103, 4, 5, 6, 107, 108, 109]);
    }

    #[test]
    fn test_split_segments_mut_without_windows() {
        let mut array = [0i32; 4];
        let segments = split_segments_mut(&mut array, std::iter::empty());

        assert!(segments.is_empty());
    }
}
