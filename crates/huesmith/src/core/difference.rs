use crate::Float;

/// Compute Delta-E for Oklab, which is the Euclidean distance between the two
/// coordinate sets.
pub(crate) fn delta_e_ok(coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
    let [l1, a1, b1] = coordinates1;
    let [l2, a2, b2] = coordinates2;

    let dl = l1 - l2;
    let da = a1 - a2;
    let db = b1 - b2;

    dl.mul_add(dl, da.mul_add(da, db * db)).sqrt()
}

/// Find the candidate closest to some origin.
///
/// This function computes the distance metric for every candidate and returns
/// the index of the candidate with minimal distance, or `None` if there are no
/// candidates. Ties resolve to the earliest candidate.
pub(crate) fn find_closest<C, F, D>(candidates: C, mut compute_distance: F) -> Option<usize>
where
    C: IntoIterator,
    F: FnMut(&C::Item) -> D,
    D: PartialOrd,
{
    let mut min_distance: Option<D> = None;
    let mut min_index = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let distance = compute_distance(&candidate);
        let closer = match &min_distance {
            Some(min) => distance < *min,
            None => true,
        };
        if closer {
            min_distance = Some(distance);
            min_index = Some(index);
        }
    }

    min_index
}

#[cfg(test)]
mod test {
    use super::{delta_e_ok, find_closest};

    #[test]
    fn test_delta_e_ok() {
        let oklab1 = [0.5, 0.1, -0.1];
        let oklab2 = [0.5, 0.1, -0.1];
        assert_eq!(delta_e_ok(&oklab1, &oklab2), 0.0);

        let oklab3 = [0.6, 0.1, -0.1];
        assert!((delta_e_ok(&oklab1, &oklab3) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_find_closest() {
        let haystack = [10_i32, 4, 7, 4];
        assert_eq!(find_closest(haystack, |n| (n - 5).abs()), Some(1));

        let empty: [i32; 0] = [];
        assert_eq!(find_closest(empty, |n| *n), None);
    }
}
