// LogPage - core/paginate.rs
//
// Fixed-size page accounting over an ordered row set.

use std::ops::Range;

/// Number of pages needed for `len` rows. Never less than 1, so an empty
/// result still has a page to show.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Index range of page `page` (1-based) within `len` rows.
///
/// Page 0 is treated as page 1. A page past the end yields an empty range
/// positioned at `len`.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Slice `rows` to page `page` and report the total page count.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let bounds = page_bounds(rows.len(), page, page_size);
    (&rows[bounds], total_pages(rows.len(), page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 1000), 1);
        assert_eq!(total_pages(1, 1000), 1);
        assert_eq!(total_pages(1000, 1000), 1);
        assert_eq!(total_pages(1001, 1000), 2);
    }

    /// Scenario D: 2500 rows at 1000 per page.
    #[test]
    fn test_scenario_2500_rows() {
        let rows: Vec<usize> = (0..2500).collect();
        let (p1, total) = paginate(&rows, 1, 1000);
        assert_eq!(total, 3);
        assert_eq!(p1.len(), 1000);

        let (p3, _) = paginate(&rows, 3, 1000);
        assert_eq!(p3.len(), 500);
        assert_eq!(p3[0], 2000);

        let (p4, total) = paginate(&rows, 4, 1000);
        assert!(p4.is_empty());
        assert_eq!(total, 3);
    }

    #[test]
    fn test_page_zero_clamps_to_first() {
        let rows = [1, 2, 3];
        let (page, _) = paginate(&rows, 0, 2);
        assert_eq!(page, &[1, 2]);
    }

    #[test]
    fn test_pages_partition_rows() {
        for len in [0usize, 1, 7, 10, 11, 99] {
            let rows: Vec<usize> = (0..len).collect();
            let size = 10;
            let total = total_pages(len, size);
            let joined: Vec<usize> = (1..=total)
                .flat_map(|p| paginate(&rows, p, size).0.to_vec())
                .collect();
            assert_eq!(joined, rows, "partition of {len} rows");
        }
    }

    #[test]
    fn test_huge_page_index_does_not_overflow() {
        assert_eq!(page_bounds(10, usize::MAX, 1000), 10..10);
    }
}
