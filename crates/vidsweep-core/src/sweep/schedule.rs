//! Window selection for the daily sweep.
//!
//! Each run examines one contiguous window of the id-ordered video page
//! list. The window position advances with the calendar day, so over a full
//! cycle every page is checked once without re-scanning the table nightly.

/// Number of daily runs needed to cover the whole video table once.
/// Tracks the table size; never shorter than one day.
pub fn cycle_period(total_pages: u64, max_check: u32) -> u64 {
    let per_run = u64::from(max_check).max(1);
    total_pages.div_ceil(per_run).max(1)
}

/// Start offset of the day's window into the id-ordered video page list.
/// Consecutive days walk consecutive windows and wrap after `cycle_period`
/// days. An offset past the end of the table yields an empty window.
pub fn window_offset(total_pages: u64, max_check: u32, day_of_year: u32) -> u64 {
    let period = cycle_period(total_pages, max_check);
    (u64::from(day_of_year) % period) * u64::from(max_check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_table_always_starts_at_zero() {
        assert_eq!(cycle_period(500, 1000), 1);

        for day in [0, 1, 180, 365] {
            assert_eq!(window_offset(500, 1000, day), 0);
        }
    }

    #[test]
    fn test_windows_advance_and_wrap() {
        assert_eq!(cycle_period(2500, 1000), 3);

        assert_eq!(window_offset(2500, 1000, 0), 0);
        assert_eq!(window_offset(2500, 1000, 1), 1000);
        assert_eq!(window_offset(2500, 1000, 2), 2000);
        assert_eq!(window_offset(2500, 1000, 3), 0);
        assert_eq!(window_offset(2500, 1000, 4), 1000);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_day() {
        assert_eq!(cycle_period(3000, 1000), 3);
        assert_eq!(window_offset(3000, 1000, 2), 2000);
        assert_eq!(window_offset(3000, 1000, 3), 0);
    }

    #[test]
    fn test_empty_table_is_guarded() {
        assert_eq!(cycle_period(0, 1000), 1);
        assert_eq!(window_offset(0, 1000, 0), 0);
        assert_eq!(window_offset(0, 1000, 200), 0);
    }

    #[test]
    fn test_zero_quota_is_guarded() {
        assert_eq!(cycle_period(2500, 0), 2500);
        assert_eq!(window_offset(2500, 0, 7), 0);
    }

    #[test]
    fn test_full_cycle_covers_every_page() {
        let total: u64 = 2500;
        let max_check: u32 = 1000;
        let mut covered = vec![false; total as usize];

        for day in 0..cycle_period(total, max_check) as u32 {
            let start = window_offset(total, max_check, day);
            let end = (start + u64::from(max_check)).min(total);
            for index in start..end {
                covered[index as usize] = true;
            }
        }

        assert!(covered.iter().all(|seen| *seen));
    }
}
