use chrono::NaiveDate;
use serde::Serialize;

/// The closed [PriorHarvestDate, CurrentHarvestDate] interval bounding
/// which simulated output is eligible for comparison.
///
/// A window with `prior > current` is carried as-is, never reordered;
/// such a window contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarvestWindow {
    pub prior: NaiveDate,
    pub current: NaiveDate,
}

impl HarvestWindow {
    pub fn new(prior: NaiveDate, current: NaiveDate) -> Self {
        Self { prior, current }
    }

    /// Both endpoints inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.prior && date <= self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn closed_range_is_inclusive() {
        let w = HarvestWindow::new(d(2020, 2, 1), d(2020, 3, 1));
        assert!(w.contains(d(2020, 2, 1)));
        assert!(w.contains(d(2020, 3, 1)));
        assert!(w.contains(d(2020, 2, 15)));
        assert!(!w.contains(d(2020, 1, 15)));
        assert!(!w.contains(d(2020, 3, 2)));
    }

    #[test]
    fn inverted_window_contains_nothing() {
        let w = HarvestWindow::new(d(2020, 3, 1), d(2020, 2, 1));
        assert!(!w.contains(d(2020, 2, 15)));
        assert!(!w.contains(d(2020, 3, 1)));
        assert!(!w.contains(d(2020, 2, 1)));
    }
}
