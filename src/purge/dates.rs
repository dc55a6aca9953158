//! Date range of a purge walk.

use chrono::NaiveDate;

/// Earliest day scanned for a member: the day before the signed-in account
/// was created, or the member's join date if that is later.
pub fn lower_bound(account_created: NaiveDate, joined: NaiveDate) -> NaiveDate {
    let before_account = account_created.pred_opt().unwrap_or(account_created);
    before_account.max(joined)
}

/// Days from `start` back to `end`, both inclusive, newest first.
#[derive(Debug, Clone)]
pub struct DateWalk {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateWalk {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            cursor: (start >= end).then_some(start),
            end,
        }
    }

    /// Number of days the walk will yield.
    pub fn total_days(start: NaiveDate, end: NaiveDate) -> u64 {
        u64::try_from((start - end).num_days() + 1).unwrap_or(0)
    }
}

impl Iterator for DateWalk {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.cursor?;
        self.cursor = day.pred_opt().filter(|prev| *prev >= self.end);
        Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn account_creation_dominates_earlier_join() {
        assert_eq!(lower_bound(date(2020, 1, 10), date(2020, 1, 5)), date(2020, 1, 9));
    }

    #[test]
    fn later_join_dominates() {
        assert_eq!(lower_bound(date(2020, 1, 10), date(2020, 1, 12)), date(2020, 1, 12));
    }

    #[test]
    fn walk_is_descending_and_inclusive() {
        let days: Vec<_> = DateWalk::new(date(2020, 3, 2), date(2020, 2, 27)).collect();
        assert_eq!(
            days,
            vec![
                date(2020, 3, 2),
                date(2020, 3, 1),
                date(2020, 2, 29),
                date(2020, 2, 28),
                date(2020, 2, 27),
            ]
        );
        assert_eq!(DateWalk::total_days(date(2020, 3, 2), date(2020, 2, 27)), 5);
    }

    #[test]
    fn walk_of_a_single_day() {
        let today = date(2021, 6, 1);
        assert_eq!(DateWalk::new(today, today).collect::<Vec<_>>(), vec![today]);
        assert_eq!(DateWalk::total_days(today, today), 1);
    }

    #[test]
    fn end_after_start_yields_nothing() {
        assert_eq!(DateWalk::new(date(2020, 1, 1), date(2020, 1, 2)).count(), 0);
        assert_eq!(DateWalk::total_days(date(2020, 1, 1), date(2020, 1, 2)), 0);
    }

    #[test]
    fn walk_down_to_min_date_terminates() {
        let walk = DateWalk::new(NaiveDate::MIN.succ_opt().unwrap(), NaiveDate::MIN);
        assert_eq!(walk.count(), 2);
    }
}
