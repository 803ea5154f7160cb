//! Day-of-year handling for the 365-day gradient table.
//!
//! Leap years are folded onto the common-year calendar: from March 1 onward
//! the day of year is shifted back by one, so Feb 29 shares Feb 28's entry.

use jiff::civil::Date;

/// Days covered by the gradient table.
pub const DAYS_PER_TABLE: u16 = 365;

/// Last day of year left untouched in a leap year (Feb 28).
const LAST_UNFOLDED_DAY: u16 = 59;

/// Fold a raw 1-based day of year onto the 365-day calendar.
#[inline]
pub fn fold_day_of_year(day_of_year: u16, leap_year: bool) -> u16 {
    if leap_year && day_of_year > LAST_UNFOLDED_DAY {
        day_of_year - 1
    } else {
        day_of_year
    }
}

/// Folded 1-based day of year for a calendar date, in `1..=365`.
pub fn folded_day_of_year(date: Date) -> u16 {
    // day_of_year() is always within 1..=366
    let raw = date.day_of_year() as u16;
    fold_day_of_year(raw, date.in_leap_year())
}

/// Whether `day_of_year` is a folded day the gradient table covers.
#[inline]
pub fn is_table_day(day_of_year: u16) -> bool {
    (1..=DAYS_PER_TABLE).contains(&day_of_year)
}

/// Zero-based gradient-table index for a folded day of year.
#[inline]
pub fn gradient_index(day_of_year: u16) -> usize {
    usize::from(day_of_year) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn common_year_is_unchanged() {
        assert_eq!(folded_day_of_year(date(2023, 1, 1)), 1);
        assert_eq!(folded_day_of_year(date(2023, 2, 28)), 59);
        assert_eq!(folded_day_of_year(date(2023, 3, 1)), 60);
        assert_eq!(folded_day_of_year(date(2023, 12, 31)), 365);
    }

    #[test]
    fn feb_29_shares_feb_28() {
        assert_eq!(folded_day_of_year(date(2024, 2, 28)), 59);
        assert_eq!(folded_day_of_year(date(2024, 2, 29)), 59);
        assert_eq!(
            gradient_index(folded_day_of_year(date(2024, 2, 29))),
            gradient_index(folded_day_of_year(date(2024, 2, 28)))
        );
    }

    #[test]
    fn leap_march_first_matches_common_year() {
        let leap = folded_day_of_year(date(2024, 3, 1));
        let common = folded_day_of_year(date(2023, 3, 1));
        assert_eq!(leap, 60);
        assert_eq!(leap, common);
        assert_eq!(gradient_index(leap), 59);
    }

    #[test]
    fn leap_december_31_stays_in_table() {
        assert_eq!(folded_day_of_year(date(2024, 12, 31)), DAYS_PER_TABLE);
        assert_eq!(gradient_index(DAYS_PER_TABLE), 364);
    }

    #[test]
    fn century_rules() {
        // 1900 is not a leap year, 2000 is
        assert_eq!(folded_day_of_year(date(1900, 3, 1)), 60);
        assert_eq!(folded_day_of_year(date(2000, 3, 1)), 60);
        assert_eq!(fold_day_of_year(61, true), 60);
        assert_eq!(fold_day_of_year(59, true), 59);
        assert_eq!(fold_day_of_year(61, false), 61);
    }
}
