use chrono::{Datelike, NaiveDate};

const DAYS_OF_WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thur", "Fri", "Sat"];

pub fn day_of_week(date: NaiveDate) -> &'static str {
    DAYS_OF_WEEK[date.weekday().num_days_from_sunday() as usize]
}

/// "M/D/YY" with month and day unpadded. Two-digit year truncation is
/// the intended display format.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_labels_start_at_sunday() {
        assert_eq!(day_of_week(date(2023, 9, 9)), "Sat");
        assert_eq!(day_of_week(date(2023, 9, 10)), "Sun");
        assert_eq!(day_of_week(date(2023, 9, 14)), "Thur");
    }

    #[test]
    fn formats_month_and_day_unpadded() {
        assert_eq!(format_date(date(2023, 9, 9)), "9/9/23");
        assert_eq!(format_date(date(2023, 12, 31)), "12/31/23");
    }

    #[test]
    fn pads_two_digit_year() {
        assert_eq!(format_date(date(2005, 1, 2)), "1/2/05");
        assert_eq!(format_date(date(2100, 6, 15)), "6/15/00");
    }
}
