use chrono::prelude::*;

/// Parses a `YYYY-MM-DD` date, also accepting unpadded month and day
pub fn parse_iso_date(datestr: &str) -> Option<NaiveDate> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 || dates[0].len() != 4 {
        return None;
    }
    let year = dates[0].parse::<i32>().ok()?;
    let month = dates[1].parse::<u32>().ok()?;
    let day = dates[2].parse::<u32>().ok()?;

    if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    if day < 1 || day > get_month_length(year, month) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}

/// Moves `date` by whole months, clamping the day to the length of the
/// target month. Jan 31 + 1 month is Feb 28 (or 29).
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(i64::from(date.month0()))?
        .checked_add(months)?;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(get_month_length(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The first `weekday` strictly after `date`
pub fn next_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    date + chrono::Duration::days(i64::from(ahead))
}
