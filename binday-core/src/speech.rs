//! Weekday names and spoken-date markup.
//!
//! All calendar offset handling lives here: weekdays are indexed Monday-first
//! and months are rendered 1-based, both zero padded.

use chrono::{Datelike, NaiveDate, Weekday};

/// English weekday name for `date`, Monday first.
#[must_use]
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `say-as` token that makes a voice renderer read the month and day as a date.
#[must_use]
pub fn speech_date_token(date: NaiveDate) -> String {
    format!(
        "<say-as interpret-as=\"date\">????{:02}{:02}</say-as>",
        date.month(),
        date.day()
    )
}

/// Weekday name immediately followed by the date token, e.g. `Friday<say-as …>`.
#[must_use]
pub fn spoken_day(date: NaiveDate) -> String {
    format!("{}{}", weekday_name(date), speech_date_token(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn friday() {
        assert_eq!(weekday_name(date(2017, 12, 15)), "Friday");
    }

    #[test]
    fn monday_is_first() {
        assert_eq!(weekday_name(date(2017, 12, 18)), "Monday");
    }

    #[test]
    fn sunday_does_not_wrap() {
        assert_eq!(weekday_name(date(2017, 12, 17)), "Sunday");
        assert_eq!(weekday_name(date(2017, 12, 3)), "Sunday");
    }

    #[test]
    fn token_for_december() {
        assert_eq!(
            speech_date_token(date(2017, 12, 15)),
            "<say-as interpret-as=\"date\">????1215</say-as>"
        );
    }

    #[test]
    fn token_pads_month_and_day() {
        assert_eq!(
            speech_date_token(date(2018, 1, 5)),
            "<say-as interpret-as=\"date\">????0105</say-as>"
        );
    }

    #[test]
    fn spoken_day_joins_without_space() {
        assert_eq!(
            spoken_day(date(2017, 12, 18)),
            "Monday<say-as interpret-as=\"date\">????1218</say-as>"
        );
    }
}
