use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Whole days elapsed from `from` to `to`, rounded towards negative infinity.
///
/// `chrono::Duration::num_days` truncates towards zero which would make
/// an instant 9 hours before a due date count as "0 days overdue".
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Whole days since the start of the due date. Negative if not yet due.
pub fn days_overdue(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    whole_days_between(start_of_day(due_date), now)
}

/// e.g. `January 5, 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
