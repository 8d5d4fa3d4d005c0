//! Time-bucket granularity handling.
//!
//! Analyzers group posts into day, week, month, or year buckets. A bucket is
//! identified by its start date (UTC); weeks start on Monday.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            other => anyhow::bail!(
                "Unknown granularity: '{}'. Must be day, week, month, or year.",
                other
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Bucket start date for an epoch timestamp, in UTC. Returns `None` for
    /// timestamps outside chrono's representable range.
    pub fn bucket_of(&self, epoch: i64) -> Option<NaiveDate> {
        let date = chrono::DateTime::from_timestamp(epoch, 0)?.date_naive();
        match self {
            Granularity::Day => Some(date),
            Granularity::Week => {
                let offset = date.weekday().num_days_from_monday() as u64;
                date.checked_sub_days(Days::new(offset))
            }
            Granularity::Month => date.with_day(1),
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    /// Axis label for a bucket start date.
    pub fn label(&self, bucket: NaiveDate) -> String {
        match self {
            Granularity::Day | Granularity::Week => bucket.format("%Y-%m-%d").to_string(),
            Granularity::Month => bucket.format("%b %Y").to_string(),
            Granularity::Year => bucket.format("%Y").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1700000000 = 2023-11-14 22:13:20 UTC (a Tuesday)
    const TS: i64 = 1700000000;

    #[test]
    fn test_parse() {
        assert_eq!(Granularity::parse("week").unwrap(), Granularity::Week);
        assert!(Granularity::parse("fortnight").is_err());
    }

    #[test]
    fn test_day_bucket() {
        let bucket = Granularity::Day.bucket_of(TS).unwrap();
        assert_eq!(bucket, NaiveDate::from_ymd_opt(2023, 11, 14).unwrap());
    }

    #[test]
    fn test_week_bucket_starts_monday() {
        let bucket = Granularity::Week.bucket_of(TS).unwrap();
        assert_eq!(bucket, NaiveDate::from_ymd_opt(2023, 11, 13).unwrap());
    }

    #[test]
    fn test_month_bucket() {
        let bucket = Granularity::Month.bucket_of(TS).unwrap();
        assert_eq!(bucket, NaiveDate::from_ymd_opt(2023, 11, 1).unwrap());
    }

    #[test]
    fn test_year_bucket() {
        let bucket = Granularity::Year.bucket_of(TS).unwrap();
        assert_eq!(bucket, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_labels() {
        let bucket = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(Granularity::Month.label(bucket), "Nov 2023");
        assert_eq!(Granularity::Day.label(bucket), "2023-11-01");
        assert_eq!(Granularity::Year.label(bucket), "2023");
    }
}
