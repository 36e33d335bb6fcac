//! Weekly and monthly chart series.
//!
//! Weekly buckets are keyed by whole days elapsed since the alert, so the
//! bucket boundaries follow `now` rather than calendar midnight. Monthly
//! buckets are UTC calendar months with an inclusive end at the last
//! millisecond of the month.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

use landwatch_entity::alert::{Alert, SeriesBucket};

/// Number of buckets in the weekly series.
pub const WEEKLY_BUCKETS: usize = 7;

/// Number of buckets in the monthly series.
pub const MONTHLY_BUCKETS: usize = 6;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Seven day buckets, oldest first, the last one being "today".
///
/// An alert lands in the bucket `floor((now - occurred_at) / 1 day)` days
/// back. Alerts older than six days, or dated after `now`, are not counted.
pub fn weekly_series(alerts: &[Alert], now: DateTime<Utc>) -> Vec<SeriesBucket> {
    let mut buckets: Vec<SeriesBucket> = (0..WEEKLY_BUCKETS as i64)
        .rev()
        .map(|days_ago| {
            let day = now - Duration::days(days_ago);
            SeriesBucket::new(
                day.format("%a").to_string(),
                now - Duration::days(days_ago + 1),
            )
        })
        .collect();

    for alert in alerts {
        let elapsed = (now - alert.occurred_at).num_milliseconds();
        if elapsed < 0 {
            continue;
        }
        let days_ago = elapsed.div_euclid(DAY_MILLIS) as usize;
        if days_ago < WEEKLY_BUCKETS {
            buckets[WEEKLY_BUCKETS - 1 - days_ago].record(alert.source);
        }
    }

    buckets
}

/// Six calendar-month buckets, oldest first, ending with the current month.
pub fn monthly_series(alerts: &[Alert], now: DateTime<Utc>) -> Vec<SeriesBucket> {
    let mut months: Vec<(SeriesBucket, DateTime<Utc>)> = (0..MONTHLY_BUCKETS as u32)
        .rev()
        .filter_map(|back| {
            let (year, month) = months_back(now.year(), now.month(), back);
            let start = month_start(year, month)?;
            let (next_year, next_month) = months_back(year, month + 1, 0);
            let end = month_start(next_year, next_month)? - Duration::milliseconds(1);
            Some((SeriesBucket::new(start.format("%b").to_string(), start), end))
        })
        .collect();

    for alert in alerts {
        if let Some((bucket, _)) = months
            .iter_mut()
            .find(|(bucket, end)| alert.occurred_at >= bucket.start && alert.occurred_at <= *end)
        {
            bucket.record(alert.source);
        }
    }

    months.into_iter().map(|(bucket, _)| bucket).collect()
}

/// `(year, month)` shifted `back` months into the past, with `month`
/// allowed to overflow by one (13 → January of the next year).
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use landwatch_entity::alert::{AlertPriority, AlertSource, AlertStatus};

    fn alert(source: AlertSource, occurred_at: DateTime<Utc>) -> Alert {
        Alert {
            id: "S01".to_string(),
            record_id: "r".to_string(),
            description: "Mining analysis completed - NDVI".to_string(),
            location: "Unknown".to_string(),
            source,
            occurred_at,
            status: AlertStatus::New,
            priority: AlertPriority::Medium,
            district: None,
            analysis_type: None,
            is_illegal: None,
            change_area_km2: None,
            before_image_url: None,
            after_image_url: None,
            latitude: None,
            longitude: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_weekly_buckets_by_days_ago() {
        let now = at(2024, 3, 15, 12);
        let alerts = vec![
            alert(AlertSource::Satellite, now - Duration::hours(1)),
            alert(AlertSource::Report, now - Duration::hours(23)),
            alert(AlertSource::System, now - Duration::hours(25)),
            alert(AlertSource::Satellite, now - Duration::days(6) - Duration::hours(3)),
            alert(AlertSource::Satellite, now - Duration::days(7)),
            alert(AlertSource::Report, now + Duration::hours(1)),
        ];

        let series = weekly_series(&alerts, now);
        assert_eq!(series.len(), WEEKLY_BUCKETS);
        assert_eq!(series[6].label, "Fri");
        assert_eq!(series[0].label, "Sat");

        assert_eq!(series[6].total, 2);
        assert_eq!(series[6].satellite, 1);
        assert_eq!(series[6].community, 1);
        assert_eq!(series[5].system, 1);
        assert_eq!(series[0].total, 1);

        let counted: u64 = series.iter().map(|b| b.total).sum();
        assert_eq!(counted, 4);
        assert!(counted <= alerts.len() as u64);
    }

    #[test]
    fn test_monthly_buckets_cross_year() {
        let now = at(2024, 2, 10, 8);
        let alerts = vec![
            alert(AlertSource::Satellite, at(2024, 2, 1, 0)),
            alert(AlertSource::Report, at(2024, 1, 31, 23)),
            alert(AlertSource::System, at(2023, 9, 1, 0)),
            alert(AlertSource::System, at(2023, 8, 31, 23)),
        ];

        let series = monthly_series(&alerts, now);
        let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);

        assert_eq!(series[0].system, 1);
        assert_eq!(series[4].community, 1);
        assert_eq!(series[5].satellite, 1);
        assert_eq!(series.iter().map(|b| b.total).sum::<u64>(), 3);
    }

    #[test]
    fn test_month_end_is_inclusive() {
        let now = at(2024, 5, 20, 0);
        let last_millisecond = at(2024, 4, 30, 23) + Duration::minutes(59) + Duration::milliseconds(59_999);
        let series = monthly_series(&[alert(AlertSource::Satellite, last_millisecond)], now);
        assert_eq!(series[4].label, "Apr");
        assert_eq!(series[4].total, 1);
    }

    #[test]
    fn test_months_back_wraps() {
        assert_eq!(months_back(2024, 3, 5), (2023, 10));
        assert_eq!(months_back(2023, 13, 0), (2024, 1));
        assert_eq!(months_back(2024, 1, 0), (2024, 1));
    }
}
