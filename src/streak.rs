use crate::clock::Clock;
use crate::models::LogEntry;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::HashSet;

pub fn current_streak<C: Clock>(logs: &[LogEntry], clock: &C) -> u32 {
    streak_at(logs, &clock.now())
}

pub fn streak_at<Tz: TimeZone>(logs: &[LogEntry], now: &DateTime<Tz>) -> u32 {
    if logs.is_empty() {
        return 0;
    }

    let tz = now.timezone();
    let days: HashSet<String> = logs
        .iter()
        .filter_map(|entry| local_date(&tz, entry.timestamp))
        .map(date_key)
        .collect();

    let mut streak = 0;
    let mut cursor = Some(now.date_naive());
    while let Some(day) = cursor {
        if !days.contains(&date_key(day)) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

pub fn local_date<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|at| at.date_naive())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-01-05T12:00:00-05:00").unwrap()
    }

    fn entry_at(at: DateTime<FixedOffset>) -> LogEntry {
        LogEntry {
            text: "Read".into(),
            minutes: 20,
            timestamp: at.timestamp_millis(),
        }
    }

    #[test]
    fn empty_logs_have_no_streak() {
        assert_eq!(streak_at(&[], &now()), 0);
    }

    #[test]
    fn single_log_today_counts_one() {
        assert_eq!(streak_at(&[entry_at(now())], &now()), 1);
    }

    #[test]
    fn three_consecutive_days() {
        let logs = vec![
            entry_at(now() - Duration::days(2)),
            entry_at(now() - Duration::days(1)),
            entry_at(now()),
        ];
        assert_eq!(streak_at(&logs, &now()), 3);
    }

    #[test]
    fn gap_yesterday_stops_chain() {
        let logs = vec![entry_at(now() - Duration::days(2)), entry_at(now())];
        assert_eq!(streak_at(&logs, &now()), 1);
    }

    #[test]
    fn missing_today_means_zero() {
        let logs = vec![entry_at(now() - Duration::days(1))];
        assert_eq!(streak_at(&logs, &now()), 0);
    }

    #[test]
    fn same_day_logs_count_once() {
        let logs = vec![entry_at(now() - Duration::hours(3)), entry_at(now())];
        assert_eq!(streak_at(&logs, &now()), 1);
    }

    #[test]
    fn dates_follow_the_clock_zone() {
        // 2026-01-06T01:00Z is still Jan 5 at UTC-5.
        let late = DateTime::parse_from_rfc3339("2026-01-06T01:00:00Z").unwrap();
        let logs = vec![LogEntry {
            text: "Walk".into(),
            minutes: 30,
            timestamp: late.timestamp_millis(),
        }];
        assert_eq!(streak_at(&logs, &now()), 1);
    }

    #[test]
    fn current_streak_reads_the_clock() {
        let clock = FixedClock::new(now());
        let logs = vec![entry_at(now() - Duration::days(1)), entry_at(now())];
        assert_eq!(current_streak(&logs, &clock), 2);

        clock.advance(Duration::days(1));
        assert_eq!(current_streak(&logs, &clock), 0);
    }

    #[test]
    fn date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(date_key(date), "2026-03-07");
    }
}
