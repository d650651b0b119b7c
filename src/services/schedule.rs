//! Wipe scheduling: decides whether this invocation should actually wipe.
//!
//! Two gates run before anything destructive:
//! 1. [`is_exceptional_date`] — an override list of calendar dates that veto
//!    an otherwise-due wipe (holidays, event weekends, ...). The veto takes
//!    precedence over everything, including `--now`.
//! 2. [`should_wipe_today`] — the cadence decision proper: target weekday
//!    match plus the weekly / bi-weekly / monthly day-of-month rule.

use camino::Utf8Path;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::models::{WipeCadence, WipeRequest};

/// Decide whether today's invocation should wipe, given the cadence rules.
///
/// An immediate-wipe request bypasses the weekday and cadence checks entirely.
/// Otherwise the weekday must match the target; on a match, Weekly always
/// fires, BiWeekly fires only in week-of-month 1 or 3, and Monthly fires only
/// in the first seven days of the month.
pub fn should_wipe_today(now: NaiveDateTime, request: &WipeRequest) -> bool {
    if request.wipe_now {
        return true;
    }

    let today = now.weekday();
    if today != request.target_weekday {
        tracing::info!("Today: {} | Wipe day: {}", today, request.target_weekday);
        return false;
    }

    match request.cadence {
        WipeCadence::Weekly => true,
        WipeCadence::BiWeekly => matches!(week_of_month(now.day()), 1 | 3),
        WipeCadence::Monthly => now.day() <= 7,
    }
}

/// Week-of-month as ceil(day / 7): days 1-7 are week 1, 8-14 week 2, and so on.
fn week_of_month(day: u32) -> u32 {
    (day + 6) / 7
}

/// True when today's calendar date (time-of-day ignored) appears in the
/// exceptional-date list.
///
/// The list is plain text, one `YYYY-MM-DD` date per line. Malformed lines are
/// warned about and skipped. A missing or unreadable list means no veto; this
/// path must never abort an otherwise-valid run.
pub fn is_exceptional_date(today: NaiveDate, list_path: Option<&Utf8Path>) -> bool {
    let Some(path) = list_path else {
        return false;
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Could not open exceptional date list {path}: {e}");
            return false;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Could not read line from exceptional date list {path}: {e}");
                return false;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match NaiveDate::parse_from_str(line, "%Y-%m-%d") {
            Ok(date) if date == today => return true,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Skipping malformed exceptional date line {line:?}: {e}");
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CosmeticTags, NotifySettings, WipeRequest};
    use camino::Utf8PathBuf;
    use chrono::Weekday;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn request(cadence: WipeCadence, target: Weekday, wipe_now: bool) -> WipeRequest {
        WipeRequest {
            server: "rustserver".to_string(),
            server_root: Utf8PathBuf::from("/tmp/rustserver"),
            wipe_now,
            cadence,
            target_weekday: target,
            retain_blueprints: true,
            seed: Some(1),
            random_seed: false,
            description: None,
            description_file: None,
            world_size: 3000,
            max_players: 100,
            server_name: "Rust Server".to_string(),
            flavor: None,
            location: None,
            official: false,
            image_url: String::new(),
            server_url: String::new(),
            tags: CosmeticTags::default(),
            dry_run: true,
            exceptional_date_list: None,
            notify: NotifySettings::default(),
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(4, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_weekly_fires_only_on_target_weekday() {
        let req = request(WipeCadence::Weekly, Weekday::Fri, false);
        // 2024-03-01 is a Friday.
        assert!(should_wipe_today(at(2024, 3, 1), &req));
        assert!(should_wipe_today(at(2024, 3, 8), &req));
        // Saturday and Thursday around it.
        assert!(!should_wipe_today(at(2024, 3, 2), &req));
        assert!(!should_wipe_today(at(2024, 3, 7), &req));
    }

    #[test]
    fn test_biweekly_fires_in_weeks_one_and_three() {
        let req = request(WipeCadence::BiWeekly, Weekday::Fri, false);
        assert!(should_wipe_today(at(2024, 3, 1), &req)); // day 1, week 1
        assert!(!should_wipe_today(at(2024, 3, 8), &req)); // day 8, week 2
        assert!(should_wipe_today(at(2024, 3, 15), &req)); // day 15, week 3
        assert!(!should_wipe_today(at(2024, 3, 22), &req)); // day 22, week 4
    }

    #[test]
    fn test_monthly_fires_in_first_seven_days() {
        // 2024-03-07 is a Thursday, 2024-03-14 the next one.
        let req = request(WipeCadence::Monthly, Weekday::Thu, false);
        assert!(should_wipe_today(at(2024, 3, 7), &req));
        assert!(!should_wipe_today(at(2024, 3, 14), &req));
    }

    #[test]
    fn test_now_bypasses_weekday_and_cadence() {
        let req = request(WipeCadence::Monthly, Weekday::Thu, true);
        // A Friday in week 4: both checks would fail without the override.
        assert!(should_wipe_today(at(2024, 3, 22), &req));
    }

    #[test]
    fn test_week_of_month() {
        assert_eq!(week_of_month(1), 1);
        assert_eq!(week_of_month(7), 1);
        assert_eq!(week_of_month(8), 2);
        assert_eq!(week_of_month(10), 2);
        assert_eq!(week_of_month(15), 3);
        assert_eq!(week_of_month(22), 4);
        assert_eq!(week_of_month(31), 5);
    }

    #[test]
    fn test_exceptional_date_exact_match() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2024-03-15").unwrap();
        writeln!(file, "2024-12-25").unwrap();
        file.flush().unwrap();
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();

        let matched = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let next_day = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert!(is_exceptional_date(matched, Some(path.as_path())));
        assert!(!is_exceptional_date(next_day, Some(path.as_path())));
    }

    #[test]
    fn test_exceptional_date_malformed_lines_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not-a-date").unwrap();
        writeln!(file, "2024-03-15").unwrap();
        file.flush().unwrap();
        let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap();

        // The bad line does not abort the scan; the good line still matches.
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(is_exceptional_date(today, Some(path.as_path())));
    }

    #[test]
    fn test_exceptional_date_no_list_means_no_veto() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(!is_exceptional_date(today, None));
    }

    #[test]
    fn test_exceptional_date_missing_file_means_no_veto() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let path = Utf8PathBuf::from("/nonexistent/wipe-dates.txt");
        assert!(!is_exceptional_date(today, Some(path.as_path())));
    }
}
