//! Phase evaluation: a pure function of the time, the window settings and the products.

use crate::model::{setting_value, Product, Setting, ORDER_END_HOUR, ORDER_END_MINUTE,
    ORDER_START_HOUR, ORDER_START_MINUTE};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long the lottery runs after ordering closes, in minutes.
pub const LOTTERY_MINUTES: i64 = 15;

/// Daily ordering window as wall-clock times. Values are not range-checked here;
/// [`evaluate`] treats out-of-range hours or minutes as unusable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start_hour: 15,
            start_minute: 45,
            end_hour: 16,
            end_minute: 0,
        }
    }
}

impl WindowConfig {
    /// Reads the four window keys from a settings snapshot.
    ///
    /// Returns `None` when a key is missing or its value isn't a non-negative integer.
    pub fn from_settings(settings: &[Setting]) -> Option<Self> {
        let read = |key: &str| setting_value(settings, key)?.trim().parse::<u32>().ok();
        Some(Self {
            start_hour: read(ORDER_START_HOUR)?,
            start_minute: read(ORDER_START_MINUTE)?,
            end_hour: read(ORDER_END_HOUR)?,
            end_minute: read(ORDER_END_MINUTE)?,
        })
    }

    /// The settings rows this window is stored as.
    pub fn to_settings(&self) -> [(&'static str, String); 4] {
        [
            (ORDER_START_HOUR, self.start_hour.to_string()),
            (ORDER_START_MINUTE, self.start_minute.to_string()),
            (ORDER_END_HOUR, self.end_hour.to_string()),
            (ORDER_END_MINUTE, self.end_minute.to_string()),
        ]
    }

    pub fn start(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.start_hour, self.start_minute, 0)
    }

    pub fn end(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.end_hour, self.end_minute, 0)
    }
}

impl fmt::Display for WindowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_hour, self.start_minute, self.end_hour, self.end_minute
        )
    }
}

/// Why nothing can be ordered right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedReason {
    /// No product is available on today's weekday.
    NothingScheduledToday,
    /// The window settings are missing or malformed.
    SettingsUnavailable,
    /// The window closes at or before it opens.
    InvalidWindow,
    /// Ordering and the lottery are over for today.
    WindowPassed,
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClosedReason::NothingScheduledToday => "nothing scheduled today",
            ClosedReason::SettingsUnavailable => "ordering settings unavailable",
            ClosedReason::InvalidWindow => "no ordering today",
            ClosedReason::WindowPassed => "ordering window passed",
        })
    }
}

/// Stage of the daily cycle. Recomputed on every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingWindow { opens_at: NaiveDateTime },
    Ordering { closes_at: NaiveDateTime },
    Lottery { ends_at: NaiveDateTime },
    Closed(ClosedReason),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingWindow { .. } => "awaiting_window",
            Phase::Ordering { .. } => "ordering",
            Phase::Lottery { .. } => "lottery",
            Phase::Closed(_) => "closed",
        }
    }

    pub fn accepts_orders(&self) -> bool {
        matches!(self, Phase::Ordering { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingWindow { opens_at } => {
                write!(f, "ordering opens at {}", opens_at.format("%H:%M"))
            }
            Phase::Ordering { closes_at } => {
                write!(f, "ordering until {}", closes_at.format("%H:%M"))
            }
            Phase::Lottery { ends_at } => write!(f, "lottery until {}", ends_at.format("%H:%M")),
            Phase::Closed(reason) => write!(f, "closed: {reason}"),
        }
    }
}

/// Maps the current time, window settings and products to a phase.
///
/// Checks run in a fixed order: product availability first, then the settings, then
/// the window itself. The window never wraps past midnight.
pub fn evaluate(now: NaiveDateTime, config: Option<&WindowConfig>, products: &[Product]) -> Phase {
    let weekday = now.weekday().num_days_from_sunday();
    if !products.iter().any(|p| p.is_available_on(weekday)) {
        return Phase::Closed(ClosedReason::NothingScheduledToday);
    }

    let Some((start, end)) = config.and_then(|c| Some((c.start()?, c.end()?))) else {
        return Phase::Closed(ClosedReason::SettingsUnavailable);
    };
    if end <= start {
        return Phase::Closed(ClosedReason::InvalidWindow);
    }

    let today = now.date();
    let start = today.and_time(start);
    let end = today.and_time(end);
    let lottery_end = end + Duration::minutes(LOTTERY_MINUTES);

    if now < start {
        Phase::AwaitingWindow { opens_at: start }
    } else if now < end {
        Phase::Ordering { closes_at: end }
    } else if now < lottery_end {
        Phase::Lottery { ends_at: lottery_end }
    } else {
        Phase::Closed(ClosedReason::WindowPassed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, SettingId};
    use chrono::NaiveDate;

    // 2024-01-04 is a Thursday.
    fn thursday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn product(days: &[u8]) -> Product {
        Product {
            id: ProductId(1),
            name: "Pils".into(),
            available_on_days: Some(days.to_vec()),
            position: 1,
        }
    }

    fn window(sh: u32, sm: u32, eh: u32, em: u32) -> WindowConfig {
        WindowConfig {
            start_hour: sh,
            start_minute: sm,
            end_hour: eh,
            end_minute: em,
        }
    }

    fn setting(key: &str, value: &str) -> Setting {
        Setting {
            id: SettingId(1),
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn test_default_window_phases() {
        let products = [product(&[4])];
        let config = window(15, 45, 16, 0);

        assert_eq!(
            evaluate(thursday(15, 50), Some(&config), &products),
            Phase::Ordering {
                closes_at: thursday(16, 0)
            }
        );
        assert_eq!(
            evaluate(thursday(16, 5), Some(&config), &products),
            Phase::Lottery {
                ends_at: thursday(16, 15)
            }
        );
        assert_eq!(
            evaluate(thursday(16, 20), Some(&config), &products),
            Phase::Closed(ClosedReason::WindowPassed)
        );
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let products = [product(&[4])];
        let config = window(15, 45, 16, 0);

        assert!(matches!(
            evaluate(thursday(15, 44), Some(&config), &products),
            Phase::AwaitingWindow { opens_at } if opens_at == thursday(15, 45)
        ));
        assert!(evaluate(thursday(15, 45), Some(&config), &products).accepts_orders());
        assert!(matches!(
            evaluate(thursday(16, 0), Some(&config), &products),
            Phase::Lottery { .. }
        ));
        assert_eq!(
            evaluate(thursday(16, 15), Some(&config), &products),
            Phase::Closed(ClosedReason::WindowPassed)
        );
    }

    #[test]
    fn test_nothing_available_today_is_closed_at_any_time() {
        // Friday: only a Thursday product exists.
        let friday = thursday(15, 50) + Duration::days(1);
        let products = [product(&[4])];
        let config = window(15, 45, 16, 0);

        assert_eq!(
            evaluate(friday, Some(&config), &products),
            Phase::Closed(ClosedReason::NothingScheduledToday)
        );
        assert_eq!(
            evaluate(thursday(15, 50), Some(&config), &[]),
            Phase::Closed(ClosedReason::NothingScheduledToday)
        );
    }

    #[test]
    fn test_missing_or_out_of_range_settings() {
        let products = [product(&[4])];
        assert_eq!(
            evaluate(thursday(15, 50), None, &products),
            Phase::Closed(ClosedReason::SettingsUnavailable)
        );
        assert_eq!(
            evaluate(thursday(15, 50), Some(&window(24, 0, 16, 0)), &products),
            Phase::Closed(ClosedReason::SettingsUnavailable)
        );
        assert_eq!(
            evaluate(thursday(15, 50), Some(&window(15, 45, 16, 60)), &products),
            Phase::Closed(ClosedReason::SettingsUnavailable)
        );
    }

    #[test]
    fn test_inverted_window_does_not_wrap() {
        let products = [product(&[4])];
        for config in [window(16, 0, 15, 45), window(16, 0, 16, 0)] {
            assert_eq!(
                evaluate(thursday(15, 50), Some(&config), &products),
                Phase::Closed(ClosedReason::InvalidWindow)
            );
        }
    }

    #[test]
    fn test_window_from_settings() {
        let settings = vec![
            setting(ORDER_START_HOUR, "15"),
            setting(ORDER_START_MINUTE, "45"),
            setting(ORDER_END_HOUR, " 16 "),
            setting(ORDER_END_MINUTE, "0"),
        ];
        assert_eq!(
            WindowConfig::from_settings(&settings),
            Some(window(15, 45, 16, 0))
        );
    }

    #[test]
    fn test_window_from_malformed_settings() {
        let mut settings = vec![
            setting(ORDER_START_HOUR, "15"),
            setting(ORDER_START_MINUTE, "45"),
            setting(ORDER_END_HOUR, "16"),
        ];
        assert_eq!(WindowConfig::from_settings(&settings), None);

        settings.push(setting(ORDER_END_MINUTE, "kwart"));
        assert_eq!(WindowConfig::from_settings(&settings), None);
    }

    #[test]
    fn test_window_settings_round_trip() {
        let config = window(9, 5, 17, 30);
        let settings: Vec<Setting> = config
            .to_settings()
            .into_iter()
            .map(|(k, v)| setting(k, &v))
            .collect();
        assert_eq!(WindowConfig::from_settings(&settings), Some(config));
        assert_eq!(config.to_string(), "09:05-17:30");
    }
}
