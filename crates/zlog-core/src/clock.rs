//! Time source for timestamps and file dates.
//!
//! The wall clock is read in the logger's configured IANA zone. Tests can pin
//! the clock to a fixed instant; the pinned value is used verbatim, offset
//! included, until it is cleared or replaced.

use std::sync::RwLock;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ZlogError};

/// Parse an IANA zone name such as `"Asia/Riyadh"`.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| ZlogError::Config(format!("unknown time zone {name:?}: {e}")))
}

/// Format an instant as ISO-8601 with offset.
///
/// Whole seconds print without a fractional part; anything else prints
/// microseconds (`2024-01-01T00:00:00+03:00`, `2024-01-01T09:15:02.250000+03:00`).
pub fn iso_timestamp(t: &DateTime<FixedOffset>) -> String {
    let format = if t.nanosecond() / 1_000 == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    t.to_rfc3339_opts(format, false)
}

/// A zone-aware clock with an optional fixed override.
#[derive(Debug)]
pub struct Clock {
    zone: Tz,
    pinned: RwLock<Option<DateTime<FixedOffset>>>,
}

impl Clock {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            pinned: RwLock::new(None),
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Current time: the pinned instant if set, else now in the clock's zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        if let Some(t) = *self.pinned.read().unwrap_or_else(|e| e.into_inner()) {
            return t;
        }
        Utc::now().with_timezone(&self.zone).fixed_offset()
    }

    /// Pin the clock to `t`.
    pub fn pin<Z: TimeZone>(&self, t: DateTime<Z>) {
        *self.pinned.write().unwrap_or_else(|e| e.into_inner()) = Some(t.fixed_offset());
    }

    /// Return to the wall clock.
    pub fn unpin(&self) {
        *self.pinned.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_zones() {
        assert_eq!(
            parse_time_zone("Asia/Riyadh").unwrap(),
            chrono_tz::Asia::Riyadh
        );
        assert_eq!(parse_time_zone("UTC").unwrap(), chrono_tz::UTC);
        assert!(matches!(
            parse_time_zone("Mars/Olympus"),
            Err(ZlogError::Config(_))
        ));
    }

    #[test]
    fn wall_clock_uses_zone_offset() {
        let clock = Clock::new(chrono_tz::Asia::Riyadh);
        assert_eq!(clock.now().offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn pin_and_unpin() {
        let clock = Clock::new(chrono_tz::UTC);
        let t = chrono_tz::Asia::Riyadh
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        clock.pin(t);
        assert!(clock.is_pinned());
        assert_eq!(iso_timestamp(&clock.now()), "2024-01-01T00:00:00+03:00");
        clock.unpin();
        assert!(!clock.is_pinned());
        assert_eq!(clock.now().offset().local_minus_utc(), 0);
    }

    #[test]
    fn fractional_seconds_print_micros() {
        let t = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 9, 15, 2)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(iso_timestamp(&t), "2024-01-01T09:15:02.250000+03:00");
    }
}
