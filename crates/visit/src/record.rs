//! The per-request visit record and its timestamp rendering.

use std::net::IpAddr;

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

use crate::Clock;

/// One visit: when it happened and who connected.
///
/// Built fresh for every request and dropped once serialized. Field order is
/// the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStampedVisit {
    pub timestamp: String,
    pub ip: String,
}

impl TimeStampedVisit {
    /// Creates a visit for the given instant and peer.
    pub fn new(instant: DateTime<Utc>, peer: IpAddr) -> Self {
        Self {
            timestamp: format_naive_utc(instant),
            ip: peer.to_string(),
        }
    }

    /// Reads `clock` once and creates a visit for `peer`.
    pub fn now(clock: &dyn Clock, peer: IpAddr) -> Self {
        Self::new(clock.now(), peer)
    }
}

/// Renders `instant` as `YYYY-MM-DDTHH:MM:SS[.ffffff]` with no offset.
///
/// Sub-microsecond digits are truncated. The fractional part is omitted when
/// the microsecond field is zero.
pub fn format_naive_utc(instant: DateTime<Utc>) -> String {
    let naive = instant.naive_utc();
    // chrono encodes a leap second as nanosecond >= 1_000_000_000
    let micros = (naive.nanosecond() / 1_000).min(999_999);
    let base = naive.format("%Y-%m-%dT%H:%M:%S");
    if micros == 0 {
        base.to_string()
    } else {
        format!("{base}.{micros:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::{NaiveDateTime, TimeZone};
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn at(micros: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .unwrap()
            .with_nanosecond(micros * 1_000)
            .unwrap()
    }

    #[test]
    fn formats_microseconds_with_six_digits() {
        assert_eq!(format_naive_utc(at(123_456)), "2024-03-01T12:00:00.123456");
        assert_eq!(format_naive_utc(at(42)), "2024-03-01T12:00:00.000042");
    }

    #[test]
    fn omits_fraction_on_whole_second() {
        assert_eq!(format_naive_utc(at(0)), "2024-03-01T12:00:00");
    }

    #[test]
    fn truncates_sub_microsecond_precision() {
        let instant = at(0).with_nanosecond(999).unwrap();
        assert_eq!(format_naive_utc(instant), "2024-03-01T12:00:00");

        let instant = at(0).with_nanosecond(1_999).unwrap();
        assert_eq!(format_naive_utc(instant), "2024-03-01T12:00:00.000001");
    }

    #[test]
    fn has_no_timezone_designator() {
        let rendered = format_naive_utc(at(500_000));
        assert!(!rendered.ends_with('Z'));
        assert!(!rendered.contains('+'));
        assert!(NaiveDateTime::parse_from_str(&rendered, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }

    #[test]
    fn serializes_timestamp_before_ip() {
        let clock = FixedClock::new(at(123_456));
        let visit = TimeStampedVisit::now(&clock, IpAddr::V4(Ipv4Addr::LOCALHOST));

        let json = serde_json::to_string(&visit).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2024-03-01T12:00:00.123456","ip":"127.0.0.1"}"#
        );
    }

    #[test]
    fn ipv6_peer_is_rendered_without_brackets() {
        let visit = TimeStampedVisit::new(at(0), IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(visit.ip, "::1");
    }
}
