//! Timestamped visit record served by the responder.
//!
//! A [`TimeStampedVisit`] pairs the current UTC instant, rendered as a naive
//! ISO-8601 string, with the IP address of the connected peer. Time is read
//! through the [`Clock`] trait so callers can pin it in tests.

pub mod clock;
pub mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use record::{TimeStampedVisit, format_naive_utc};
