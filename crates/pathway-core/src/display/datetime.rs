//! Timestamp formatting in the local time zone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a UTC [`Timestamp`] as `YYYY-MM-DD HH:MM:SS TZ` in the system
/// time zone.
///
/// Storage keeps timestamps in UTC; this wrapper is used only at display
/// time.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_date_time_shape() {
        let timestamp = Timestamp::from_second(1640995200).unwrap();
        let output = LocalDateTime(&timestamp).to_string();

        // Date and time are fixed-width regardless of zone.
        assert_eq!(&output[4..5], "-");
        assert_eq!(&output[10..11], " ");
        assert_eq!(&output[13..14], ":");
    }
}
