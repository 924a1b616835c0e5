//! Time zone used for date literals and DATE/DATETIME casts.
//!
//! Date values are written as wall-clock text in a zone and DATE/DATETIME
//! cells are read back as wall-clock time in the same zone, so a written
//! date reads back unchanged. "Local" is the process zone by default;
//! [`DateZone`] makes it explicit and configurable per builder.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const LITERAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static LOCAL_OFFSET: OnceLock<FixedOffset> = OnceLock::new();

/// UTC offset of the process zone, computed on first use and cached.
pub fn local_offset() -> FixedOffset {
    *LOCAL_OFFSET.get_or_init(|| Local::now().offset().fix())
}

/// Zone used to interpret wall-clock date text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "ZoneRepr")]
pub enum DateZone {
    /// The process zone.
    #[default]
    Local,
    Utc,
    /// A fixed offset, in seconds east of UTC.
    Fixed(i32),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ZoneRepr {
    Local,
    Utc,
    Fixed(i32),
}

impl TryFrom<ZoneRepr> for DateZone {
    type Error = String;

    fn try_from(repr: ZoneRepr) -> Result<Self, Self::Error> {
        match repr {
            ZoneRepr::Local => Ok(DateZone::Local),
            ZoneRepr::Utc => Ok(DateZone::Utc),
            ZoneRepr::Fixed(secs) => DateZone::fixed(secs)
                .ok_or_else(|| format!("fixed offset {secs}s is outside +/-24h")),
        }
    }
}

impl DateZone {
    /// A fixed zone, or `None` when `secs` is not strictly within one day.
    pub fn fixed(secs: i32) -> Option<Self> {
        FixedOffset::east_opt(secs).map(|_| DateZone::Fixed(secs))
    }

    /// Offset used for both date literals and DATE/DATETIME cells.
    ///
    /// For `Local` this is the cached process offset, so a DST change after
    /// first use is not picked up on either side. A `Fixed` offset built
    /// directly with an out-of-range value is treated as UTC.
    pub fn offset(self) -> FixedOffset {
        match self {
            DateZone::Local => local_offset(),
            DateZone::Utc => Utc.fix(),
            DateZone::Fixed(secs) => FixedOffset::east_opt(secs).unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS` wall-clock text.
    ///
    /// Returns `None` when the timestamp is out of range.
    pub fn format_millis(self, millis: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(
            utc.with_timezone(&self.offset())
                .format(LITERAL_FORMAT)
                .to_string(),
        )
    }

    /// Interpret wall-clock time in this zone as an absolute timestamp.
    pub fn to_utc(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_seconds(i64::from(self.offset().local_minus_utc()))?;
        naive.checked_sub_signed(offset).map(|t| t.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn local_offset_is_stable() {
        assert_eq!(local_offset(), local_offset());
        assert_eq!(DateZone::Local.offset(), local_offset());
    }

    #[test]
    fn utc_formatting() {
        assert_eq!(
            DateZone::Utc.format_millis(1_299_215_167_000).as_deref(),
            Some("2011-03-04 05:06:07")
        );
    }

    #[test]
    fn fixed_offset_formatting() {
        // +02:00
        assert_eq!(
            DateZone::Fixed(7200).format_millis(1_299_215_167_000).as_deref(),
            Some("2011-03-04 07:06:07")
        );
    }

    #[test]
    fn fixed_offset_to_utc() {
        let naive = NaiveDate::from_ymd_opt(2011, 3, 4)
            .unwrap()
            .and_hms_opt(7, 6, 7)
            .unwrap();
        let utc = DateZone::Fixed(7200).to_utc(naive).unwrap();
        assert_eq!(utc.timestamp_millis(), 1_299_215_167_000);
    }

    #[test]
    fn written_dates_read_back_unchanged() {
        let millis = 1_311_000_000_000; // July, inside DST for most local zones
        for zone in [DateZone::Local, DateZone::Utc, DateZone::Fixed(-18_000)] {
            let text = zone.format_millis(millis).unwrap();
            let naive = NaiveDateTime::parse_from_str(&text, LITERAL_FORMAT).unwrap();
            assert_eq!(zone.to_utc(naive).unwrap().timestamp_millis(), millis, "{zone:?}");
        }
    }

    #[test]
    fn invalid_fixed_offset_falls_back_to_utc() {
        assert_eq!(DateZone::Fixed(100_000).offset(), Utc.fix());
    }

    #[test]
    fn out_of_range_fixed_offset_is_rejected() {
        assert_eq!(DateZone::fixed(3600), Some(DateZone::Fixed(3600)));
        assert_eq!(DateZone::fixed(100_000), None);
        let err = serde_json::from_str::<DateZone>("{\"fixed\":100000}").unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn zone_deserializes_from_snake_case() {
        let zone: DateZone = serde_json::from_str("\"utc\"").unwrap();
        assert_eq!(zone, DateZone::Utc);
        let zone: DateZone = serde_json::from_str("{\"fixed\":3600}").unwrap();
        assert_eq!(zone, DateZone::Fixed(3600));
    }
}
