//! UTC to WIB conversion of programme start/stop times
//!
//! Source times are read as `YYYYMMDDHHMMSS` from the first 14 characters of
//! the attribute. Anything after that, including an existing offset, is
//! ignored, so running the shift twice over the same guide moves times by
//! 14 hours.

use chrono::{Duration, NaiveDateTime};

use super::document::{TvDocument, ATTR_START, ATTR_STOP};
use crate::error::{EpgError, Result};

const XMLTV_TIME_LEN: usize = 14;
const XMLTV_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Western Indonesian Time, UTC+7
pub const WIB_OFFSET_HOURS: i64 = 7;
const WIB_SUFFIX: &str = "+0700";

/// What to do with a start/stop value that does not begin with 14 digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampPolicy {
    /// Abort the run
    #[default]
    FailFast,
    /// Leave the attribute as it is and keep going
    SkipInvalid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftStats {
    pub shifted: usize,
    pub skipped: usize,
}

/// Rewrites naive UTC times into a fixed target offset
#[derive(Debug, Clone, Copy)]
pub struct TimeShift {
    offset: Duration,
    suffix: &'static str,
    policy: TimestampPolicy,
}

impl TimeShift {
    /// The fixed +0700 shift used for every run
    pub fn wib() -> Self {
        Self {
            offset: Duration::hours(WIB_OFFSET_HOURS),
            suffix: WIB_SUFFIX,
            policy: TimestampPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TimestampPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shift one XMLTV time value
    /// e.g. `20240101180000` -> `20240102010000 +0700`
    pub fn shift(&self, value: &str) -> Result<String> {
        let local = parse_utc_time(value)?
            .checked_add_signed(self.offset)
            .ok_or_else(|| EpgError::timestamp(value, "shifted time out of range"))?;
        Ok(format!("{} {}", local.format(XMLTV_TIME_FORMAT), self.suffix))
    }

    /// Shift `start` and `stop` on every programme that carries them
    pub fn apply(&self, doc: &mut TvDocument) -> Result<ShiftStats> {
        let mut stats = ShiftStats::default();

        for programme in doc.programmes_mut() {
            for key in [ATTR_START, ATTR_STOP] {
                // Absent and empty values are both left alone
                let Some(value) = programme.attribute(key).filter(|v| !v.is_empty()) else {
                    continue;
                };

                match self.shift(value) {
                    Ok(shifted) => {
                        programme.set_attribute(key, &shifted);
                        stats.shifted += 1;
                    }
                    Err(e) if self.policy == TimestampPolicy::SkipInvalid => {
                        log::warn!("Skipping {}: {}", key, e);
                        stats.skipped += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(stats)
    }
}

/// Parse the leading `YYYYMMDDHHMMSS` of an XMLTV time as a naive UTC time
pub fn parse_utc_time(value: &str) -> Result<NaiveDateTime> {
    let digits = value
        .get(..XMLTV_TIME_LEN)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| EpgError::timestamp(value, "expected 14 leading digits (YYYYMMDDHHMMSS)"))?;

    // chrono reads second 60 as a leap second
    if &digits[12..] > "59" {
        return Err(EpgError::timestamp(value, "second out of range"));
    }

    NaiveDateTime::parse_from_str(digits, XMLTV_TIME_FORMAT)
        .map_err(|e| EpgError::timestamp(value, e.to_string()))
}
