// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Date format for task logs (`YYYY-MM-DD`, zero padded).
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";
/// Time label written on new task logs (`hh:mm AM`).
pub const LOG_TIME_FORMAT: &str = "%I:%M %p";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Source of "today" and "now" in the fixed reference time zone.
///
/// Task logs carry local date and time strings, so every writer must agree on
/// one zone or the same instant lands on different dates.
#[derive(Debug, Clone)]
pub struct ReferenceClock {
    tz: Tz,
    fixed: Option<DateTime<Utc>>,
}

impl ReferenceClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz, fixed: None }
    }

    /// A clock frozen at `instant`, for tests.
    pub fn fixed(tz: Tz, instant: DateTime<Utc>) -> Self {
        Self {
            tz,
            fixed: Some(instant),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    fn now(&self) -> DateTime<Tz> {
        self.fixed
            .unwrap_or_else(Utc::now)
            .with_timezone(&self.tz)
    }

    /// Today's date in the reference zone.
    pub fn today(&self) -> String {
        self.now().format(LOG_DATE_FORMAT).to_string()
    }

    /// Current wall-clock label in the reference zone.
    pub fn time_label(&self) -> String {
        self.now().format(LOG_TIME_FORMAT).to_string()
    }
}
