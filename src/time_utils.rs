// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for dates and identifiers.

use chrono::{Local, NaiveDate, Utc};

/// Date format used in documents and statistics keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date as `YYYY-MM-DD`.
pub fn today_string() -> String {
    format_date(today())
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// New workout identifier: current Unix time in milliseconds.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Extract "YYYY-MM" from a `YYYY-MM-DD` date string.
pub fn month_key(date: &str) -> Option<&str> {
    date.get(..7)
}
