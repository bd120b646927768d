//! Localized display dates.
//!
//! Timestamps are shown in the offset they carry, never converted to the
//! machine's zone, so the same input always renders the same string.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidDateError, InvalidInputError};

/// Pattern for [`format_short_date`]: `25 mar 2021`.
const SHORT_DATE: &str = "%d %b %Y";

/// Pattern for [`format_date_time`]: `25 mar 2021, 19:25`.
const DATE_TIME: &str = "%d %b %Y, %H:%M";

/// Offset forms the content API uses besides RFC 3339 (`+0000`).
const COMPACT_OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Display locale of the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SiteLocale {
    #[default]
    PtBr,
    EnUs,
}

impl SiteLocale {
    /// BCP 47 tag of the locale.
    pub fn tag(&self) -> &'static str {
        match self {
            SiteLocale::PtBr => "pt-BR",
            SiteLocale::EnUs => "en-US",
        }
    }

    fn chrono(&self) -> chrono::Locale {
        match self {
            SiteLocale::PtBr => chrono::Locale::pt_BR,
            SiteLocale::EnUs => chrono::Locale::en_US,
        }
    }
}

impl fmt::Display for SiteLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SiteLocale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Ok(SiteLocale::PtBr),
            "en-us" => Ok(SiteLocale::EnUs),
            _ => Err(InvalidInputError::Locale {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

impl TryFrom<String> for SiteLocale {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SiteLocale> for String {
    fn from(locale: SiteLocale) -> Self {
        locale.tag().to_string()
    }
}

/// Parse a content API timestamp.
///
/// Accepts RFC 3339 and the compact `+0000` offset form.
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<FixedOffset>, Error> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .or_else(|| {
            COMPACT_OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(timestamp, fmt).ok())
        })
        .ok_or_else(|| {
            InvalidDateError {
                value: timestamp.to_string(),
            }
            .into()
        })
}

/// Format a timestamp as `dd MMM yyyy`.
pub fn format_short_date(timestamp: &str, locale: SiteLocale) -> Result<String, Error> {
    let date = parse_timestamp(timestamp)?;
    Ok(date.format_localized(SHORT_DATE, locale.chrono()).to_string())
}

/// Format a timestamp as `dd MMM yyyy, HH:mm`.
pub fn format_date_time(timestamp: &str, locale: SiteLocale) -> Result<String, Error> {
    let date = parse_timestamp(timestamp)?;
    Ok(date.format_localized(DATE_TIME, locale.chrono()).to_string())
}
