//! UTC offset value type.

use std::fmt;
use std::str::FromStr;

/// A fixed offset from UTC.
///
/// The sign is kept apart from the components so that offsets under an
/// hour west of UTC (`-00:30`) keep it. Minutes are expected to be in
/// `0..=59` (checked at validation time, not here). A zero offset is never
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    /// West of UTC.
    negative: bool,
    hours: u8,
    minutes: u8,
}

/// Error returned when a string is not a UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid UTC offset: {0:?}")]
pub struct InvalidUtcOffset(pub String);

impl UtcOffset {
    /// UTC itself.
    pub const UTC: Self = Self {
        negative: false,
        hours: 0,
        minutes: 0,
    };

    /// Creates a new UTC offset; the sign comes from `hours`.
    ///
    /// Use [`UtcOffset::with_sign`] for offsets under an hour west of UTC.
    #[must_use]
    pub const fn new(hours: i8, minutes: u8) -> Self {
        Self::with_sign(hours < 0, hours.unsigned_abs(), minutes)
    }

    /// Creates a new UTC offset from a sign and unsigned components.
    #[must_use]
    pub const fn with_sign(negative: bool, hours: u8, minutes: u8) -> Self {
        Self {
            negative: negative && (hours != 0 || minutes != 0),
            hours,
            minutes,
        }
    }

    /// Builds an offset from a signed number of seconds east of UTC.
    ///
    /// Seconds are truncated.
    #[must_use]
    pub fn from_seconds(seconds: i32) -> Self {
        let total_minutes = (seconds / 60).unsigned_abs();
        let hours = u8::try_from(total_minutes / 60).unwrap_or(0);
        let minutes = u8::try_from(total_minutes % 60).unwrap_or(0);
        Self::with_sign(seconds < 0, hours, minutes)
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Unsigned hour component.
    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Returns the total offset in minutes.
    #[must_use]
    pub const fn total_minutes(&self) -> i32 {
        let magnitude = (self.hours as i32) * 60 + (self.minutes as i32);
        if self.negative { -magnitude } else { magnitude }
    }

    /// Whether the minute component is in range.
    #[must_use]
    pub const fn has_valid_minutes(&self) -> bool {
        self.minutes <= 59
    }

    /// Parses `±HHMM`, `±HH:MM`, `±HH` or `Z`.
    ///
    /// The leading sign is optional and one-digit hours are accepted.
    ///
    /// ## Errors
    /// Returns [`InvalidUtcOffset`] when the text matches none of the forms.
    pub fn parse(s: &str) -> Result<Self, InvalidUtcOffset> {
        let trimmed = s.trim();
        let invalid = || InvalidUtcOffset(s.to_string());

        if trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::UTC);
        }

        let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else {
            (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
        };

        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
            return Err(invalid());
        }

        let (hour_digits, minute_digits) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() > 2 => rest.split_at(rest.len() - 2),
            None => (rest, ""),
        };

        if hour_digits.is_empty()
            || hour_digits.len() > 2
            || !(minute_digits.is_empty() || minute_digits.len() == 2)
        {
            return Err(invalid());
        }

        let hours: u8 = hour_digits.parse().map_err(|_e| invalid())?;
        let minutes: u8 = if minute_digits.is_empty() {
            0
        } else {
            minute_digits.parse().map_err(|_e| invalid())?
        };

        Ok(Self::with_sign(negative, hours, minutes))
    }

    /// Renders the offset, `±HHMM` (basic) or `±HH:MM` (extended).
    #[must_use]
    pub fn format(&self, extended: bool) -> String {
        let sign = if self.negative { '-' } else { '+' };
        let hours = self.hours;
        if extended {
            format!("{sign}{hours:02}:{:02}", self.minutes)
        } else {
            format!("{sign}{hours:02}{:02}", self.minutes)
        }
    }
}

impl FromStr for UtcOffset {
    type Err = InvalidUtcOffset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}
