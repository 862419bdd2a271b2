use std::{fmt, str::FromStr};

use crate::error::Error;

/// Seconds since the start of the service day. Hours may exceed 23 for
/// trips running past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(pub u32);

impl ServiceTime {
    /// Signed number of minutes from `self` to `later`.
    pub fn minutes_until(self, later: ServiceTime) -> f64 {
        (f64::from(later.0) - f64::from(self.0)) / 60.0
    }
}

impl FromStr for ServiceTime {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTime(text.to_owned());

        let mut parts = text.split(':').map(str::trim);
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let component = |part: &str| -> Option<u32> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };

        let hours = component(hours).ok_or_else(invalid)?;
        let minutes = component(minutes).ok_or_else(invalid)?;
        let seconds = component(seconds).ok_or_else(invalid)?;

        hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .map(ServiceTime)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, rest) = (self.0 / 3600, self.0 % 3600);
        write!(f, "{:02}:{:02}:{:02}", hours, rest / 60, rest % 60)
    }
}
