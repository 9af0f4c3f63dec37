//! Rate limit expressions such as `10/minute` or `100 per 2 hours`

use crate::error::SalesDmError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A request budget over a fixed window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub window: Duration,
}

impl RateLimit {
    pub fn new(requests: u32, window: Duration) -> Self {
        Self { requests, window }
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.window.as_secs();
        let (count, unit) = match secs {
            s if s % 86_400 == 0 => (s / 86_400, "day"),
            s if s % 3_600 == 0 => (s / 3_600, "hour"),
            s if s % 60 == 0 => (s / 60, "minute"),
            s => (s, "second"),
        };
        write!(f, "{} per {} {}", self.requests, count, unit)
    }
}

fn unit_seconds(unit: &str) -> Option<u64> {
    match unit.trim_end_matches('s') {
        "second" | "sec" => Some(1),
        "minute" | "min" => Some(60),
        "hour" => Some(3_600),
        "day" => Some(86_400),
        _ => None,
    }
}

impl FromStr for RateLimit {
    type Err = SalesDmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SalesDmError::Config(format!("invalid rate limit expression: {:?}", s));

        let normalized = s.trim().to_lowercase();
        let (count, period) = if let Some((count, period)) = normalized.split_once('/') {
            (count.trim(), period.trim())
        } else if let Some((count, period)) = normalized.split_once(" per ") {
            (count.trim(), period.trim())
        } else {
            return Err(invalid());
        };

        let requests: u32 = count.parse().map_err(|_| invalid())?;
        if requests == 0 {
            return Err(invalid());
        }

        let mut parts = period.split_whitespace();
        let (multiplier, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(unit), None, None) => (1, unit),
            (Some(n), Some(unit), None) => (n.parse::<u64>().map_err(|_| invalid())?, unit),
            _ => return Err(invalid()),
        };
        if multiplier == 0 {
            return Err(invalid());
        }

        let seconds = unit_seconds(unit)
            .and_then(|secs| secs.checked_mul(multiplier))
            .ok_or_else(invalid)?;
        Ok(RateLimit::new(requests, Duration::from_secs(seconds)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_form() {
        let limit: RateLimit = "10/minute".parse().unwrap();
        assert_eq!(limit, RateLimit::new(10, Duration::from_secs(60)));
    }

    #[test]
    fn test_per_form_with_multiplier() {
        let limit: RateLimit = "100 per 2 hours".parse().unwrap();
        assert_eq!(limit, RateLimit::new(100, Duration::from_secs(7_200)));
    }

    #[test]
    fn test_case_and_plural() {
        let limit: RateLimit = " 3/Seconds ".parse().unwrap();
        assert_eq!(limit, RateLimit::new(3, Duration::from_secs(1)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("ten/minute".parse::<RateLimit>().is_err());
        assert!("10/fortnight".parse::<RateLimit>().is_err());
        assert!("0/minute".parse::<RateLimit>().is_err());
        assert!("10".parse::<RateLimit>().is_err());
    }

    #[test]
    fn test_rejects_overflowing_window() {
        let err = "1 per 99999999999999999 days"
            .parse::<RateLimit>()
            .unwrap_err();
        assert!(matches!(err, SalesDmError::Config(_)));
        assert!(format!("1 per {} seconds", u64::MAX)
            .parse::<RateLimit>()
            .is_ok());
    }

    #[test]
    fn test_display() {
        let limit = RateLimit::new(10, Duration::from_secs(60));
        assert_eq!(limit.to_string(), "10 per 1 minute");
    }
}
