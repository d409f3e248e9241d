//! `H.mm` time tokens used by the upstream for pair start times

use crate::error::TimeFormatError;
use chrono::NaiveTime;

/// Parse an `H.mm` token (e.g. `8.30`, `14.15`) into a time of day.
///
/// The hour has one or two digits, the minute exactly two.
pub fn parse_time(token: &str) -> Result<NaiveTime, TimeFormatError> {
    let err = || TimeFormatError::new(token);

    let (hour, minute) = token.split_once('.').ok_or_else(err)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(err());
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hour: u32 = hour.parse().map_err(|_| err())?;
    let minute: u32 = minute.parse().map_err(|_| err())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_valid_tokens() {
        assert_eq!(parse_time("8.30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(parse_time("14.15").unwrap(), NaiveTime::from_hms_opt(14, 15, 0).unwrap());
        assert_eq!(parse_time("0.00").unwrap(), NaiveTime::MIN);
        assert_eq!(parse_time("23.59").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        for token in [
            "", "8", "8.", ".30", "8:30", "8.3", "8.300", "24.00", "8.60", "-1.00", " 8.30",
            "8.30 ", "+8.30", "123.00", "a.bc", "8,30",
        ] {
            assert!(parse_time(token).is_err(), "'{}' should be rejected", token);
        }
    }

    #[test]
    fn test_error_carries_token() {
        let err = parse_time("8:30").unwrap_err();
        assert_eq!(err.token, "8:30");
    }

    #[test]
    fn test_parse_is_injective_and_ordered() {
        let mut previous: Option<NaiveTime> = None;
        for hour in 0..24u32 {
            for minute in 0..60u32 {
                let parsed = parse_time(&format!("{}.{:02}", hour, minute)).unwrap();
                assert_eq!((parsed.hour(), parsed.minute()), (hour, minute));
                if let Some(prev) = previous {
                    assert!(prev < parsed);
                }
                previous = Some(parsed);
            }
        }
    }
}
