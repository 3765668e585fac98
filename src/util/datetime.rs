//! Date/time codec for feed timestamps.
//!
//! Atom uses RFC 3339 (`2017-07-06T20:25:00Z`), RSS uses RFC 822 as
//! amended by RFC 1123 (`Thu, 06 Jul 2017 20:25:00 GMT`). Real-world RSS
//! dates are frequently off-spec: missing weekday, single-digit days,
//! tabs instead of spaces, numeric offsets without a colon, or legacy
//! military and North American zone names. [`try_parse_date`] accepts all
//! of those and fails quietly on anything else.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use super::text::collapse_whitespace;

const RFC3339_LOCAL_LEN: usize = 19;
const RFC822_WITH_SECONDS: &str = "%d %b %Y %H:%M:%S";
const RFC822_WITHOUT_SECONDS: &str = "%d %b %Y %H:%M";

/// Formats an instant as RFC 3339.
///
/// A zero offset is written as `Z`, any other offset as `±HH:MM`.
pub fn to_rfc3339(value: &DateTime<FixedOffset>) -> String {
    if value.offset().local_minus_utc() == 0 {
        value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }
}

/// Formats an instant as a fixed-width RFC 1123 string in GMT.
pub fn to_rfc1123(value: &DateTime<FixedOffset>) -> String {
    value
        .with_timezone(&Utc)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Parses a feed date, trying RFC 3339 first and the lenient RFC 822
/// variant second.
///
/// Returns `None` for empty, too short or unrecognized input. Never panics.
///
/// # Examples
///
/// ```
/// use syndfeed::util::try_parse_date;
///
/// let date = try_parse_date("Thu, 06 Jul 2017 20:25:00 GMT").unwrap();
/// assert_eq!(date.to_rfc3339(), "2017-07-06T20:25:00+00:00");
///
/// assert!(try_parse_date("Sun, 13 Aug 1998 04:27:00 CET").is_none());
/// ```
pub fn try_parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_rfc3339(text).or_else(|| parse_rfc822(text))
}

/// Maps an RSS time zone designator to a numeric `±HH:MM` offset.
///
/// Returns the offset together with a flag telling whether the designator
/// explicitly named universal time (`UT`, `Z`). Unknown designators yield
/// `None`.
pub fn normalize_time_zone(zone: &str) -> Option<(String, bool)> {
    let bytes = zone.as_bytes();
    if let Some(&sign) = bytes.first().filter(|b| matches!(**b, b'+' | b'-')) {
        let digits = &zone[1..];
        if zone.len() == 6 && bytes[3] == b':' {
            return parse_offset(zone).map(|_| (zone.to_string(), false));
        }
        if !(3..=4).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = if digits.len() == 3 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        return Some((
            format!("{}{}:{}", sign as char, &digits[..2], &digits[2..]),
            false,
        ));
    }

    let offset = match zone {
        "UT" | "Z" => return Some(("-00:00".to_string(), true)),
        "GMT" => "-00:00",
        "A" => "-01:00",
        "B" => "-02:00",
        "C" => "-03:00",
        "D" | "EDT" => "-04:00",
        "E" | "EST" | "CDT" => "-05:00",
        "F" | "CST" | "MDT" => "-06:00",
        "G" | "MST" | "PDT" => "-07:00",
        "H" | "PST" => "-08:00",
        "I" => "-09:00",
        "K" => "-10:00",
        "L" => "-11:00",
        "M" => "-12:00",
        "N" => "+01:00",
        "O" => "+02:00",
        "P" => "+03:00",
        "Q" => "+04:00",
        "R" => "+05:00",
        "S" => "+06:00",
        "T" => "+07:00",
        "U" => "+08:00",
        "V" => "+09:00",
        "W" => "+10:00",
        "X" => "+11:00",
        "Y" => "+12:00",
        _ => return None,
    };
    Some((offset.to_string(), false))
}

fn parse_rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    if text.len() <= RFC3339_LOCAL_LEN || !text.is_char_boundary(RFC3339_LOCAL_LEN) {
        return None;
    }
    let (local, mut zone) = text.split_at(RFC3339_LOCAL_LEN);

    // Fractional seconds are dropped, not rounded.
    if let Some(fraction) = zone.strip_prefix('.') {
        let digits = fraction.bytes().take_while(u8::is_ascii_digit).count();
        zone = &fraction[digits..];
    }

    let naive = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S").ok()?;
    let offset = if zone == "Z" || zone == "z" {
        FixedOffset::east_opt(0)?
    } else {
        parse_offset(zone)?
    };
    offset.from_local_datetime(&naive).single()
}

fn parse_rfc822(text: &str) -> Option<DateTime<FixedOffset>> {
    let mut value = text.trim();
    if value.len() < 18 {
        return None;
    }
    if value.as_bytes()[3] == b',' {
        value = value.get(4..)?.trim_start();
    }

    let mut value = collapse_whitespace(value);
    if !value.as_bytes().get(1)?.is_ascii_digit() {
        value.insert(0, '0');
    }
    if value.len() < 19 || !value.is_ascii() {
        return None;
    }

    let has_seconds = value.as_bytes()[17] == b':';
    let zone_start = if has_seconds { 21 } else { 18 };
    if zone_start > value.len() {
        return None;
    }

    let (offset, _) = normalize_time_zone(&value[zone_start..])?;
    let offset = parse_offset(&offset)?;
    let format = if has_seconds {
        RFC822_WITH_SECONDS
    } else {
        RFC822_WITHOUT_SECONDS
    };
    let naive = NaiveDateTime::parse_from_str(value[..zone_start].trim_end(), format).ok()?;
    offset.from_local_datetime(&naive).single()
}

/// Parses `±H:MM` or `±HH:MM`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = text[1..].split_once(':')?;
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !all_digits(hours) || !all_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    fn utc(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text)
            .expect("valid fixture")
            .with_timezone(&Utc)
    }

    fn parsed_utc(text: &str) -> Option<DateTime<Utc>> {
        try_parse_date(text).map(|d| d.with_timezone(&Utc))
    }

    #[test]
    fn test_parse_rejects_empty_and_blank() {
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_date("   \t"), None);
    }

    #[test]
    fn test_parse_rejects_unsupported_zone() {
        assert_eq!(try_parse_date("Sun, 13 Aug 1998 04:27:00 CET"), None);
    }

    #[test]
    fn test_parse_rejects_missing_zone() {
        assert_eq!(try_parse_date("Thu, 06 Jul 2017 20:25:00"), None);
    }

    #[test]
    fn test_parse_rfc822_gmt() {
        assert_eq!(
            parsed_utc("Thu, 06 Jul 2017 20:25:00 GMT"),
            Some(utc("2017-07-06T20:25:00Z"))
        );
    }

    #[test]
    fn test_parse_rfc822_military_zone() {
        assert_eq!(
            parsed_utc("Sun, 13 Aug 1998 04:27:00 A"),
            Some(utc("1998-08-13T05:27:00Z"))
        );
    }

    #[test]
    fn test_parse_rfc822_numeric_offset() {
        let expected = Some(utc("2017-08-02T21:07:09Z"));
        assert_eq!(parsed_utc("Thu, 03 Aug 2017 02:37:09 +0530"), expected);
        assert_eq!(parsed_utc("Thu,\t03\tAug 2017\t02:37:09\t+0530"), expected);
    }

    #[test]
    fn test_parse_rfc822_variants() {
        // No weekday, single-digit day, no seconds.
        assert_eq!(
            parsed_utc("6 Jul 2017 20:25 EST"),
            Some(utc("2017-07-07T01:25:00Z"))
        );
        assert_eq!(
            parsed_utc("Thu, 06 Jul 2017 20:25:00 -0400"),
            Some(utc("2017-07-07T00:25:00Z"))
        );
        assert_eq!(
            parsed_utc("Thu, 06 Jul 2017 20:25:00 Z"),
            Some(utc("2017-07-06T20:25:00Z"))
        );
    }

    #[test]
    fn test_parse_rfc3339() {
        let expected = Some(utc("2003-12-13T12:29:29Z"));
        assert_eq!(parsed_utc("2003-12-13T08:29:29-04:00"), expected);
        assert_eq!(parsed_utc("2003-12-13T08:29:29-4:00"), expected);
        assert_eq!(parsed_utc("2003-12-13T12:29:29Z"), expected);
    }

    #[test]
    fn test_parse_rfc3339_drops_fraction() {
        let date = try_parse_date("2003-12-13T08:29:29.8765-04:00").expect("parses");
        assert_eq!(date.nanosecond(), 0);
        assert_eq!(date.with_timezone(&Utc), utc("2003-12-13T12:29:29Z"));
    }

    #[test]
    fn test_parse_keeps_original_offset() {
        let date = try_parse_date("2017-08-03T02:37:09+05:30").expect("parses");
        assert_eq!(date.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn test_normalize_time_zone() {
        assert_eq!(normalize_time_zone("UT"), Some(("-00:00".into(), true)));
        assert_eq!(normalize_time_zone("Z"), Some(("-00:00".into(), true)));
        assert_eq!(normalize_time_zone("GMT"), Some(("-00:00".into(), false)));
        assert_eq!(normalize_time_zone("A"), Some(("-01:00".into(), false)));
        assert_eq!(normalize_time_zone("+0530"), Some(("+05:30".into(), false)));
        assert_eq!(normalize_time_zone("-0400"), Some(("-04:00".into(), false)));
        assert_eq!(normalize_time_zone("-400"), Some(("-04:00".into(), false)));
        assert_eq!(normalize_time_zone("CET"), None);
        assert_eq!(normalize_time_zone("+5"), None);
    }

    #[test]
    fn test_to_rfc3339() {
        let utc_date = DateTime::parse_from_rfc3339("2017-07-06T20:25:00+00:00").expect("fixture");
        assert_eq!(to_rfc3339(&utc_date), "2017-07-06T20:25:00Z");

        let offset_date =
            DateTime::parse_from_rfc3339("2003-12-13T08:29:29-04:00").expect("fixture");
        assert_eq!(to_rfc3339(&offset_date), "2003-12-13T08:29:29-04:00");
    }

    #[test]
    fn test_to_rfc1123() {
        let date = DateTime::parse_from_rfc3339("2017-07-06T22:25:00+02:00").expect("fixture");
        assert_eq!(to_rfc1123(&date), "Thu, 06 Jul 2017 20:25:00 GMT");
    }

    proptest! {
        #[test]
        fn prop_rfc3339_roundtrip(
            secs in 0i64..253_402_300_799,
            offset_minutes in -(23 * 60 + 59)..(23 * 60 + 59),
        ) {
            let offset = FixedOffset::east_opt((offset_minutes * 60) as i32).expect("in range");
            let Some(instant) = DateTime::from_timestamp(secs, 0) else {
                return Ok(());
            };
            let date = instant.with_timezone(&offset);
            // Four-digit years only.
            prop_assume!((1000..=9999).contains(&chrono::Datelike::year(&date)));
            prop_assert_eq!(try_parse_date(&to_rfc3339(&date)), Some(date));
        }

        #[test]
        fn prop_rfc1123_roundtrip(secs in 31_536_000i64..253_402_300_799) {
            let Some(instant) = DateTime::from_timestamp(secs, 0) else {
                return Ok(());
            };
            let date = instant.fixed_offset();
            prop_assume!(chrono::Datelike::year(&date) >= 1000);
            let parsed = try_parse_date(&to_rfc1123(&date)).map(|d| d.with_timezone(&Utc));
            prop_assert_eq!(parsed, Some(instant));
        }

        #[test]
        fn prop_parse_never_panics(text in "\\PC{0,40}") {
            let _ = try_parse_date(&text);
        }
    }
}
