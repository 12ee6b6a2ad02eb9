//! Free-form contest duration parsing.

use std::sync::OnceLock;

use regex::Regex;

/// Duration assumed when none is given or it cannot be parsed (2 hours).
pub const DEFAULT_DURATION_MS: u64 = 2 * 60 * 60 * 1000;

const MINUTE_MS: u64 = 60 * 1000;

/// Parse a duration string into milliseconds.
///
/// Recognised forms, in order:
/// - unit suffixes: `"2h 30m"`, `"150m"`, `"3h"`
/// - clock notation: `"2:30:00"` (hours, minutes, seconds)
/// - a bare number of minutes: `"90"`
///
/// Anything else yields [`DEFAULT_DURATION_MS`].
pub fn parse_duration(text: &str) -> u64 {
    try_parse_duration(text).unwrap_or(DEFAULT_DURATION_MS)
}

/// Like [`parse_duration`] but reports unparseable input as `None`.
pub fn try_parse_duration(text: &str) -> Option<u64> {
    if text.contains('h') || text.contains('m') {
        let hours = first_capture(hours_re(), text).unwrap_or(0);
        let minutes = first_capture(minutes_re(), text).unwrap_or(0);
        let total = hours.saturating_mul(60).saturating_add(minutes);
        return Some(clamp_ms(total.saturating_mul(MINUTE_MS as i64)));
    }

    if text.contains(':') {
        let mut parts = text.split(':');
        let mut next = || match parts.next() {
            None | Some("") => Some(0),
            Some(segment) => parse_int_prefix(segment),
        };
        let hours = next()?;
        let minutes = next()?;
        let seconds = next()?;
        let total = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        return Some(clamp_ms(total.saturating_mul(1000)));
    }

    parse_int_prefix(text).map(|minutes| clamp_ms(minutes.saturating_mul(MINUTE_MS as i64)))
}

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)h").unwrap())
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)m").unwrap())
}

fn first_capture(re: &Regex, text: &str) -> Option<i64> {
    let caps = re.captures(text)?;
    // Digit runs too long for i64 saturate rather than vanish.
    Some(caps[1].parse().unwrap_or(i64::MAX))
}

/// Leading integer of a string, the way a lenient `parseInt` reads it:
/// optional surrounding whitespace and sign, then digits; trailing junk ignored.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn clamp_ms(ms: i64) -> u64 {
    ms.max(0) as u64
}
