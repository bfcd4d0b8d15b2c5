use crate::lyrics::types::LyricLine;
use once_cell::sync::Lazy;
use regex::Regex;

// Deliberately unanchored: any string containing a timestamp parses, matching
// the historical behavior this replaces.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+):(\d{2})\.(\d+)").unwrap());

static TIMED_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d+:\d{2}\.\d+)\](.*)$").unwrap());

/// Parse a `mm:ss.fraction` timestamp into absolute milliseconds.
///
/// Returns `None` for anything that does not contain a timestamp; callers
/// treat that as "not a timestamp line", never as a failure.
///
/// The fractional group is parsed as a plain integer, not scaled by its digit
/// count: a 3-digit fraction is milliseconds, while `0:05.1` parses to 5001.
/// This is a compatibility quirk inherited from the system this replaces and
/// is pinned by tests; do not silently "fix" it.
pub fn parse_timestamp(text: &str) -> Option<u64> {
    let caps = TIMESTAMP_RE.captures(text)?;
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
    let fraction: u64 = caps.get(3)?.as_str().parse().ok()?;
    Some(minutes * 60_000 + seconds * 1_000 + fraction)
}

/// Parse a raw timestamped-lyric blob into ordered lines.
///
/// Lines that do not match `[mm:ss.fraction]text` are silently dropped
/// (metadata tags, blank lines). The text after the closing bracket is kept
/// unmodified, leading whitespace included. Output order equals input line
/// order; empty or fully-unmatched input yields an empty sequence.
pub fn parse_timed_lines(blob: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    for line in blob.split('\n') {
        let Some(caps) = TIMED_LINE_RE.captures(line) else {
            continue;
        };
        let (Some(stamp), Some(text)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let Some(offset_ms) = parse_timestamp(stamp.as_str()) else {
            continue;
        };
        lines.push(LyricLine {
            offset_ms,
            offset_text: stamp.as_str().to_string(),
            text: text.as_str().to_string(),
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_to_milliseconds() {
        assert_eq!(parse_timestamp("3:45.123"), Some(225_123));
        assert_eq!(parse_timestamp("0:00.000"), Some(0));
        assert_eq!(parse_timestamp("10:30.500"), Some(630_500));
    }

    #[test]
    fn rejects_non_timestamps() {
        assert_eq!(parse_timestamp("not-a-time"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("3:4.5"), None); // seconds must be two digits
        assert_eq!(parse_timestamp("3:455"), None); // no fractional group
    }

    // The fraction is taken as a raw integer, not scaled by digit count.
    // Inherited behavior, kept on purpose.
    #[test]
    fn fraction_is_a_literal_integer() {
        assert_eq!(parse_timestamp("0:05.1"), Some(5_001));
        assert_eq!(parse_timestamp("0:05.10"), Some(5_010));
        assert_eq!(parse_timestamp("0:05.100"), Some(5_100));
    }

    #[test]
    fn splits_blob_and_drops_unmatched_lines() {
        let blob = "[00:10.500]Hello\nmeta\n[00:20.000]World";
        let lines = parse_timed_lines(blob);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].offset_ms, 10_500);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[1].offset_ms, 20_000);
        assert_eq!(lines[1].text, "World");
    }

    #[test]
    fn keeps_text_unmodified() {
        let lines = parse_timed_lines("[00:01.000]  leading spaces kept ");
        assert_eq!(lines[0].text, "  leading spaces kept ");
    }

    #[test]
    fn preserves_source_order_even_when_unsorted() {
        let blob = "[00:20.000]later first\n[00:10.000]earlier second";
        let lines = parse_timed_lines(blob);
        assert_eq!(lines[0].offset_ms, 20_000);
        assert_eq!(lines[1].offset_ms, 10_000);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(parse_timed_lines("").is_empty());
        assert!(parse_timed_lines("[ar:Artist]\n[ti:Title]\n\n").is_empty());
    }

    #[test]
    fn reparsing_offset_text_round_trips() {
        let blob = "[00:10.500]Hello\n[01:02.3]odd fraction";
        for line in parse_timed_lines(blob) {
            assert_eq!(parse_timestamp(&line.offset_text), Some(line.offset_ms));
        }
    }

    #[test]
    fn parsing_is_idempotent() {
        let blob = "[00:10.500]Hello\nmeta\n[00:20.000]World";
        assert_eq!(parse_timed_lines(blob), parse_timed_lines(blob));
    }
}
