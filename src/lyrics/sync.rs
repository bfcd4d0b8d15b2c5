use crate::lyrics::types::LyricLine;

/// Resolve which line is active at the given elapsed time.
///
/// Scans in input order for the first line whose offset is at or after
/// `elapsed_ms`; the active line is the one immediately before it, clamped to
/// the first line. When elapsed time runs past the last offset the answer is
/// `None` — the display goes quiet rather than pinning the final line.
///
/// The scan is linear on purpose: parsed sequences preserve source order and
/// malformed sources may not be sorted, so a binary search would be wrong.
/// The one-before semantics ("currently playing = most recently started
/// line") are pinned behavior.
pub fn active_index(lines: &[LyricLine], elapsed_ms: u64) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.offset_ms >= elapsed_ms)
        .map(|i| i.saturating_sub(1))
}

/// Convenience wrapper returning the line itself.
pub fn active_line(lines: &[LyricLine], elapsed_ms: u64) -> Option<&LyricLine> {
    active_index(lines, elapsed_ms).and_then(|i| lines.get(i))
}
