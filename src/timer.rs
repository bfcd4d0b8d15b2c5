use std::time::Instant;

/// Small helper to keep timing logic isolated.
///
/// Anchors the last position observed from the player to a monotonic instant
/// so the display can advance smoothly between 1 s polls. The anchor instant
/// is only set while playing; when paused, estimates stay at the anchor.
#[derive(Debug, Default)]
pub struct PlaybackTimer {
    /// Anchor position in milliseconds.
    anchor_ms: u64,
    /// Monotonic instant corresponding to `anchor_ms`; None while paused.
    anchor_instant: Option<Instant>,
}

impl PlaybackTimer {
    /// Record an observed position. Refreshes the monotonic anchor so
    /// subsequent estimates are relative to this sample, preventing
    /// double-counting when callers sample an estimate and write it back.
    pub fn set_position(&mut self, position_ms: u64) {
        self.anchor_ms = position_ms;
        self.anchor_instant = Some(Instant::now());
    }

    /// Playback resumed: measure elapsed time from this moment so paused
    /// wall-clock time is not included in estimates.
    pub fn mark_playing(&mut self) {
        self.anchor_instant = Some(Instant::now());
    }

    /// Playback paused: clear the running anchor so estimates return the
    /// anchor position only.
    pub fn mark_paused(&mut self) {
        self.anchor_instant = None;
    }

    /// Estimated current position in milliseconds.
    pub fn estimate(&self, playing: bool) -> u64 {
        if !playing {
            return self.anchor_ms;
        }
        match self.anchor_instant {
            Some(inst) => self.anchor_ms + inst.elapsed().as_millis() as u64,
            None => self.anchor_ms,
        }
    }
}
