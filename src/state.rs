// state.rs: State data structures for lyrics and player

use crate::lyrics::{FetchedLyrics, LyricLine, LyricsError, SelectedMatch, sync};
use crate::mpris::TrackMetadata;
use crate::timer::PlaybackTimer;
use serde_json::Value;
use std::sync::Arc;

/// Position drift beyond which a poll sample is treated as a seek.
const SEEK_JUMP_MS: u64 = 2_000;

/// Represents a UI update for lyrics and player state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub lines: Arc<Vec<LyricLine>>,
    pub index: Option<usize>,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub err: Option<String>,
    /// Raw provider payload of the selected candidate, for the info view.
    pub selected: Option<Value>,
    pub version: u64, // Incremented on any state change
}

/// Holds the current state of the player (track info, playback, errors).
#[derive(Debug, Default)]
pub struct PlayerState {
    pub track: TrackMetadata,
    pub playing: bool,
    pub timer: PlaybackTimer,
    pub err: Option<String>,
}

impl PlayerState {
    pub fn update_from_metadata(&mut self, meta: &TrackMetadata) {
        self.track = meta.clone();
        self.timer.set_position(0);
        self.err = None;
    }

    pub fn update_playback(&mut self, playing: bool, position_ms: u64) {
        if playing && !self.playing {
            self.timer.mark_playing();
        } else if !playing && self.playing {
            self.timer.mark_paused();
        }
        self.playing = playing;
        self.timer.set_position(position_ms);
    }

    pub fn estimate_position(&self) -> u64 {
        self.timer.estimate(self.playing)
    }
}

/// Holds the current state of the lyrics (lines, active index, chosen match).
#[derive(Debug, Default)]
pub struct LyricState {
    pub lines: Arc<Vec<LyricLine>>,
    pub index: Option<usize>,
    pub selected: Option<SelectedMatch>,
}

impl LyricState {
    pub fn update_lines(&mut self, lines: Vec<LyricLine>, selected: Option<SelectedMatch>) {
        self.index = None;
        self.lines = Arc::new(lines);
        self.selected = selected;
    }

    pub fn update_index(&mut self, position_ms: u64) -> bool {
        let new_index = sync::active_index(&self.lines, position_ms);
        if new_index != self.index {
            self.index = new_index;
            true
        } else {
            false
        }
    }
}

/// Bundles all state for the player and lyrics, plus versioning.
///
/// The generation counter implements the stale-fetch discard: each detected
/// track change bumps it, and a fetch result arriving with an older tag is
/// dropped instead of overwriting the current track's state.
#[derive(Debug, Default)]
pub struct StateBundle {
    pub lyric_state: LyricState,
    pub player_state: PlayerState,
    generation: u64,
    pub version: u64, // Incremented on any state change
}

impl StateBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_track_changed(&self, meta: &TrackMetadata) -> bool {
        !self.player_state.track.is_same_track(meta)
    }

    /// Start tracking a new track: discard lyric state wholesale and return
    /// the generation tag the pipeline result must carry to be accepted.
    pub fn begin_track(&mut self, meta: &TrackMetadata) -> u64 {
        self.lyric_state.update_lines(Vec::new(), None);
        self.player_state.update_from_metadata(meta);
        self.generation += 1;
        self.version += 1;
        self.generation
    }

    /// Apply a finished pipeline run. Returns false when the result belonged
    /// to a superseded track and was discarded.
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        outcome: Result<FetchedLyrics, LyricsError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match outcome {
            Ok(fetched) => {
                self.lyric_state
                    .update_lines(fetched.lines, Some(fetched.selected));
                self.player_state.err = None;
            }
            Err(e) => {
                self.lyric_state.update_lines(Vec::new(), None);
                self.player_state.err = Some(e.to_string());
            }
        }
        self.version += 1;
        true
    }

    pub fn update_playback(&mut self, playing: bool, position_ms: u64) {
        // A sample far from the current estimate means the user seeked; the
        // UI must be re-anchored even though nothing else changed.
        let estimated = self.player_state.estimate_position();
        if self.player_state.playing != playing || estimated.abs_diff(position_ms) > SEEK_JUMP_MS {
            self.version += 1;
        }
        self.player_state.update_playback(playing, position_ms);
    }

    pub fn update_index(&mut self, position_ms: u64) -> bool {
        let changed = self.lyric_state.update_index(position_ms);
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Snapshot the bundle for the UI, anchored to the current estimate.
    pub fn snapshot(&self) -> Update {
        Update {
            lines: self.lyric_state.lines.clone(),
            index: self.lyric_state.index,
            title: self.player_state.track.title.clone(),
            artist: self.player_state.track.artist.clone(),
            album: self.player_state.track.album.clone(),
            playing: self.player_state.playing,
            position_ms: self.player_state.estimate_position(),
            duration_ms: self.player_state.track.length_ms.unwrap_or(0),
            err: self.player_state.err.clone(),
            selected: self.lyric_state.selected.as_ref().map(|s| s.raw.clone()),
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(track_id: &str) -> TrackMetadata {
        TrackMetadata {
            track_id: track_id.to_string(),
            title: format!("title {track_id}"),
            ..Default::default()
        }
    }

    fn fetched(text: &str) -> FetchedLyrics {
        FetchedLyrics {
            selected: SelectedMatch {
                id: 1,
                raw: json!({}),
            },
            lines: vec![LyricLine {
                offset_ms: 1_000,
                offset_text: "00:01.000".into(),
                text: text.into(),
            }],
        }
    }

    #[test]
    fn stale_fetch_results_are_discarded() {
        let mut bundle = StateBundle::new();
        let first = bundle.begin_track(&meta("/1"));
        let second = bundle.begin_track(&meta("/2"));

        assert!(!bundle.apply_fetch(first, Ok(fetched("old track"))));
        assert!(bundle.lyric_state.lines.is_empty());

        assert!(bundle.apply_fetch(second, Ok(fetched("current track"))));
        assert_eq!(bundle.lyric_state.lines[0].text, "current track");
    }

    #[test]
    fn fetch_errors_clear_lines_and_record_the_message() {
        let mut bundle = StateBundle::new();
        let generation = bundle.begin_track(&meta("/1"));
        assert!(bundle.apply_fetch(generation, Err(LyricsError::NotFound)));
        assert!(bundle.lyric_state.lines.is_empty());
        assert!(bundle.player_state.err.is_some());
    }

    #[test]
    fn index_updates_bump_the_version_only_on_change() {
        let mut bundle = StateBundle::new();
        let generation = bundle.begin_track(&meta("/1"));
        bundle.apply_fetch(generation, Ok(fetched("line")));

        let v = bundle.version;
        assert!(bundle.update_index(500)); // before the only line: clamped first
        assert_eq!(bundle.version, v + 1);
        assert!(!bundle.update_index(800)); // same index, no version bump
        assert_eq!(bundle.version, v + 1);
    }

    #[test]
    fn seeks_bump_the_version() {
        let mut bundle = StateBundle::new();
        bundle.begin_track(&meta("/1"));
        bundle.update_playback(true, 10_000);

        let v = bundle.version;
        bundle.update_playback(true, 90_000);
        assert_eq!(bundle.version, v + 1);
    }

    #[test]
    fn track_change_detection_uses_track_identity() {
        let mut bundle = StateBundle::new();
        bundle.begin_track(&meta("/1"));
        assert!(!bundle.has_track_changed(&meta("/1")));
        assert!(bundle.has_track_changed(&meta("/2")));
    }
}
