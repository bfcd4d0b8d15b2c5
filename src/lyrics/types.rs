use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

// Shared HTTP client with reasonable defaults for timeouts
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("lyricterm/0.1")
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client")
});

/// A single timestamped lyric line.
///
/// `offset_ms` is the absolute time from track start at which this line
/// becomes active. `offset_text` is the raw timestamp text as it appeared in
/// the source blob (without brackets), kept so the raw notation can be shown
/// in diagnostics. Sequences produced by the block parser preserve source
/// order; offsets are not guaranteed monotonic, so consumers must not
/// binary-search them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricLine {
    pub offset_ms: u64,
    pub offset_text: String,
    pub text: String,
}

/// One result from the provider's search endpoint.
///
/// `raw` is the opaque provider payload for this candidate, carried through
/// only for diagnostic display.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    pub id: u64,
    pub duration_ms: u64,
    pub raw: Value,
}

/// The candidate chosen by the duration ladder for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMatch {
    pub id: u64,
    pub raw: Value,
}

/// Successful pipeline output: the parsed lines plus the match they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedLyrics {
    pub selected: SelectedMatch,
    pub lines: Vec<LyricLine>,
}

#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("no search results for this track")]
    NotFound,
    #[error("provider has no lyric body for this track")]
    Unavailable,
}

// Re-export HTTP client for providers within the lyrics module
pub(crate) fn http_client() -> &'static Client {
    &HTTP_CLIENT
}
