use crate::lyrics::parse::parse_timed_lines;
use crate::lyrics::select::select_candidate;
use crate::lyrics::types::{FetchedLyrics, LyricsError, SearchCandidate};

/// The provider collaborator seam.
///
/// Transport and envelope shape are the implementor's concern; the pipeline
/// only sees candidates and lyric bodies. Transport failures surface as
/// `LyricsError` values and are propagated unwrapped.
pub trait LyricsBackend {
    /// Search the provider for candidate tracks matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, LyricsError>;

    /// Fetch the raw timestamped lyric body for a candidate id.
    /// `None` means the provider has no lyric body for this id.
    async fn lyric_body(&self, id: u64) -> Result<Option<String>, LyricsError>;
}

/// Run one lookup for the given track title and duration.
///
/// search → duration-ladder selection → body fetch → block parse. A single
/// failed step fails the whole run; there are no retries and no memoization —
/// lyrics are fetched fresh per track, and a result for a superseded track
/// must be discarded by the caller (see the generation tag in `StateBundle`).
pub async fn fetch_track_lyrics<B: LyricsBackend>(
    backend: &B,
    title: &str,
    duration_ms: u64,
) -> Result<FetchedLyrics, LyricsError> {
    let candidates = backend.search(title).await?;
    let selected = select_candidate(duration_ms, &candidates).ok_or(LyricsError::NotFound)?;
    let body = backend
        .lyric_body(selected.id)
        .await?
        .ok_or(LyricsError::Unavailable)?;
    let lines = parse_timed_lines(&body);
    Ok(FetchedLyrics { selected, lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Default)]
    struct StubBackend {
        candidates: Vec<SearchCandidate>,
        bodies: HashMap<u64, Option<String>>,
        search_fails: bool,
    }

    impl LyricsBackend for StubBackend {
        async fn search(&self, _query: &str) -> Result<Vec<SearchCandidate>, LyricsError> {
            if self.search_fails {
                return Err(LyricsError::Api("search status 500".into()));
            }
            Ok(self.candidates.clone())
        }

        async fn lyric_body(&self, id: u64) -> Result<Option<String>, LyricsError> {
            Ok(self.bodies.get(&id).cloned().unwrap_or(None))
        }
    }

    fn candidate(id: u64, duration_ms: u64) -> SearchCandidate {
        SearchCandidate {
            id,
            duration_ms,
            raw: json!({ "id": id }),
        }
    }

    #[tokio::test]
    async fn fetches_and_parses_the_best_match() {
        let mut backend = StubBackend::default();
        backend.candidates = vec![candidate(1, 199_000), candidate(2, 200_050)];
        backend.bodies.insert(
            2,
            Some("[00:10.500]Hello\nmeta\n[00:20.000]World".to_string()),
        );

        let fetched = fetch_track_lyrics(&backend, "song", 200_000).await.unwrap();
        assert_eq!(fetched.selected.id, 2);
        assert_eq!(fetched.lines.len(), 2);
        assert_eq!(fetched.lines[0].text, "Hello");
    }

    #[tokio::test]
    async fn empty_search_is_not_found() {
        let backend = StubBackend::default();
        let err = fetch_track_lyrics(&backend, "song", 200_000)
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::NotFound));
    }

    #[tokio::test]
    async fn missing_body_is_unavailable() {
        let mut backend = StubBackend::default();
        backend.candidates = vec![candidate(1, 200_000)];
        let err = fetch_track_lyrics(&backend, "song", 200_000)
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::Unavailable));
    }

    #[tokio::test]
    async fn transport_errors_pass_through_unchanged() {
        let backend = StubBackend {
            search_fails: true,
            ..Default::default()
        };
        let err = fetch_track_lyrics(&backend, "song", 200_000)
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::Api(_)));
    }

    #[tokio::test]
    async fn empty_body_parses_to_no_lines() {
        let mut backend = StubBackend::default();
        backend.candidates = vec![candidate(1, 200_000)];
        backend.bodies.insert(1, Some(String::new()));
        let fetched = fetch_track_lyrics(&backend, "song", 200_000).await.unwrap();
        assert!(fetched.lines.is_empty());
    }
}
