use serde::Deserialize;
use serde_json::Value;

use crate::lyrics::pipeline::LyricsBackend;
use crate::lyrics::types::{LyricsError, SearchCandidate, http_client};

#[derive(Deserialize)]
struct SearchResp {
    result: Option<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    // Kept as raw values: each song is carried through opaquely as the
    // candidate payload for diagnostic display.
    songs: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct LyricResp {
    lrc: Option<LyricBody>,
}

#[derive(Deserialize)]
struct LyricBody {
    lyric: Option<String>,
}

/// Netease Cloud Music client.
///
/// The search endpoint rejects requests without the music.163.com referer.
#[derive(Debug, Clone)]
pub struct NeteaseClient {
    base_url: String,
}

impl NeteaseClient {
    const DEFAULT_BASE_URL: &'static str = "http://music.163.com/api";

    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for NeteaseClient {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate_from_song(song: &Value) -> Option<SearchCandidate> {
    let id = song.get("id").and_then(Value::as_u64)?;
    let duration_ms = song
        .get("duration")
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.round() as u64)))
        .unwrap_or(0);
    Some(SearchCandidate {
        id,
        duration_ms,
        raw: song.clone(),
    })
}

impl LyricsBackend for NeteaseClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>, LyricsError> {
        let url = format!(
            "{}/search/get/?s={}&type=1&offset=0&limit=20",
            self.base_url,
            urlencoding::encode(query)
        );
        let resp = http_client()
            .post(&url)
            .header("Referer", "http://music.163.com/search/")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(LyricsError::Api(format!(
                "netease search: unexpected status {}",
                resp.status()
            )));
        }
        let api: SearchResp = resp.json().await?;
        let songs = api.result.and_then(|r| r.songs).unwrap_or_default();
        Ok(songs.iter().filter_map(candidate_from_song).collect())
    }

    async fn lyric_body(&self, id: u64) -> Result<Option<String>, LyricsError> {
        let url = format!(
            "{}/song/lyric?os=pc&id={}&lv=-1&kv=-1&tv=-1",
            self.base_url, id
        );
        let resp = http_client().get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(LyricsError::Api(format!(
                "netease lyric: unexpected status {}",
                resp.status()
            )));
        }
        let api: LyricResp = resp.json().await?;
        Ok(api.lrc.and_then(|l| l.lyric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn song_entries_map_to_candidates() {
        let song = json!({ "id": 42, "duration": 200_050, "name": "Song" });
        let c = candidate_from_song(&song).unwrap();
        assert_eq!(c.id, 42);
        assert_eq!(c.duration_ms, 200_050);
        assert_eq!(c.raw["name"], "Song");
    }

    #[test]
    fn songs_without_an_id_are_skipped() {
        assert!(candidate_from_song(&json!({ "duration": 1000 })).is_none());
    }

    #[test]
    fn missing_duration_defaults_to_zero() {
        let c = candidate_from_song(&json!({ "id": 1 })).unwrap();
        assert_eq!(c.duration_ms, 0);
    }

    #[test]
    fn lyric_envelope_shapes() {
        let with_body: LyricResp =
            serde_json::from_value(json!({ "lrc": { "lyric": "[00:01.000]hi" } })).unwrap();
        assert_eq!(
            with_body.lrc.and_then(|l| l.lyric).as_deref(),
            Some("[00:01.000]hi")
        );

        let without_body: LyricResp =
            serde_json::from_value(json!({ "lrc": { "version": 1 } })).unwrap();
        assert!(without_body.lrc.and_then(|l| l.lyric).is_none());

        let no_lrc: LyricResp = serde_json::from_value(json!({})).unwrap();
        assert!(no_lrc.lrc.is_none());
    }
}
