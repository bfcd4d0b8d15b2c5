//! Track metadata querying for MPRIS.

use crate::mpris::connection::{MprisError, get_dbus_conn};
use std::collections::HashMap;
use zbus::Proxy;
use zvariant::OwnedValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    /// MPRIS track object path; the identity used for change detection.
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Track length in milliseconds, when the player reports one.
    pub length_ms: Option<u64>,
}

impl TrackMetadata {
    /// Whether two snapshots describe the same track.
    ///
    /// The track id is authoritative when both sides have one; some players
    /// omit it, in which case the (title, artist, album) triple decides.
    pub fn is_same_track(&self, other: &TrackMetadata) -> bool {
        if !self.track_id.is_empty() && !other.track_id.is_empty() {
            return self.track_id == other.track_id;
        }
        self.title == other.title && self.artist == other.artist && self.album == other.album
    }
}

/// Extract metadata fields from an MPRIS a{sv} property map.
///
/// The MPRIS spec says artist/album are arrays of strings, but some players
/// send a single string; both shapes are accepted.
pub fn extract_metadata(map: &HashMap<String, OwnedValue>) -> TrackMetadata {
    let string_field = |key: &str| -> Option<String> {
        let val = map.get(key)?;
        if let Ok(s) = TryInto::<String>::try_into(val.clone()) {
            return Some(s);
        }
        TryInto::<Vec<String>>::try_into(val.clone())
            .ok()
            .and_then(|v| v.into_iter().next())
    };

    let length_ms = map.get("mpris:length").and_then(|v| {
        if let Ok(i) = TryInto::<i64>::try_into(v.clone()) {
            return u64::try_from(i).ok();
        }
        TryInto::<u64>::try_into(v.clone()).ok()
    });

    // mpris:trackid is an object path per spec, but some players send a
    // plain string; accept both.
    let track_id = map
        .get("mpris:trackid")
        .and_then(|v| {
            if let Ok(p) = TryInto::<zvariant::OwnedObjectPath>::try_into(v.clone()) {
                return Some(p.to_string());
            }
            TryInto::<String>::try_into(v.clone()).ok()
        })
        .unwrap_or_default();

    TrackMetadata {
        track_id,
        title: string_field("xesam:title").unwrap_or_default(),
        artist: string_field("xesam:artist").unwrap_or_default(),
        album: string_field("xesam:album").unwrap_or_default(),
        // mpris:length is in microseconds
        length_ms: length_ms.map(|us| us / 1_000),
    }
}

/// Query metadata for a specific MPRIS player service.
pub async fn get_metadata(service: &str) -> Result<TrackMetadata, MprisError> {
    if service.is_empty() {
        return Ok(TrackMetadata::default());
    }
    let conn = get_dbus_conn().await?;
    // Use targeted Properties.Get to avoid triggering GetAll on some players
    let props_proxy = Proxy::new(
        &conn,
        service,
        "/org/mpris/MediaPlayer2",
        "org.freedesktop.DBus.Properties",
    )
    .await?;
    if let Ok(reply) = props_proxy
        .call_method("Get", &("org.mpris.MediaPlayer2.Player", "Metadata"))
        .await
        && let Ok(val) = reply.body().deserialize::<OwnedValue>()
        && let Ok(map) = TryInto::<HashMap<String, OwnedValue>>::try_into(val)
    {
        return Ok(extract_metadata(&map));
    }
    // Fallback: no metadata or deserialization failed
    Ok(TrackMetadata::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(track_id: &str, title: &str) -> TrackMetadata {
        TrackMetadata {
            track_id: track_id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn track_id_decides_identity_when_present() {
        assert!(meta("/track/1", "A").is_same_track(&meta("/track/1", "B")));
        assert!(!meta("/track/1", "A").is_same_track(&meta("/track/2", "A")));
    }

    #[test]
    fn falls_back_to_the_metadata_triple() {
        assert!(meta("", "A").is_same_track(&meta("", "A")));
        assert!(!meta("", "A").is_same_track(&meta("", "B")));
    }
}
