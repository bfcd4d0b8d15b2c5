//! Playback status and position querying for MPRIS.

use crate::mpris::connection::{MprisError, get_dbus_conn};
use zbus::Proxy;
use zvariant::OwnedValue;

fn parse_position_micros(val: &OwnedValue) -> Option<u64> {
    // Try direct integer types
    if let Ok(i) = TryInto::<i64>::try_into(val.clone()) {
        return u64::try_from(i).ok();
    }
    if let Ok(u) = TryInto::<u64>::try_into(val.clone()) {
        return Some(u);
    }

    // Some players wrap the value in a single-element tuple
    if let Ok((i,)) = TryInto::<(i64,)>::try_into(val.clone()) {
        return u64::try_from(i).ok();
    }
    if let Ok((u,)) = TryInto::<(u64,)>::try_into(val.clone()) {
        return Some(u);
    }

    None
}

/// Query the playback position for a specific MPRIS player service, in
/// milliseconds. Missing or unreadable positions read as 0.
pub async fn get_position_ms(service: &str) -> Result<u64, MprisError> {
    if service.is_empty() {
        return Ok(0);
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
        .call_method("Get", &("org.mpris.MediaPlayer2.Player", "Position"))
        .await
        && let Ok(val) = reply.body().deserialize::<OwnedValue>()
        && let Some(micros) = parse_position_micros(&val)
    {
        return Ok(micros / 1_000);
    }
    Ok(0)
}

/// Query the playback status ("Playing"/"Paused"/"Stopped") for a service.
pub async fn get_playback_status(service: &str) -> Result<String, MprisError> {
    if service.is_empty() {
        return Ok("Stopped".to_string());
    }
    let conn = get_dbus_conn().await?;
    let props_proxy = Proxy::new(
        &conn,
        service,
        "/org/mpris/MediaPlayer2",
        "org.freedesktop.DBus.Properties",
    )
    .await?;
    if let Ok(reply) = props_proxy
        .call_method("Get", &("org.mpris.MediaPlayer2.Player", "PlaybackStatus"))
        .await
        && let Ok(val) = reply.body().deserialize::<OwnedValue>()
        && let Ok(status) = TryInto::<String>::try_into(val)
    {
        return Ok(status);
    }
    Ok("Stopped".to_string())
}
