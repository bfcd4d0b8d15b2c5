//! Transport control (play/pause, next, previous) for MPRIS players.

use crate::mpris::connection::{MprisError, get_dbus_conn};
use zbus::Proxy;

async fn call_player_method(service: &str, method: &str) -> Result<(), MprisError> {
    if service.is_empty() {
        return Ok(());
    }
    let conn = get_dbus_conn().await?;
    let player_proxy = Proxy::new(
        &conn,
        service,
        "/org/mpris/MediaPlayer2",
        "org.mpris.MediaPlayer2.Player",
    )
    .await?;
    let _ = player_proxy.call_method(method, &()).await?;
    Ok(())
}

/// Toggle play/pause on the player.
pub async fn play_pause(service: &str) -> Result<(), MprisError> {
    call_player_method(service, "PlayPause").await
}

/// Skip to the next track.
pub async fn next(service: &str) -> Result<(), MprisError> {
    call_player_method(service, "Next").await
}

/// Skip to the previous track.
pub async fn previous(service: &str) -> Result<(), MprisError> {
    call_player_method(service, "Previous").await
}
