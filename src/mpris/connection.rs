//! D-Bus connection management and player discovery for MPRIS.

use std::sync::Arc;
use tokio::sync::OnceCell;

/// Errors that can occur during MPRIS operations
#[derive(thiserror::Error, Debug)]
pub enum MprisError {
    #[error("D-Bus error: {0}")]
    ZBus(#[from] zbus::Error),
    #[error("Failed to establish D-Bus connection")]
    NoConnection,
}

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Global D-Bus connection singleton
static DBUS_CONNECTION: OnceCell<Arc<zbus::Connection>> = OnceCell::const_new();

/// Get or create a shared D-Bus session connection
pub async fn get_dbus_conn() -> Result<Arc<zbus::Connection>, MprisError> {
    DBUS_CONNECTION
        .get_or_try_init(|| async {
            let conn = zbus::Connection::session()
                .await
                .map_err(|_| MprisError::NoConnection)?;
            Ok(Arc::new(conn))
        })
        .await
        .cloned()
}

/// Find the first MPRIS player service on the session bus.
///
/// Returns `None` when no player is running; callers keep polling and the UI
/// shows a waiting screen until one appears.
pub async fn discover_player_service() -> Result<Option<String>, MprisError> {
    let conn = get_dbus_conn().await?;
    let proxy = zbus::fdo::DBusProxy::new(&conn).await.map_err(zbus::Error::from)?;
    let names = proxy.list_names().await.map_err(zbus::Error::from)?;
    Ok(names
        .into_iter()
        .map(|name| name.to_string())
        .find(|name| name.starts_with(MPRIS_PREFIX)))
}
