// pool.rs: Central event loop for polling the player and fetching lyrics

use crate::lyrics::{FetchedLyrics, LyricsError, NeteaseClient, fetch_track_lyrics};
use crate::mpris::{self, TrackMetadata};
use crate::state::{StateBundle, Update};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, warn};

/// Transport commands forwarded from the UI key handler.
#[derive(Debug, Clone, Copy)]
pub enum PlayerCommand {
    PlayPause,
    Next,
    Previous,
}

type FetchOutcome = (u64, Result<FetchedLyrics, LyricsError>);

/// Poll the player, keep the state bundle current, and push versioned
/// updates to the UI channel.
///
/// Each detected track change discards lyric state, bumps the generation tag
/// and spawns one pipeline run; a result arriving for a superseded
/// generation is dropped. Position-only movement is not pushed — the UI
/// estimates between polls from the last snapshot.
pub async fn listen(
    update_tx: mpsc::Sender<Update>,
    mut command_rx: mpsc::Receiver<PlayerCommand>,
    mut shutdown_rx: mpsc::Receiver<()>,
    poll_interval: Duration,
    mut service: String,
) {
    let mut bundle = StateBundle::new();
    let backend = NeteaseClient::new();
    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchOutcome>(4);
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            Some(cmd) = command_rx.recv() => {
                handle_command(cmd, &service).await;
                // Re-poll right away so the UI reflects the command without
                // waiting out the rest of the interval.
                poll_player(&mut bundle, &service, &backend, &fetch_tx, &update_tx).await;
            }
            Some((generation, outcome)) = fetch_rx.recv() => {
                if let Err(e) = &outcome {
                    debug!(error = %e, "lyrics pipeline failed");
                }
                if bundle.apply_fetch(generation, outcome) {
                    bundle.update_index(bundle.player_state.estimate_position());
                    send_update(&bundle, &update_tx).await;
                } else {
                    debug!("discarded stale lyrics fetch");
                }
            }
            _ = interval.tick() => {
                if service.is_empty()
                    && let Ok(Some(found)) = mpris::discover_player_service().await
                {
                    debug!(service = %found, "player appeared");
                    service = found;
                }
                poll_player(&mut bundle, &service, &backend, &fetch_tx, &update_tx).await;
            }
        }
    }
}

async fn poll_player(
    bundle: &mut StateBundle,
    service: &str,
    backend: &NeteaseClient,
    fetch_tx: &mpsc::Sender<FetchOutcome>,
    update_tx: &mpsc::Sender<Update>,
) {
    let meta = match mpris::get_metadata(service).await {
        Ok(meta) => meta,
        Err(e) => {
            debug!(error = %e, "metadata query failed");
            TrackMetadata::default()
        }
    };
    let status = mpris::get_playback_status(service).await.unwrap_or_default();
    let position_ms = mpris::get_position_ms(service).await.unwrap_or(0);
    let playing = status == "Playing";

    let prev_version = bundle.version;
    if !meta.title.is_empty() && bundle.has_track_changed(&meta) {
        let generation = bundle.begin_track(&meta);
        spawn_fetch(backend.clone(), meta, generation, fetch_tx.clone());
    }
    bundle.update_playback(playing, position_ms);
    bundle.update_index(bundle.player_state.estimate_position());

    if bundle.version != prev_version {
        send_update(bundle, update_tx).await;
    }
}

fn spawn_fetch(
    backend: NeteaseClient,
    meta: TrackMetadata,
    generation: u64,
    fetch_tx: mpsc::Sender<FetchOutcome>,
) {
    tokio::spawn(async move {
        debug!(title = %meta.title, generation, "fetching lyrics");
        let outcome =
            fetch_track_lyrics(&backend, &meta.title, meta.length_ms.unwrap_or(0)).await;
        let _ = fetch_tx.send((generation, outcome)).await;
    });
}

async fn handle_command(cmd: PlayerCommand, service: &str) {
    let result = match cmd {
        PlayerCommand::PlayPause => mpris::control::play_pause(service).await,
        PlayerCommand::Next => mpris::control::next(service).await,
        PlayerCommand::Previous => mpris::control::previous(service).await,
    };
    if let Err(e) = result {
        warn!(error = %e, ?cmd, "player command failed");
    }
}

async fn send_update(bundle: &StateBundle, update_tx: &mpsc::Sender<Update>) {
    let _ = update_tx.send(bundle.snapshot()).await;
}
