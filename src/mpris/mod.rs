//! MPRIS module: re-exports and module declarations for submodules.

pub mod connection;
pub mod control;
pub mod metadata;
pub mod playback;

// Re-export main API for compatibility
pub use connection::{MprisError, discover_player_service};
pub use metadata::{TrackMetadata, get_metadata};
pub use playback::{get_playback_status, get_position_ms};
