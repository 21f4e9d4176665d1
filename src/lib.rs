//! Online position tracking of object detections.
//!
//! Detections arrive one frame at a time without identity. The
//! [`PositionTracker`] links each of them to the nearest live track of a
//! compatible class, spawns new tracks for the rest and forgets tracks
//! that stay unseen for too long.

pub mod association;
pub mod bbox;
pub mod config;
pub mod detection;
pub mod error;
pub mod prune;
pub mod tracker;

mod track;

pub use config::TrackerConfig;
pub use detection::Detection;
pub use error::Error;
pub use track::Track;
pub use tracker::PositionTracker;

/// Sequential id of a frame passed to a tracker, starting at 1.
pub type FrameId = u64;

/// Id of a tracked object. `0` means "no object".
pub type ObjectId = u64;

pub type ClassId = i32;

pub trait Tracking {
    fn update(&mut self, detections: &mut [Detection]);
    fn track(&self, oid: ObjectId) -> Result<&Track, Error>;
    fn tracks(&self) -> Vec<&Track>;
}
