use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_AGE_OF_OBJECTS_BEFORE_DELETION: u64 = 10;
pub const DEFAULT_MAXIMUM_NUMBER_OF_FRAMES_PER_OBJECT: usize = 90;
pub const DEFAULT_MAXIMUM_DISTANCE_TO_CONSIDER: f32 = 100.0;

/// Tuning knobs of the position tracker.
///
/// All values are read at the start of every frame, so changes take
/// effect on the next call to `add`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Number of consecutive frames an object may go unseen before it is
    /// removed. `0` keeps objects forever.
    pub age_of_objects_before_deletion: u64,

    /// Upper bound on the history entries kept per object. The first and the
    /// latest observations always survive. `0` keeps the whole history.
    pub maximum_number_of_frames_per_object: usize,

    /// Largest center-to-center distance (in px) between an object's last
    /// rectangle and a new detection that still counts as a match.
    pub maximum_distance_to_consider: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            age_of_objects_before_deletion: DEFAULT_AGE_OF_OBJECTS_BEFORE_DELETION,
            maximum_number_of_frames_per_object: DEFAULT_MAXIMUM_NUMBER_OF_FRAMES_PER_OBJECT,
            maximum_distance_to_consider: DEFAULT_MAXIMUM_DISTANCE_TO_CONSIDER,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        validate_distance(self.maximum_distance_to_consider)?;
        validate_history_cap(self.maximum_number_of_frames_per_object)?;

        Ok(())
    }
}

pub(crate) fn validate_distance(distance: f32) -> Result<(), Error> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDistance(distance))
    }
}

// a bounded history has to fit both the first and the latest observation
pub(crate) fn validate_history_cap(cap: usize) -> Result<(), Error> {
    if cap == 1 {
        Err(Error::InvalidHistoryCap(cap))
    } else {
        Ok(())
    }
}
