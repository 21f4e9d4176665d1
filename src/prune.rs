//! Bounded-memory policies applied after every frame.

use std::collections::BTreeMap;

use crate::bbox::{BBox, Ltwh};
use crate::track::Track;
use crate::{FrameId, ObjectId};

/// Drops every track that has not been seen for more than `age` frames and
/// returns the ids that were removed. `age == 0` keeps everything.
pub fn remove_old_tracks(
    tracks: &mut BTreeMap<ObjectId, Track>,
    most_recent_frame_id: FrameId,
    age: u64,
) -> Vec<ObjectId> {
    if age == 0 || most_recent_frame_id <= age {
        return Vec::new();
    }

    let mut evicted = Vec::new();

    tracks.retain(|&id, track| {
        let keep = most_recent_frame_id - track.last_seen_frame_id() <= age;
        if !keep {
            evicted.push(id);
        }
        keep
    });

    evicted
}

/// Thins the middle of a history so it holds at most `cap` entries.
///
/// The first observation is kept so the origin of the object is known, as is
/// a trailing window of `cap / 2` frames before the latest observation.
/// Returns how many entries were dropped. `cap == 0` means unbounded, and
/// caps below 2 still keep both the first and the latest observation.
pub fn cap_history(history: &mut BTreeMap<FrameId, BBox<Ltwh>>, cap: usize) -> usize {
    let before = history.len();
    if cap == 0 || before <= cap {
        return 0;
    }

    let (first, last) = match (history.keys().next(), history.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return 0,
    };

    let window_start = last.saturating_sub(cap as u64 / 2);
    history.retain(|&fid, _| fid == first || fid >= window_start);

    // tiny caps cannot hold the whole window, give up the oldest interior entries
    while history.len() > cap.max(2) {
        let second = history.keys().nth(1).copied();
        match second {
            Some(fid) if fid != last => {
                history.remove(&fid);
            }
            _ => break,
        }
    }

    before - history.len()
}
