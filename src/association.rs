//! Frame-to-frame association of detections with live tracks.
//!
//! Matching is greedy: every plausible (detection, track) pair is ranked by
//! center distance and consumed nearest-first. Under contention this can
//! differ from a minimum-cost assignment.

use std::collections::{BTreeMap, BTreeSet};

use crate::track::Track;
use crate::{ClassId, Detection, ObjectId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub track_id: ObjectId,
    pub detection: usize,
    pub distance: f32,
}

/// Outcome of associating one frame's detections with the live tracks.
#[derive(Debug, Default)]
pub struct DetectionsMapping {
    /// `(track id, detection index, distance)`, in the order they were accepted.
    pub matched: Vec<(ObjectId, usize, f32)>,
    /// Detection indexes without a track, ascending.
    pub missed: Vec<usize>,
    /// Class evidence of every detection, indexed like the input.
    pub evidence: Vec<BTreeSet<ClassId>>,
}

/// Every (detection, track) pair that is close enough and shares a class,
/// sorted nearest first. Ties go to the lowest track id, then to the
/// earliest detection.
pub fn candidates(
    tracks: &BTreeMap<ObjectId, Track>,
    detections: &[Detection],
    evidence: &[BTreeSet<ClassId>],
    max_distance: f32,
) -> Vec<Candidate> {
    let mut pairs = Vec::new();

    for (j, det) in detections.iter().enumerate() {
        for (&track_id, track) in tracks {
            if !track.is_matching_class(&evidence[j]) {
                continue;
            }

            let distance = det.bbox.center_distance(&track.rect());

            // NaN never passes this check
            if distance <= max_distance {
                pairs.push(Candidate {
                    track_id,
                    detection: j,
                    distance,
                });
            }
        }
    }

    pairs.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.track_id.cmp(&b.track_id))
            .then(a.detection.cmp(&b.detection))
    });

    pairs
}

pub fn map_detections(
    tracks: &BTreeMap<ObjectId, Track>,
    detections: &[Detection],
    max_distance: f32,
) -> DetectionsMapping {
    let evidence: Vec<_> = detections.iter().map(Detection::evidence).collect();
    let pairs = candidates(tracks, detections, &evidence, max_distance);

    let mut used_detections = vec![false; detections.len()];
    let mut used_tracks = BTreeSet::new();
    let mut matched = Vec::new();

    for c in pairs {
        if used_detections[c.detection] || used_tracks.contains(&c.track_id) {
            continue;
        }

        used_detections[c.detection] = true;
        used_tracks.insert(c.track_id);

        log::trace!(
            "detection {} matched oid={} (dist={:.1}px)",
            c.detection,
            c.track_id,
            c.distance
        );

        matched.push((c.track_id, c.detection, c.distance));
    }

    let missed = used_detections
        .iter()
        .enumerate()
        .filter(|(_, &used)| !used)
        .map(|(j, _)| j)
        .collect();

    DetectionsMapping {
        matched,
        missed,
        evidence,
    }
}
