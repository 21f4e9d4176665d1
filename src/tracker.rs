use std::collections::BTreeMap;
use std::fmt;

use crate::association::{self, DetectionsMapping};
use crate::config::{self, TrackerConfig};
use crate::error::Error;
use crate::prune;
use crate::track::Track;
use crate::{Detection, FrameId, ObjectId};

/// Simple tracker that follows objects by the position of their bounding box.
///
/// It assumes objects move only a little between consecutive frames and do
/// not randomly appear and disappear. Objects that leave the view and come
/// back later get a new id.
///
/// ```
/// use ptrack::{bbox::BBox, Detection, PositionTracker};
///
/// let mut tracker = PositionTracker::new();
///
/// let mut frame = vec![Detection::new(BBox::ltwh(10.0, 10.0, 5.0, 5.0), 0, 0.9)];
/// tracker.add(&mut frame);
/// assert_eq!(frame[0].object_id, 1);
///
/// let mut frame = vec![Detection::new(BBox::ltwh(12.0, 10.0, 5.0, 5.0), 0, 0.9)];
/// tracker.add(&mut frame);
/// assert_eq!(frame[0].object_id, 1);
///
/// let track = tracker.get(1).unwrap();
/// assert_eq!(track.history().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    tracks: BTreeMap<ObjectId, Track>,
    most_recent_frame_id: FrameId,
    most_recent_object_id: ObjectId,
    config: TrackerConfig,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Tags every detection of the next frame with an object id.
    ///
    /// Must be called once for every frame, including frames without
    /// detections, so that unseen objects age out.
    pub fn add(&mut self, detections: &mut [Detection]) {
        self.most_recent_frame_id += 1;
        let frame_id = self.most_recent_frame_id;

        if !detections.is_empty() {
            let mapping = association::map_detections(
                &self.tracks,
                detections,
                self.config.maximum_distance_to_consider,
            );

            self.apply(frame_id, detections, mapping);
        }

        self.prune();
    }

    /// Same as [`PositionTracker::add`], but takes the frame by value and
    /// hands back the tagged detections.
    pub fn add_frame(&mut self, mut detections: Vec<Detection>) -> Vec<Detection> {
        self.add(&mut detections);
        detections
    }

    fn apply(&mut self, frame_id: FrameId, dets: &mut [Detection], mapping: DetectionsMapping) {
        let DetectionsMapping {
            matched,
            missed,
            mut evidence,
        } = mapping;

        for (oid, j, _) in matched {
            if let Some(track) = self.tracks.get_mut(&oid) {
                track.observe(frame_id, dets[j].bbox, std::mem::take(&mut evidence[j]));
                dets[j].object_id = oid;
            }
        }

        for j in missed {
            self.most_recent_object_id += 1;
            let oid = self.most_recent_object_id;

            log::debug!("frame {}: new oid={} at {}", frame_id, oid, dets[j].bbox);

            self.tracks.insert(
                oid,
                Track::new(oid, frame_id, dets[j].bbox, std::mem::take(&mut evidence[j])),
            );
            dets[j].object_id = oid;
        }
    }

    fn prune(&mut self) {
        let evicted = prune::remove_old_tracks(
            &mut self.tracks,
            self.most_recent_frame_id,
            self.config.age_of_objects_before_deletion,
        );

        if !evicted.is_empty() {
            log::debug!(
                "frame {}: evicted {:?}",
                self.most_recent_frame_id,
                evicted
            );
        }

        let cap = self.config.maximum_number_of_frames_per_object;
        for track in self.tracks.values_mut() {
            let dropped = prune::cap_history(&mut track.history, cap);
            if dropped > 0 {
                log::trace!("oid={}: thinned {} history entries", track.id, dropped);
            }
        }
    }

    /// Looks up a tracked object. Fails once the object has been evicted.
    pub fn get(&self, oid: ObjectId) -> Result<&Track, Error> {
        self.tracks.get(&oid).ok_or(Error::NotFound(oid))
    }

    /// Removes every track and resets both counters and the configuration.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Live tracks in ascending id order.
    #[inline]
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    /// Id of the last frame passed to `add`, `0` before the first one.
    #[inline]
    pub fn most_recent_frame_id(&self) -> FrameId {
        self.most_recent_frame_id
    }

    /// Last object id handed out, `0` before the first one. Ids are never reused.
    #[inline]
    pub fn most_recent_object_id(&self) -> ObjectId {
        self.most_recent_object_id
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TrackerConfig) -> Result<(), Error> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn age_of_objects_before_deletion(&self) -> u64 {
        self.config.age_of_objects_before_deletion
    }

    pub fn set_age_of_objects_before_deletion(&mut self, age: u64) {
        self.config.age_of_objects_before_deletion = age;
    }

    #[inline]
    pub fn maximum_number_of_frames_per_object(&self) -> usize {
        self.config.maximum_number_of_frames_per_object
    }

    pub fn set_maximum_number_of_frames_per_object(&mut self, cap: usize) -> Result<(), Error> {
        config::validate_history_cap(cap)?;
        self.config.maximum_number_of_frames_per_object = cap;
        Ok(())
    }

    #[inline]
    pub fn maximum_distance_to_consider(&self) -> f32 {
        self.config.maximum_distance_to_consider
    }

    pub fn set_maximum_distance_to_consider(&mut self, distance: f32) -> Result<(), Error> {
        config::validate_distance(distance)?;
        self.config.maximum_distance_to_consider = distance;
        Ok(())
    }
}

impl crate::Tracking for PositionTracker {
    #[inline]
    fn update(&mut self, detections: &mut [Detection]) {
        self.add(detections);
    }

    #[inline]
    fn track(&self, oid: ObjectId) -> Result<&Track, Error> {
        self.get(oid)
    }

    fn tracks(&self) -> Vec<&Track> {
        self.tracks.values().collect()
    }
}

impl fmt::Display for PositionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position Tracker:")?;
        writeln!(f, "-> most recent frame .... {}", self.most_recent_frame_id)?;
        writeln!(f, "-> most recent object ... {}", self.most_recent_object_id)?;
        write!(f, "-> tracked objects ...... {}", self.tracks.len())?;

        for track in self.tracks.values() {
            write!(f, "\n-> {}", track)?;
        }

        Ok(())
    }
}
