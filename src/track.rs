use nalgebra as na;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::bbox::{BBox, Ltwh};
use crate::{ClassId, FrameId, ObjectId};

/// Everything the tracker remembers about one object.
///
/// A track always holds at least one observation: it is born with the
/// rectangle of the detection that spawned it and is dropped by the store
/// before it could ever become empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub(crate) id: ObjectId,
    pub(crate) history: BTreeMap<FrameId, BBox<Ltwh>>,
    pub(crate) classes: BTreeSet<ClassId>,
}

impl Track {
    pub(crate) fn new(
        id: ObjectId,
        frame_id: FrameId,
        bbox: BBox<Ltwh>,
        classes: BTreeSet<ClassId>,
    ) -> Self {
        let mut history = BTreeMap::new();
        history.insert(frame_id, bbox);

        Self {
            id,
            history,
            classes,
        }
    }

    pub(crate) fn observe(
        &mut self,
        frame_id: FrameId,
        bbox: BBox<Ltwh>,
        classes: BTreeSet<ClassId>,
    ) {
        self.history.insert(frame_id, bbox);
        self.classes.extend(classes);
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Frame id → rectangle for every frame the object was seen on and
    /// that survived history thinning.
    #[inline]
    pub fn history(&self) -> &BTreeMap<FrameId, BBox<Ltwh>> {
        &self.history
    }

    #[inline]
    pub fn classes(&self) -> &BTreeSet<ClassId> {
        &self.classes
    }

    #[inline]
    pub fn first_seen_frame_id(&self) -> FrameId {
        self.history.keys().next().copied().unwrap_or(0)
    }

    #[inline]
    pub fn last_seen_frame_id(&self) -> FrameId {
        self.history.keys().next_back().copied().unwrap_or(0)
    }

    /// Rectangle from the most recent observation.
    #[inline]
    pub fn rect(&self) -> BBox<Ltwh> {
        self.history
            .values()
            .next_back()
            .copied()
            .unwrap_or_else(|| BBox::ltwh(0.0, 0.0, 0.0, 0.0))
    }

    #[inline]
    pub fn center(&self) -> na::Point2<f32> {
        self.rect().center()
    }

    /// Width and height of the most recent rectangle.
    #[inline]
    pub fn size(&self) -> (f32, f32) {
        let rect = self.rect();
        (rect.width(), rect.height())
    }

    /// Frames between the first and last observation that have no entry,
    /// either because the object was not detected or the entry was thinned out.
    pub fn missing_frames(&self) -> u64 {
        if self.history.is_empty() {
            return 0;
        }

        let span = self.last_seen_frame_id() - self.first_seen_frame_id() + 1;
        span.saturating_sub(self.history.len() as u64)
    }

    #[inline]
    pub fn is_matching_class(&self, classes: &BTreeSet<ClassId>) -> bool {
        !self.classes.is_disjoint(classes)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let center = self.center();
        let (w, h) = self.size();

        write!(
            f,
            "oid={} frames={} first={} last={} missing={} center=[{}, {}] size=[{} x {}]",
            self.id,
            self.history.len(),
            self.first_seen_frame_id(),
            self.last_seen_frame_id(),
            self.missing_frames(),
            center.x,
            center.y,
            w,
            h
        )
    }
}
