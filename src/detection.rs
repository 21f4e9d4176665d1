use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::bbox::{BBox, Ltwh};
use crate::{ClassId, ObjectId};

/// Probability a class must reach before it counts as evidence for a track.
pub const EVIDENCE_THRESHOLD: f32 = 0.2;

/// One observation produced by a detector for a single frame.
///
/// `bbox` is left-top-width-height in pixels. `object_id` stays `0` until
/// the detection has passed through a tracker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BBox<Ltwh>,
    #[serde(rename = "c")]
    pub class: ClassId,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(default)]
    pub probabilities: BTreeMap<ClassId, f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub object_id: ObjectId,
}

impl Detection {
    /// Detection with a single class, the probability map holds just that class.
    pub fn new(bbox: BBox<Ltwh>, class: ClassId, confidence: f32) -> Self {
        let mut probabilities = BTreeMap::new();
        probabilities.insert(class, confidence);

        Self {
            bbox,
            class,
            confidence,
            probabilities,
            name: None,
            object_id: 0,
        }
    }

    pub fn with_probabilities(
        bbox: BBox<Ltwh>,
        probabilities: impl IntoIterator<Item = (ClassId, f32)>,
    ) -> Self {
        let probabilities: BTreeMap<_, _> = probabilities.into_iter().collect();
        let (class, confidence) = probabilities
            .iter()
            .fold(None, |best: Option<(ClassId, f32)>, (&c, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((c, p)),
            })
            .unwrap_or((0, 0.0));

        Self {
            bbox,
            class,
            confidence,
            probabilities,
            name: None,
            object_id: 0,
        }
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Classes this detection plausibly belongs to, may be empty.
    ///
    /// An empty probability map stands for `{class: confidence}`.
    pub fn evidence(&self) -> BTreeSet<ClassId> {
        if self.probabilities.is_empty() {
            return std::iter::once((self.class, self.confidence))
                .filter(|&(_, p)| p >= EVIDENCE_THRESHOLD)
                .map(|(c, _)| c)
                .collect();
        }

        self.probabilities
            .iter()
            .filter(|(_, &p)| p >= EVIDENCE_THRESHOLD)
            .map(|(&c, _)| c)
            .collect()
    }

    #[inline]
    pub fn is_tagged(&self) -> bool {
        self.object_id != 0
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "\"{}\" ", name)?;
        }

        write!(
            f,
            "#{} prob={} {} oid={} entries={}",
            self.class,
            self.confidence,
            self.bbox,
            self.object_id,
            self.probabilities.len()
        )?;

        if self.probabilities.len() > 1 {
            write!(f, " [")?;
            for (c, p) in &self.probabilities {
                write!(f, " {}={}", c, p)?;
            }
            write!(f, " ]")?;
        }

        Ok(())
    }
}
