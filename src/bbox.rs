use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

pub trait BBoxFormat: fmt::Debug + Copy {}

/// Left-top-width-height format, contains left top corner and width-height
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct Ltwh;
impl BBoxFormat for Ltwh {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

/// Serialized as a plain `[f32; 4]`, the format lives only in the type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(transparent, bound = "")]
pub struct BBox<F: BBoxFormat>([f32; 4], #[serde(skip)] PhantomData<F>);

impl<F: BBoxFormat> From<BBox<F>> for [f32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl BBox<Ltwh> {
    #[inline]
    pub fn ltwh(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn as_xywh(&self) -> BBox<Xywh> {
        self.into()
    }

    #[inline]
    pub fn center(&self) -> na::Point2<f32> {
        self.as_xywh().center()
    }

    /// Euclidean distance between the centers of two boxes.
    #[inline]
    pub fn center_distance(&self, other: &BBox<Ltwh>) -> f32 {
        na::distance(&self.center(), &other.center())
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(x1: f32, x2: f32, x3: f32, x4: f32) -> Self {
        BBox([x1, x2, x3, x4], PhantomData)
    }

    #[inline(always)]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn center(&self) -> na::Point2<f32> {
        na::Point2::new(self.cx(), self.cy())
    }
}

impl<'a> From<&'a BBox<Ltwh>> for BBox<Xywh> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0] + v.0[2] / 2.0, v.0[1] + v.0[3] / 2.0, v.0[2], v.0[3]],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        Self(
            [v.0[0] - v.0[2] / 2.0, v.0[1] - v.0[3] / 2.0, v.0[2], v.0[3]],
            PhantomData,
        )
    }
}

impl fmt::Display for BBox<Ltwh> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} w={} h={}",
            self.left(),
            self.top(),
            self.width(),
            self.height()
        )
    }
}
