use super::*;

use core::fmt;
use geometry::{normal_distance, unit_normal};

/// Mirrors shorter than this are rejected by [`Scene`]: their normal
/// would be meaningless.
pub const MIN_MIRROR_LENGTH: Float = 1.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(Float),
    #[error("coordinates must be finite")]
    NonFinite,
    #[error("the eye can't be at the ball's center")]
    EyeOnBall,
    #[error("mirror is too short ({length}), the minimum length is {min}")]
    MirrorTooShort { length: Float, min: Float },
    #[error("mirror width must be positive and finite, got {0}")]
    InvalidWidth(Float),
    #[error("scene bounds are empty")]
    EmptyBounds,
    #[error("no mirror with id {0}")]
    UnknownMirror(MirrorId),
    #[error("no mirror ids left in this scene")]
    IdsExhausted,
}

#[inline]
fn finite(v: &Vector) -> Result<(), SceneError> {
    v.iter()
        .all(|c| c.is_finite())
        .then_some(())
        .ok_or(SceneError::NonFinite)
}

/// The light source.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub center: Vector,
    pub radius: Float,
}

impl Ball {
    #[inline]
    #[must_use]
    pub fn new(center: impl Into<Vector>, radius: Float) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    fn validate(&self) -> Result<(), SceneError> {
        finite(&self.center)?;
        (self.radius.is_finite() && self.radius > 0.)
            .then_some(())
            .ok_or(SceneError::InvalidRadius(self.radius))
    }
}

/// The observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Eye {
    pub position: Vector,
}

impl Eye {
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Vector>) -> Self {
        Self {
            position: position.into(),
        }
    }
}

/// The rectangle images must fit in to be drawn, and thus, seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min: Vector,
    pub max: Vector,
}

impl Bounds {
    #[inline]
    #[must_use]
    pub fn new(min: impl Into<Vector>, max: impl Into<Vector>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Bounds spanning `[0, width] x [0, height]`
    #[inline]
    #[must_use]
    pub fn from_size(width: Float, height: Float) -> Self {
        Self::new([0., 0.], [width, height])
    }

    #[inline]
    #[must_use]
    pub fn contains_point(&self, p: &Vector) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Whether the whole disk of `radius` around `center` lies within `self`.
    #[inline]
    #[must_use]
    pub fn contains_circle(&self, center: &Vector, radius: Float) -> bool {
        center.x - radius >= self.min.x
            && center.x + radius <= self.max.x
            && center.y - radius >= self.min.y
            && center.y + radius <= self.max.y
    }

    /// Checks that `self` is finite, and not empty.
    pub fn validate(&self) -> Result<(), SceneError> {
        finite(&self.min)?;
        finite(&self.max)?;
        (self.min.x < self.max.x && self.min.y < self.max.y)
            .then_some(())
            .ok_or(SceneError::EmptyBounds)
    }
}

/// Identifies a mirror within a [`Scene`], for as long as it lives there.
///
/// Ids are handed out in increasing order and never reused, so they
/// double as display indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MirrorId(pub u32);

impl fmt::Display for MirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A finite, flat, two-sided mirror.
///
/// Only one side reflects. The normal always points towards it, and is
/// always the left-hand perpendicular of `p2 - p1`, swapping the endpoints
/// (see [`Self::flip`]) swaps the reflective side.
#[derive(Debug, Clone, PartialEq)]
pub struct Mirror {
    id: MirrorId,
    p1: Vector,
    p2: Vector,
    normal: UnitVector,
    /// Drawing thickness, the engine only looks at the centerline.
    width: Float,
}

impl Mirror {
    /// The returned mirror isn't part of any scene yet, its id
    /// is assigned by [`Scene::add_mirror`].
    #[inline]
    #[must_use]
    pub fn new(p1: impl Into<Vector>, p2: impl Into<Vector>, width: Float) -> Self {
        let (p1, p2) = (p1.into(), p2.into());
        Self {
            id: MirrorId(0),
            normal: unit_normal(&p1, &p2),
            p1,
            p2,
            width,
        }
    }

    fn validate(&self) -> Result<(), SceneError> {
        finite(&self.p1)?;
        finite(&self.p2)?;

        if !(self.width.is_finite() && self.width > 0.) {
            return Err(SceneError::InvalidWidth(self.width));
        }

        let length = self.length();
        (length >= MIN_MIRROR_LENGTH)
            .then_some(())
            .ok_or(SceneError::MirrorTooShort {
                length,
                min: MIN_MIRROR_LENGTH,
            })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> MirrorId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn p1(&self) -> &Vector {
        &self.p1
    }

    #[inline]
    #[must_use]
    pub const fn p2(&self) -> &Vector {
        &self.p2
    }

    /// Points towards the reflective side.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> &UnitVector {
        &self.normal
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> Float {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        (self.p2 - self.p1).norm()
    }

    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> Vector {
        (self.p1 + self.p2) * 0.5
    }

    /// Signed distance from `point` to this mirror's line, positive
    /// on the reflective side.
    #[inline]
    #[must_use]
    pub fn normal_distance(&self, point: &Vector) -> Float {
        normal_distance(point, &self.p1, &self.normal)
    }

    /// Mirror image of `point` across this mirror's (infinite) line.
    #[inline]
    #[must_use]
    pub fn reflect_point(&self, point: &Vector) -> Vector {
        geometry::reflect_point(point, &self.p1, &self.normal)
    }

    /// Intersection of the segment `[from, to]` with this mirror's centerline.
    #[inline]
    #[must_use]
    pub fn intersection(&self, from: &Vector, to: &Vector) -> Option<Vector> {
        geometry::segment_intersection(from, to, &self.p1, &self.p2)
    }

    /// The outline of the mirror, for drawing: the reflective face, then the back
    /// face, both parallel to the centerline, at `width / 2` on either side of it.
    #[must_use]
    pub fn faces(&self) -> [[Vector; 2]; 2] {
        let offset = self.normal.as_ref() * (self.width * 0.5);
        [
            [self.p1 + offset, self.p2 + offset],
            [self.p1 - offset, self.p2 - offset],
        ]
    }

    /// Moves the endpoints, recomputing the normal.
    #[inline]
    pub fn set_endpoints(&mut self, p1: impl Into<Vector>, p2: impl Into<Vector>) {
        self.p1 = p1.into();
        self.p2 = p2.into();
        self.normal = unit_normal(&self.p1, &self.p2);
    }

    #[inline]
    pub fn translate(&mut self, delta: &Vector) {
        self.p1 += delta;
        self.p2 += delta;
    }

    /// Swaps the reflective side.
    #[inline]
    pub fn flip(&mut self) {
        core::mem::swap(&mut self.p1, &mut self.p2);
        self.normal = unit_normal(&self.p1, &self.p2);
    }
}

/// Everything a pass reads: the ball, the eye, the mirrors and the drawable area.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    ball: Ball,
    eye: Eye,
    bounds: Bounds,
    mirrors: Vec<Mirror>,
    next_id: u32,
}

impl Scene {
    pub fn new(ball: Ball, eye: Eye, bounds: Bounds) -> Result<Self, SceneError> {
        bounds.validate()?;
        ball.validate()?;
        finite(&eye.position)?;
        Self::check_apart(&ball, &eye)?;

        Ok(Self {
            ball,
            eye,
            bounds,
            mirrors: Vec::new(),
            next_id: 0,
        })
    }

    fn check_apart(ball: &Ball, eye: &Eye) -> Result<(), SceneError> {
        ((ball.center - eye.position).norm() > Float::EPSILON)
            .then_some(())
            .ok_or(SceneError::EyeOnBall)
    }

    #[inline]
    #[must_use]
    pub const fn ball(&self) -> &Ball {
        &self.ball
    }

    #[inline]
    #[must_use]
    pub const fn eye(&self) -> &Eye {
        &self.eye
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// In insertion order.
    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    #[inline]
    #[must_use]
    pub fn mirror(&self, id: MirrorId) -> Option<&Mirror> {
        self.mirrors.iter().find(|m| m.id == id)
    }

    fn mirror_mut(&mut self, id: MirrorId) -> Result<&mut Mirror, SceneError> {
        self.mirrors
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(SceneError::UnknownMirror(id))
    }

    /// Applies `edit` to the mirror with the given `id`, rolling
    /// it back if the result isn't a valid mirror.
    fn edit_mirror(
        &mut self,
        id: MirrorId,
        edit: impl FnOnce(&mut Mirror),
    ) -> Result<(), SceneError> {
        let mirror = self.mirror_mut(id)?;
        let mut edited = mirror.clone();
        edit(&mut edited);
        edited.validate()?;
        *mirror = edited;
        Ok(())
    }

    pub fn add_mirror(&mut self, mut mirror: Mirror) -> Result<MirrorId, SceneError> {
        mirror.validate()?;
        let next = self.next_id.checked_add(1).ok_or(SceneError::IdsExhausted)?;
        let id = MirrorId(self.next_id);
        self.next_id = next;
        mirror.id = id;
        self.mirrors.push(mirror);
        Ok(id)
    }

    pub fn remove_mirror(&mut self, id: MirrorId) -> Result<Mirror, SceneError> {
        self.mirrors
            .iter()
            .position(|m| m.id == id)
            .map(|i| self.mirrors.remove(i))
            .ok_or(SceneError::UnknownMirror(id))
    }

    pub fn move_mirror(
        &mut self,
        id: MirrorId,
        p1: impl Into<Vector>,
        p2: impl Into<Vector>,
    ) -> Result<(), SceneError> {
        let (p1, p2) = (p1.into(), p2.into());
        self.edit_mirror(id, |m| m.set_endpoints(p1, p2))
    }

    pub fn translate_mirror(&mut self, id: MirrorId, delta: &Vector) -> Result<(), SceneError> {
        self.edit_mirror(id, |m| m.translate(delta))
    }

    pub fn flip_mirror(&mut self, id: MirrorId) -> Result<(), SceneError> {
        self.edit_mirror(id, Mirror::flip)
    }

    pub fn set_ball(&mut self, ball: Ball) -> Result<(), SceneError> {
        ball.validate()?;
        Self::check_apart(&ball, &self.eye)?;
        self.ball = ball;
        Ok(())
    }

    pub fn set_eye(&mut self, eye: Eye) -> Result<(), SceneError> {
        finite(&eye.position)?;
        Self::check_apart(&self.ball, &eye)?;
        self.eye = eye;
        Ok(())
    }
}
