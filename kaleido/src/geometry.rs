//! Stateless vector helpers shared by the rest of the engine.
//!
//! Every "does this segment cross that mirror", "is this sight line blocked"
//! and "where does this ray land on that mirror" question reduces to
//! [`segment_intersection`].

use super::*;

/// Returns the left-hand perpendicular of `p2 - p1`, normalized.
///
/// The result is unspecified (NaN coordinates) if `p1 == p2`.
#[inline]
#[must_use]
pub fn unit_normal(p1: &Vector, p2: &Vector) -> UnitVector {
    let d = p2 - p1;
    Unit::new_normalize(Vector::new(-d.y, d.x))
}

/// Returns the intersection point of the segments `[p1, p2]` and `[p3, p4]`.
///
/// Returns `None` if they are (nearly) parallel, or if the point where their
/// supporting lines meet falls outside of either segment.
#[inline]
#[must_use]
pub fn segment_intersection(
    p1: &Vector,
    p2: &Vector,
    p3: &Vector,
    p4: &Vector,
) -> Option<Vector> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;

    let det = d1.x * d2.y - d1.y * d2.x;

    if det.abs() <= Float::EPSILON {
        return None;
    }

    let w = p3 - p1;

    // p1 + t * d1 == p3 + u * d2
    let t = (w.x * d2.y - w.y * d2.x) / det;
    let u = (w.x * d1.y - w.y * d1.x) / det;

    let unit = 0.0..=1.0;

    (unit.contains(&t) && unit.contains(&u)).then(|| p1 + d1 * t)
}

/// Signed distance from `point` to the line through `origin` directed
/// orthogonally to `normal`. Positive on the side `normal` points to.
#[inline]
#[must_use]
pub fn normal_distance(point: &Vector, origin: &Vector, normal: &UnitVector) -> Float {
    (point - origin).dot(normal.as_ref())
}

/// Mirror image of `point` across the (infinite) line through `origin`
/// directed orthogonally to `normal`.
#[inline]
#[must_use]
pub fn reflect_point(point: &Vector, origin: &Vector, normal: &UnitVector) -> Vector {
    let n = normal.as_ref();
    point - n * (2.0 * normal_distance(point, origin, normal))
}
