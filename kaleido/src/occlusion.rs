use super::*;

/// A segment we want to know is clear, from `from` to `to`, along
/// with the closest mirror crossing it found so far.
#[derive(Debug, Clone, PartialEq)]
pub struct SightLine<'a> {
    from: Vector,
    to: Vector,
    /// Mirrors that can't block this line.
    exclude: &'a [MirrorId],
    /// Crossings at a distance (from `from`) greater than this are ignored.
    max_dist: Float,
    closest: Option<(Float, MirrorId)>,
}

impl<'a> SightLine<'a> {
    /// Crossings lying within the last `tolerance` fraction of the segment
    /// (near `to`) are ignored. This absorbs crossings with mirrors that
    /// touch the one `to` lies on.
    #[inline]
    #[must_use]
    pub fn new(from: Vector, to: Vector, exclude: &'a [MirrorId], tolerance: Float) -> Self {
        let max_dist = (to - from).norm() * (1. - tolerance);
        Self {
            from,
            to,
            exclude,
            max_dist,
            closest: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from(&self) -> &Vector {
        &self.from
    }

    #[inline]
    #[must_use]
    pub const fn to(&self) -> &Vector {
        &self.to
    }

    /// Records a crossing of this line by `mirror` at `point`, if it's
    /// the closest one so far, and `mirror` isn't excluded.
    #[inline]
    pub fn add_crossing(&mut self, mirror: MirrorId, point: &Vector) {
        if self.exclude.contains(&mirror) {
            return;
        }

        let d = (point - self.from).norm();

        if d < self.max_dist && self.closest.map_or(true, |(t, _)| t > d) {
            self.closest = Some((d, mirror));
        }
    }

    /// The mirror crossing this line closest to `from`, if any.
    #[inline]
    #[must_use]
    pub fn blocker(&self) -> Option<MirrorId> {
        self.closest.map(|(_, id)| id)
    }

    /// Runs `occluder` against this line and returns the closest blocker.
    #[inline]
    #[must_use]
    pub fn first_blocker(mut self, occluder: &(impl Occluder + ?Sized)) -> Option<MirrorId> {
        occluder.add_crossings(&mut self);
        self.blocker()
    }
}

/// Something that can stand in the way of a [`SightLine`].
pub trait Occluder {
    /// Reports every point where `self` crosses the line with
    /// [`sight.add_crossing(...)`](SightLine::add_crossing).
    fn add_crossings(&self, sight: &mut SightLine);
}

impl Occluder for Mirror {
    #[inline]
    fn add_crossings(&self, sight: &mut SightLine) {
        if let Some(p) = self.intersection(sight.from(), sight.to()) {
            sight.add_crossing(self.id(), &p);
        }
    }
}

impl<T: Occluder> Occluder for [T] {
    #[inline]
    fn add_crossings(&self, sight: &mut SightLine) {
        self.iter().for_each(|o| o.add_crossings(sight));
    }
}

impl<T: Occluder> Occluder for Vec<T> {
    #[inline]
    fn add_crossings(&self, sight: &mut SightLine) {
        self.as_slice().add_crossings(sight);
    }
}

impl<T: Occluder + ?Sized> Occluder for &T {
    #[inline]
    fn add_crossings(&self, sight: &mut SightLine) {
        (**self).add_crossings(sight);
    }
}

impl Occluder for Scene {
    #[inline]
    fn add_crossings(&self, sight: &mut SightLine) {
        self.mirrors().add_crossings(sight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: Float) -> Mirror {
        Mirror::new([x, -10.], [x, 10.], 1.)
    }

    fn walls() -> Scene {
        let mut scene = Scene::new(
            Ball::new([-50., 0.], 1.),
            Eye::new([50., 0.]),
            Bounds::new([-100., -100.], [100., 100.]),
        )
        .unwrap();

        for x in [30., 5., 20.] {
            scene.add_mirror(wall(x)).unwrap();
        }
        scene
    }

    #[test]
    fn closest_crossing_wins() {
        let scene = walls();
        let line = SightLine::new(Vector::new(0., 0.), Vector::new(40., 0.), &[], 0.01);
        assert_eq!(line.first_blocker(&scene), Some(MirrorId(1)));
    }

    #[test]
    fn excluded_mirrors_dont_block() {
        let scene = walls();
        let exclude = [MirrorId(1)];
        let line = SightLine::new(Vector::new(0., 0.), Vector::new(40., 0.), &exclude, 0.01);
        assert_eq!(line.first_blocker(&scene), Some(MirrorId(2)));

        let exclude = [MirrorId(0), MirrorId(1), MirrorId(2)];
        let line = SightLine::new(Vector::new(0., 0.), Vector::new(40., 0.), &exclude, 0.01);
        assert_eq!(line.first_blocker(&scene), None);
    }

    #[test]
    fn crossings_at_the_far_end_are_tolerated() {
        let scene = walls();

        let others = [MirrorId(1), MirrorId(2)];

        // ends right on the wall at x = 30
        let line = SightLine::new(Vector::new(0., 5.), Vector::new(30., 5.), &others, 0.01);
        assert_eq!(line.first_blocker(scene.mirrors()), None);

        let line = SightLine::new(Vector::new(0., 5.), Vector::new(31., 5.), &others, 0.01);
        assert_eq!(line.first_blocker(&scene), Some(MirrorId(0)));
    }

    #[test]
    fn any_collection_of_mirrors_occludes() {
        let scene = walls();
        let line = SightLine::new(Vector::new(0., 0.), Vector::new(40., 0.), &[], 0.01);

        let owned: Vec<Mirror> = scene.mirrors().to_vec();
        assert_eq!(line.clone().first_blocker(&owned), Some(MirrorId(1)));

        let borrowed: Vec<&Mirror> = scene.mirrors().iter().rev().collect();
        assert_eq!(line.clone().first_blocker(&borrowed), Some(MirrorId(1)));

        let far: Vec<&Mirror> = vec![&scene.mirrors()[0]];
        assert_eq!(line.first_blocker(&far), Some(MirrorId(0)));
    }

    #[test]
    fn lines_passing_beside_a_mirror_are_clear() {
        let scene = walls();
        let line = SightLine::new(Vector::new(0., 15.), Vector::new(40., 15.), &[], 0.01);
        assert_eq!(line.first_blocker(&scene), None);
    }
}
