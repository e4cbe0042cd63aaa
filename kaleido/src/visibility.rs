use super::*;

/// Why a candidate image didn't make it into a pass's output.
///
/// Pruning is a normal outcome, not a failure: this only serves diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruned {
    /// The object being reflected is behind, or on, the mirror's non-reflective side.
    WrongSide,
    TooDeep,
    TooSmall,
    OutOfBounds,
    /// The line from the eye to the image doesn't cross the mirror's centerline.
    MissesMirror,
    /// The eye would be looking at the back of the mirror.
    BackFace,
    /// The eye would reach the image before reaching the mirror.
    BeyondImage,
    /// Another mirror stands between the eye and the mirror.
    Occluded(MirrorId),
    /// Another mirror stands between the reflected object and the mirror.
    SourceBlocked(MirrorId),
    /// No consistent bounce sequence could be found.
    NoPath,
}

/// A would-be [`VirtualImage`], before it's been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub position: Vector,
    pub radius: Float,
    pub depth: usize,
    /// The mirror it's seen in.
    pub mirror: &'a Mirror,
    pub parent: Parent,
}

impl<'a> Candidate<'a> {
    /// The position, and source mirror (if any), of what `self` reflects.
    ///
    /// # Panics
    ///
    /// if `self.parent` isn't in `images`
    #[must_use]
    pub fn source(&self, scene: &Scene, images: &Reflections) -> (Vector, Option<MirrorId>) {
        match self.parent {
            Parent::Ball => (scene.ball().center, None),
            Parent::Image(id) => {
                let parent = &images[id];
                (parent.position, Some(parent.source_mirror))
            }
        }
    }

    /// Decides whether the eye can see `self`.
    ///
    /// On success, returns the point where the line from the eye to `self`
    /// crosses `self.mirror`.
    ///
    /// # Panics
    ///
    /// if `self.parent` isn't in `images`
    pub fn check_visibility(
        &self,
        scene: &Scene,
        images: &Reflections,
        config: &EngineConfig,
    ) -> Result<Vector, Pruned> {
        if !scene.bounds().contains_circle(&self.position, self.radius) {
            return Err(Pruned::OutOfBounds);
        }

        let eye = scene.eye().position;
        let mirror = self.mirror;

        let hit = mirror
            .intersection(&eye, &self.position)
            .ok_or(Pruned::MissesMirror)?;

        let view = hit - eye;

        if view.dot(mirror.normal().as_ref()) >= 0. {
            return Err(Pruned::BackFace);
        }

        if view.norm() >= (self.position - eye).norm() {
            return Err(Pruned::BeyondImage);
        }

        let tolerance = config.occlusion_tolerance;

        if let Some(by) = SightLine::new(eye, hit, &[mirror.id()], tolerance).first_blocker(scene) {
            return Err(Pruned::Occluded(by));
        }

        let (source, parent_mirror) = self.source(scene, images);

        // the line from a reflection to the mirror showing its reflection goes
        // through the mirror that reflection is seen in, don't count it.
        let exclude = [mirror.id(), parent_mirror.unwrap_or(mirror.id())];

        match SightLine::new(source, hit, &exclude, tolerance).first_blocker(scene) {
            Some(by) => Err(Pruned::SourceBlocked(by)),
            None => Ok(hit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // a horizontal mirror at y = 400, reflective side up
    fn setup(eye: [Float; 2]) -> (Scene, MirrorId) {
        let mut scene = Scene::new(
            Ball::new([600., 300.], 20.),
            Eye::new(eye),
            Bounds::from_size(1200., 800.),
        )
        .unwrap();

        let id = scene
            .add_mirror(Mirror::new([725., 400.], [475., 400.], 6.))
            .unwrap();

        (scene, id)
    }

    fn first_order<'a>(scene: &'a Scene, id: MirrorId) -> Candidate<'a> {
        let mirror = scene.mirror(id).unwrap();
        Candidate {
            position: mirror.reflect_point(&scene.ball().center),
            radius: scene.ball().radius,
            depth: 1,
            mirror,
            parent: Parent::Ball,
        }
    }

    fn check(scene: &Scene, candidate: &Candidate) -> Result<Vector, Pruned> {
        candidate.check_visibility(scene, &Reflections::new(), &EngineConfig::default())
    }

    #[test]
    fn seen_through_the_mirror() {
        let (scene, id) = setup([600., 100.]);
        let hit = check(&scene, &first_order(&scene, id)).unwrap();
        assert_relative_eq!(hit, Vector::new(600., 400.));

        let (scene, id) = setup([700., 150.]);
        let hit = check(&scene, &first_order(&scene, id)).unwrap();
        // the line from (700, 150) to (600, 500) crosses y = 400 at 5/7 of its length
        assert_relative_eq!(hit, Vector::new(700. - 500. / 7., 400.), epsilon = 1e-9);
    }

    #[test]
    fn behind_the_mirror() {
        let (scene, id) = setup([600., 700.]);
        assert_eq!(check(&scene, &first_order(&scene, id)), Err(Pruned::MissesMirror));
    }

    #[test]
    fn past_the_mirror_ends() {
        let (scene, id) = setup([50., 100.]);
        assert_eq!(check(&scene, &first_order(&scene, id)), Err(Pruned::MissesMirror));
    }

    #[test]
    fn back_face() {
        let (mut scene, id) = setup([600., 100.]);
        let position = first_order(&scene, id).position;

        scene.flip_mirror(id).unwrap();

        let candidate = Candidate {
            position,
            ..first_order(&scene, id)
        };
        assert_eq!(check(&scene, &candidate), Err(Pruned::BackFace));
    }

    #[test]
    fn image_in_front_of_the_mirror() {
        let (scene, id) = setup([600., 100.]);
        let mut candidate = first_order(&scene, id);
        // pretend the image lies between the eye and the mirror
        candidate.position = Vector::new(600., 399.);
        assert_eq!(check(&scene, &candidate), Err(Pruned::MissesMirror));
        candidate.position = Vector::new(600., 400.);
        assert_eq!(check(&scene, &candidate), Err(Pruned::BeyondImage));
    }

    #[test]
    fn out_of_bounds() {
        let (scene, id) = setup([600., 100.]);
        let mut candidate = first_order(&scene, id);
        candidate.radius = 350.;
        assert_eq!(check(&scene, &candidate), Err(Pruned::OutOfBounds));
    }

    #[test]
    fn occluded_view() {
        let (mut scene, id) = setup([600., 100.]);
        let blocker = scene
            .add_mirror(Mirror::new([500., 200.], [700., 200.], 6.))
            .unwrap();
        assert_eq!(
            check(&scene, &first_order(&scene, id)),
            Err(Pruned::Occluded(blocker))
        );
    }

    #[test]
    fn blocked_source() {
        let (mut scene, id) = setup([700., 150.]);
        // between the ball and the mirror, but not between the eye and the mirror
        let blocker = scene
            .add_mirror(Mirror::new([600., 350.], [630., 350.], 6.))
            .unwrap();
        assert_eq!(
            check(&scene, &first_order(&scene, id)),
            Err(Pruned::SourceBlocked(blocker))
        );
    }
}
