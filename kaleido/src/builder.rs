use super::*;

/// Builds every visible reflection in `scene`, using the default [`EngineConfig`].
#[inline]
#[must_use]
pub fn compute_reflections(scene: &Scene) -> Reflections {
    ImageBuilder::new(scene).build()
}

/// Builds the tree of visible reflections of a scene.
///
/// Every mirror reflects the ball, and every accepted image is, in turn, reflected
/// by every other mirror, depth first, until the reflections get too deep, too
/// small, or are no longer visible. The result is a pure function of the scene.
#[derive(Debug, Clone)]
pub struct ImageBuilder<'a> {
    scene: &'a Scene,
    config: EngineConfig,
}

impl<'a> ImageBuilder<'a> {
    #[inline]
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_config(scene, EngineConfig::default())
    }

    #[inline]
    #[must_use]
    pub const fn with_config(scene: &'a Scene, config: EngineConfig) -> Self {
        Self { scene, config }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn build(&self) -> Reflections {
        let mut pass = Pass {
            scene: self.scene,
            config: &self.config,
            images: Reflections::new(),
            pruned: 0,
        };

        let ball = self.scene.ball();
        pass.expand(&ball.center, ball.radius, Parent::Ball, None, 1);

        log::debug!(
            "{} virtual images from {} mirrors, {} candidates pruned",
            pass.images.len(),
            self.scene.mirrors().len(),
            pass.pruned,
        );

        pass.images
    }
}

struct Pass<'a> {
    scene: &'a Scene,
    config: &'a EngineConfig,
    images: Reflections,
    pruned: usize,
}

impl<'a> Pass<'a> {
    /// Reflects `object` (the ball, or the image `parent`) in every mirror but `skip`,
    /// keeping the visible reflections, and recursing into them.
    fn expand(
        &mut self,
        object: &Vector,
        radius: Float,
        parent: Parent,
        skip: Option<MirrorId>,
        depth: usize,
    ) {
        if depth > self.config.max_reflections {
            self.prune(depth, skip, Pruned::TooDeep);
            return;
        }

        let scene = self.scene;

        for mirror in scene.mirrors() {
            if skip == Some(mirror.id()) {
                continue;
            }

            match self.accept(object, radius, parent, mirror, depth) {
                Ok(id) => {
                    let image = &self.images[id];
                    let (position, radius) = (image.position, image.radius);
                    self.expand(&position, radius, Parent::Image(id), Some(mirror.id()), depth + 1);
                }
                Err(reason) => self.prune(depth, Some(mirror.id()), reason),
            }
        }
    }

    #[inline]
    fn prune(&mut self, depth: usize, mirror: Option<MirrorId>, reason: Pruned) {
        self.pruned += 1;
        log::trace!("pruned depth {depth} candidate (mirror {mirror:?}): {reason:?}");
    }

    /// The reflection of `object` in `mirror`, before any visibility check.
    fn candidate(
        &self,
        object: &Vector,
        radius: Float,
        parent: Parent,
        mirror: &'a Mirror,
        depth: usize,
    ) -> Result<Candidate<'a>, Pruned> {
        if mirror.normal_distance(object) <= 0. {
            return Err(Pruned::WrongSide);
        }

        let radius = self.config.child_radius(radius, depth);

        if radius < self.scene.ball().radius * self.config.min_size_ratio {
            return Err(Pruned::TooSmall);
        }

        let position = mirror.reflect_point(object);

        if !self.scene.bounds().contains_circle(&position, radius) {
            return Err(Pruned::OutOfBounds);
        }

        Ok(Candidate {
            position,
            radius,
            depth,
            mirror,
            parent,
        })
    }

    fn accept(
        &mut self,
        object: &Vector,
        radius: Float,
        parent: Parent,
        mirror: &'a Mirror,
        depth: usize,
    ) -> Result<ImageId, Pruned> {
        let scene = self.scene;

        let candidate = self.candidate(object, radius, parent, mirror, depth)?;

        let seen_at = candidate.check_visibility(scene, &self.images, self.config)?;

        let mut chain = match parent {
            Parent::Ball => Vec::with_capacity(1),
            Parent::Image(id) => chain_links(scene, &self.images, id).ok_or(Pruned::NoPath)?,
        };

        chain.push(Link {
            mirror,
            image: candidate.position,
        });

        let hit_points =
            reconstruct_path_through(scene, &chain, seen_at, self.config).ok_or(Pruned::NoPath)?;

        Ok(self.images.push(VirtualImage {
            position: candidate.position,
            radius: candidate.radius,
            depth,
            source_mirror: mirror.id(),
            parent,
            hit_points,
        }))
    }
}
