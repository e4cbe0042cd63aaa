use super::*;

/// One bounce of a reflection chain: a mirror, and the virtual image seen in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<'a> {
    pub mirror: &'a Mirror,
    pub image: Vector,
}

/// The links leading to the image `id`, in ball-to-eye order
/// (its depth 1 ancestor first, the image itself last).
///
/// Returns `None` if `id` isn't in `images`, or one of the
/// mirrors involved isn't in `scene`.
pub fn chain_links<'a>(scene: &'a Scene, images: &Reflections, id: ImageId) -> Option<Vec<Link<'a>>> {
    let mut links = images
        .chain(id)
        .map(|id| {
            let image = &images[id];
            scene.mirror(image.source_mirror).map(|mirror| Link {
                mirror,
                image: image.position,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    if links.is_empty() {
        return None;
    }

    links.reverse();
    Some(links)
}

/// Finds where a ray leaving the ball bounces, on each mirror of `chain`
/// (in ball-to-eye order), before reaching the eye.
///
/// Works backwards from the eye: aim at the last image, find where that line
/// meets the last mirror, aim at the previous image from there, and so on.
///
/// Returns the hit points in ball-to-eye order, or `None` if one of these lines
/// misses its mirror, if the last leg, from the first hit point back to the ball,
/// is blocked by a mirror outside of `chain`, or if `chain` is empty.
pub fn reconstruct_path(
    scene: &Scene,
    chain: &[Link],
    config: &EngineConfig,
) -> Option<Vec<HitPoint>> {
    let last = chain.last()?;
    let seen_at = last.mirror.intersection(&scene.eye().position, &last.image)?;
    reconstruct_path_through(scene, chain, seen_at, config)
}

/// Same as [`reconstruct_path`], when the point `seen_at`, where the line
/// from the eye to the last image of `chain` meets the last mirror, is known.
pub fn reconstruct_path_through(
    scene: &Scene,
    chain: &[Link],
    seen_at: Vector,
    config: &EngineConfig,
) -> Option<Vec<HitPoint>> {
    let (last, rest) = chain.split_last()?;

    let mut hits = Vec::with_capacity(chain.len());

    hits.push(HitPoint {
        position: seen_at,
        mirror: last.mirror.id(),
        virtual_image: last.image,
    });

    let mut from = seen_at;

    for link in rest.iter().rev() {
        let position = link.mirror.intersection(&from, &link.image)?;

        hits.push(HitPoint {
            position,
            mirror: link.mirror.id(),
            virtual_image: link.image,
        });

        from = position;
    }

    let exclude: Vec<_> = chain.iter().map(|link| link.mirror.id()).collect();

    SightLine::new(scene.ball().center, from, &exclude, config.occlusion_tolerance)
        .first_blocker(scene)
        .is_none()
        .then(|| {
            hits.reverse();
            hits
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // an "L", opening up and to the right: mirror 0 lies on y = 400,
    // mirror 1 on x = 300, they meet at (300, 400)
    fn corner() -> (Scene, MirrorId, MirrorId) {
        let mut scene = Scene::new(
            Ball::new([400., 300.], 20.),
            Eye::new([550., 250.]),
            Bounds::from_size(1200., 800.),
        )
        .unwrap();

        let floor = scene
            .add_mirror(Mirror::new([600., 400.], [300., 400.], 6.))
            .unwrap();
        let wall = scene
            .add_mirror(Mirror::new([300., 400.], [300., 100.], 6.))
            .unwrap();

        (scene, floor, wall)
    }

    #[test]
    fn single_bounce() {
        let (scene, floor, _) = corner();
        let mirror = scene.mirror(floor).unwrap();
        let chain = [Link {
            mirror,
            image: mirror.reflect_point(&scene.ball().center),
        }];

        let hits = reconstruct_path(&scene, &chain, &EngineConfig::default()).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].mirror, floor);
        assert_relative_eq!(hits[0].position, Vector::new(460., 400.), epsilon = 1e-9);
        assert_relative_eq!(hits[0].virtual_image, Vector::new(400., 500.));
    }

    #[test]
    fn double_bounce_in_order() {
        let (scene, floor, wall) = corner();
        let (floor_m, wall_m) = (scene.mirror(floor).unwrap(), scene.mirror(wall).unwrap());

        let first = wall_m.reflect_point(&scene.ball().center);
        let second = floor_m.reflect_point(&first);
        assert_relative_eq!(second, Vector::new(200., 500.));

        let chain = [
            Link { mirror: wall_m, image: first },
            Link { mirror: floor_m, image: second },
        ];

        let hits = reconstruct_path(&scene, &chain, &EngineConfig::default()).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].mirror, wall);
        assert_eq!(hits[1].mirror, floor);
        assert_relative_eq!(hits[0].position, Vector::new(300., 400. - 200. / 7.), epsilon = 1e-9);
        assert_relative_eq!(hits[1].position, Vector::new(340., 400.), epsilon = 1e-9);
    }

    #[test]
    fn known_hit_point() {
        let (scene, floor, wall) = corner();
        let (floor_m, wall_m) = (scene.mirror(floor).unwrap(), scene.mirror(wall).unwrap());

        let first = wall_m.reflect_point(&scene.ball().center);
        let second = floor_m.reflect_point(&first);

        let chain = [
            Link { mirror: wall_m, image: first },
            Link { mirror: floor_m, image: second },
        ];

        let config = EngineConfig::default();
        let seen_at = floor_m.intersection(&scene.eye().position, &second).unwrap();

        assert_eq!(
            reconstruct_path_through(&scene, &chain, seen_at, &config),
            reconstruct_path(&scene, &chain, &config),
        );

        let hits = reconstruct_path_through(&scene, &chain, seen_at, &config).unwrap();
        assert_eq!(hits[1].position, seen_at);

        assert!(reconstruct_path_through(&scene, &[], seen_at, &config).is_none());
    }

    #[test]
    fn inconsistent_chain() {
        let (scene, floor, wall) = corner();
        let (floor_m, wall_m) = (scene.mirror(floor).unwrap(), scene.mirror(wall).unwrap());

        // the other order: the eye can't see the floor's image in the wall
        let first = floor_m.reflect_point(&scene.ball().center);
        let second = wall_m.reflect_point(&first);

        let chain = [
            Link { mirror: floor_m, image: first },
            Link { mirror: wall_m, image: second },
        ];

        assert!(reconstruct_path(&scene, &chain, &EngineConfig::default()).is_none());
        assert!(reconstruct_path(&scene, &[], &EngineConfig::default()).is_none());
    }

    #[test]
    fn blocked_last_leg() {
        let (mut scene, floor, _) = corner();
        // right between the ball and the point it bounces off the floor at
        scene
            .add_mirror(Mirror::new([420., 350.], [450., 350.], 6.))
            .unwrap();

        let mirror = scene.mirror(floor).unwrap();
        let chain = [Link {
            mirror,
            image: mirror.reflect_point(&scene.ball().center),
        }];

        assert!(reconstruct_path(&scene, &chain, &EngineConfig::default()).is_none());
    }
}
