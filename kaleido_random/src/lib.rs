use kaleido::*;

use std::f64::consts::TAU;

pub use rand;

pub trait Random: Sized {
    /// Generate a randomized instance of `Self`, lying within `bounds`, using the provided `rng`
    ///
    /// This method must not fail. If creating an instance is fallible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self;
}

impl Random for Ball {
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self {
        let size = bounds.max - bounds.min;
        let radius = size.x.min(size.y) * rng.gen_range(0.01..0.05);

        Self {
            center: rand_point(rng, bounds, radius),
            radius,
        }
    }
}

impl Random for Eye {
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self {
        Self {
            position: rand_point(rng, bounds, 0.),
        }
    }
}

impl Random for Mirror {
    /// Centered somewhere within `bounds`, its ends may stick out.
    fn random(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds) -> Self {
        const MIN_LENGTH: Float = MIN_MIRROR_LENGTH * 2.0;

        let size = bounds.max - bounds.min;
        let max_length = (size.x.max(size.y) * 0.4).max(MIN_LENGTH);

        let length = rng.gen_range(MIN_LENGTH..=max_length);
        let angle = rng.gen_range(0.0..TAU);
        let half = Vector::new(angle.cos(), angle.sin()) * (length * 0.5);

        let center = rand_point(rng, bounds, 0.);

        Self::new(center - half, center + half, rng.gen_range(2.0..8.0))
    }
}

/// A random scene within `bounds`, with `num_mirrors` mirrors.
///
/// The eye is never placed inside the ball. Fails only if `bounds` is invalid
/// (or, in theory, if the scene runs out of mirror ids).
pub fn random_scene(
    rng: &mut (impl rand::Rng + ?Sized),
    bounds: Bounds,
    num_mirrors: usize,
) -> Result<Scene, SceneError> {
    bounds.validate()?;

    let mut scene = loop {
        let (ball, eye) = (Ball::random(rng, &bounds), Eye::random(rng, &bounds));

        if (ball.center - eye.position).norm() <= ball.radius {
            continue;
        }

        match Scene::new(ball, eye, bounds.clone()) {
            Err(SceneError::EyeOnBall) => continue,
            result => break result?,
        }
    };

    let mut added = 0;
    while added < num_mirrors {
        match scene.add_mirror(Mirror::random(rng, &bounds)) {
            Ok(_) => added += 1,
            Err(SceneError::IdsExhausted) => return Err(SceneError::IdsExhausted),
            Err(_) => {}
        }
    }

    Ok(scene)
}

/// A uniformly distributed point of `bounds`, at least `margin` away from its edges
/// (or at its center, along the axes where it's too narrow for that).
pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), bounds: &Bounds, margin: Float) -> Vector {
    let size = bounds.max - bounds.min;

    Vector::from_fn(|i, _| {
        let span = size[i] - 2.0 * margin;
        if span > 0. {
            bounds.min[i] + margin + rng.gen::<Float>() * span
        } else {
            bounds.min[i] + size[i] * 0.5
        }
    })
}
