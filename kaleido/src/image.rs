use super::*;

use core::{iter, ops::Index};

/// Index of a [`VirtualImage`] in a [`Reflections`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub usize);

/// What a [`VirtualImage`] is a reflection of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The image is a direct (depth 1) reflection of the ball.
    Ball,
    Image(ImageId),
}

/// A point on a mirror's centerline where a reconstructed ray bounces.
#[derive(Debug, Clone, PartialEq)]
pub struct HitPoint {
    pub position: Vector,
    pub mirror: MirrorId,
    /// The position of the virtual image the ray was aimed at when it
    /// found this point. Drawn as the dashed, "virtual", leg of the path.
    pub virtual_image: Vector,
}

/// A reflection of the ball, or of another reflection, that the eye can see.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualImage {
    pub position: Vector,
    pub radius: Float,
    /// Number of bounces between the ball and the eye, at least 1.
    pub depth: usize,
    /// The mirror this image is seen in.
    pub source_mirror: MirrorId,
    pub parent: Parent,
    /// In ball-to-eye order, one per bounce.
    pub hit_points: Vec<HitPoint>,
}

impl VirtualImage {
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Vector) -> bool {
        (point - self.position).norm() <= self.radius
    }

    /// The path light takes to show this image: the ball's center,
    /// every hit point, then the eye.
    pub fn polyline<'a>(&'a self, scene: &'a Scene) -> impl Iterator<Item = &'a Vector> + 'a {
        iter::once(&scene.ball().center)
            .chain(self.hit_points.iter().map(|h| &h.position))
            .chain(iter::once(&scene.eye().position))
    }

    /// `(hit point, virtual image)` pairs, the segments the eye "sees" past
    /// each mirror.
    pub fn virtual_legs(&self) -> impl Iterator<Item = (&Vector, &Vector)> + '_ {
        self.hit_points
            .iter()
            .map(|h| (&h.position, &h.virtual_image))
    }
}

/// The output of a pass: every visible image, parents before their children,
/// siblings in mirror order.
///
/// Images refer to their parents by [`ImageId`], i. e. their index in this set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reflections {
    images: Vec<VirtualImage>,
}

impl Reflections {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an image, returning its id.
    ///
    /// # Panics
    ///
    /// if `image.parent` refers to an image not in `self`
    pub(crate) fn push(&mut self, image: VirtualImage) -> ImageId {
        if let Parent::Image(ImageId(i)) = image.parent {
            assert!(i < self.images.len(), "parent must be pushed first");
        }
        let id = ImageId(self.images.len());
        self.images.push(image);
        id
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: ImageId) -> Option<&VirtualImage> {
        self.images.get(id.0)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &VirtualImage)> + '_ {
        self.images
            .iter()
            .enumerate()
            .map(|(i, image)| (ImageId(i), image))
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[VirtualImage] {
        &self.images
    }

    /// Ids of `id` itself, its parent, and so on, up to its depth 1 ancestor.
    pub fn chain(&self, id: ImageId) -> impl Iterator<Item = ImageId> + '_ {
        iter::successors(self.get(id).map(|_| id), move |&current| {
            match self.get(current)?.parent {
                Parent::Ball => None,
                Parent::Image(parent) => Some(parent),
            }
        })
    }

    #[must_use]
    pub fn count_at_depth(&self, depth: usize) -> usize {
        self.images.iter().filter(|i| i.depth == depth).count()
    }

    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.images.iter().map(|i| i.depth).max()
    }

    /// The images seen in `mirror`.
    pub fn from_mirror(&self, mirror: MirrorId) -> impl Iterator<Item = (ImageId, &VirtualImage)> + '_ {
        self.iter().filter(move |(_, i)| i.source_mirror == mirror)
    }

    /// The shallowest image whose disk contains `point`, the first one
    /// found if several share that depth.
    #[must_use]
    pub fn image_at(&self, point: &Vector) -> Option<ImageId> {
        self.iter()
            .filter(|(_, i)| i.contains(point))
            .min_by_key(|(_, i)| i.depth)
            .map(|(id, _)| id)
    }
}

impl Index<ImageId> for Reflections {
    type Output = VirtualImage;

    #[inline]
    fn index(&self, id: ImageId) -> &Self::Output {
        &self.images[id.0]
    }
}

impl<'a> IntoIterator for &'a Reflections {
    type Item = &'a VirtualImage;
    type IntoIter = core::slice::Iter<'a, VirtualImage>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
