use kaleido::*;

use core::ops::Deref;

pub use serde_json;

use serde_json::{json, Value};

pub trait JsonSer {
    /// Serialize `self` into a JSON value.
    fn to_json(&self) -> Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> Value {
        Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> Value {
        (*self).to_json()
    }
}

impl JsonSer for Vector {
    /// `{ "x": .., "y": .. }`
    fn to_json(&self) -> Value {
        json!({ "x": self.x, "y": self.y })
    }
}

impl JsonSer for MirrorId {
    fn to_json(&self) -> Value {
        json!(self.0)
    }
}

impl JsonSer for Ball {
    fn to_json(&self) -> Value {
        json!({
            "x": self.center.x,
            "y": self.center.y,
            "radius": self.radius,
        })
    }
}

impl JsonSer for Eye {
    fn to_json(&self) -> Value {
        self.position.to_json()
    }
}

impl JsonSer for Bounds {
    fn to_json(&self) -> Value {
        json!({
            "min": self.min.to_json(),
            "max": self.max.to_json(),
        })
    }
}

impl JsonSer for Mirror {
    /// The centerline, normal and width, plus the two faces to draw.
    ///
    /// ```json
    /// {
    ///     "id": 0,
    ///     "x1": 725.0, "y1": 400.0, "x2": 475.0, "y2": 400.0,
    ///     "normal": { "x": 0.0, "y": -1.0 },
    ///     "width": 6.0,
    ///     "faces": {
    ///         "reflective": [{ "x": .., "y": .. }, { "x": .., "y": .. }],
    ///         "back": [{ "x": .., "y": .. }, { "x": .., "y": .. }]
    ///     }
    /// }
    /// ```
    fn to_json(&self) -> Value {
        let [reflective, back] = self.faces();

        json!({
            "id": self.id().to_json(),
            "x1": self.p1().x,
            "y1": self.p1().y,
            "x2": self.p2().x,
            "y2": self.p2().y,
            "normal": self.normal().as_ref().to_json(),
            "width": self.width(),
            "faces": {
                "reflective": reflective.to_json(),
                "back": back.to_json(),
            },
        })
    }
}

impl JsonSer for Scene {
    fn to_json(&self) -> Value {
        json!({
            "ball": self.ball().to_json(),
            "eye": self.eye().to_json(),
            "bounds": self.bounds().to_json(),
            "mirrors": self.mirrors().to_json(),
        })
    }
}

impl JsonSer for Parent {
    /// `{ "type": "ball" }` or `{ "type": "image", "index": n }`
    fn to_json(&self) -> Value {
        match self {
            Parent::Ball => json!({ "type": "ball" }),
            Parent::Image(ImageId(index)) => json!({ "type": "image", "index": index }),
        }
    }
}

impl JsonSer for HitPoint {
    fn to_json(&self) -> Value {
        json!({
            "x": self.position.x,
            "y": self.position.y,
            "mirror": self.mirror.to_json(),
            "virtualImage": self.virtual_image.to_json(),
        })
    }
}

impl JsonSer for VirtualImage {
    fn to_json(&self) -> Value {
        json!({
            "x": self.position.x,
            "y": self.position.y,
            "radius": self.radius,
            "depth": self.depth,
            "sourceMirror": self.source_mirror.to_json(),
            "parentReflection": self.parent.to_json(),
            "hitPoints": self.hit_points.to_json(),
        })
    }
}

impl JsonSer for Reflections {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

/// Serialize the inputs and outputs of a pass together.
pub fn serialize_pass(scene: &Scene, images: &Reflections) -> Value {
    json!({
        "scene": scene.to_json(),
        "images": images.to_json(),
    })
}
