//! The fixed scene: one sphere under a directional light

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{normalize, Point3d, Ray, Sphere, Vector3d};

/// Immutable scene description shared read-only by every render job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScene")]
pub struct Scene {
    sphere: Sphere,
    light_direction: Vector3d,
}

impl Scene {
    /// Create a scene, normalizing the light direction.
    ///
    /// The light direction points from the light towards the surface.
    pub fn new(sphere: Sphere, light_direction: Vector3d) -> Result<Self> {
        if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "sphere radius must be positive, got {}",
                sphere.radius
            )));
        }
        if !sphere.center.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidScene("sphere center must be finite".to_string()));
        }

        Ok(Self {
            sphere,
            light_direction: normalize(&light_direction)?,
        })
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// Unit light direction
    pub fn light_direction(&self) -> Vector3d {
        self.light_direction
    }
}

/// Field layout accepted from serialized data, checked by [`Scene::new`]
#[derive(Deserialize)]
struct RawScene {
    sphere: Sphere,
    light_direction: Vector3d,
}

impl TryFrom<RawScene> for Scene {
    type Error = Error;

    fn try_from(raw: RawScene) -> Result<Self> {
        Scene::new(raw.sphere, raw.light_direction)
    }
}

impl Default for Scene {
    /// Sphere of radius 0.5 at `(0, 0, 10)`, lit along the ray from `(1, 1, 0)` to the origin
    fn default() -> Self {
        let light = Ray::new(Point3d::new(1.0, 1.0, 0.0), Point3d::origin())
            .map(|ray| ray.direction())
            .unwrap_or_else(|_| Vector3d::new(-1.0, -1.0, 0.0).normalize());

        Self {
            sphere: Sphere::new(Point3d::new(0.0, 0.0, 10.0), 0.5),
            light_direction: light,
        }
    }
}
