//! Vector math, rays and the ray/sphere intersection solver

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Scale `v` to unit length.
///
/// Fails with [`Error::DegenerateVector`] when `v` has zero (or non-finite) length.
pub fn normalize(v: &Vector3d) -> Result<Vector3d> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(Error::DegenerateVector);
    }
    Ok(v / norm)
}

/// A half line from `origin` through `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3d,
    pub target: Point3d,
    direction: Vector3d,
}

impl Ray {
    /// Create a ray, caching its unit direction
    pub fn new(origin: Point3d, target: Point3d) -> Result<Self> {
        let direction = normalize(&(target - origin))?;
        Ok(Self {
            origin,
            target,
            direction,
        })
    }

    /// Unit direction from origin towards target
    pub fn direction(&self) -> Vector3d {
        self.direction
    }

    /// Point at signed distance `t` along the ray
    pub fn point_at(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }
}

/// A sphere given by its center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Point3d,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Point3d, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Result of a successful ray/sphere intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Signed distance along the ray; negative when the sphere lies behind the origin
    pub distance: f64,
    pub point: Point3d,
    /// Outward unit normal at `point`
    pub normal: Vector3d,
}

/// Intersect the line carrying `ray` with `sphere`, returning the near root.
///
/// Solves `a·t² + b·t + c = 0` and always reports the smaller root, without
/// clamping it to `t >= 0`. A ray whose origin sits inside the sphere, or that
/// points away from it, still reports the near intersection behind its origin.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Result<Option<Hit>> {
    let direction = ray.direction();
    let origin = ray.origin.coords;
    let center = sphere.center.coords;

    let a = direction.dot(&direction);
    let b = 2.0 * direction.dot(&(origin - center));
    let c = center.dot(&center) + origin.dot(&origin)
        - 2.0 * center.dot(&origin)
        - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * (a * c);
    if discriminant < 0.0 {
        return Ok(None);
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    let point = ray.point_at(t);
    let normal = normalize(&(point - sphere.center))?;

    Ok(Some(Hit {
        distance: t,
        point,
        normal,
    }))
}
