//! Ambient plus diffuse shading of surface points

use raycrate_core::{Rgb, Vector3d};

/// Light reaching every lit surface regardless of orientation
pub const AMBIENT: f64 = 0.3;

/// Weight of the Lambert term
pub const DIFFUSE: f64 = 0.7;

/// Brightness in `[AMBIENT, AMBIENT + DIFFUSE]` for a surface with unit `normal`.
///
/// `cosine` is measured against the reversed light direction and the diffuse
/// term uses its negation, so the brightest surfaces are those whose normal is
/// aligned with `light_direction` itself.
pub fn intensity(normal: &Vector3d, light_direction: &Vector3d) -> f64 {
    let cosine = (-light_direction).dot(normal);
    AMBIENT + DIFFUSE * (-cosine).max(0.0)
}

/// Color of a lit surface point; only the red channel carries light
pub fn shade(normal: &Vector3d, light_direction: &Vector3d) -> Rgb {
    let red = (255.0 * intensity(normal, light_direction)).round().clamp(0.0, 255.0) as u8;
    Rgb::new(red, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn light() -> Vector3d {
        Vector3d::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn test_normal_along_light_is_fully_lit() {
        let normal = Vector3d::new(0.0, 0.0, 1.0);
        assert_relative_eq!(intensity(&normal, &light()), 1.0);
        assert_eq!(shade(&normal, &light()), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_opposing_normal_gets_ambient_only() {
        let ambient = Rgb::new((255.0 * AMBIENT).round() as u8, 0, 0);
        for normal in [Vector3d::new(0.0, 0.0, -1.0), Vector3d::new(1.0, 0.0, 0.0)] {
            assert_relative_eq!(intensity(&normal, &light()), AMBIENT);
            assert_eq!(shade(&normal, &light()), ambient);
        }
    }

    #[test]
    fn test_partial_alignment_rounds_to_nearest() {
        // cos 60deg = 0.5 -> 0.3 + 0.35 = 0.65 -> 165.75
        let normal = Vector3d::new(0.0, 3.0_f64.sqrt() / 2.0, 0.5);
        assert_relative_eq!(intensity(&normal, &light()), 0.65, epsilon = 1e-12);
        assert_eq!(shade(&normal, &light()).r, 166);
    }

    #[test]
    fn test_brightness_never_drops_as_normal_turns_towards_light() {
        let mut previous = 0u8;
        for step in 0..=180 {
            let angle = (180 - step) as f64 * std::f64::consts::PI / 180.0;
            let normal = Vector3d::new(angle.sin(), 0.0, angle.cos());
            let color = shade(&normal, &light());

            assert!(color.r >= previous, "step {}: {} < {}", step, color.r, previous);
            assert_eq!((color.g, color.b), (0, 0));
            previous = color.r;
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn test_brightness_falls_off_with_angle_to_light() {
        let light = Vector3d::new(-1.0, -1.0, 0.0).normalize();
        let aligned = light;
        let oblique = Vector3d::new(-1.0, 0.0, 0.0);
        let grazing = Vector3d::new(0.0, 0.0, 1.0);

        // All three sit on the lit side or its boundary, so only the diffuse term varies.
        assert_relative_eq!(intensity(&aligned, &light), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            intensity(&oblique, &light),
            0.3 + 0.7 * std::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-12
        );
        assert_relative_eq!(intensity(&grazing, &light), 0.3, epsilon = 1e-12);

        assert_eq!(shade(&aligned, &light).r, 255);
        assert_eq!(shade(&oblique, &light).r, 203);
        assert_eq!(shade(&grazing, &light).r, 77);
        assert!(shade(&aligned, &light).r > shade(&oblique, &light).r);
        assert!(shade(&oblique, &light).r > shade(&grazing, &light).r);
    }
}
