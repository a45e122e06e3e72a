//! Integration tests for raycrate-render
//!
//! These tests render whole viewports of the default scene and check the
//! image-level properties the coordinator relies on.

use raycrate_core::{
    intersect_sphere, Error, ImageBuffer, Point3d, Ray, Rgb, Scene, Sphere, Vector3d, Viewport,
};
use raycrate_render::*;

fn lit_pixel_count(image: &ImageBuffer) -> usize {
    image.pixels().filter(|px| *px != Rgb::BLACK).count()
}

#[test]
fn test_two_by_two_viewport_samples_only_corners() {
    let viewport = Viewport::new(2, 2, 1.0).unwrap();
    let image = render(&viewport, &Scene::default()).unwrap();

    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.pixel_density(), 1.0);
    // Corner rays sit at distance sqrt(0.5) from the axis, outside the 0.5 radius.
    assert!(image.pixels().all(|px| px == Rgb::BLACK));
}

#[test]
fn test_image_tagged_with_device_size() {
    let viewport = Viewport::new(40, 30, 2.0).unwrap();
    let image = render(&viewport, &Scene::default()).unwrap();

    assert_eq!(image.dimensions(), (80, 60));
    assert_eq!(image.pixel_density(), 2.0);
    assert!(image.matches(&viewport));
}

#[test]
fn test_render_is_deterministic() {
    let viewport = Viewport::new(120, 90, 1.25).unwrap();
    let scene = Scene::default();

    let first = render(&viewport, &scene).unwrap();
    let second = render(&viewport, &scene).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_dedicated_pool_matches_global_pool() {
    let viewport = Viewport::new(50, 70, 1.0).unwrap();
    let scene = Scene::default();
    let pool = build_thread_pool(&ThreadPoolConfig::default().with_threads(3)).unwrap();

    let pooled = pool.install(|| render(&viewport, &scene)).unwrap();
    let global = global_thread_pool()
        .unwrap()
        .install(|| render(&viewport, &scene))
        .unwrap();
    assert_eq!(pooled, global);
}

#[test]
fn test_every_pixel_matches_per_ray_trace() {
    let viewport = Viewport::new(17, 11, 1.0).unwrap();
    let scene = Scene::default();
    let image = render(&viewport, &scene).unwrap();
    let camera = Camera::new(&viewport).unwrap();

    for y in 0..image.height() {
        for x in 0..image.width() {
            let ray = camera.ray(x, y).unwrap();
            let expected = match intersect_sphere(&ray, scene.sphere()).unwrap() {
                Some(hit) => shade(&hit.normal, &scene.light_direction()),
                None => Rgb::BLACK,
            };
            assert_eq!(image.pixel(x, y), Some(expected), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_sphere_footprint_is_centered_and_size_independent() {
    let scene = Scene::default();
    let small = render(&Viewport::new(100, 100, 1.0).unwrap(), &scene).unwrap();
    let large = render(&Viewport::new(200, 200, 1.0).unwrap(), &scene).unwrap();

    // The sphere covers about pi/4 of the square screen at any resolution.
    let small_ratio = lit_pixel_count(&small) as f64 / (100.0 * 100.0);
    let large_ratio = lit_pixel_count(&large) as f64 / (200.0 * 200.0);
    let quarter_pi = std::f64::consts::FRAC_PI_4;
    assert!((small_ratio - quarter_pi).abs() < 0.03, "small ratio {}", small_ratio);
    assert!((large_ratio - quarter_pi).abs() < 0.02, "large ratio {}", large_ratio);

    assert_ne!(small.pixel(50, 50), Some(Rgb::BLACK));
    assert_eq!(small.pixel(0, 0), Some(Rgb::BLACK));
}

#[test]
fn test_wide_viewport_keeps_sphere_round() {
    let image = render(&Viewport::new(300, 100, 1.0).unwrap(), &Scene::default()).unwrap();

    // Left and right thirds lie beyond the sphere's silhouette.
    for y in 0..image.height() {
        assert_eq!(image.pixel(10, y), Some(Rgb::BLACK));
        assert_eq!(image.pixel(289, y), Some(Rgb::BLACK));
    }
    assert_ne!(image.pixel(150, 50), Some(Rgb::BLACK));
}

#[test]
fn test_lit_side_follows_light_direction() {
    let scene = Scene::default();
    let image = render(&Viewport::new(101, 101, 1.0).unwrap(), &scene).unwrap();

    // Light runs towards -x/-y, so the upper-left limb is brighter than the lower-right one.
    let upper_left = image.pixel(50 - 30, 50 - 30).unwrap();
    let lower_right = image.pixel(50 + 30, 50 + 30).unwrap();
    assert!(upper_left.r > lower_right.r);
    assert_eq!(lower_right.r, (255.0 * AMBIENT).round() as u8);
}

#[test]
fn test_degenerate_viewports_fail_fast() {
    let scene = Scene::default();
    for viewport in [
        Viewport::new(1, 1, 1.0).unwrap(),
        Viewport::new(100, 1, 1.0).unwrap(),
        Viewport::new(4, 4, 0.2).unwrap(),
    ] {
        assert!(matches!(
            render(&viewport, &scene),
            Err(Error::DegenerateViewport { .. })
        ));
    }
}

#[test]
fn test_custom_scene_sphere_behind_camera_still_renders() {
    let scene = Scene::new(
        Sphere::new(Point3d::new(0.0, 0.0, -10.0), 0.5),
        Vector3d::new(0.0, 0.0, -1.0),
    )
    .unwrap();
    let image = render(&Viewport::new(5, 5, 1.0).unwrap(), &scene).unwrap();

    let ray = Ray::new(Point3d::origin(), Point3d::new(0.0, 0.0, 1.0)).unwrap();
    let hit = intersect_sphere(&ray, scene.sphere()).unwrap().unwrap();
    assert!(hit.distance < 0.0);
    assert_eq!(image.pixel(2, 2), Some(shade(&hit.normal, &scene.light_direction())));
}
