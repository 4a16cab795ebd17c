//! Built-in scenes, each paired with the camera that frames it.

use glint_renderer::{
    gen_f32, gen_f32_range, random_vec3_range, CameraSettings, Color, Dielectric, HittableList,
    Lambertian, Material, Metal, Point3, Sphere, Vec3,
};
use rand::RngCore;
use std::sync::Arc;

/// Radius of the small spheres scattered over the ground.
const SMALL_RADIUS: f32 = 0.2;

/// Small spheres closer than this to the metal sphere's footprint are skipped.
const CLEARANCE: f32 = 0.9;

/// Ground, a 22 x 22 grid of small random spheres and three large ones.
///
/// Materials of the small spheres are chosen with the generator: 60%
/// diffuse, 15% glass, 25% metal. All glass spheres share one material.
pub fn final_scene(rng: &mut dyn RngCore) -> (HittableList, CameraSettings) {
    let mut world = HittableList::new();

    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.2, 0.5, 0.5)).into());
    world.add(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    let keep_clear = Point3::new(4.0, SMALL_RADIUS, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                SMALL_RADIUS,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - keep_clear).length() <= CLEARANCE {
                continue;
            }

            let material: Arc<Material> = if choose_mat < 0.6 {
                let albedo = random_vec3_range(rng, 0.0, 1.0) * random_vec3_range(rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo).into())
            } else if choose_mat < 0.75 {
                glass.clone()
            } else {
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_f32_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz).into())
            };
            world.add(Sphere::new(center, SMALL_RADIUS, material));
        }
    }

    let metal: Arc<Material> = Arc::new(Metal::new(Color::new(0.7, 0.2, 0.0), 0.0).into());
    world.add(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, metal));

    let diffuse: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.2, 0.5, 0.2)).into());
    world.add(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, diffuse));

    world.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass));

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 1200)
        .with_quality(20, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.2, 10.0);

    (world, camera)
}

/// Ground, a diffuse sphere between a hollow glass ball and a fuzzy metal one.
///
/// The glass ball is a shell: an inner sphere with negative radius flips
/// the normals so the air bubble refracts correctly.
pub fn showcase_scene() -> (HittableList, CameraSettings) {
    let mut world = HittableList::new();

    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)).into());
    let center: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)).into());
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    let metal: Arc<Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3).into());

    world.add(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, center));
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.add(Sphere::new(Point3::new(-1.0, 0.0, -1.0), -0.4, glass));
    world.add(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, metal));

    let camera = CameraSettings::default()
        .with_image(16.0 / 9.0, 400)
        .with_quality(100, 50)
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 10.0, 3.4);

    (world, camera)
}
