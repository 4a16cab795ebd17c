//! Camera for ray generation and the render loop.

use crate::output::PixelSink;
use crate::progress::Progress;
use crate::renderer::ray_color;
use crate::sampling::{random_in_unit_disk, sample_square};
use crate::{Color, Hittable, RenderResult};
use glint_math::{Point3, Ray, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Deserialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// User-facing camera configuration.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into scene
    pub max_depth: u32,

    /// Vertical view angle (field of view) in degrees
    pub vfov: f32,
    /// Point camera is looking from
    pub look_from: Point3,
    /// Point camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from camera look_from point to plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Set image width and aspect ratio; the height is derived from both.
    pub fn with_image(mut self, aspect_ratio: f32, image_width: u32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.image_width = image_width;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }
}

/// Camera for generating rays into the scene.
///
/// Built from [`CameraSettings`]; all derived geometry is computed up front,
/// so a camera is immutable and can be shared between render threads.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,

    // Derived by initialize()
    image_height: u32,
    samples_per_pixel: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a camera and derive its viewport from the settings.
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            settings,
            image_height: 1,
            samples_per_pixel: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    fn initialize(&mut self) {
        let s = &self.settings;

        self.image_height = ((s.image_width as f32 / s.aspect_ratio) as u32).max(1);

        self.samples_per_pixel = s.samples_per_pixel;
        if self.samples_per_pixel == 0 {
            log::warn!("samples_per_pixel is 0, rendering with 1 sample");
            self.samples_per_pixel = 1;
        }

        self.center = s.look_from;

        // Calculate viewport dimensions
        let theta = s.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * s.focus_dist;
        let viewport_width =
            viewport_height * (s.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        self.w = (s.look_from - s.look_at).normalize();
        self.u = s.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / s.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - s.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = s.focus_dist * (s.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "camera initialized: {}x{}, vfov {}, focus {}, defocus angle {}",
            s.image_width,
            self.image_height,
            s.vfov,
            s.focus_dist,
            s.defocus_angle
        );
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn image_width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Samples taken per pixel, never less than one.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.settings.max_depth
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray passes through a random point of the pixel's square and,
    /// when the lens has a defocus angle, starts from a random point of the
    /// defocus disk.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.settings.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Sum of `samples_per_pixel` independent estimates for pixel (i, j).
    ///
    /// The sum is not averaged; the pixel sink owns that step.
    pub fn sample_pixel(
        &self,
        i: u32,
        j: u32,
        world: &dyn Hittable,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut pixel_color = Color::ZERO;
        for _ in 0..self.samples_per_pixel {
            let ray = self.get_ray(i, j, rng);
            pixel_color += ray_color(&ray, self.settings.max_depth, world, rng);
        }
        pixel_color
    }

    /// Render the scene on the calling thread.
    ///
    /// Pixels reach the sink in scan order: rows top to bottom, each row left
    /// to right. The world must not change while rendering.
    pub fn render(
        &self,
        world: &dyn Hittable,
        sink: &mut dyn PixelSink,
        progress: &dyn Progress,
        rng: &mut dyn RngCore,
    ) -> RenderResult<()> {
        let (width, height) = (self.image_width(), self.image_height);
        log::info!(
            "Rendering {}x{} @ {} spp, max depth {}",
            width,
            height,
            self.samples_per_pixel,
            self.settings.max_depth
        );
        let start = Instant::now();

        sink.begin(width, height)?;
        for j in 0..height {
            for i in 0..width {
                let color = self.sample_pixel(i, j, world, rng);
                sink.write_pixel(color, self.samples_per_pixel)?;
            }
            progress.scanlines_remaining(height - j - 1);
        }
        sink.finish()?;
        progress.done();

        log::info!("Rendered in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Render the scene with one rayon task per row.
    ///
    /// Each row draws from its own generator seeded from `seed` and the row
    /// index, so the image depends only on the seed and not on how rows are
    /// scheduled across threads. Rows are buffered and written in scan order.
    pub fn render_parallel(
        &self,
        world: &dyn Hittable,
        sink: &mut dyn PixelSink,
        progress: &dyn Progress,
        seed: u64,
    ) -> RenderResult<()> {
        let (width, height) = (self.image_width(), self.image_height);
        log::info!(
            "Rendering {}x{} @ {} spp, max depth {} on {} threads",
            width,
            height,
            self.samples_per_pixel,
            self.settings.max_depth,
            rayon::current_num_threads()
        );
        let start = Instant::now();

        let remaining = AtomicU32::new(height);
        let rows: Vec<Vec<Color>> = (0..height)
            .into_par_iter()
            .map(|j| {
                let mut rng = row_rng(seed, j);
                let row = (0..width)
                    .map(|i| self.sample_pixel(i, j, world, &mut rng))
                    .collect();
                let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
                progress.scanlines_remaining(left);
                row
            })
            .collect();

        sink.begin(width, height)?;
        for color in rows.into_iter().flatten() {
            sink.write_pixel(color, self.samples_per_pixel)?;
        }
        sink.finish()?;
        progress.done();

        log::info!("Rendered in {:.2?}", start.elapsed());
        Ok(())
    }
}

/// Independent generator for one scanline.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::PixelBuffer;
    use crate::progress::NoProgress;
    use crate::{HittableList, Lambertian, Material, Sphere};
    use std::sync::{Arc, Mutex};

    fn small_scene() -> HittableList {
        let mut world = HittableList::new();
        let gray: Arc<Material> = Arc::new(Lambertian::new(Color::splat(0.5)).into());
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray.clone()));
        world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, gray));
        world
    }

    fn small_camera() -> Camera {
        Camera::new(
            CameraSettings::default()
                .with_image(2.0, 8)
                .with_quality(3, 4)
                .with_lens(90.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_camera_initialize() {
        let camera = Camera::new(
            CameraSettings::default()
                .with_image(2.0, 800)
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0),
        );

        assert_eq!(camera.center(), Vec3::ZERO);
        assert_eq!(camera.image_height(), 400);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(CameraSettings::default().with_position(
            Vec3::new(13.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::Y,
        ));

        for axis in [camera.u, camera.v, camera.w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(camera.u.dot(camera.v).abs() < 1e-5);
        assert!(camera.v.dot(camera.w).abs() < 1e-5);
        assert!(camera.w.dot(camera.u).abs() < 1e-5);
        // w points from the target back to the eye
        assert!(camera.w.dot(Vec3::new(13.0, 2.0, 3.0)) > 0.0);
    }

    #[test]
    fn test_image_height_is_floored_and_at_least_one() {
        let wide = Camera::new(CameraSettings::default().with_image(2.5, 400));
        assert_eq!(wide.image_height(), 160);

        let odd = Camera::new(CameraSettings::default().with_image(16.0 / 9.0, 100));
        assert_eq!(odd.image_height(), 56);

        let sliver = Camera::new(CameraSettings::default().with_image(50.0, 10));
        assert_eq!(sliver.image_height(), 1);
    }

    #[test]
    fn test_zero_samples_clamped_to_one() {
        let camera = Camera::new(CameraSettings::default().with_quality(0, 5));
        assert_eq!(camera.samples_per_pixel(), 1);
    }

    #[test]
    fn test_camera_ray_direction() {
        let camera = Camera::new(
            CameraSettings::default()
                .with_image(1.0, 100)
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0),
        );
        let mut rng = StdRng::seed_from_u64(42);

        // Center ray should point roughly towards -Z
        let ray = camera.get_ray(50, 50, &mut rng);
        assert!(ray.direction().z < 0.0);
        assert_eq!(ray.origin(), Vec3::ZERO);

        // Top-left pixel looks up and left, bottom-right down and right
        let tl = camera.get_ray(0, 0, &mut rng).direction();
        assert!(tl.x < 0.0 && tl.y > 0.0);
        let br = camera.get_ray(99, 99, &mut rng).direction();
        assert!(br.x > 0.0 && br.y < 0.0);
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let camera = Camera::new(
            CameraSettings::default()
                .with_image(1.0, 20)
                .with_lens(60.0, 0.0, 2.0),
        );
        let mut rng = StdRng::seed_from_u64(9);
        let du = camera.pixel_delta_u;
        let dv = camera.pixel_delta_v;

        for _ in 0..200 {
            let ray = camera.get_ray(7, 12, &mut rng);
            let pixel_center = camera.pixel00_loc + 7.0 * du + 12.0 * dv;
            // Without defocus the direction ends on the focus plane
            let offset = ray.origin() + ray.direction() - pixel_center;
            assert!(offset.dot(du).abs() / du.length_squared() <= 0.5 + 1e-4);
            assert!(offset.dot(dv).abs() / dv.length_squared() <= 0.5 + 1e-4);
        }
    }

    #[test]
    fn test_defocus_origins_lie_on_lens_disk() {
        let settings = CameraSettings::default()
            .with_position(Vec3::new(0.0, 1.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 10.0, 5.0);
        let camera = Camera::new(settings);
        let radius = 5.0 * (5.0_f32).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(17);

        let mut moved = false;
        for _ in 0..200 {
            let ray = camera.get_ray(50, 50, &mut rng);
            let offset = ray.origin() - camera.center();
            assert!(offset.length() < radius + 1e-4);
            assert!(offset.dot(camera.w).abs() < 1e-4);
            moved |= offset.length() > 1e-3;
        }
        assert!(moved);
    }

    #[test]
    fn test_render_writes_every_pixel_in_scan_order() {
        let camera = small_camera();
        let world = small_scene();
        let mut buffer = PixelBuffer::new();
        let mut rng = StdRng::seed_from_u64(1);

        camera
            .render(&world, &mut buffer, &NoProgress, &mut rng)
            .expect("render succeeds");

        assert_eq!((buffer.width(), buffer.height()), (8, 4));
        assert_eq!(buffer.sums().len(), 32);
        assert!(buffer.samples().iter().all(|&n| n == 3));
        // Top-left corner sees only sky, bottom-right only ground
        let top = buffer.sums()[0].y;
        let bottom = buffer.sums()[31].y;
        assert!(top > bottom, "top {top} bottom {bottom}");
    }

    #[test]
    fn test_render_is_reproducible_per_seed() {
        let camera = small_camera();
        let world = small_scene();

        let mut first = PixelBuffer::new();
        let mut second = PixelBuffer::new();
        camera
            .render(&world, &mut first, &NoProgress, &mut StdRng::seed_from_u64(5))
            .expect("render succeeds");
        camera
            .render(&world, &mut second, &NoProgress, &mut StdRng::seed_from_u64(5))
            .expect("render succeeds");

        assert_eq!(first.sums(), second.sums());
    }

    #[test]
    fn test_parallel_render_independent_of_thread_count() {
        let camera = small_camera();
        let world = small_scene();

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .expect("thread pool");
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .expect("thread pool");

        let mut a = PixelBuffer::new();
        let mut b = PixelBuffer::new();
        single
            .install(|| camera.render_parallel(&world, &mut a, &NoProgress, 77))
            .expect("render succeeds");
        multi
            .install(|| camera.render_parallel(&world, &mut b, &NoProgress, 77))
            .expect("render succeeds");

        assert_eq!(a.sums().len(), 32);
        assert_eq!(a.sums(), b.sums());
        assert!(a.samples().iter().all(|&n| n == 3));
    }

    struct Recorder(Mutex<Vec<u32>>);

    impl Progress for Recorder {
        fn scanlines_remaining(&self, remaining: u32) {
            self.0.lock().expect("lock").push(remaining);
        }
    }

    #[test]
    fn test_progress_counts_down() {
        let camera = small_camera();
        let world = small_scene();
        let recorder = Recorder(Mutex::new(Vec::new()));
        let mut buffer = PixelBuffer::new();

        camera
            .render(&world, &mut buffer, &recorder, &mut StdRng::seed_from_u64(0))
            .expect("render succeeds");
        assert_eq!(*recorder.0.lock().expect("lock"), vec![3, 2, 1, 0]);

        let parallel = Recorder(Mutex::new(Vec::new()));
        camera
            .render_parallel(&world, &mut buffer, &parallel, 0)
            .expect("render succeeds");
        let mut seen = parallel.0.lock().expect("lock").clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "aspect_ratio": 1.5,
            "image_width": 300,
            "look_from": [13.0, 2.0, 3.0],
            "defocus_angle": 0.6
        }"#;
        let settings: CameraSettings = serde_json::from_str(json).expect("valid settings");

        assert_eq!(settings.image_width, 300);
        assert_eq!(settings.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(settings.defocus_angle, 0.6);
        // Unspecified fields keep their defaults
        assert_eq!(settings.samples_per_pixel, 10);
        assert_eq!(settings.vup, Vec3::Y);
        assert_eq!(Camera::new(settings).image_height(), 200);

        assert!(serde_json::from_str::<CameraSettings>(r#"{"fov": 30}"#).is_err());
    }
}
