//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials. The camera casts jittered rays per pixel, the scene reports
//! the nearest hit, and materials decide how each ray continues.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod progress;
mod renderer;
mod sampling;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, Primitive};
pub use material::{reflect, refract, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{PixelBuffer, PixelSink, PpmWriter};
pub use progress::{LogProgress, NoProgress, Progress};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, sky_gradient, SHADOW_ACNE_EPSILON, SKY_BLUE,
};
pub use sampling::{
    gen_f32, gen_f32_range, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3_range, sample_square,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3, Vec3Ext};
