//! Core path tracing estimator.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded bounce depth as the only termination rule
//! - Sky gradient background for rays that escape
//! - Gamma correction and byte conversion for output

use crate::{Color, Hittable};
use glint_math::{Interval, Ray};
use rand::RngCore;

/// Lower bound on accepted hit distances.
///
/// Scattered rays start on the surface they left; without this offset
/// rounding error lets them hit that same surface again ("shadow acne").
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Color at the top of the sky gradient.
pub const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Range every output channel is clamped into before scaling to a byte.
const OUTPUT_INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene for at most `depth` surface
/// interactions. Each scatter multiplies its attenuation into a running
/// throughput; the path ends when it escapes to the sky, is absorbed, or
/// runs out of bounces. Absorption and exhausted depth both yield black.
pub fn ray_color(ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Compute sky gradient background.
///
/// Blends white into sky blue as the direction turns upward.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::ONE * (1.0 - a) + SKY_BLUE * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an accumulated sample sum to 8-bit RGB.
///
/// Divides by the sample count, gamma corrects, clamps to [0, 0.999] and
/// scales by 256 so every byte value gets an equal share of the range.
pub fn color_to_rgb8(sum: Color, samples: u32) -> [u8; 3] {
    let color = sum / samples.max(1) as f32;
    let to_byte = |c: f32| (256.0 * OUTPUT_INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}
