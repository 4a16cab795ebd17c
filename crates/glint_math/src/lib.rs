// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color. Channels are nominally in [0, 1] but are not clamped.
pub type Color = Vec3;

/// Threshold below which every component counts as zero in [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Helpers glam does not provide directly.
pub trait Vec3Ext {
    /// True if the vector is close to zero in every dimension.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_compound_multiply_scales_every_component() {
        let mut c = Color::new(1.0, 2.0, 3.0);
        c *= 2.0;
        assert_eq!(c, Color::new(2.0, 4.0, 6.0));

        let mut sum = Color::ZERO;
        sum += Color::new(0.25, 0.5, 1.0);
        sum += Color::new(0.25, 0.5, 1.0);
        assert_eq!(sum, Color::new(0.5, 1.0, 2.0));
    }

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
        assert!(!Vec3::X.near_zero());
    }
}
