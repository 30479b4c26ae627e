// optics.rs — focal length and field of view

/// Horizontal size of a full-frame (35mm) sensor in millimeters.
pub const FULL_FRAME_WIDTH_MM: f64 = 36.0;

pub const MIN_FOCAL_MM: u32 = 10;
pub const MAX_FOCAL_MM: u32 = 200;

/// Focal length whose field of view spans the whole reference photo.
pub const WIDEST_FOCAL_MM: u32 = MIN_FOCAL_MM;
pub const DEFAULT_FOCAL_MM: u32 = 50;

pub const FOCAL_PRESETS: [u32; 7] = [14, 24, 35, 50, 85, 135, 200];

/// Horizontal field of view in degrees for a lens of `focal_length_mm` on a
/// sensor `sensor_width_mm` wide.
///
/// Only meaningful for `focal_length_mm > 0`; [`FocalLength`] keeps callers in range.
pub fn focal_length_to_fov(focal_length_mm: f64, sensor_width_mm: f64) -> f64 {
    (2.0 * (sensor_width_mm / (2.0 * focal_length_mm)).atan()).to_degrees()
}

/// Focal length in whole millimeters, always within `[MIN_FOCAL_MM, MAX_FOCAL_MM]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FocalLength(u32);

impl FocalLength {
    pub fn new(mm: u32) -> Self {
        Self(mm.clamp(MIN_FOCAL_MM, MAX_FOCAL_MM))
    }

    pub fn widest() -> Self {
        Self(WIDEST_FOCAL_MM)
    }

    pub fn mm(self) -> u32 {
        self.0
    }

    /// Field of view on a full-frame sensor, in degrees.
    pub fn fov(self) -> f64 {
        focal_length_to_fov(f64::from(self.0), FULL_FRAME_WIDTH_MM)
    }
}

impl Default for FocalLength {
    fn default() -> Self {
        Self(DEFAULT_FOCAL_MM)
    }
}

impl From<u32> for FocalLength {
    fn from(mm: u32) -> Self {
        Self::new(mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.05;

    #[test]
    fn test_fov_known_values() {
        assert!((FocalLength::new(50).fov() - 39.6).abs() < EPSILON);
        assert!((FocalLength::new(10).fov() - 121.9).abs() < EPSILON);
        assert!((FocalLength::new(200).fov() - 10.3).abs() < EPSILON);
    }

    #[test]
    fn test_fov_strictly_decreasing() {
        let mut prev = f64::INFINITY;
        for mm in MIN_FOCAL_MM..=MAX_FOCAL_MM {
            let fov = FocalLength::new(mm).fov();
            assert!(fov < prev, "fov({mm}) = {fov} should be below {prev}");
            prev = fov;
        }
    }

    #[test]
    fn test_custom_sensor_width() {
        // Same ratio as full frame at double the focal length.
        let a = focal_length_to_fov(25.0, 18.0);
        let b = focal_length_to_fov(50.0, 36.0);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_focal_length_clamps_into_domain() {
        assert_eq!(FocalLength::new(0).mm(), MIN_FOCAL_MM);
        assert_eq!(FocalLength::new(5000).mm(), MAX_FOCAL_MM);
        assert_eq!(FocalLength::from(85).mm(), 85);
        assert_eq!(FocalLength::default().mm(), DEFAULT_FOCAL_MM);
        assert_eq!(FocalLength::widest().mm(), 10);
    }

    #[test]
    fn test_presets_are_in_domain_and_sorted() {
        assert!(FOCAL_PRESETS.windows(2).all(|w| w[0] < w[1]));
        for p in FOCAL_PRESETS {
            assert_eq!(FocalLength::new(p).mm(), p);
        }
    }
}
