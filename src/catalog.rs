// catalog.rs — static resolution and sensor tables

/// Sensor resolutions offered for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Mp10,
    Mp20,
    Mp30,
    Mp40,
    Mp60,
    Mp100,
}

impl Resolution {
    pub const ALL: [Resolution; 6] = [
        Resolution::Mp10,
        Resolution::Mp20,
        Resolution::Mp30,
        Resolution::Mp40,
        Resolution::Mp60,
        Resolution::Mp100,
    ];

    /// The largest entry; its width is the reference for block scaling.
    pub const LARGEST: Resolution = Resolution::Mp100;

    pub fn megapixels(self) -> u32 {
        match self {
            Resolution::Mp10 => 10,
            Resolution::Mp20 => 20,
            Resolution::Mp30 => 30,
            Resolution::Mp40 => 40,
            Resolution::Mp60 => 60,
            Resolution::Mp100 => 100,
        }
    }

    /// Pixel dimensions (width, height) of a typical 3:2 / 4:3 sensor at this resolution.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Mp10 => (3888, 2592),
            Resolution::Mp20 => (5472, 3648),
            Resolution::Mp30 => (6720, 4480),
            Resolution::Mp40 => (7744, 5163),
            Resolution::Mp60 => (9504, 6336),
            Resolution::Mp100 => (11648, 8736),
        }
    }

    pub fn total_pixels(self) -> u64 {
        let (w, h) = self.dimensions();
        u64::from(w) * u64::from(h)
    }

    /// File name of the gallery sample, relative to the images directory.
    pub fn sample_file(self) -> String {
        format!("{}.jpg", self.megapixels())
    }
}

/// Named physical sensor size classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorFormat {
    MediumFormat,
    FullFrame,
    ApsC,
    MicroFourThirds,
    OneInch,
    TwoThirdsInch,
    OneOver1_7Inch,
    OneOver2_3Inch,
    OneThirdInch,
}

impl SensorFormat {
    /// Display order of the picker, largest first.
    pub const ALL: [SensorFormat; 9] = [
        SensorFormat::MediumFormat,
        SensorFormat::FullFrame,
        SensorFormat::ApsC,
        SensorFormat::MicroFourThirds,
        SensorFormat::OneInch,
        SensorFormat::TwoThirdsInch,
        SensorFormat::OneOver1_7Inch,
        SensorFormat::OneOver2_3Inch,
        SensorFormat::OneThirdInch,
    ];

    /// Widest format; its width is the reference for block scaling.
    pub const LARGEST: SensorFormat = SensorFormat::MediumFormat;

    /// Stable identifier, also the suffix of the `sensor.<key>` translation.
    pub fn key(self) -> &'static str {
        match self {
            SensorFormat::MediumFormat => "medium-format",
            SensorFormat::FullFrame => "full-frame",
            SensorFormat::ApsC => "aps-c",
            SensorFormat::MicroFourThirds => "m43",
            SensorFormat::OneInch => "1-inch",
            SensorFormat::TwoThirdsInch => "2-3-inch",
            SensorFormat::OneOver1_7Inch => "1-1.7-inch",
            SensorFormat::OneOver2_3Inch => "1-2.3-inch",
            SensorFormat::OneThirdInch => "1-3-inch",
        }
    }

    /// (width, height) in millimeters.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            SensorFormat::MediumFormat => (53.0, 40.0),
            SensorFormat::FullFrame => (36.0, 24.0),
            SensorFormat::ApsC => (23.6, 15.6),
            SensorFormat::MicroFourThirds => (17.3, 13.0),
            SensorFormat::OneInch => (13.2, 8.8),
            SensorFormat::TwoThirdsInch => (8.8, 6.6),
            SensorFormat::OneOver1_7Inch => (7.6, 5.7),
            SensorFormat::OneOver2_3Inch => (6.3, 4.7),
            SensorFormat::OneThirdInch => (4.8, 3.6),
        }
    }

    pub fn area_mm2(self) -> f64 {
        let (w, h) = self.dimensions_mm();
        w * h
    }

    pub fn english_name(self) -> &'static str {
        match self {
            SensorFormat::MediumFormat => "Medium Format",
            SensorFormat::FullFrame => "Full Frame (35mm)",
            SensorFormat::ApsC => "APS-C",
            SensorFormat::MicroFourThirds => "M43",
            SensorFormat::OneInch => "1 inch",
            SensorFormat::TwoThirdsInch => "2/3 inch",
            SensorFormat::OneOver1_7Inch => "1/1.7 inch",
            SensorFormat::OneOver2_3Inch => "1/2.3 inch",
            SensorFormat::OneThirdInch => "1/3 inch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolutions_ascend() {
        let mps: Vec<u32> = Resolution::ALL.iter().map(|r| r.megapixels()).collect();
        assert_eq!(mps, vec![10, 20, 30, 40, 60, 100]);
        assert!(Resolution::ALL.windows(2).all(|w| w[0].total_pixels() < w[1].total_pixels()));
    }

    #[test]
    fn test_largest_resolution_is_widest() {
        let widest = Resolution::ALL.iter().map(|r| r.dimensions().0).max();
        assert_eq!(widest, Some(Resolution::LARGEST.dimensions().0));
    }

    #[test]
    fn test_sample_file_names() {
        assert_eq!(Resolution::Mp60.sample_file(), "60.jpg");
        assert_eq!(Resolution::Mp100.sample_file(), "100.jpg");
    }

    #[test]
    fn test_sensor_keys_unique() {
        let mut keys: Vec<&str> = SensorFormat::ALL.iter().map(|s| s.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), SensorFormat::ALL.len());
    }

    #[test]
    fn test_sensors_listed_largest_first() {
        assert!(SensorFormat::ALL.windows(2).all(|w| w[0].area_mm2() > w[1].area_mm2()));
        assert_eq!(SensorFormat::ALL[0], SensorFormat::LARGEST);
        assert_eq!(SensorFormat::FullFrame.dimensions_mm(), (36.0, 24.0));
    }
}
