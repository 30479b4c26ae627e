// selection.rs — checkbox selections for the comparison tabs

use crate::catalog::{Resolution, SensorFormat};

/// Selected resolutions, kept in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSelection(Vec<Resolution>);

impl Default for ResolutionSelection {
    fn default() -> Self {
        Self(vec![Resolution::Mp10, Resolution::Mp40])
    }
}

impl ResolutionSelection {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, r: Resolution) -> bool {
        self.0.contains(&r)
    }

    pub fn toggle(&mut self, r: Resolution) {
        match self.0.binary_search(&r) {
            Ok(i) => {
                self.0.remove(i);
            }
            Err(i) => self.0.insert(i, r),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Resolution] {
        &self.0
    }
}

/// Selected sensor formats in the order they were ticked.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSelection(Vec<SensorFormat>);

impl Default for SensorSelection {
    fn default() -> Self {
        Self(vec![SensorFormat::FullFrame, SensorFormat::ApsC])
    }
}

impl SensorSelection {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, s: SensorFormat) -> bool {
        self.0.contains(&s)
    }

    pub fn toggle(&mut self, s: SensorFormat) {
        if let Some(i) = self.0.iter().position(|&x| x == s) {
            self.0.remove(i);
        } else {
            self.0.push(s);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[SensorFormat] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selections() {
        assert_eq!(
            ResolutionSelection::default().as_slice(),
            &[Resolution::Mp10, Resolution::Mp40]
        );
        assert_eq!(
            SensorSelection::default().as_slice(),
            &[SensorFormat::FullFrame, SensorFormat::ApsC]
        );
    }

    #[test]
    fn test_toggle_resolution_keeps_ascending_order() {
        let mut sel = ResolutionSelection::default();
        sel.toggle(Resolution::Mp100);
        sel.toggle(Resolution::Mp20);
        assert_eq!(
            sel.as_slice(),
            &[Resolution::Mp10, Resolution::Mp20, Resolution::Mp40, Resolution::Mp100]
        );

        sel.toggle(Resolution::Mp40);
        assert!(!sel.contains(Resolution::Mp40));
        assert_eq!(sel.as_slice(), &[Resolution::Mp10, Resolution::Mp20, Resolution::Mp100]);

        sel.toggle(Resolution::Mp40);
        assert_eq!(
            sel.as_slice(),
            &[Resolution::Mp10, Resolution::Mp20, Resolution::Mp40, Resolution::Mp100]
        );
    }

    #[test]
    fn test_toggle_to_empty() {
        let mut sel = ResolutionSelection::default();
        sel.toggle(Resolution::Mp10);
        sel.toggle(Resolution::Mp40);
        assert!(sel.is_empty());
        assert_eq!(sel, ResolutionSelection::empty());
    }

    #[test]
    fn test_toggle_sensor_appends() {
        let mut sel = SensorSelection::empty();
        sel.toggle(SensorFormat::OneInch);
        sel.toggle(SensorFormat::MediumFormat);
        sel.toggle(SensorFormat::ApsC);
        assert_eq!(
            sel.as_slice(),
            &[SensorFormat::OneInch, SensorFormat::MediumFormat, SensorFormat::ApsC]
        );
        sel.toggle(SensorFormat::MediumFormat);
        assert_eq!(sel.as_slice(), &[SensorFormat::OneInch, SensorFormat::ApsC]);
        assert!(!sel.is_empty());
    }
}
