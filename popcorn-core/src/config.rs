use serde::{Deserialize, Serialize};

use crate::colour::ColourMode;
use crate::error::CoreError;
use crate::plot::registry;

/// Range of the log-scale levels control: `10^0 ..= 10^4`.
pub const LEVELS_SLIDER_RANGE: std::ops::RangeInclusive<f64> = 0.0..=4.0;

/// The values external controls set: level count, plot name and colour mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_levels")]
    pub levels: u32,
    #[serde(default = "default_plot")]
    pub plot: String,
    #[serde(default)]
    pub colour: ColourMode,
}

fn default_levels() -> u32 {
    100
}
fn default_plot() -> String {
    "Normal".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            plot: default_plot(),
            colour: ColourMode::default(),
        }
    }
}

impl Settings {
    /// Check that `levels >= 1` and the plot name is registered.
    pub fn validate(&self) -> crate::Result<()> {
        if self.levels < 1 {
            return Err(CoreError::InvalidLevels(i64::from(self.levels)));
        }
        if registry().lookup(&self.plot).is_none() {
            return Err(CoreError::UnknownPlot(self.plot.clone()));
        }
        Ok(())
    }
}

/// `floor(10^value)`, never below 1.
pub fn levels_from_slider(value: f64) -> u32 {
    let levels = 10f64.powf(value).floor();
    if levels.is_nan() || levels < 1.0 {
        1
    } else {
        levels.min(f64::from(u32::MAX)) as u32
    }
}

/// Slider position that maps back to `levels`.
pub fn slider_from_levels(levels: u32) -> f64 {
    f64::from(levels.max(1)).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let s = Settings::default();
        assert_eq!(s.levels, 100);
        assert_eq!(s.plot, "Normal");
        assert_eq!(s.colour, ColourMode::Black);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn invalid_settings() {
        let zero = Settings {
            levels: 0,
            ..Settings::default()
        };
        assert_eq!(zero.validate(), Err(CoreError::InvalidLevels(0)));
        let unknown = Settings {
            plot: "Hyperbolic".into(),
            ..Settings::default()
        };
        assert!(matches!(unknown.validate(), Err(CoreError::UnknownPlot(_))));
    }

    #[test]
    fn slider_mapping() {
        assert_eq!(levels_from_slider(0.0), 1);
        assert_eq!(levels_from_slider(2.0), 100);
        assert_eq!(levels_from_slider(2.5), 316);
        assert_eq!(levels_from_slider(4.0), 10_000);
        assert_eq!(levels_from_slider(-1.0), 1);
        assert_eq!(levels_from_slider(f64::NAN), 1);
    }

    #[test]
    fn slider_inverse() {
        for levels in [1, 10, 250, 10_000] {
            let back = levels_from_slider(slider_from_levels(levels) + 1e-12);
            assert_eq!(back, levels);
        }
    }

    #[test]
    fn settings_json_round_trip() {
        let s = Settings {
            levels: 42,
            plot: "Semicircle".into(),
            colour: ColourMode::Symmetric,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"symmetric\""));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"levels": 7}"#).unwrap();
        assert_eq!(s.levels, 7);
        assert_eq!(s.plot, "Normal");
        assert_eq!(s.colour, ColourMode::Black);
    }
}
