//! Tunables for the backdrop and the per-mode render snapshot derived from them.
//!
//! `NetworkOptions` can be supplied by the page as a JSON object; every field
//! is optional and falls back to the look of the documentation site.

use crate::color::Color;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid network options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid network options: {0} must be a non-negative number")]
    OutOfRange(&'static str),
}

/// Fill color for particles and stroke color for the edges between them.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Palette {
    pub particle: Color,
    pub line: Color,
}

impl Palette {
    /// Emerald-400 at low opacity, for black backgrounds.
    pub const DARK: Palette = Palette {
        particle: Color::from_u32(0x34d39926),
        line: Color::from_u32(0x34d3990d),
    };

    /// Emerald-500 at low opacity, for white backgrounds.
    pub const LIGHT: Palette = Palette {
        particle: Color::from_u32(0x10b98126),
        line: Color::from_u32(0x10b9810d),
    };
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkOptions {
    pub particle_count: usize,
    /// Pixels; pairs closer than this are joined by an edge.
    pub connection_distance: f64,
    /// Pixels per tick; each velocity component is drawn from `[-speed/2, speed/2)`.
    pub speed: f64,
    pub particle_radius: f64,
    pub line_width: f64,
    pub dark: Palette,
    pub light: Palette,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        NetworkOptions {
            particle_count: 45,
            connection_distance: 160.0,
            speed: 0.25,
            particle_radius: 2.0,
            line_width: 1.0,
            dark: Palette::DARK,
            light: Palette::LIGHT,
        }
    }
}

impl NetworkOptions {
    pub fn from_json(json: &str) -> Result<NetworkOptions, OptionsError> {
        let options: NetworkOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        let lengths = [
            ("connection_distance", self.connection_distance),
            ("speed", self.speed),
            ("particle_radius", self.particle_radius),
            ("line_width", self.line_width),
        ];
        for (name, value) in lengths.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(OptionsError::OutOfRange(*name));
            }
        }
        Ok(())
    }
}

/// Everything the renderer and the seeding step read for one animation
/// session. Replaced wholesale when the page flips dark/light mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub dark_mode: bool,
    pub particle_color: Color,
    pub line_color: Color,
    pub particle_radius: f64,
    pub line_width: f64,
    pub connection_distance: f64,
    pub speed: f64,
}

impl RenderConfig {
    pub fn new(options: &NetworkOptions, dark_mode: bool) -> RenderConfig {
        let palette = if dark_mode { options.dark } else { options.light };
        RenderConfig {
            dark_mode,
            particle_color: palette.particle,
            line_color: palette.line,
            particle_radius: options.particle_radius,
            line_width: options.line_width,
            connection_distance: options.connection_distance,
            speed: options.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_look() {
        let options = NetworkOptions::default();
        assert_eq!(options.particle_count, 45);
        assert_eq!(options.connection_distance, 160.0);
        assert_eq!(options.speed, 0.25);
        assert_eq!(options.particle_radius, 2.0);
        assert_eq!(options.line_width, 1.0);
    }

    #[test]
    fn mode_selects_palette() {
        let options = NetworkOptions::default();
        let dark = RenderConfig::new(&options, true);
        let light = RenderConfig::new(&options, false);

        assert_eq!(dark.particle_color.to_css(), "rgba(52, 211, 153, 0.149)");
        assert_eq!(dark.line_color.to_css(), "rgba(52, 211, 153, 0.051)");
        assert_eq!(light.particle_color.to_css(), "rgba(16, 185, 129, 0.149)");
        assert_eq!(light.line_color.to_css(), "rgba(16, 185, 129, 0.051)");
        assert_eq!(dark.connection_distance, light.connection_distance);
        assert_eq!(dark.speed, light.speed);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options =
            NetworkOptions::from_json(r##"{"particle_count": 60, "dark": {"particle": "#ffffff", "line": "#ffffff20"}}"##)
                .unwrap();
        assert_eq!(options.particle_count, 60);
        assert_eq!(options.connection_distance, 160.0);
        assert_eq!(options.dark.particle, Color::from_u32(0xffffffff));
        assert_eq!(options.dark.line, Color::from_u32(0xffffff20));
        assert_eq!(options.light, Palette::LIGHT);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(NetworkOptions::from_json("{"), Err(OptionsError::Json(_))));
        assert!(matches!(
            NetworkOptions::from_json(r#"{"particle_count": -1}"#),
            Err(OptionsError::Json(_))
        ));
        assert!(matches!(
            NetworkOptions::from_json(r#"{"speed": -0.5}"#),
            Err(OptionsError::OutOfRange("speed"))
        ));
        let err = NetworkOptions::from_json(r##"{"light": {"particle": "green", "line": "#000000"}}"##).unwrap_err();
        assert!(err.to_string().contains("must start with '#'"), "{}", err);
    }
}
