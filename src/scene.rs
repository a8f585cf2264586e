//! scene.rs — Typed settings for the external rendering collaborator.
//!
//! The globe, layers, symbology and popup are owned by the mapping library;
//! this module only carries the configuration it is constructed with. The
//! defaults reproduce the original scene: a world-imagery globe centered
//! over India, plate boundaries as red 3D lines, and PAGER events as circle
//! markers colored by alert level and sized by magnitude.

use serde::{Deserialize, Serialize};

use crate::alert::AlertLevel;
use crate::source::config::DEFAULT_FEED_URL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub longitude: f64,
    pub latitude: f64,
    /// Camera altitude in meters.
    pub elevation_m: f64,
    pub heading: f64,
    pub tilt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub basemap_tile_url: String,
    pub quality_profile: String,
    pub alpha_compositing: bool,
    pub stars_enabled: bool,
    pub atmosphere_enabled: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                longitude: 78.9629,
                latitude: 20.5937,
                elevation_m: 20_000_000.0,
                heading: 0.0,
                tilt: 0.0,
            },
            basemap_tile_url:
                "https://services.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer"
                    .to_string(),
            quality_profile: "high".to_string(),
            alpha_compositing: true,
            stars_enabled: true,
            atmosphere_enabled: true,
        }
    }
}

/// RGBA color, components 0-255 with alpha 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateBoundaryLayerConfig {
    pub url: String,
    pub line_color: Rgba,
    pub line_width: f64,
}

impl Default for PlateBoundaryLayerConfig {
    fn default() -> Self {
        Self {
            url: "https://services2.arcgis.com/cFEFS0EWrhfDeVw9/arcgis/rest/services/plate_tectonics_boundaries/FeatureServer"
                .to_string(),
            line_color: Rgba(224, 52, 40, 0.7),
            line_width: 3.0,
        }
    }
}

/// Circle-marker outline color for one alert level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSymbol {
    pub level: AlertLevel,
    pub outline_color: String,
    pub outline_width: f64,
}

/// Marker size interpolation stop keyed on magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeStop {
    pub magnitude: f64,
    pub size_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupTemplateConfig {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeLayerConfig {
    pub url: String,
    pub copyright: String,
    pub title: String,
    pub symbology: Vec<AlertSymbol>,
    pub size_stops: Vec<SizeStop>,
    pub popup: PopupTemplateConfig,
}

impl Default for QuakeLayerConfig {
    fn default() -> Self {
        let symbol = |level: AlertLevel, color: &str| AlertSymbol {
            level,
            outline_color: color.to_string(),
            outline_width: 1.0,
        };
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            copyright: "USGS-PAGER-Earthquakes".to_string(),
            title: "USGS Earthquakes".to_string(),
            symbology: vec![
                symbol(AlertLevel::Red, "red"),
                symbol(AlertLevel::Orange, "orange"),
                symbol(AlertLevel::Yellow, "yellow"),
                symbol(AlertLevel::Green, "#136d15"),
            ],
            size_stops: vec![
                SizeStop {
                    magnitude: 4.5,
                    size_px: 1.0,
                },
                SizeStop {
                    magnitude: 6.0,
                    size_px: 20.0,
                },
                SizeStop {
                    magnitude: 8.0,
                    size_px: 60.0,
                },
            ],
            popup: PopupTemplateConfig {
                title: "Earthquake Info".to_string(),
                content: "Magnitude <b>{mag}</b> {type} hit {place} on <b>{time}</b> <br/><br/>  <a href={url}>More info</a>"
                    .to_string(),
            },
        }
    }
}
