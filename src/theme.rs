//! Display theme and basemap tile sets
//!
//! The core only consumes the resolved light/dark value; how a preference is
//! stored or derived from the OS is the host's business.

use serde::{Deserialize, Serialize};

/// Resolved display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Host-side source of the resolved theme value
pub trait ThemeSource {
    fn resolved(&self) -> Theme;
}

/// A basemap tile layer description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    pub url_template: &'static str,
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

const DARK_TILES: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
const LIGHT_TILES: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";

impl Theme {
    /// Basemap tiles for this theme
    #[must_use]
    pub fn tile_set(&self) -> TileSet {
        TileSet {
            url_template: match self {
                Theme::Dark => DARK_TILES,
                Theme::Light => LIGHT_TILES,
            },
            subdomains: "abcd",
            max_zoom: 19,
        }
    }
}
