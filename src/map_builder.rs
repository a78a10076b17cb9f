//! Turns filtered rows into a toolkit-independent description of the map.
//!
//! The GTK layer in `ui::map` draws a [`MapView`] onto a libshumate widget;
//! nothing here touches the toolkit.

use crate::config::MapSettings;
use crate::data::ProjectRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: f64,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub tile_url: String,
    pub markers: Vec<MarkerSpec>,
}

/// A single point on the map. Every marker shares the same visual style.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub latitude: f64,
    pub longitude: f64,
    /// Shown on hover.
    pub tooltip: String,
    pub popup: PopupContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub heading: String,
    pub badge: String,
    pub screen_size: String,
    /// Passed through untouched; a bad URL only breaks the image.
    pub image_url: String,
}

pub fn build_map(rows: &[ProjectRecord], settings: &MapSettings) -> MapView {
    let markers = rows.iter().map(marker_for).collect::<Vec<_>>();

    tracing::debug!(markers = markers.len(), "built map view");

    MapView {
        center: (settings.center_latitude, settings.center_longitude),
        zoom: settings.zoom,
        min_zoom: settings.min_zoom,
        max_zoom: settings.max_zoom,
        tile_url: settings.tile_url.clone(),
        markers,
    }
}

fn marker_for(row: &ProjectRecord) -> MarkerSpec {
    MarkerSpec {
        latitude: row.latitude,
        longitude: row.longitude,
        tooltip: row.project_name.clone(),
        popup: PopupContent {
            heading: row.project_name.clone(),
            badge: row.category.clone(),
            screen_size: row.screen_size.clone(),
            image_url: row.image_url.clone(),
        },
    }
}
