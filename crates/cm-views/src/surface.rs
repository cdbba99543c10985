//! Contracts for the rendering collaborators
//!
//! The tile surface, clustering layer and detail dialog live outside this
//! system; these traits are the whole of what the engine asks of them.

use cm_core::records::Coordinates;

use crate::detail::DetailContent;
use crate::projector::MarkerDescriptor;

/// Zoom level used when a list activation flies to a record
pub const FLY_TO_ZOOM: f64 = 5.0;

/// Default view restored by `MapSurface::recenter`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: Coordinates::new(20.0, 0.0),
            zoom: 2.0,
        }
    }
}

/// Map rendering surface.
///
/// Clustering wraps this surface visually and accepts the same marker
/// list; it needs no contract of its own.
pub trait MapSurface: Send + Sync {
    /// Replace the rendered marker set
    fn render_markers(&self, markers: &[MarkerDescriptor]);

    /// Restore the default center and zoom
    fn recenter(&self);

    /// Animate to `target` at `zoom`
    fn fly_to(&self, target: Coordinates, zoom: f64);
}

/// Detail dialog surface
pub trait DetailSurface: Send + Sync {
    /// Open (or refresh) the dialog with derived content
    fn show(&self, content: &DetailContent);

    /// Close the dialog
    fn dismiss(&self);
}
