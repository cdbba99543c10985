//! Console stand-ins for the rendering collaborators
//!
//! The real deployment hands markers to a tile-map surface and a modal
//! dialog; the terminal build prints them instead. The engine cannot tell
//! the difference, which is the point of the surface traits.

use cm_core::records::Coordinates;
use cm_views::detail::{DetailContent, DetailImage};
use cm_views::projector::{IconDescriptor, MarkerDescriptor};
use cm_views::surface::{DetailSurface, MapDefaults, MapSurface};

/// Prints render calls instead of drawing them
pub struct ConsoleSurface {
    defaults: MapDefaults,
}

impl ConsoleSurface {
    pub fn new(defaults: MapDefaults) -> Self {
        Self { defaults }
    }
}

fn describe_icon(icon: &IconDescriptor) -> String {
    match icon {
        IconDescriptor::Bread { image } => format!("photo badge [{}]", image),
        IconDescriptor::History { era, title } => format!("text badge [{} / {}]", era, title),
    }
}

impl MapSurface for ConsoleSurface {
    fn render_markers(&self, markers: &[MarkerDescriptor]) {
        println!("map: {} marker(s)", markers.len());
        for (position, marker) in markers.iter().enumerate() {
            println!(
                "  [{position}] {} ({:.2}, {:.2}) {} - {}",
                marker.source.as_str(),
                marker.coordinates.latitude,
                marker.coordinates.longitude,
                describe_icon(&marker.icon),
                marker.record.popup_label(),
            );
        }
    }

    fn recenter(&self) {
        println!(
            "map: recenter to ({:.1}, {:.1}) zoom {:.1}",
            self.defaults.center.latitude, self.defaults.center.longitude, self.defaults.zoom
        );
    }

    fn fly_to(&self, target: Coordinates, zoom: f64) {
        println!(
            "map: fly to ({:.2}, {:.2}) zoom {:.1}",
            target.latitude, target.longitude, zoom
        );
    }
}

impl DetailSurface for ConsoleSurface {
    fn show(&self, content: &DetailContent) {
        println!("detail: {}", content.heading);
        for (label, value) in &content.fields {
            println!("  {label}: {value}");
        }
        if !content.body.is_empty() {
            println!("  {}", content.body);
        }
        match &content.image {
            DetailImage::Asset(name) => println!("  image: {name}"),
            DetailImage::Placeholder(text) => println!("  {text}"),
        }
    }

    fn dismiss(&self) {
        println!("detail: closed");
    }
}
