//! Projection layer for the historical map browser
//!
//! Derives everything the rendering collaborators consume — marker sets,
//! listings, detail content — from the temporal index and the engine state,
//! and defines the collaborator contracts themselves.

pub mod browser;
pub mod detail;
pub mod listing;
pub mod projector;
pub mod surface;

// Re-export commonly used types
pub use browser::MapBrowser;
pub use detail::{detail_content, DetailContent, DetailImage, NO_IMAGE_PLACEHOLDER};
pub use listing::{full_listing, ListEntry};
pub use projector::{visible_markers, IconDescriptor, MarkerDescriptor, MarkerRecord};
pub use surface::{DetailSurface, MapDefaults, MapSurface, FLY_TO_ZOOM};
