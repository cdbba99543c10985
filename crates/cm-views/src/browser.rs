//! Browser orchestration
//!
//! `MapBrowser` wires the user-facing controls to the engine: cursor steps
//! re-project the marker set, activations drive the selection state and the
//! detail dialog, and a reset recenters the map surface.

use cm_core::navigation::{year_label, YearContext, YearCursor, YearSubscriber, YEAR_STEP};
use cm_core::records::YearCategory;
use cm_core::selection::{Selection, SelectionState};
use cm_data::index::TemporalIndex;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::detail::detail_content;
use crate::listing::{full_listing, ListEntry};
use crate::projector::{visible_markers, MarkerDescriptor};
use crate::surface::{DetailSurface, MapSurface, FLY_TO_ZOOM};

/// Connects the engine state to the rendering collaborators
pub struct MapBrowser {
    index: Arc<TemporalIndex>,
    cursor: Arc<YearCursor>,
    selection: Arc<SelectionState>,
    map: Arc<dyn MapSurface>,
    detail: Arc<dyn DetailSurface>,
    /// The last projected marker set, kept for positional activation
    visible: RwLock<Vec<MarkerDescriptor>>,
}

impl MapBrowser {
    /// Create the browser and subscribe it to cursor changes.
    ///
    /// Renders the initial bucket immediately.
    pub fn new(
        index: Arc<TemporalIndex>,
        cursor: Arc<YearCursor>,
        selection: Arc<SelectionState>,
        map: Arc<dyn MapSurface>,
        detail: Arc<dyn DetailSurface>,
    ) -> Arc<Self> {
        let browser = Arc::new(Self {
            index,
            cursor,
            selection,
            map,
            detail,
            visible: RwLock::new(Vec::new()),
        });

        browser
            .cursor
            .subscribe(browser.clone() as Arc<dyn YearSubscriber>);
        browser.refresh();
        browser
    }

    /// Re-project the active bucket and hand the markers to the map surface
    pub fn refresh(&self) {
        let markers = visible_markers(&self.index, self.cursor.current());
        tracing::debug!(year = self.cursor.current(), markers = markers.len(), "projection refreshed");
        self.map.render_markers(&markers);
        *self.visible.write() = markers;
    }

    /// The active year bucket
    pub fn current_year(&self) -> YearCategory {
        self.cursor.current()
    }

    /// Era label for the active bucket, e.g. `BCE 3300`
    pub fn current_year_label(&self) -> String {
        year_label(self.cursor.current())
    }

    /// "Step back" control
    pub fn step_back(&self) -> YearCategory {
        self.cursor.advance(-YEAR_STEP)
    }

    /// "Step forward" control
    pub fn step_forward(&self) -> YearCategory {
        self.cursor.advance(YEAR_STEP)
    }

    /// "Reset view" control: initial bucket plus a recentered map
    pub fn reset_view(&self) {
        self.cursor.reset();
    }

    /// The last projected marker set
    pub fn visible_markers(&self) -> Vec<MarkerDescriptor> {
        self.visible.read().clone()
    }

    /// Every record of both datasets, including unmappable ones
    pub fn listing(&self) -> Vec<ListEntry> {
        full_listing(&self.index)
    }

    /// Year buckets holding at least one record, across both datasets
    pub fn populated_years(&self) -> Vec<YearCategory> {
        let mut years = self.index.bread().populated_years();
        years.extend(self.index.history().populated_years());
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Activate the marker at `position` in the last projected set.
    ///
    /// Returns false when the position is stale or out of range.
    pub fn activate_marker(&self, position: usize) -> bool {
        let selection = {
            let visible = self.visible.read();
            match visible.get(position) {
                Some(marker) => marker.record.to_selection(),
                None => return false,
            }
        };
        self.open_detail(selection);
        true
    }

    /// Activate a listing entry: open the detail view and, when the record
    /// is mappable, fly the map to it. Flying to `NaN` never happens — for
    /// an unmappable record the map stays put.
    pub fn activate_list_entry(&self, entry: &ListEntry) {
        if let Some(target) = entry.fly_target() {
            self.map.fly_to(target, FLY_TO_ZOOM);
        }
        self.open_detail(entry.record.to_selection());
    }

    /// Dialog dismissal: clear the selection and close the dialog
    pub fn dismiss_detail(&self) {
        self.selection.clear();
        self.detail.dismiss();
    }

    /// The currently inspected record
    pub fn current_selection(&self) -> Selection {
        self.selection.current()
    }

    fn open_detail(&self, selection: Selection) {
        self.selection.select(selection);
        if let Some(content) = detail_content(&self.selection.current()) {
            self.detail.show(&content);
        }
    }
}

impl YearSubscriber for MapBrowser {
    fn on_year_change(&self, _context: &YearContext) {
        self.refresh();
    }

    fn on_reset(&self, _context: &YearContext) {
        self.map.recenter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::records::{BreadRecord, Coordinates, DatasetKind};
    use cm_data::index::DatasetIndex;
    use parking_lot::Mutex;

    use crate::detail::DetailContent;

    #[derive(Debug, PartialEq)]
    enum SurfaceCall {
        Render(usize),
        Recenter,
        FlyTo(f64, f64, f64),
        Show(String),
        Dismiss,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<SurfaceCall>>,
    }

    impl MapSurface for RecordingSurface {
        fn render_markers(&self, markers: &[MarkerDescriptor]) {
            self.calls.lock().push(SurfaceCall::Render(markers.len()));
        }

        fn recenter(&self) {
            self.calls.lock().push(SurfaceCall::Recenter);
        }

        fn fly_to(&self, target: Coordinates, zoom: f64) {
            self.calls
                .lock()
                .push(SurfaceCall::FlyTo(target.latitude, target.longitude, zoom));
        }
    }

    impl DetailSurface for RecordingSurface {
        fn show(&self, content: &DetailContent) {
            self.calls.lock().push(SurfaceCall::Show(content.heading.clone()));
        }

        fn dismiss(&self) {
            self.calls.lock().push(SurfaceCall::Dismiss);
        }
    }

    fn egyptian_flatbread() -> BreadRecord {
        BreadRecord {
            name: "Flatbread".to_string(),
            origin_place: "Egypt".to_string(),
            origin_year: "c. 3300 BCE".to_string(),
            description: "Unleavened bread baked on hot stones.".to_string(),
            image_name: "flatbread.jpg".to_string(),
            coordinates: Coordinates::new(31.2, 29.9),
            year_category: Some(-3300),
        }
    }

    fn browser_with_one_bread() -> (Arc<MapBrowser>, Arc<RecordingSurface>) {
        let index = Arc::new(TemporalIndex::new());
        index.replace_bread(DatasetIndex::build(vec![egyptian_flatbread()]));

        let surface = Arc::new(RecordingSurface::default());
        let browser = MapBrowser::new(
            index,
            Arc::new(YearCursor::new()),
            Arc::new(SelectionState::new()),
            surface.clone(),
            surface.clone(),
        );
        (browser, surface)
    }

    #[test]
    fn test_stepping_through_buckets_end_to_end() {
        let (browser, _surface) = browser_with_one_bread();

        // Initial bucket holds exactly the one record
        assert_eq!(browser.current_year(), -3300);
        let markers = browser.visible_markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].source, DatasetKind::Bread);
        assert_eq!(markers[0].coordinates, Coordinates::new(31.2, 29.9));

        // One step back: no -3400 records
        assert_eq!(browser.step_back(), -3400);
        assert!(browser.visible_markers().is_empty());

        // Two steps forward pass through -3300 and land on -3200
        assert_eq!(browser.step_forward(), -3300);
        assert_eq!(browser.visible_markers().len(), 1);
        assert_eq!(browser.step_forward(), -3200);
        assert!(browser.visible_markers().is_empty());
    }

    #[test]
    fn test_reset_recenters_and_rerenders() {
        let (browser, surface) = browser_with_one_bread();
        browser.step_back();
        surface.calls.lock().clear();

        browser.reset_view();

        assert_eq!(browser.current_year(), -3300);
        let calls = surface.calls.lock();
        assert!(calls.contains(&SurfaceCall::Recenter));
        assert!(calls.contains(&SurfaceCall::Render(1)));
    }

    #[test]
    fn test_marker_activation_opens_detail() {
        let (browser, surface) = browser_with_one_bread();

        assert!(browser.activate_marker(0));
        assert!(matches!(browser.current_selection(), Selection::Bread(_)));
        assert!(surface
            .calls
            .lock()
            .contains(&SurfaceCall::Show("Flatbread".to_string())));

        browser.dismiss_detail();
        assert!(browser.current_selection().is_none());
        assert!(surface.calls.lock().contains(&SurfaceCall::Dismiss));
    }

    #[test]
    fn test_stale_marker_activation_is_rejected() {
        let (browser, _surface) = browser_with_one_bread();
        browser.step_back();
        assert!(!browser.activate_marker(0));
    }

    #[test]
    fn test_list_activation_flies_only_to_finite_coordinates() {
        let index = Arc::new(TemporalIndex::new());
        let mut unlocated = egyptian_flatbread();
        unlocated.name = "Unlocated".to_string();
        unlocated.coordinates = Coordinates::new(f64::NAN, f64::NAN);
        index.replace_bread(DatasetIndex::build(vec![egyptian_flatbread(), unlocated]));

        let surface = Arc::new(RecordingSurface::default());
        let browser = MapBrowser::new(
            index,
            Arc::new(YearCursor::new()),
            Arc::new(SelectionState::new()),
            surface.clone(),
            surface.clone(),
        );

        let listing = browser.listing();
        assert_eq!(listing.len(), 2);

        browser.activate_list_entry(&listing[0]);
        assert!(surface
            .calls
            .lock()
            .contains(&SurfaceCall::FlyTo(31.2, 29.9, FLY_TO_ZOOM)));

        surface.calls.lock().clear();
        browser.activate_list_entry(&listing[1]);
        // Selection succeeded, detail opened, but the map stayed put
        assert!(matches!(browser.current_selection(), Selection::Bread(_)));
        let calls = surface.calls.lock();
        assert!(calls.iter().all(|c| !matches!(c, SurfaceCall::FlyTo(..))));
        assert!(calls.contains(&SurfaceCall::Show("Unlocated".to_string())));
    }
}
