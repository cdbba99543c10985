//! Year cursor subscriber trait

use super::YearContext;

/// Trait for components that need to respond to cursor changes
pub trait YearSubscriber: Send + Sync {
    /// Called whenever the active year bucket changes
    fn on_year_change(&self, context: &YearContext);

    /// Called when the cursor is reset to the initial year.
    ///
    /// The map-view collaborator restores its default center and zoom here;
    /// `on_year_change` fires separately for the bucket transition.
    fn on_reset(&self, context: &YearContext) {
        let _ = context;
    }
}
