//! Year cursor implementation

use super::{YearContext, YearSubscriber, INITIAL_YEAR};
use crate::records::YearCategory;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};

/// Cursor state stored internally
#[derive(Debug, Clone)]
struct CursorState {
    year: YearCategory,
}

/// Holds the active year bucket and advances it under the zero-skip rule.
///
/// There is no year 0: a step whose arithmetic would land exactly on 0
/// lands on the step value itself, preserving the direction of travel.
/// No bounds are enforced; out-of-range buckets simply yield empty views.
pub struct YearCursor {
    state: Arc<RwLock<CursorState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn YearSubscriber>>>>,
    initial: YearCategory,
}

impl YearCursor {
    /// Create a cursor positioned at the earliest supported bucket
    pub fn new() -> Self {
        Self::starting_at(INITIAL_YEAR)
    }

    /// Create a cursor with a custom starting bucket
    pub fn starting_at(initial: YearCategory) -> Self {
        debug_assert!(initial != 0, "year 0 is not a valid bucket");
        Self {
            state: Arc::new(RwLock::new(CursorState { year: initial })),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            initial,
        }
    }

    /// The active year bucket
    pub fn current(&self) -> YearCategory {
        self.state.read().year
    }

    /// Step the cursor by `step` years and return the new bucket.
    ///
    /// If `current + step` is exactly 0 the cursor lands on `step` itself,
    /// whatever the step magnitude.
    pub fn advance(&self, step: YearCategory) -> YearCategory {
        let year = {
            let mut state = self.state.write();
            let candidate = state.year.saturating_add(step);
            state.year = if candidate == 0 { step } else { candidate };
            state.year
        };

        tracing::debug!(year, step, "year cursor advanced");
        self.notify_change();
        year
    }

    /// Restore the initial bucket and signal subscribers to recenter the
    /// map view.
    pub fn reset(&self) {
        {
            let mut state = self.state.write();
            state.year = self.initial;
        }

        tracing::debug!(year = self.initial, "year cursor reset");
        self.notify_reset();
    }

    /// Add a subscriber
    pub fn subscribe(&self, subscriber: Arc<dyn YearSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    fn context(&self) -> YearContext {
        YearContext {
            year: self.current(),
        }
    }

    /// Notify all subscribers of a bucket change
    fn notify_change(&self) {
        let context = self.context();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_year_change(&context);
            }
        }
    }

    /// Notify all subscribers of a reset, then of the bucket change
    fn notify_reset(&self) {
        let context = self.context();
        let mut subscribers = self.subscribers.write();

        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_reset(&context);
                subscriber.on_year_change(&context);
            }
        }
    }
}

impl Default for YearCursor {
    fn default() -> Self {
        Self::new()
    }
}
