use crate::records::YearCategory;

mod cursor;
mod subscriber;

pub use cursor::YearCursor;
pub use subscriber::YearSubscriber;

/// Earliest supported year bucket; the cursor starts here.
pub const INITIAL_YEAR: YearCategory = -3300;

/// Step size used by the step back / step forward controls.
pub const YEAR_STEP: YearCategory = 100;

/// Context passed to subscribers when the cursor moves
#[derive(Debug, Clone)]
pub struct YearContext {
    /// The active year bucket after the transition
    pub year: YearCategory,
}

/// Human-readable era label for a year bucket, e.g. `BCE 3300` or `CE 700`.
pub fn year_label(year: YearCategory) -> String {
    if year < 0 {
        format!("BCE {}", year.unsigned_abs())
    } else {
        format!("CE {}", year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_label() {
        assert_eq!(year_label(-3300), "BCE 3300");
        assert_eq!(year_label(700), "CE 700");
    }
}
