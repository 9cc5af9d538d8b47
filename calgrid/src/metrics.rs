//! Cell geometry derived from the measured container width.

/// Number of day columns in a month grid.
pub const COLUMNS: f32 = 7.0;

/// Cell width above which the wide layout is selected.
pub const WIDE_BREAKPOINT: f32 = 60.0;

const WIDE_CELL_RATIO: f32 = 0.75;

/// Row height and layout density for the current container width.
///
/// Recomputation is idempotent and may run any number of times; consumers
/// must tolerate the height changing between reads. The default value (zero
/// height, compact) stands in until the first measurement arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellMetrics {
    /// Height of one grid row in pixels. Zero before the first measurement.
    pub cell_height: f32,
    /// Whether the cell width crossed the wide-layout breakpoint.
    pub is_wide: bool,
}

impl CellMetrics {
    /// Derives metrics from the container width in pixels.
    ///
    /// Wide cells keep a 4:3 aspect, compact cells are square. A pixel is
    /// added so adjacent rows overlap their borders.
    pub fn measure(container_width: f32) -> Self {
        let cell_width = container_width / COLUMNS;
        if cell_width > WIDE_BREAKPOINT {
            Self {
                cell_height: 1.0 + (cell_width * WIDE_CELL_RATIO).round(),
                is_wide: true,
            }
        } else {
            Self {
                cell_height: 1.0 + cell_width.round(),
                is_wide: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_container() {
        let metrics = CellMetrics::measure(500.0);
        assert!(metrics.is_wide);
        assert_eq!(metrics.cell_height, 55.0);
    }

    #[test]
    fn compact_container() {
        let metrics = CellMetrics::measure(300.0);
        assert!(!metrics.is_wide);
        assert_eq!(metrics.cell_height, 44.0);
    }

    #[test]
    fn breakpoint_is_exclusive() {
        // Exactly 60 px cells stay compact.
        let metrics = CellMetrics::measure(420.0);
        assert!(!metrics.is_wide);
        assert_eq!(metrics.cell_height, 61.0);
    }

    #[test]
    fn unmeasured_container_is_harmless() {
        let metrics = CellMetrics::measure(0.0);
        assert!(!metrics.is_wide);
        assert_eq!(metrics.cell_height, 1.0);
    }
}
