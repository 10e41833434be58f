//! Column layout bookkeeping.
//!
//! [`width`] holds the pure width model. [`ColumnController`] applies user actions on a column
//! to the block tree, using the width model to keep sibling widths consistent.

use column_block_config::Config;

pub use self::column::ColumnController;
use self::width::Precision;

mod column;
pub mod width;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Precision that widths are rounded to.
    pub precision: Precision,
    /// Whether to clamp requested widths into `[0, 100]`.
    pub clamp_width: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            clamp_width: false,
        }
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let width = &config.width;

        if width.precision > Precision::MAX_DIGITS {
            warn!(
                "width precision {} is too high, using {}",
                width.precision,
                Precision::MAX_DIGITS
            );
        }

        Self {
            precision: Precision::new(width.precision),
            clamp_width: width.clamp_input,
        }
    }
}
