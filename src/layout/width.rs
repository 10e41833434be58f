//! Column width bookkeeping.
//!
//! Widths are percentages of the Columns container. A column either has an explicit width, or
//! takes an equal share of whatever the explicit widths leave over. Everything in here is pure:
//! the controller feeds in a snapshot of the Column Set and writes the results back.

use crate::block::{ClientId, Column};

/// Width budget of a Column Set, in percent.
pub const TOTAL_WIDTH: f64 = 100.;

/// Number of decimal places kept when rounding widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(u8);

impl Precision {
    pub const MAX_DIGITS: u8 = 4;

    /// Creates a precision, capping the digits at [`Precision::MAX_DIGITS`].
    pub fn new(digits: u8) -> Self {
        Self(digits.min(Self::MAX_DIGITS))
    }

    pub fn digits(self) -> u8 {
        self.0
    }

    /// Rounds a width to this precision.
    ///
    /// Does not clamp. Non-finite values pass through unchanged.
    pub fn round(self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }

        let factor = 10f64.powi(i32::from(self.0));
        (value * factor).round() / factor
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(column_block_config::DEFAULT_PRECISION)
    }
}

/// Rounds a width to one decimal place.
pub fn to_width_precision(value: f64) -> f64 {
    Precision::default().round(value)
}

/// Sum of the explicit widths, counting unset widths as zero.
pub fn total_width<'a>(columns: impl IntoIterator<Item = &'a Column>) -> f64 {
    columns.into_iter().filter_map(Column::width).sum()
}

/// Widths keyed by column, in insertion order.
///
/// Setting a width for a column that is already present overrides it in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WidthMap(Vec<(ClientId, f64)>);

impl WidthMap {
    pub fn get(&self, id: &ClientId) -> Option<f64> {
        self.0
            .iter()
            .find(|(client_id, _)| client_id == id)
            .map(|(_, width)| *width)
    }

    pub fn set(&mut self, id: ClientId, width: f64) {
        match self.0.iter_mut().find(|(client_id, _)| *client_id == id) {
            Some((_, existing)) => *existing = width,
            None => self.0.push((id, width)),
        }
    }

    /// Overrides entries with those from `other`.
    pub fn merge(&mut self, other: WidthMap) {
        for (id, width) in other.0 {
            self.set(id, width);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClientId, f64)> + '_ {
        self.0.iter().map(|(id, width)| (id, *width))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().map(|(_, width)| width).sum()
    }
}

/// Effective width of every column.
///
/// Explicit widths are kept as stored. Columns without one share what remains of
/// [`TOTAL_WIDTH`] equally, out of `column_count` columns in the whole set, rounded to
/// `precision`. `columns` may be a subset of the set.
pub fn column_widths<'a>(
    columns: impl IntoIterator<Item = &'a Column>,
    column_count: usize,
    precision: Precision,
) -> WidthMap {
    let columns: Vec<&Column> = columns.into_iter().collect();
    let auto_width = precision.round(auto_width(&columns, column_count));

    let mut widths = WidthMap::default();
    for column in columns {
        let width = column.width().unwrap_or(auto_width);
        widths.set(column.client_id.clone(), width);
    }
    widths
}

fn auto_width(columns: &[&Column], column_count: usize) -> f64 {
    let explicit_count = columns.iter().filter(|c| c.has_explicit_width()).count();
    let auto_count = column_count.saturating_sub(explicit_count);
    if auto_count == 0 {
        return 0.;
    }

    // Explicit widths over budget leave nothing for the rest.
    let remaining = (TOTAL_WIDTH - total_width(columns.iter().copied())).max(0.);
    remaining / auto_count as f64
}

/// Columns affected by resizing `target`.
///
/// Walks away from the target in both directions, collecting columns without an explicit width,
/// up to and including the first column that has one. Returns them in set order, without the
/// target. Returns nothing if the target is not in the set.
pub fn adjacent_columns<'a>(columns: &'a [Column], target: &ClientId) -> Vec<&'a Column> {
    let Some(idx) = columns.iter().position(|c| c.client_id == *target) else {
        return Vec::new();
    };

    let mut adjacent = Vec::new();

    for column in columns[..idx].iter().rev() {
        adjacent.push(column);
        if column.has_explicit_width() {
            break;
        }
    }
    adjacent.reverse();

    for column in &columns[idx + 1..] {
        adjacent.push(column);
        if column.has_explicit_width() {
            break;
        }
    }

    adjacent
}

/// Spreads `available` width over the columns in `adjacent` that lack an explicit width.
///
/// The difference between `available` and the current effective width of the whole adjacent
/// set is split equally between those columns. Columns with an explicit width are not touched
/// and are not part of the result. If every adjacent column has an explicit width, the result
/// is empty and the difference is dropped.
///
/// Resulting widths are clamped to `[0, TOTAL_WIDTH]` and rounded.
pub fn redistributed_column_widths(
    adjacent: &[&Column],
    available: f64,
    column_count: usize,
    precision: Precision,
) -> WidthMap {
    let current = column_widths(adjacent.iter().copied(), column_count, precision);

    let auto: Vec<&Column> = adjacent
        .iter()
        .copied()
        .filter(|c| !c.has_explicit_width())
        .collect();
    if auto.is_empty() {
        if !adjacent.is_empty() {
            debug!(
                "no adjacent columns without an explicit width, dropping {:.1}% difference",
                available - current.sum()
            );
        }
        return WidthMap::default();
    }

    let adjustment = (available - current.sum()) / auto.len() as f64;
    trace!("adjusting {} columns by {adjustment}", auto.len());

    let mut widths = WidthMap::default();
    for column in auto {
        let width = current.get(&column.client_id).unwrap_or(0.) + adjustment;
        widths.set(
            column.client_id.clone(),
            precision.round(width.clamp(0., TOTAL_WIDTH)),
        );
    }
    widths
}
