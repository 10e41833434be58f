use anyhow::Context as _;

use super::width::{
    adjacent_columns, column_widths, redistributed_column_widths, WidthMap, TOTAL_WIDTH,
};
use super::Options;
use crate::block::{AttributesUpdate, ClientId, VerticalAlignment};
use crate::store::{BlockDispatch, BlockSelect};

/// Applies user actions on a Column block to the block tree.
///
/// Holds no per-column state: every call reads a fresh snapshot from the store, so a store that
/// drifted out of shape is repaired by the next width change.
#[derive(Debug, Default, Clone)]
pub struct ColumnController {
    options: Options,
}

impl ColumnController {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Sets the column's vertical alignment and unsets the container default.
    pub fn update_vertical_alignment<S: BlockSelect + BlockDispatch>(
        &self,
        store: &mut S,
        client_id: &ClientId,
        alignment: Option<VerticalAlignment>,
    ) -> anyhow::Result<()> {
        let _span = tracy_client::span!("ColumnController::update_vertical_alignment");
        debug!("{client_id}: setting vertical alignment to {alignment:?}");

        store.set_attributes(client_id, AttributesUpdate::vertical_alignment(alignment))?;

        match store.parent_id(client_id) {
            Some(parent) => {
                store
                    .set_attributes(&parent, AttributesUpdate::vertical_alignment(None))
                    .with_context(|| format!("error resetting alignment of {parent}"))?;
            }
            None => debug!("{client_id}: column has no parent, no default to reset"),
        }

        Ok(())
    }

    /// Sets the column's width and redistributes the rest among its siblings.
    ///
    /// Every column of the set receives a width write, in set order. The target ends up at
    /// exactly the rounded `width`.
    pub fn update_width<S: BlockSelect + BlockDispatch>(
        &self,
        store: &mut S,
        client_id: &ClientId,
        width: f64,
    ) -> anyhow::Result<()> {
        let _span = tracy_client::span!("ColumnController::update_width");

        let width = if self.options.clamp_width {
            width.clamp(0., TOTAL_WIDTH)
        } else {
            width
        };
        debug!("{client_id}: setting width to {width}");

        let next = self.next_column_widths(store, client_id, width);
        for (id, width) in next.iter() {
            trace!("{id}: writing width {width}");
            store
                .set_attributes(id, AttributesUpdate::width(width))
                .with_context(|| format!("error setting width of {id}"))?;
        }

        Ok(())
    }

    /// Unsets the column's width, making it take an automatic share again.
    pub fn reset_width<S: BlockDispatch>(
        &self,
        store: &mut S,
        client_id: &ClientId,
    ) -> anyhow::Result<()> {
        debug!("{client_id}: resetting width");
        store.set_attributes(client_id, AttributesUpdate::unset_width())
    }

    /// Computes widths for every column of the set after resizing `client_id` to `width`.
    pub fn next_column_widths<S: BlockSelect>(
        &self,
        store: &S,
        client_id: &ClientId,
        width: f64,
    ) -> WidthMap {
        let Some(parent) = store.parent_id(client_id) else {
            debug!("{client_id}: column has no parent, nothing to resize");
            return WidthMap::default();
        };

        let columns = store.columns(&parent);
        if !columns.iter().any(|c| c.client_id == *client_id) {
            warn!("{client_id}: column is missing from its parent {parent}");
            return WidthMap::default();
        }

        let adjacent = adjacent_columns(&columns, client_id);
        let precision = self.options.precision;
        let count = columns.len();

        // Start from all current widths so that auto columns outside the adjacent set get
        // pinned to their current share too.
        let mut next = column_widths(&columns, count, precision);

        // Width claimed by the target and by the columns not taking part in the adjustment.
        let outside: f64 = columns
            .iter()
            .filter(|column| {
                column.client_id != *client_id
                    && !adjacent.iter().any(|c| c.client_id == column.client_id)
            })
            .filter_map(|column| next.get(&column.client_id))
            .sum();
        let occupied = width + outside;

        next.set(client_id.clone(), precision.round(width));
        next.merge(redistributed_column_widths(
            &adjacent,
            TOTAL_WIDTH - occupied,
            count,
            precision,
        ));
        next
    }
}
