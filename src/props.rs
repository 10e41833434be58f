//! What a renderer needs to draw a Column block.

use serde::Serialize;

use crate::block::{ClientId, TemplateLock, VerticalAlignment};
use crate::store::BlockSelect;

/// Read-only view of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProps {
    pub vertical_alignment: Option<VerticalAlignment>,
    pub width: Option<f64>,
    /// Whether the column holds any nested blocks.
    pub has_child_blocks: bool,
    /// Lock inherited by blocks nested in the column.
    ///
    /// This is the lock of whatever contains the Columns block, since the column itself sets
    /// no template. `None` means unlocked.
    pub template_lock: Option<TemplateLock>,
}

impl ColumnProps {
    /// Reads the props of a column, or `None` if the store doesn't know about it.
    pub fn query<S: BlockSelect>(store: &S, client_id: &ClientId) -> Option<Self> {
        let attributes = store.column_attributes(client_id)?;

        let columns_id = store.parent_id(client_id);
        let columns_parent_id = columns_id.and_then(|id| store.parent_id(&id));
        let template_lock = store.template_lock(columns_parent_id.as_ref());

        Some(Self {
            vertical_alignment: attributes.vertical_alignment,
            width: attributes.width,
            has_child_blocks: !store.child_ids(client_id).is_empty(),
            template_lock,
        })
    }

    /// Whether to show the block appender inside an empty column.
    pub fn show_appender(&self) -> bool {
        !self.has_child_blocks
    }
}
