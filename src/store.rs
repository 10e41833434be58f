//! Access to the editor's block tree.
//!
//! The column controller never owns the document. It reads through [`BlockSelect`] and writes
//! through [`BlockDispatch`], so any editor backend can be plugged in. [`MemoryStore`] is a
//! plain in-memory tree implementing both.

use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::{bail, ensure};

use crate::block::{AttributesUpdate, ClientId, Column, ColumnAttributes, TemplateLock};

/// Read side of the block tree.
pub trait BlockSelect {
    /// Ordered ids of the children of a block.
    fn child_ids(&self, id: &ClientId) -> Vec<ClientId>;

    /// Id of the parent block, or `None` for top-level blocks.
    fn parent_id(&self, id: &ClientId) -> Option<ClientId>;

    /// Template lock of a block, or of the document root when `id` is `None`.
    fn template_lock(&self, id: Option<&ClientId>) -> Option<TemplateLock>;

    /// Attributes of a block, or `None` if there's no such block.
    fn column_attributes(&self, id: &ClientId) -> Option<ColumnAttributes>;

    /// Ordered Column Set of a container.
    fn columns(&self, container: &ClientId) -> Vec<Column> {
        self.child_ids(container)
            .into_iter()
            .filter_map(|client_id| {
                let attributes = self.column_attributes(&client_id)?;
                Some(Column {
                    client_id,
                    attributes,
                })
            })
            .collect()
    }
}

/// Write side of the block tree.
pub trait BlockDispatch {
    /// Applies a partial attribute update to a block.
    fn set_attributes(&mut self, id: &ClientId, update: AttributesUpdate) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
struct Block {
    parent: Option<ClientId>,
    children: Vec<ClientId>,
    attributes: ColumnAttributes,
    template_lock: Option<TemplateLock>,
}

/// In-memory block tree.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blocks: HashMap<ClientId, Block>,
    /// Top-level blocks in order.
    root: Vec<ClientId>,
    root_template_lock: Option<TemplateLock>,
    /// Every successful write, in order.
    writes: Vec<(ClientId, AttributesUpdate)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block under `parent`, or at the top level.
    pub fn insert(
        &mut self,
        parent: Option<&ClientId>,
        id: impl Into<ClientId>,
        attributes: ColumnAttributes,
    ) -> anyhow::Result<ClientId> {
        let id = id.into();
        ensure!(!self.blocks.contains_key(&id), "block {id} already exists");

        match parent {
            Some(parent) => {
                let Some(block) = self.blocks.get_mut(parent) else {
                    bail!("parent block {parent} does not exist");
                };
                block.children.push(id.clone());
            }
            None => self.root.push(id.clone()),
        }

        self.blocks.insert(
            id.clone(),
            Block {
                parent: parent.cloned(),
                attributes,
                ..Block::default()
            },
        );
        Ok(id)
    }

    /// Sets the template lock of a block, or of the document root when `id` is `None`.
    pub fn set_template_lock(
        &mut self,
        id: Option<&ClientId>,
        lock: Option<TemplateLock>,
    ) -> anyhow::Result<()> {
        match id {
            Some(id) => {
                let Some(block) = self.blocks.get_mut(id) else {
                    bail!("block {id} does not exist");
                };
                block.template_lock = lock;
            }
            None => self.root_template_lock = lock,
        }
        Ok(())
    }

    pub fn root_ids(&self) -> &[ClientId] {
        &self.root
    }

    pub fn writes(&self) -> &[(ClientId, AttributesUpdate)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Human-readable dump of the tree, one block per line.
    pub fn snapshot(&self) -> String {
        let mut buf = String::new();
        for id in &self.root {
            self.snapshot_block(&mut buf, id, 0);
        }
        buf
    }

    fn snapshot_block(&self, buf: &mut String, id: &ClientId, depth: usize) {
        let Some(block) = self.blocks.get(id) else {
            return;
        };

        let indent = depth * 2;
        let attrs = &block.attributes;
        let width = match attrs.width {
            Some(width) => format!("{width:?}"),
            None => String::from("auto"),
        };
        let align = match attrs.vertical_alignment {
            Some(align) => align.as_str(),
            None => "inherit",
        };
        writeln!(buf, "{:indent$}{id}: width={width} align={align}", "").unwrap();

        for child in &block.children {
            self.snapshot_block(buf, child, depth + 1);
        }
    }
}

impl BlockSelect for MemoryStore {
    fn child_ids(&self, id: &ClientId) -> Vec<ClientId> {
        self.blocks
            .get(id)
            .map(|block| block.children.clone())
            .unwrap_or_default()
    }

    fn parent_id(&self, id: &ClientId) -> Option<ClientId> {
        self.blocks.get(id)?.parent.clone()
    }

    fn template_lock(&self, id: Option<&ClientId>) -> Option<TemplateLock> {
        match id {
            Some(id) => self.blocks.get(id)?.template_lock,
            None => self.root_template_lock,
        }
    }

    fn column_attributes(&self, id: &ClientId) -> Option<ColumnAttributes> {
        self.blocks.get(id).map(|block| block.attributes)
    }
}

impl BlockDispatch for MemoryStore {
    fn set_attributes(&mut self, id: &ClientId, update: AttributesUpdate) -> anyhow::Result<()> {
        let Some(block) = self.blocks.get_mut(id) else {
            bail!("block {id} does not exist");
        };
        update.apply_to(&mut block.attributes);
        self.writes.push((id.clone(), update));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::block::VerticalAlignment;

    fn attrs(width: Option<f64>) -> ColumnAttributes {
        ColumnAttributes {
            width,
            vertical_alignment: None,
        }
    }

    #[test]
    fn columns_follow_insertion_order() {
        let mut store = MemoryStore::new();
        let parent = store.insert(None, "columns", attrs(None)).unwrap();
        store.insert(Some(&parent), "b", attrs(Some(60.))).unwrap();
        store.insert(Some(&parent), "a", attrs(None)).unwrap();

        let columns = store.columns(&parent);
        assert_eq!(
            columns,
            [Column::new("b", Some(60.)), Column::new("a", None)]
        );
        assert_eq!(store.parent_id(&ClientId::from("a")), Some(parent));
        assert_eq!(store.parent_id(&ClientId::from("columns")), None);
        assert_eq!(store.root_ids(), [ClientId::from("columns")]);
    }

    #[test]
    fn insert_rejects_duplicates_and_missing_parents() {
        let mut store = MemoryStore::new();
        store.insert(None, "a", attrs(None)).unwrap();

        assert!(store.insert(None, "a", attrs(None)).is_err());
        assert!(store
            .insert(Some(&ClientId::from("missing")), "b", attrs(None))
            .is_err());
    }

    #[test]
    fn set_attributes_on_missing_block_fails() {
        let mut store = MemoryStore::new();
        let err = store
            .set_attributes(&ClientId::from("ghost"), AttributesUpdate::width(10.))
            .unwrap_err();
        assert_eq!(err.to_string(), "block ghost does not exist");
        assert!(store.writes().is_empty());
    }

    #[test]
    fn template_locks() {
        let mut store = MemoryStore::new();
        let group = store.insert(None, "group", attrs(None)).unwrap();

        assert_eq!(store.template_lock(None), None);
        assert_eq!(store.template_lock(Some(&group)), None);

        store
            .set_template_lock(Some(&group), Some(TemplateLock::Insert))
            .unwrap();
        store.set_template_lock(None, Some(TemplateLock::All)).unwrap();

        assert_eq!(store.template_lock(Some(&group)), Some(TemplateLock::Insert));
        assert_eq!(store.template_lock(None), Some(TemplateLock::All));
        assert!(store
            .set_template_lock(Some(&ClientId::from("ghost")), None)
            .is_err());
    }

    #[test]
    fn snapshot_nests_children() {
        let mut store = MemoryStore::new();
        let parent = store
            .insert(
                None,
                "columns",
                ColumnAttributes {
                    width: None,
                    vertical_alignment: Some(VerticalAlignment::Center),
                },
            )
            .unwrap();
        store.insert(Some(&parent), "a", attrs(Some(33.3))).unwrap();
        store.insert(Some(&parent), "b", attrs(None)).unwrap();

        assert_snapshot!(store.snapshot(), @r"
        columns: width=auto align=center
          a: width=33.3 align=inherit
          b: width=auto align=inherit
        ");
    }
}
