//! Blocks as seen by the column controller.
//!
//! The document tree itself belongs to the editor. Here we only model the pieces that a
//! Column block reads and writes: its identity, its width and its vertical alignment.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Opaque, stable identity of a block within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Vertical alignment of a column's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Stretch,
}

impl VerticalAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Stretch => "stretch",
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerticalAlignment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "stretch" => Ok(Self::Stretch),
            _ => Err(r#"invalid alignment, can be "top", "center", "bottom" or "stretch""#),
        }
    }
}

/// Template locking policy of a container, passed through to nested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateLock {
    /// Blocks can be neither inserted, removed nor moved.
    All,
    /// Blocks can be moved, but not inserted or removed.
    Insert,
}

/// Attributes of a block that the column controller cares about.
///
/// Columns Containers carry the same shape: their `vertical_alignment` is the default for all
/// of their columns, and their `width` is unused.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnAttributes {
    /// Width in percent of the container, or `None` for an automatic share.
    pub width: Option<f64>,
    /// Vertical alignment, or `None` to inherit from the container.
    pub vertical_alignment: Option<VerticalAlignment>,
}

/// Partial attribute update.
///
/// `None` leaves the attribute alone, `Some(None)` unsets it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AttributesUpdate {
    pub width: Option<Option<f64>>,
    pub vertical_alignment: Option<Option<VerticalAlignment>>,
}

impl AttributesUpdate {
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(Some(width)),
            ..Self::default()
        }
    }

    pub fn unset_width() -> Self {
        Self {
            width: Some(None),
            ..Self::default()
        }
    }

    pub fn vertical_alignment(alignment: Option<VerticalAlignment>) -> Self {
        Self {
            vertical_alignment: Some(alignment),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, attributes: &mut ColumnAttributes) {
        if let Some(width) = self.width {
            attributes.width = width;
        }
        if let Some(alignment) = self.vertical_alignment {
            attributes.vertical_alignment = alignment;
        }
    }
}

/// One column of a Column Set, as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub client_id: ClientId,
    #[serde(flatten)]
    pub attributes: ColumnAttributes,
}

impl Column {
    pub fn new(client_id: impl Into<ClientId>, width: Option<f64>) -> Self {
        Self {
            client_id: client_id.into(),
            attributes: ColumnAttributes {
                width,
                vertical_alignment: None,
            },
        }
    }

    pub fn width(&self) -> Option<f64> {
        self.attributes.width
    }

    pub fn has_explicit_width(&self) -> bool {
        self.attributes.width.is_some()
    }
}
