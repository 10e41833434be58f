use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context as _};
use clap::{Parser, Subcommand};

use crate::block::{ClientId, ColumnAttributes, VerticalAlignment};
use crate::layout::{ColumnController, Options};
use crate::props::ColumnProps;
use crate::store::{BlockSelect as _, MemoryStore};
use crate::utils::version;

#[derive(Parser)]
#[command(author, version = version(), about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// Path to config file (default: `$XDG_CONFIG_HOME/column-block/config.kdl`).
    ///
    /// This can also be set with the `COLUMN_BLOCK_CONFIG` environment variable. If both are
    /// set, the command line argument takes precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Initial column widths, comma-separated.
    ///
    /// Each entry is a percentage, or `auto` for a column without an explicit width.
    #[arg(long, value_delimiter = ',', default_value = "auto,auto", allow_hyphen_values = true)]
    pub columns: Vec<WidthArg>,
    /// Format output as JSON.
    #[arg(short, long)]
    pub json: bool,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Sub {
    /// Print the columns.
    Show,
    /// Set the width of a column, redistributing the rest among its neighbors.
    SetWidth {
        /// Index of the column, starting from 0.
        index: usize,
        /// Width in percent.
        #[arg(allow_hyphen_values = true)]
        width: f64,
    },
    /// Unset the width of a column.
    ResetWidth {
        /// Index of the column, starting from 0.
        index: usize,
    },
    /// Set the vertical alignment of a column.
    SetAlignment {
        /// Index of the column, starting from 0.
        index: usize,
        /// One of `top`, `center`, `bottom` or `stretch`.
        alignment: VerticalAlignment,
    },
    /// Unset the vertical alignment of a column.
    ClearAlignment {
        /// Index of the column, starting from 0.
        index: usize,
    },
}

/// Column width given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthArg(pub Option<f64>);

impl FromStr for WidthArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(Self(None));
        }

        let value = s.strip_suffix('%').unwrap_or(s);
        let width = value.parse().map_err(|_| "error parsing width")?;
        Ok(Self(Some(width)))
    }
}

const CONTAINER: &str = "columns";

fn column_id(index: usize) -> ClientId {
    ClientId::new(format!("column-{index}"))
}

/// Builds a Columns container with the given widths.
pub fn build_store(widths: &[WidthArg]) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::new();
    let container = store.insert(None, CONTAINER, ColumnAttributes::default())?;
    for (index, width) in widths.iter().enumerate() {
        let attributes = ColumnAttributes {
            width: width.0,
            vertical_alignment: None,
        };
        store.insert(Some(&container), column_id(index), attributes)?;
    }
    Ok(store)
}

/// Applies `sub` to `store` and renders the resulting columns.
pub fn run(
    store: &mut MemoryStore,
    options: Options,
    sub: &Sub,
    json: bool,
) -> anyhow::Result<String> {
    let controller = ColumnController::new(options);
    let count = store.child_ids(&ClientId::from(CONTAINER)).len();

    let target = |index: usize| -> anyhow::Result<ClientId> {
        ensure!(
            index < count,
            "column index {index} is out of range, there are {count} columns"
        );
        Ok(column_id(index))
    };

    match *sub {
        Sub::Show => (),
        Sub::SetWidth { index, width } => {
            controller.update_width(store, &target(index)?, width)?;
        }
        Sub::ResetWidth { index } => {
            controller.reset_width(store, &target(index)?)?;
        }
        Sub::SetAlignment { index, alignment } => {
            controller.update_vertical_alignment(store, &target(index)?, Some(alignment))?;
        }
        Sub::ClearAlignment { index } => {
            controller.update_vertical_alignment(store, &target(index)?, None)?;
        }
    }

    if json {
        let props: Vec<_> = store
            .child_ids(&ClientId::from(CONTAINER))
            .iter()
            .filter_map(|id| ColumnProps::query(&*store, id))
            .collect();
        serde_json::to_string_pretty(&props).context("error formatting columns as JSON")
    } else {
        Ok(store.snapshot())
    }
}
