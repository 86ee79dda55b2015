//! Record sources: suppliers of row data to validate.
//!
//! The engine only requires the iteration contract defined by
//! [`RecordSource`]; it does not care whether rows originate from a
//! delimited text file, a table, or an in-memory collection. One pass is
//! guaranteed to suffice, so sources need not be replayable.

use crate::core::Value;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

mod memory;

pub use memory::{MemorySource, MemorySourceBuilder};

/// A single row: a mapping from column name to raw cell value.
///
/// A cell can be *absent* from the mapping entirely, which is distinct from
/// an explicit [`Value::Null`]: absence means the row is structurally
/// shorter than the schema declares, and the engine notes it in the
/// affected outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: HashMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, builder-style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Adds or replaces a cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Returns the cell for `column`, or `None` if the row has no such cell.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Returns the number of cells in this row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A fallible iterator over a source's rows.
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<Row>> + 'a>;

/// An ordered, finite supplier of [`Row`]s plus the known column names.
///
/// Row order is significant: row indices reported in validation outcomes are
/// zero-based positions in the sequence produced by [`rows`](Self::rows).
/// The engine reads the sequence exactly once per validation; a failure
/// while iterating aborts the whole run with
/// [`AssayError::SourceExhausted`](crate::error::AssayError::SourceExhausted).
pub trait RecordSource: Debug + Send + Sync {
    /// A stable, human-readable identifier for this source (e.g. a file
    /// name or table name), echoed into the validation result.
    fn identifier(&self) -> &str;

    /// The known column names, in source order.
    fn schema(&self) -> &[String];

    /// Starts one pass over the rows.
    fn rows(&self) -> Result<RowIter<'_>>;
}
