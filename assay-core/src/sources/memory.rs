//! In-memory record source.

use super::{RecordSource, Row, RowIter};
use crate::core::Value;
use crate::error::{AssayError, Result};

/// A [`RecordSource`] over rows already held in memory.
///
/// This is the source used by tests and by callers that parse their own
/// input, e.g. rows already read out of a delimited file.
///
/// # Examples
///
/// ```rust
/// use assay_core::sources::MemorySource;
/// use assay_core::core::Value;
///
/// let source = MemorySource::builder("good_data")
///     .columns(["player_name", "points"])
///     .row([Value::from("LeBron James"), Value::from(25)])
///     .row([Value::from("Stephen Curry"), Value::from(30)])
///     .build()?;
/// # Ok::<(), assay_core::error::AssayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    identifier: String,
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl MemorySource {
    /// Creates a new builder with the given source identifier.
    pub fn builder(identifier: impl Into<String>) -> MemorySourceBuilder {
        MemorySourceBuilder::new(identifier)
    }

    /// Returns the number of rows held.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl RecordSource for MemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn schema(&self) -> &[String] {
        &self.schema
    }

    fn rows(&self) -> Result<RowIter<'_>> {
        Ok(Box::new(self.rows.iter().cloned().map(Ok)))
    }
}

/// Builder for [`MemorySource`] instances.
///
/// Arity errors in positional [`row`](Self::row) calls are deferred to
/// [`build`](Self::build) so chains stay uncluttered.
#[derive(Debug)]
pub struct MemorySourceBuilder {
    identifier: String,
    schema: Vec<String>,
    rows: Vec<Row>,
    error: Option<AssayError>,
}

impl MemorySourceBuilder {
    /// Creates a new builder with the given source identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            schema: Vec::new(),
            rows: Vec::new(),
            error: None,
        }
    }

    /// Declares the column names, in order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a row of cells positionally matching the declared columns.
    /// A row of the wrong width fails the eventual [`build`](Self::build).
    pub fn row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.schema.len() {
            if self.error.is_none() {
                self.error = Some(AssayError::MalformedSource {
                    detail: format!(
                        "row {} has {} cells, schema declares {} columns",
                        self.rows.len(),
                        values.len(),
                        self.schema.len()
                    ),
                });
            }
            return self;
        }
        let mut row = Row::new();
        for (column, value) in self.schema.iter().zip(values) {
            row.insert(column.clone(), value);
        }
        self.rows.push(row);
        self
    }

    /// Appends a pre-built row. Unlike [`row`](Self::row), no arity check is
    /// performed, so rows with structural gaps can be represented.
    pub fn push_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Builds the source, surfacing any deferred arity error.
    pub fn build(self) -> Result<MemorySource> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(MemorySource {
            identifier: self.identifier,
            schema: self.schema,
            rows: self.rows,
        })
    }
}
