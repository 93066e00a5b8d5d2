use crate::dataset::column::DataColumns;
use crate::dataset::convert::FromCell;
use crate::dataset::value::{DataValue, RowVersion};
use crate::error::{ImateError, Result};
use crate::protocol::QueryDataType;
use std::collections::HashMap;

/// Lifecycle state of a row.
///
/// `Unattached -> Unchanged` on attach, `Unchanged -> Modified` on edit,
/// `Modified -> Unchanged` on accept. `Deleted` is reachable from any
/// non-terminal state and absorbing. `Addnew` marks rows created through
/// [`DataTable::new_row`](crate::dataset::DataTable::new_row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Unattached,
    Unchanged,
    Modified,
    Deleted,
    Addnew,
}

/// One table row: cells keyed by column ordinal plus a lifecycle status.
///
/// A row holds no reference to its table; the table owns its rows, and
/// name-based operations resolve through a [`DataColumns`] catalog.
#[derive(Debug, Clone, Default)]
pub struct DataRow {
    cells: HashMap<usize, DataValue>,
    status: RowStatus,
}

impl Default for RowStatus {
    fn default() -> Self {
        RowStatus::Unattached
    }
}

impl DataRow {
    /// A standalone row, not yet part of any table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RowStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: RowStatus) {
        self.status = status;
    }

    /// Called when a table takes ownership of this row.
    pub(crate) fn attach(&mut self) {
        self.status = RowStatus::Unchanged;
    }

    /// Initial population: inserts or silently replaces the cell at
    /// `ordinal`. Not edit-tracked; the status is untouched.
    pub fn new_value(&mut self, ordinal: usize, value: impl Into<String>, data_type: QueryDataType) {
        self.cells
            .insert(ordinal, DataValue::new(Some(value.into()), data_type));
    }

    /// Edit-tracked update of an existing cell. The cell must have been
    /// created via [`new_value`](Self::new_value) first, and edits on a
    /// deleted row are rejected.
    pub fn set_value(&mut self, ordinal: usize, value: Option<&str>) -> Result<()> {
        if self.status == RowStatus::Deleted {
            return Err(ImateError::RowDeleted);
        }
        let cell = self
            .cells
            .get_mut(&ordinal)
            .ok_or(ImateError::CellNotPopulated(ordinal))?;
        cell.set(value.map(str::to_string));
        self.status = RowStatus::Modified;
        Ok(())
    }

    /// Name-based variant of [`set_value`](Self::set_value).
    pub fn set_value_by_name(
        &mut self,
        columns: &DataColumns,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let ordinal = columns
            .index_of(name)
            .ok_or_else(|| ImateError::ColumnNotFound(name.to_string()))?;
        self.set_value(ordinal, value)
    }

    /// The raw string at `ordinal` in the requested version; `None` for an
    /// absent cell or an absent value.
    pub fn raw_value(&self, ordinal: usize, version: RowVersion) -> Option<&str> {
        self.cells.get(&ordinal).and_then(|cell| cell.get(version))
    }

    /// Typed read: resolves the raw value, then converts it per the
    /// [`FromCell`] rules. Absent cells read as `Ok(None)`.
    pub fn get<T: FromCell>(&self, ordinal: usize, version: RowVersion) -> Result<Option<T>> {
        match self.raw_value(ordinal, version) {
            Some(raw) => T::from_cell(raw),
            None => Ok(None),
        }
    }

    /// Name-based variant of [`get`](Self::get).
    pub fn get_by_name<T: FromCell>(
        &self,
        columns: &DataColumns,
        name: &str,
        version: RowVersion,
    ) -> Result<Option<T>> {
        let ordinal = columns
            .index_of(name)
            .ok_or_else(|| ImateError::ColumnNotFound(name.to_string()))?;
        self.get(ordinal, version)
    }

    pub fn cell(&self, ordinal: usize) -> Option<&DataValue> {
        self.cells.get(&ordinal)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Marks the row deleted, unconditionally.
    pub fn delete(&mut self) {
        self.status = RowStatus::Deleted;
    }

    /// Accepts pending cell edits and resets the status to `Unchanged`,
    /// unless the row is deleted (terminal for this cycle).
    pub fn accept_changed(&mut self) {
        if self.status == RowStatus::Deleted {
            return;
        }
        for cell in self.cells.values_mut() {
            cell.accept_changed();
        }
        self.status = RowStatus::Unchanged;
    }
}
