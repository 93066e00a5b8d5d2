use crate::dataset::column::{DataColumn, DataColumns};
use crate::dataset::convert::FromCell;
use crate::dataset::row::{DataRow, RowStatus};
use crate::dataset::value::RowVersion;
use crate::error::{ImateError, Result};

/// An ordered collection of rows bound to a column catalog.
///
/// Row indices passed to accessors are physical positions over all rows,
/// deleted ones included. When the addressed row is deleted, the lookup
/// resolves forward to the first non-deleted row at a higher physical
/// index. This is forward-skip on a physical index, not a renumbering of
/// the non-deleted rows.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    name: String,
    columns: DataColumns,
    rows: Vec<DataRow>,
}

impl DataTable {
    pub fn new(name: impl Into<String>, columns: DataColumns) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &DataColumns {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.index_of(name)
    }

    pub fn column_at(&self, index: usize) -> Option<&DataColumn> {
        self.columns.column_at(index)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.names()
    }

    /// Appends the row and attaches it to this table. Attaching resets the
    /// status to `Unchanged`, discarding any pending edit state the row
    /// carried while standalone.
    pub fn add_row(&mut self, mut row: DataRow) {
        row.attach();
        self.rows.push(row);
    }

    /// Creates a row pre-populated with an empty string for every catalog
    /// column, appends it in `Addnew` status, and returns its physical
    /// index.
    pub fn new_row(&mut self) -> usize {
        let mut row = DataRow::new();
        for column in &self.columns {
            row.new_value(column.ordinal, "", column.data_type);
        }
        row.attach();
        row.set_status(RowStatus::Addnew);
        self.rows.push(row);
        self.rows.len() - 1
    }

    fn resolve_index(&self, index: usize) -> Result<usize> {
        if index >= self.rows.len() {
            return Err(ImateError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            });
        }
        if self.rows[index].status() != RowStatus::Deleted {
            return Ok(index);
        }
        self.rows
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, row)| row.status() != RowStatus::Deleted)
            .map(|(i, _)| i)
            .ok_or(ImateError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            })
    }

    /// The row at the physical `index`, resolving forward past deleted rows.
    pub fn current_row(&self, index: usize) -> Result<&DataRow> {
        let resolved = self.resolve_index(index)?;
        Ok(&self.rows[resolved])
    }

    pub fn current_row_mut(&mut self, index: usize) -> Result<&mut DataRow> {
        let resolved = self.resolve_index(index)?;
        Ok(&mut self.rows[resolved])
    }

    /// Number of rows not marked deleted.
    pub fn row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.status() != RowStatus::Deleted)
            .count()
    }

    /// Number of rows with exactly the given status.
    pub fn row_count_with_status(&self, status: RowStatus) -> usize {
        self.rows.iter().filter(|row| row.status() == status).count()
    }

    /// Physical row count, deleted rows included.
    pub fn total_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn rows_with_status(&self, status: RowStatus) -> Vec<&DataRow> {
        self.rows
            .iter()
            .filter(|row| row.status() == status)
            .collect()
    }

    /// Typed read through [`current_row`](Self::current_row).
    pub fn value<T: FromCell>(
        &self,
        row_index: usize,
        ordinal: usize,
        version: RowVersion,
    ) -> Result<Option<T>> {
        self.current_row(row_index)?.get(ordinal, version)
    }

    pub fn value_by_name<T: FromCell>(
        &self,
        row_index: usize,
        name: &str,
        version: RowVersion,
    ) -> Result<Option<T>> {
        let ordinal = self
            .columns
            .index_of(name)
            .ok_or_else(|| ImateError::ColumnNotFound(name.to_string()))?;
        self.current_row(row_index)?.get(ordinal, version)
    }

    pub fn set_value(&mut self, row_index: usize, ordinal: usize, value: Option<&str>) -> Result<()> {
        self.current_row_mut(row_index)?.set_value(ordinal, value)
    }

    pub fn set_value_by_name(
        &mut self,
        row_index: usize,
        name: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let ordinal = self
            .columns
            .index_of(name)
            .ok_or_else(|| ImateError::ColumnNotFound(name.to_string()))?;
        self.current_row_mut(row_index)?.set_value(ordinal, value)
    }

    /// Deletes the row resolved at `index`.
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        self.current_row_mut(index)?.delete();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::QueryDataType;

    fn catalog() -> DataColumns {
        let mut columns = DataColumns::new();
        columns.add(DataColumn::new(0, "ID", true, QueryDataType::Number));
        columns.add(DataColumn::new(1, "NAME", false, QueryDataType::String));
        columns
    }

    fn table_with_rows(names: &[&str]) -> DataTable {
        let mut table = DataTable::new("T", catalog());
        for (i, name) in names.iter().enumerate() {
            let mut row = DataRow::new();
            row.new_value(0, i.to_string(), QueryDataType::Number);
            row.new_value(1, *name, QueryDataType::String);
            table.add_row(row);
        }
        table
    }

    #[test]
    fn test_add_row_attaches() {
        let table = table_with_rows(&["Ann"]);
        assert_eq!(table.current_row(0).unwrap().status(), RowStatus::Unchanged);
    }

    #[test]
    fn test_add_row_resets_pending_edits_to_unchanged() {
        let mut table = DataTable::new("T", catalog());
        let mut row = DataRow::new();
        row.new_value(0, "1", QueryDataType::Number);
        row.new_value(1, "Ann", QueryDataType::String);
        row.attach();
        row.set_value(1, Some("Bob")).unwrap();
        assert_eq!(row.status(), RowStatus::Modified);

        table.add_row(row);
        assert_eq!(table.current_row(0).unwrap().status(), RowStatus::Unchanged);
    }

    #[test]
    fn test_new_row_is_inserted_with_addnew_status() {
        let mut table = table_with_rows(&["Ann"]);
        let index = table.new_row();
        assert_eq!(index, 1);
        let row = table.current_row(index).unwrap();
        assert_eq!(row.status(), RowStatus::Addnew);
        assert_eq!(row.cell_count(), 2);
        assert_eq!(row.raw_value(0, RowVersion::Current), Some(""));
        assert_eq!(row.raw_value(1, RowVersion::Current), Some(""));
    }

    #[test]
    fn test_row_count_excludes_deleted() {
        let mut table = table_with_rows(&["Ann", "Bob", "Cid"]);
        table.delete_row(1).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.total_row_count(), 3);
        assert_eq!(table.row_count_with_status(RowStatus::Deleted), 1);
        assert_eq!(table.row_count_with_status(RowStatus::Unchanged), 2);
    }

    #[test]
    fn test_current_row_skips_forward_over_deleted() {
        let mut table = table_with_rows(&["Ann", "Bob", "Cid"]);
        table.delete_row(1).unwrap();

        // Physical index 1 is deleted; lookup resolves forward to "Cid".
        let row = table.current_row(1).unwrap();
        assert_eq!(
            row.get::<String>(1, RowVersion::Current).unwrap().as_deref(),
            Some("Cid")
        );

        // Physical index 2 is "Cid" itself, returned directly.
        let row = table.current_row(2).unwrap();
        assert_eq!(
            row.get::<String>(1, RowVersion::Current).unwrap().as_deref(),
            Some("Cid")
        );
    }

    #[test]
    fn test_current_row_out_of_range() {
        let table = table_with_rows(&["Ann"]);
        let err = table.current_row(1).unwrap_err();
        assert!(matches!(err, ImateError::RowOutOfRange { index: 1, rows: 1 }));
    }

    #[test]
    fn test_current_row_fails_when_only_deleted_rows_remain() {
        let mut table = table_with_rows(&["Ann", "Bob"]);
        table.delete_row(1).unwrap();
        // Index 1 addresses the deleted tail; nothing non-deleted follows.
        let err = table.current_row(1).unwrap_err();
        assert!(matches!(err, ImateError::RowOutOfRange { .. }));
    }

    #[test]
    fn test_value_by_name() {
        let table = table_with_rows(&["Ann"]);
        assert_eq!(
            table
                .value_by_name::<String>(0, "NAME", RowVersion::Current)
                .unwrap(),
            Some("Ann".to_string())
        );
        assert_eq!(
            table.value::<i64>(0, 0, RowVersion::Current).unwrap(),
            Some(0)
        );
    }

    #[test]
    fn test_value_by_name_unknown_column() {
        let table = table_with_rows(&["Ann"]);
        let err = table
            .value_by_name::<String>(0, "MISSING", RowVersion::Current)
            .unwrap_err();
        assert!(matches!(err, ImateError::ColumnNotFound(_)));
    }

    #[test]
    fn test_set_value_by_name_marks_modified() {
        let mut table = table_with_rows(&["Ann"]);
        table.set_value_by_name(0, "NAME", Some("Bob")).unwrap();
        let row = table.current_row(0).unwrap();
        assert_eq!(row.status(), RowStatus::Modified);
        assert_eq!(row.raw_value(1, RowVersion::Original), Some("Ann"));
        assert_eq!(row.raw_value(1, RowVersion::Current), Some("Bob"));
    }

    #[test]
    fn test_delete_row_out_of_range() {
        let mut table = table_with_rows(&[]);
        assert!(matches!(
            table.delete_row(0).unwrap_err(),
            ImateError::RowOutOfRange { .. }
        ));
    }

    #[test]
    fn test_rows_with_status() {
        let mut table = table_with_rows(&["Ann", "Bob", "Cid"]);
        table.set_value(0, 1, Some("Amy")).unwrap();
        table.delete_row(2).unwrap();
        assert_eq!(table.rows_with_status(RowStatus::Modified).len(), 1);
        assert_eq!(table.rows_with_status(RowStatus::Deleted).len(), 1);
        assert_eq!(table.rows_with_status(RowStatus::Unchanged).len(), 1);
    }

    #[test]
    fn test_column_accessors() {
        let table = table_with_rows(&[]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_index("NAME"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert_eq!(table.column_names(), vec!["ID", "NAME"]);
        assert_eq!(table.column_at(0).unwrap().name, "ID");
    }
}
