//! Materialization of table rows into caller-defined structs.
//!
//! The Kotlin ancestor of this library matched columns to object fields by
//! runtime reflection. Here the binding is explicit: each target field is
//! registered once with the column name it reads and a setter closure, and
//! the column lookup is resolved once per table, not once per row.

use crate::dataset::convert::FromCell;
use crate::dataset::data_set::DataSet;
use crate::dataset::row::DataRow;
use crate::dataset::table::DataTable;
use crate::dataset::value::RowVersion;
use crate::error::Result;

type Apply<T> = Box<dyn Fn(&mut T, &DataRow, usize) -> Result<()>>;

struct Binding<T> {
    column: String,
    apply: Apply<T>,
}

/// Maps the rows of one table onto instances of `T`.
///
/// Bindings whose column does not exist in the table's catalog are skipped,
/// leaving the corresponding field at its `Default`. Matching is exact and
/// case-sensitive; values are read in the `Current` version. A conversion
/// failure aborts the whole materialization.
///
/// ```
/// use imate_data::{DataColumn, DataColumns, DataRow, DataTable, RowMapper};
/// use imate_data::QueryDataType;
///
/// #[derive(Default)]
/// struct Item {
///     id: i32,
///     name: String,
/// }
///
/// let mut columns = DataColumns::new();
/// columns.add(DataColumn::new(0, "id", true, QueryDataType::Number));
/// columns.add(DataColumn::new(1, "name", false, QueryDataType::String));
/// let mut table = DataTable::new("ITEMS", columns);
/// let mut row = DataRow::new();
/// row.new_value(0, "42", QueryDataType::Number);
/// row.new_value(1, "Ann", QueryDataType::String);
/// table.add_row(row);
///
/// let mapper = RowMapper::<Item>::new()
///     .field("id", |item, v: i32| item.id = v)
///     .field("name", |item, v: String| item.name = v);
/// let items = mapper.map_table(&table).unwrap();
/// assert_eq!(items[0].id, 42);
/// assert_eq!(items[0].name, "Ann");
/// ```
pub struct RowMapper<T> {
    bindings: Vec<Binding<T>>,
}

impl<T: Default> RowMapper<T> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Registers one field: the column it reads and the setter applied when
    /// the column yields a value. Absent cells leave the field untouched.
    pub fn field<V>(mut self, column: &str, assign: impl Fn(&mut T, V) + 'static) -> Self
    where
        V: FromCell + 'static,
    {
        let apply: Apply<T> = Box::new(move |target, row, ordinal| {
            if let Some(value) = row.get::<V>(ordinal, RowVersion::Current)? {
                assign(target, value);
            }
            Ok(())
        });
        self.bindings.push(Binding {
            column: column.to_string(),
            apply,
        });
        self
    }

    /// Materializes every logical row of `table` (current-row semantics,
    /// indices `0..row_count()`).
    pub fn map_table(&self, table: &DataTable) -> Result<Vec<T>> {
        // Resolve each binding against the catalog once; unmatched
        // bindings drop out here.
        let resolved: Vec<(usize, &Apply<T>)> = self
            .bindings
            .iter()
            .filter_map(|binding| {
                table
                    .column_index(&binding.column)
                    .map(|ordinal| (ordinal, &binding.apply))
            })
            .collect();

        let mut out = Vec::with_capacity(table.row_count());
        for index in 0..table.row_count() {
            let row = table.current_row(index)?;
            let mut target = T::default();
            for (ordinal, apply) in &resolved {
                apply(&mut target, row, *ordinal)?;
            }
            out.push(target);
        }
        Ok(out)
    }

    /// Materializes the named table of `data_set`; fails with
    /// `TableNotFound` if it does not exist.
    pub fn data_objects(&self, data_set: &DataSet, table_name: &str) -> Result<Vec<T>> {
        self.map_table(data_set.table(table_name)?)
    }
}

impl<T: Default> Default for RowMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::column::{DataColumn, DataColumns};
    use crate::error::ImateError;
    use crate::protocol::QueryDataType;

    #[derive(Default, Debug, PartialEq)]
    struct Target {
        id: i32,
        name: String,
        extra: String,
    }

    fn mapper() -> RowMapper<Target> {
        RowMapper::<Target>::new()
            .field("id", |t, v: i32| t.id = v)
            .field("name", |t, v: String| t.name = v)
            .field("extra", |t, v: String| t.extra = v)
    }

    fn table(rows: &[(&str, &str)]) -> DataTable {
        let mut columns = DataColumns::new();
        columns.add(DataColumn::new(0, "id", true, QueryDataType::Number));
        columns.add(DataColumn::new(1, "name", false, QueryDataType::String));
        let mut table = DataTable::new("ITEMS", columns);
        for (id, name) in rows {
            let mut row = DataRow::new();
            row.new_value(0, *id, QueryDataType::Number);
            row.new_value(1, *name, QueryDataType::String);
            table.add_row(row);
        }
        table
    }

    #[test]
    fn test_unmatched_field_keeps_default() {
        // "extra" has no matching column; it stays at its default.
        let items = mapper().map_table(&table(&[("42", "Ann")])).unwrap();
        assert_eq!(
            items,
            vec![Target {
                id: 42,
                name: "Ann".to_string(),
                extra: String::new(),
            }]
        );
    }

    #[test]
    fn test_maps_every_logical_row() {
        let items = mapper()
            .map_table(&table(&[("1", "Ann"), ("2", "Bob")]))
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
        assert_eq!(items[1].name, "Bob");
    }

    #[test]
    fn test_deleted_rows_are_skipped() {
        let mut table = table(&[("1", "Ann"), ("2", "Bob"), ("3", "Cid")]);
        table.delete_row(1).unwrap();
        let items = mapper().map_table(&table).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Ann");
        assert_eq!(items[1].name, "Cid");
    }

    #[test]
    fn test_conversion_failure_aborts() {
        let result = mapper().map_table(&table(&[("not-a-number", "Ann")]));
        assert!(matches!(
            result.unwrap_err(),
            ImateError::Conversion { .. }
        ));
    }

    #[test]
    fn test_missing_table_in_data_set() {
        let set = DataSet::new("tx");
        let err = mapper().data_objects(&set, "ITEMS").unwrap_err();
        assert!(matches!(err, ImateError::TableNotFound(_)));
    }

    #[test]
    fn test_data_objects_from_set() {
        let mut set = DataSet::new("tx");
        set.insert_table(table(&[("5", "Eve")]));
        let items = mapper().data_objects(&set, "ITEMS").unwrap();
        assert_eq!(items[0].id, 5);
    }

    #[test]
    fn test_empty_table_yields_empty_vec() {
        let items = mapper().map_table(&table(&[])).unwrap();
        assert!(items.is_empty());
    }
}
