//! Reshapes a successful query service reply into a [`DataSet`].
//!
//! Any defect in the wire data (a row shorter than its catalog) fails the
//! whole build; no partial DataSet is ever returned.

use crate::dataset::{DataColumn, DataColumns, DataRow, DataSet, DataTable};
use crate::error::{ImateError, Result};
use crate::protocol::wire::{ColumnInfo, QueryRunResult, QueryValue};

/// Copies the wire column descriptors into a catalog, in order.
pub fn columns_from_infos(infos: &[ColumnInfo]) -> DataColumns {
    let mut columns = DataColumns::new();
    for info in infos {
        columns.add(DataColumn::new(
            info.ordinal,
            info.name.clone(),
            info.is_key,
            info.data_type,
        ));
    }
    columns
}

/// Builds one table from a named query result: every wire row becomes a
/// bulk-populated [`DataRow`] (not edit-tracked) attached to the table.
pub fn table_from_query_value(query_value: &QueryValue) -> Result<DataTable> {
    let columns = columns_from_infos(&query_value.column_infos);
    let mut table = DataTable::new(query_value.query_name.clone(), columns);

    // Rows are indexed by the wire ordinals, which need not be dense;
    // every row must cover the highest ordinal in the catalog.
    let width = query_value
        .column_infos
        .iter()
        .map(|info| info.ordinal + 1)
        .max()
        .unwrap_or(0);

    for wire_row in &query_value.rows {
        if wire_row.row_value.len() < width {
            return Err(ImateError::RowWidthMismatch {
                table: query_value.query_name.clone(),
                expected: width,
                actual: wire_row.row_value.len(),
            });
        }
        let mut row = DataRow::new();
        for column in table.columns() {
            row.new_value(
                column.ordinal,
                wire_row.row_value[column.ordinal].clone(),
                column.data_type,
            );
        }
        table.add_row(row);
    }

    log::debug!(
        "built table '{}': {} columns, {} rows",
        table.name(),
        table.column_count(),
        table.total_row_count()
    );
    Ok(table)
}

/// Builds a [`DataSet`] from a batch reply. The caller is expected to have
/// checked [`QueryRunResult::is_ok`]; this function only reshapes. Results
/// sharing a query name overwrite each other, the last one wins.
pub fn data_set_from_result(result: &QueryRunResult) -> Result<DataSet> {
    let mut data_set = DataSet::new(result.transaction_id.clone());
    for query_value in &result.results {
        data_set.insert_table(table_from_query_value(query_value)?);
    }
    Ok(data_set)
}
