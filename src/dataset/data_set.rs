use crate::dataset::table::DataTable;
use crate::error::{ImateError, Result};
use std::collections::HashMap;

/// A named set of tables produced from one query batch. A snapshot: it is
/// built once per batch and never merged with earlier sets.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    transaction_id: String,
    tables: HashMap<String, DataTable>,
}

impl DataSet {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            tables: HashMap::new(),
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Inserts the table under its own name; a later table with the same
    /// name overwrites the earlier one.
    pub fn insert_table(&mut self, table: DataTable) {
        self.tables.insert(table.name().to_string(), table);
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table(&self, name: &str) -> Result<&DataTable> {
        self.tables
            .get(name)
            .ok_or_else(|| ImateError::TableNotFound(name.to_string()))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut DataTable> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| ImateError::TableNotFound(name.to_string()))
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::column::DataColumns;

    #[test]
    fn test_table_lookup() {
        let mut set = DataSet::new("tx-1");
        set.insert_table(DataTable::new("A", DataColumns::new()));
        assert_eq!(set.transaction_id(), "tx-1");
        assert!(set.contains_table("A"));
        assert!(set.table("A").is_ok());
    }

    #[test]
    fn test_missing_table_is_not_found() {
        let set = DataSet::new("tx-1");
        let err = set.table("A").unwrap_err();
        assert!(matches!(err, ImateError::TableNotFound(name) if name == "A"));
    }

    #[test]
    fn test_same_name_overwrites() {
        let mut set = DataSet::new("tx-1");

        let mut columns = DataColumns::new();
        columns.add(crate::dataset::column::DataColumn::new(
            0,
            "OLD",
            false,
            crate::protocol::QueryDataType::String,
        ));
        set.insert_table(DataTable::new("X", columns));

        let mut columns = DataColumns::new();
        columns.add(crate::dataset::column::DataColumn::new(
            0,
            "NEW",
            false,
            crate::protocol::QueryDataType::String,
        ));
        set.insert_table(DataTable::new("X", columns));

        assert_eq!(set.table_count(), 1);
        assert_eq!(set.table("X").unwrap().column_names(), vec!["NEW"]);
    }

    #[test]
    fn test_table_mut() {
        let mut set = DataSet::new("tx");
        set.insert_table(DataTable::new("A", DataColumns::new()));
        set.table_mut("A").unwrap();
        assert!(set.table_mut("B").is_err());
    }
}
