use crate::protocol::QueryDataType;

/// Descriptor of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataColumn {
    /// 0-based position, stable identity within the catalog
    pub ordinal: usize,
    pub name: String,
    pub is_key: bool,
    pub data_type: QueryDataType,
}

impl DataColumn {
    pub fn new(
        ordinal: usize,
        name: impl Into<String>,
        is_key: bool,
        data_type: QueryDataType,
    ) -> Self {
        Self {
            ordinal,
            name: name.into(),
            is_key,
            data_type,
        }
    }
}

/// Ordered column catalog of one table. Name lookups are linear scans;
/// column counts are small. Uniqueness of names is caller discipline,
/// lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataColumns {
    columns: Vec<DataColumn>,
}

impl DataColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without any uniqueness check.
    pub fn add(&mut self, column: DataColumn) {
        self.columns.push(column);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn exists_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// First descriptor whose name matches exactly (case-sensitive).
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_at(&self, index: usize) -> Option<&DataColumn> {
        self.columns.get(index)
    }

    /// Ordinal of the first descriptor whose name matches.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.ordinal)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataColumn> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a DataColumns {
    type Item = &'a DataColumn;
    type IntoIter = std::slice::Iter<'a, DataColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
