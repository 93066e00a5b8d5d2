use crate::protocol::QueryDataType;

/// Which snapshot of a cell to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVersion {
    /// The value as last accepted
    Original,
    /// The value currently held, pending acceptance
    Current,
}

/// One cell: the raw wire string in its original and current version, plus
/// the column's declared data type. Conversion to typed values happens at
/// read time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataValue {
    original: Option<String>,
    current: Option<String>,
    data_type: QueryDataType,
}

impl DataValue {
    pub fn new(value: Option<String>, data_type: QueryDataType) -> Self {
        Self {
            original: value.clone(),
            current: value,
            data_type,
        }
    }

    pub fn data_type(&self) -> QueryDataType {
        self.data_type
    }

    pub fn get(&self, version: RowVersion) -> Option<&str> {
        match version {
            RowVersion::Current => self.current.as_deref(),
            RowVersion::Original => self.original.as_deref(),
        }
    }

    /// Overwrites the current value only; the original is untouched.
    pub fn set(&mut self, value: Option<String>) {
        self.current = value;
    }

    /// Closes the edit: the current value becomes the original.
    pub fn accept_changed(&mut self) {
        self.original = self.current.clone();
    }

    /// Null-safe: a value transitioning between present and absent counts
    /// as modified.
    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }
}
