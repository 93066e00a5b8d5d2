//! JSON wire model of the iMATE query service.
//!
//! Field names follow the service's camelCase JSON; enum tags carry the
//! exact strings the service emits ("String", "Number", "Alone", ...).

use crate::error::ImateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared data type of a result column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDataType {
    String,
    Number,
    /// Date or date-time
    Date,
    Time,
}

impl FromStr for QueryDataType {
    type Err = ImateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(QueryDataType::String),
            "Number" => Ok(QueryDataType::Number),
            "Date" => Ok(QueryDataType::Date),
            "Time" => Ok(QueryDataType::Time),
            other => Err(ImateError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for QueryDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryDataType::String => "String",
            QueryDataType::Number => "Number",
            QueryDataType::Date => "Date",
            QueryDataType::Time => "Time",
        };
        f.write_str(name)
    }
}

/// Column metadata of one result table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub ordinal: usize,
    pub name: String,
    pub is_key: bool,
    pub data_type: QueryDataType,
}

/// One result row: raw string values, position-aligned with the column ordinals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowValue {
    pub row_value: Vec<String>,
}

/// One named query result: column metadata plus its rows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryValue {
    pub query_name: String,
    pub column_infos: Vec<ColumnInfo>,
    pub rows: Vec<RowValue>,
}

/// Reply of a query batch execution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRunResult {
    pub transaction_id: String,
    pub results: Vec<QueryValue>,
    pub api_result: String,
    pub api_message: String,
    pub user_message: String,
}

impl QueryRunResult {
    /// True iff the service reported success for the whole batch.
    pub fn is_ok(&self) -> bool {
        self.api_result == "OK"
    }
}

/// How a query in a batch relates to the others.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRunMethod {
    /// Runs independently of the other queries
    Alone,
    /// Runs once per row of the query it depends on
    Depend,
    /// Parameters are built from the dependent query's data, then runs once
    Bound,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    pub name: String,
    pub data_type: QueryDataType,
    pub value: String,
    pub template: String,
    pub line_terminate_char: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub surfix: String,
}

/// One query of a batch request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryMessage {
    pub query_method: QueryRunMethod,
    pub query_name: String,
    pub data_source: String,
    pub query_template: String,
    pub depend_query: Vec<String>,
    pub parameters: Vec<QueryParameter>,
}

/// OTP authentication request body for the token service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImateAuthInfo {
    pub auth_id: String,
    pub auth_code: String,
    pub auth_type: String,
    pub user_data: String,
}
