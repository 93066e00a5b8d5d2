pub mod builder;
pub mod wire;

pub use builder::{columns_from_infos, data_set_from_result, table_from_query_value};
pub use wire::{
    ColumnInfo, ImateAuthInfo, QueryDataType, QueryMessage, QueryParameter, QueryRunMethod,
    QueryRunResult, QueryValue, RowValue,
};
