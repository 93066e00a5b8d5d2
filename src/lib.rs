pub mod async_bridge;
pub mod client;
pub mod dataset;
mod error;
pub mod protocol;

pub use client::{AuthInfo, ClientConfig, DataAdapter, LastMessages, QueryClient, Session, TokenClient};
pub use dataset::{
    DataColumn, DataColumns, DataRow, DataSet, DataTable, DataValue, FromCell, RowMapper,
    RowStatus, RowVersion,
};
pub use error::{ErrorCategory, ImateError, Result};
pub use protocol::{
    ColumnInfo, ImateAuthInfo, QueryDataType, QueryMessage, QueryParameter, QueryRunMethod,
    QueryRunResult, QueryValue, RowValue,
};
