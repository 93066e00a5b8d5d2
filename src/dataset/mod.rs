pub mod column;
pub mod convert;
pub mod data_set;
pub mod mapper;
pub mod row;
pub mod table;
pub mod value;

pub use column::{DataColumn, DataColumns};
pub use convert::FromCell;
pub use data_set::DataSet;
pub use mapper::RowMapper;
pub use row::{DataRow, RowStatus};
pub use table::DataTable;
pub use value::{DataValue, RowVersion};
