pub mod adapter;
pub mod query;
pub mod session;
pub mod token;

pub use adapter::{DataAdapter, LastMessages};
pub use query::{ClientConfig, QueryClient};
pub use session::{AuthInfo, Session};
pub use token::TokenClient;
