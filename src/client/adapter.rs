//! Adapter between the query service and the DataSet model: runs a query
//! or batch, checks the API result, and reshapes the reply into a
//! [`DataSet`].

use crate::async_bridge;
use crate::client::query::QueryClient;
use crate::dataset::DataSet;
use crate::error::{ImateError, Result};
use crate::protocol::builder::data_set_from_result;
use crate::protocol::{QueryMessage, QueryRunResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::{Arc, Mutex};

/// Messages reported by the service for the most recent call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastMessages {
    pub api_result: String,
    pub api_message: String,
    pub user_message: String,
}

/// Runs queries and converts successful replies into DataSets. Keeps the
/// last api/user messages for UI display, like the service's other
/// adapters do.
pub struct DataAdapter {
    client: QueryClient,
    last: Mutex<LastMessages>,
}

fn random_transaction_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}

impl DataAdapter {
    pub fn new(client: QueryClient) -> Self {
        Self {
            client,
            last: Mutex::new(LastMessages::default()),
        }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn last_messages(&self) -> LastMessages {
        self.last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, result: &QueryRunResult) {
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        last.api_result = result.api_result.clone();
        last.api_message = result.api_message.clone();
        last.user_message = result.user_message.clone();
    }

    fn to_data_set(&self, result: QueryRunResult) -> Result<DataSet> {
        self.record(&result);
        if !result.is_ok() {
            log::warn!(
                "query batch {} failed: {} ({})",
                result.transaction_id,
                result.api_result,
                result.api_message
            );
            return Err(ImateError::Api {
                api_result: result.api_result,
                api_message: result.api_message,
                user_message: result.user_message,
            });
        }
        data_set_from_result(&result)
    }

    /// Executes a query batch and reshapes the reply into a DataSet.
    pub fn select_to_data_set(
        &self,
        transaction_id: &str,
        messages: &[QueryMessage],
    ) -> Result<DataSet> {
        let result = self.client.execute_query_batch(transaction_id, messages)?;
        self.to_data_set(result)
    }

    /// Single-query variant with a generated transaction id.
    pub fn select_query_to_data_set(&self, data_source: &str, query: &str) -> Result<DataSet> {
        let transaction_id = random_transaction_id();
        let result = self
            .client
            .execute_query(&transaction_id, data_source, query)?;
        self.to_data_set(result)
    }

    /// Mutation path; the reply carries counts/messages, not tables.
    pub fn execute_none_query(&self, data_source: &str, query: &str) -> Result<QueryRunResult> {
        let transaction_id = random_transaction_id();
        let result = self
            .client
            .execute_none_query(&transaction_id, data_source, query)?;
        self.record(&result);
        Ok(result)
    }

    /// Async variant of [`select_to_data_set`](Self::select_to_data_set):
    /// runs on the shared runtime, `callback` is invoked exactly once.
    pub fn select_to_data_set_async(
        self: &Arc<Self>,
        transaction_id: String,
        messages: Vec<QueryMessage>,
        callback: impl FnOnce(Result<DataSet>) + Send + 'static,
    ) {
        let adapter = Arc::clone(self);
        async_bridge::dispatch(
            move || adapter.select_to_data_set(&transaction_id, &messages),
            callback,
        );
    }

    /// Async variant of
    /// [`select_query_to_data_set`](Self::select_query_to_data_set).
    pub fn select_query_to_data_set_async(
        self: &Arc<Self>,
        data_source: String,
        query: String,
        callback: impl FnOnce(Result<DataSet>) + Send + 'static,
    ) {
        let adapter = Arc::clone(self);
        async_bridge::dispatch(
            move || adapter.select_query_to_data_set(&data_source, &query),
            callback,
        );
    }
}
