use crate::config::DbConfig;
use crate::domain::model::{BmiRecord, NewBmiRecord};
use crate::utils::error::Result;
use std::future::Future;

/// Opaque secret store: returns the raw secret string for an identifier.
pub trait SecretSource: Send + Sync {
    fn fetch_secret(&self, secret_id: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Opens one store connection per invocation.
pub trait Connector: Send + Sync {
    type Connection: BmiConnection;

    fn connect(&self, config: &DbConfig)
        -> impl Future<Output = Result<Self::Connection>> + Send;
}

/// A single open store connection. Must be consumed by `close`.
pub trait BmiConnection: Send + Sized {
    fn insert(&mut self, record: &NewBmiRecord) -> impl Future<Output = Result<()>> + Send;

    /// All rows, newest `created_at` first.
    fn list_recent(&mut self) -> impl Future<Output = Result<Vec<BmiRecord>>> + Send;

    fn close(self) -> impl Future<Output = Result<()>> + Send;
}
