// Adapters layer: concrete implementations of the domain ports.

pub mod mysql;

pub use mysql::{MySqlBmiConnection, MySqlConnector};
