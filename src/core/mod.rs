pub mod handler;

pub use crate::domain::model::{BmiMeasurement, BmiRecord, BmiResult, NewBmiRecord};
pub use crate::domain::ports::{BmiConnection, Connector, SecretSource};
pub use crate::utils::error::Result;
