use crate::config::DbConfig;
use crate::domain::model::{BmiRecord, NewBmiRecord};
use crate::domain::ports::{BmiConnection, Connector};
use crate::utils::error::{BmiError, Result};
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};

pub const BMI_TABLE: &str = "bmi_history";

pub const CREATE_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS bmi_history (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    height DOUBLE NOT NULL,
    weight DOUBLE NOT NULL,
    bmi DOUBLE NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    INDEX idx_bmi_history_created_at (created_at)
)
"#;

const INSERT_SQL: &str = "INSERT INTO bmi_history (height, weight, bmi) VALUES (?, ?, ?)";

// Measurements are DOUBLE so every value the handler accepts is stored as sent.
const LIST_SQL: &str = r#"
SELECT CAST(id AS SIGNED), height, weight, bmi, created_at
FROM bmi_history
ORDER BY created_at DESC, id DESC
"#;

type BmiRow = (i64, f64, f64, f64, DateTime<Utc>);

/// Opens a fresh MySQL connection per call; there is no pool.
#[derive(Debug, Clone, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    pub fn new() -> Self {
        Self
    }

    pub fn connect_options(config: &DbConfig) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.dbname)
    }
}

impl Connector for MySqlConnector {
    type Connection = MySqlBmiConnection;

    async fn connect(&self, config: &DbConfig) -> Result<MySqlBmiConnection> {
        let connection = Self::connect_options(config)
            .connect()
            .await
            .map_err(|e| {
                BmiError::connection(format!(
                    "Failed to connect to {}:{}/{}: {}",
                    config.host, config.port, config.dbname, e
                ))
            })?;
        tracing::debug!(host = %config.host, "Opened store connection");
        Ok(MySqlBmiConnection { connection })
    }
}

pub struct MySqlBmiConnection {
    connection: MySqlConnection,
}

impl MySqlBmiConnection {
    /// Creates the history table when it does not exist yet.
    pub async fn ensure_schema(&mut self) -> Result<()> {
        sqlx::query(CREATE_TABLE_DDL)
            .execute(&mut self.connection)
            .await
            .map_err(|e| BmiError::query(format!("Failed to create {}: {}", BMI_TABLE, e)))?;
        Ok(())
    }
}

impl BmiConnection for MySqlBmiConnection {
    async fn insert(&mut self, record: &NewBmiRecord) -> Result<()> {
        sqlx::query(INSERT_SQL)
            .bind(record.height)
            .bind(record.weight)
            .bind(record.bmi)
            .execute(&mut self.connection)
            .await
            .map_err(|e| BmiError::query(format!("Failed to insert into {}: {}", BMI_TABLE, e)))?;
        Ok(())
    }

    async fn list_recent(&mut self) -> Result<Vec<BmiRecord>> {
        let rows: Vec<BmiRow> = sqlx::query_as(LIST_SQL)
            .fetch_all(&mut self.connection)
            .await
            .map_err(|e| BmiError::query(format!("Failed to read {}: {}", BMI_TABLE, e)))?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn close(self) -> Result<()> {
        self.connection
            .close()
            .await
            .map_err(|e| BmiError::connection(format!("Failed to close connection: {}", e)))
    }
}

fn into_record((id, height, weight, bmi, created_at): BmiRow) -> BmiRecord {
    BmiRecord {
        id,
        height,
        weight,
        bmi,
        created_at,
    }
}
