//! CSV ingestion for talk2data.
//!
//! Parses a columnar file (header row + typed rows) into a [`Dataset`] and
//! loads it into the store under a session table name, replacing any prior
//! table of that name.

use crate::error::{Result, Talk2DataError};
use crate::store::{quote_ident, Row, SqliteStore, Value};
use std::io;
use tracing::debug;

/// Storage class inferred for a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every non-empty cell parses as a signed integer.
    Integer,
    /// Every non-empty cell parses as a number, at least one non-integer.
    Real,
    /// Anything else.
    Text,
}

impl ColumnType {
    /// Returns the SQLite type name for a CREATE TABLE statement.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

/// A parsed tabular dataset ready for ingestion.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column names from the header row, in file order.
    pub columns: Vec<String>,
    /// Inferred storage class per column.
    pub column_types: Vec<ColumnType>,
    /// Typed rows. Empty cells become NULL.
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Parses CSV data from a reader.
    ///
    /// The first record is the header. Column types are inferred from the
    /// data: all-integer columns become INTEGER, otherwise all-numeric
    /// columns become REAL, everything else TEXT. Empty cells are NULL and
    /// do not constrain inference.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .map_err(|e| Talk2DataError::ingestion(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.is_empty() {
            return Err(Talk2DataError::ingestion("CSV file has no header row"));
        }

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| Talk2DataError::ingestion(e.to_string()))?;
            records.push(record);
        }

        let column_types = infer_column_types(columns.len(), &records);

        let rows = records
            .iter()
            .map(|record| {
                record
                    .iter()
                    .zip(&column_types)
                    .map(|(cell, ty)| convert_cell(cell, *ty))
                    .collect()
            })
            .collect();

        Ok(Self {
            columns,
            column_types,
            rows,
        })
    }

    /// Parses CSV data from an in-memory string.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_reader(data.as_bytes())
    }
}

/// Infers one storage class per column from the raw records.
fn infer_column_types(column_count: usize, records: &[csv::StringRecord]) -> Vec<ColumnType> {
    (0..column_count)
        .map(|i| {
            let mut all_int = true;
            let mut all_real = true;
            let mut has_value = false;

            for record in records {
                let cell = record.get(i).unwrap_or("").trim();
                if cell.is_empty() {
                    continue;
                }
                has_value = true;
                if all_int && cell.parse::<i64>().is_err() {
                    all_int = false;
                }
                if all_real && cell.parse::<f64>().is_err() {
                    all_real = false;
                }
            }

            if has_value && all_int {
                ColumnType::Integer
            } else if has_value && all_real {
                ColumnType::Real
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

/// Converts a raw cell to a typed value. Empty cells are NULL.
fn convert_cell(cell: &str, ty: ColumnType) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    match ty {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Text(cell.to_string())),
        ColumnType::Real => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Text(cell.to_string())),
        ColumnType::Text => Value::Text(cell.to_string()),
    }
}

impl SqliteStore {
    /// Loads a dataset under `table`, replacing any prior table of that
    /// name. The whole load runs in one transaction.
    pub async fn ingest(&self, dataset: &Dataset, table: &str) -> Result<()> {
        let quoted = quote_ident(table);

        let column_defs = dataset
            .columns
            .iter()
            .zip(&dataset.column_types)
            .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| Talk2DataError::ingestion(format!("Failed to start ingest: {e}")))?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {quoted}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| Talk2DataError::ingestion(format!("Failed to replace table: {e}")))?;

        sqlx::query(&format!("CREATE TABLE {quoted} ({column_defs})"))
            .execute(&mut *tx)
            .await
            .map_err(|e| Talk2DataError::ingestion(format!("Failed to create table: {e}")))?;

        if !dataset.rows.is_empty() {
            let column_list = dataset
                .columns
                .iter()
                .map(|c| quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ");
            let placeholders = vec!["?"; dataset.columns.len()].join(", ");
            let insert_sql =
                format!("INSERT INTO {quoted} ({column_list}) VALUES ({placeholders})");

            for row in &dataset.rows {
                let mut query = sqlx::query(&insert_sql);
                for value in row {
                    query = match value {
                        Value::Null => query.bind(Option::<String>::None),
                        Value::Int(i) => query.bind(*i),
                        Value::Float(f) => query.bind(*f),
                        Value::Text(s) => query.bind(s.clone()),
                        Value::Blob(b) => query.bind(b.clone()),
                    };
                }
                query
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| Talk2DataError::ingestion(format!("Failed to insert row: {e}")))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| Talk2DataError::ingestion(format!("Failed to commit ingest: {e}")))?;

        debug!(
            "Ingested {} row(s) into {} ({} columns)",
            dataset.rows.len(),
            table,
            dataset.columns.len()
        );

        Ok(())
    }

    /// Parses CSV data from a reader and loads it under `table`.
    pub async fn ingest_csv<R: io::Read>(&self, reader: R, table: &str) -> Result<()> {
        let dataset = Dataset::from_reader(reader)?;
        self.ingest(&dataset, table).await
    }
}
