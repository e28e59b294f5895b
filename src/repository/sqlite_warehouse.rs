// ==========================================
// IGM Loader - SQLite warehouse
// ==========================================
// One database file per dataset: <warehouse_dir>/<dataset>.db
// One table per destination, columns from the registry schema.
// Write disposition: truncate and load (DROP + CREATE + INSERT)
// in a single transaction, ledger row included.
// ==========================================

use crate::db::{open_sqlite_connection, table_exists};
use crate::domain::{
    CellValue, CleanRow, FieldDescriptor, LoadJob, LoadJobMeta, Schema, SemanticType,
    DATE_FORMAT,
};
use crate::repository::error::{LoadJobError, LoadResult};
use crate::repository::identifier::{quote_ident, validate_identifier, LOAD_JOBS_TABLE};
use crate::repository::table_sink::TableSink;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub struct SqliteWarehouse {
    dataset: String,
    db_path: PathBuf,
    schema: Schema,
}

impl SqliteWarehouse {
    /// Open (or create) the dataset database
    ///
    /// # Arguments
    /// - warehouse_dir: directory holding one file per dataset
    /// - dataset: dataset id, e.g. `seeds`
    pub fn new<P: AsRef<Path>>(warehouse_dir: P, dataset: &str) -> LoadResult<Self> {
        validate_identifier(dataset)?;
        std::fs::create_dir_all(warehouse_dir.as_ref())?;

        Ok(Self {
            dataset: dataset.to_string(),
            db_path: warehouse_dir.as_ref().join(format!("{}.db", dataset)),
            schema: Schema,
        })
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Short-lived connection, one per operation
    fn connect(&self) -> LoadResult<Connection> {
        Ok(open_sqlite_connection(&self.db_path)?)
    }

    fn ensure_ledger(conn: &Connection) -> LoadResult<()> {
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {ledger} (
                job_id TEXT PRIMARY KEY,
                dataset TEXT NOT NULL,
                table_id TEXT NOT NULL,
                worksheet TEXT,
                total_rows INTEGER NOT NULL,
                duplicate_rows INTEGER NOT NULL,
                rejected_rows INTEGER NOT NULL,
                loaded_rows INTEGER NOT NULL,
                loaded_at TEXT NOT NULL,
                elapsed_ms INTEGER NOT NULL,
                report_json TEXT
            );
            "#,
            ledger = quote_ident(LOAD_JOBS_TABLE)
        ))?;
        Ok(())
    }

    fn create_table_sql(&self, table_id: &str) -> String {
        let columns: Vec<String> = self
            .schema
            .fields()
            .iter()
            .map(|f| {
                let not_null = if f.nullable { "" } else { " NOT NULL" };
                format!("{} {}{}", quote_ident(f.name), f.semantic_type.sql_type(), not_null)
            })
            .collect();

        format!(
            "CREATE TABLE {} ({})",
            quote_ident(table_id),
            columns.join(", ")
        )
    }

    fn insert_sql(&self, table_id: &str) -> String {
        let fields = self.schema.fields();
        let names: Vec<String> = fields.iter().map(|f| quote_ident(f.name)).collect();
        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("?{}", i)).collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table_id),
            names.join(", "),
            placeholders.join(", ")
        )
    }

    /// Map a typed cell onto the column's storage class
    fn to_sql_value(field: &FieldDescriptor, value: &CellValue) -> Result<Value, String> {
        let converted = match (field.semantic_type, value) {
            (_, CellValue::Null) => Value::Null,
            (SemanticType::String, v) => Value::Text(v.to_string()),
            (_, CellValue::Text(s)) if s.is_empty() => Value::Null,
            (SemanticType::Integer, CellValue::Integer(i)) => Value::Integer(*i),
            (SemanticType::Float, CellValue::Float(f)) => Value::Real(*f),
            (SemanticType::Float, CellValue::Integer(i)) => Value::Real(*i as f64),
            (SemanticType::Boolean, CellValue::Boolean(b)) => Value::Integer(i64::from(*b)),
            (SemanticType::Date, CellValue::Date(d)) => {
                Value::Text(d.format(DATE_FORMAT).to_string())
            }
            (expected, v) => {
                return Err(format!(
                    "column {} ({}) cannot hold {} value {:?}",
                    field.name,
                    expected,
                    v.kind(),
                    v.to_string()
                ))
            }
        };

        if !field.nullable && converted == Value::Null {
            return Err(format!("column {} is REQUIRED", field.name));
        }
        Ok(converted)
    }

    fn row_params(&self, table_id: &str, row: &CleanRow) -> LoadResult<Vec<Value>> {
        self.schema
            .fields()
            .iter()
            .map(|field| {
                let value = row.get(field.name).ok_or_else(|| LoadJobError::SchemaMismatch {
                    table: table_id.to_string(),
                    message: format!("row {} has no column {}", row.row_number, field.name),
                })?;
                Self::to_sql_value(field, value).map_err(|message| LoadJobError::SchemaMismatch {
                    table: table_id.to_string(),
                    message: format!("row {}: {}", row.row_number, message),
                })
            })
            .collect()
    }

    fn insert_load_job_tx(tx: &Transaction, job: &LoadJob) -> LoadResult<()> {
        tx.execute(
            &format!(
                r#"
                INSERT INTO {} (
                    job_id, dataset, table_id, worksheet, total_rows, duplicate_rows,
                    rejected_rows, loaded_rows, loaded_at, elapsed_ms, report_json
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                quote_ident(LOAD_JOBS_TABLE)
            ),
            params![
                job.job_id,
                job.dataset,
                job.table_id,
                job.worksheet,
                job.total_rows as i64,
                job.duplicate_rows as i64,
                job.rejected_rows as i64,
                job.loaded_rows as i64,
                job.loaded_at,
                job.elapsed_ms,
                job.report_json,
            ],
        )?;
        Ok(())
    }

    /// Read a table back in rowid order as typed rows
    ///
    /// # Returns
    /// - Ok(None): the table does not exist
    pub fn read_table(&self, table_id: &str) -> LoadResult<Option<Vec<CleanRow>>> {
        validate_identifier(table_id)?;
        let conn = self.connect()?;
        if !table_exists(&conn, table_id)? {
            return Ok(None);
        }

        let fields = self.schema.fields();
        let names: Vec<String> = fields.iter().map(|f| quote_ident(f.name)).collect();
        let mut stmt = conn.prepare(&format!(
            "SELECT rowid, {} FROM {} ORDER BY rowid",
            names.join(", "),
            quote_ident(table_id)
        ))?;

        let rows = stmt
            .query_map([], |row| {
                let rowid: i64 = row.get(0)?;
                let mut values = HashMap::with_capacity(fields.len());
                for (idx, field) in fields.iter().enumerate() {
                    let raw: Value = row.get(idx + 1)?;
                    values.insert(field.name.to_string(), from_sql_value(field, raw));
                }
                Ok(CleanRow::new(rowid as usize, values))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(rows))
    }

    /// Ledger entries, oldest first
    pub fn list_load_jobs(&self, table_id: Option<&str>) -> LoadResult<Vec<LoadJob>> {
        let conn = self.connect()?;
        Self::ensure_ledger(&conn)?;

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT job_id, dataset, table_id, worksheet, total_rows, duplicate_rows,
                   rejected_rows, loaded_rows, loaded_at, elapsed_ms, report_json
            FROM {}
            WHERE ?1 IS NULL OR table_id = ?1
            ORDER BY loaded_at, rowid
            "#,
            quote_ident(LOAD_JOBS_TABLE)
        ))?;

        let jobs = stmt
            .query_map(params![table_id], |row| {
                Ok(LoadJob {
                    job_id: row.get(0)?,
                    dataset: row.get(1)?,
                    table_id: row.get(2)?,
                    worksheet: row.get(3)?,
                    total_rows: row.get::<_, i64>(4)? as usize,
                    duplicate_rows: row.get::<_, i64>(5)? as usize,
                    rejected_rows: row.get::<_, i64>(6)? as usize,
                    loaded_rows: row.get::<_, i64>(7)? as usize,
                    loaded_at: row.get::<_, DateTime<Utc>>(8)?,
                    elapsed_ms: row.get(9)?,
                    report_json: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(jobs)
    }
}

/// Inverse of `to_sql_value`, used when reading tables back
fn from_sql_value(field: &FieldDescriptor, raw: Value) -> CellValue {
    match (field.semantic_type, raw) {
        (_, Value::Null) => CellValue::Null,
        (SemanticType::Integer, Value::Integer(i)) => CellValue::Integer(i),
        (SemanticType::Float, Value::Real(f)) => CellValue::Float(f),
        (SemanticType::Float, Value::Integer(i)) => CellValue::Float(i as f64),
        (SemanticType::Boolean, Value::Integer(i)) => CellValue::Boolean(i != 0),
        (SemanticType::Date, Value::Text(s)) => NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Text(s)),
        (_, Value::Text(s)) => CellValue::Text(s),
        (_, Value::Integer(i)) => CellValue::Integer(i),
        (_, Value::Real(f)) => CellValue::Float(f),
        (_, Value::Blob(b)) => CellValue::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}

impl TableSink for SqliteWarehouse {
    #[instrument(skip(self, rows, meta), fields(dataset = %self.dataset, rows = rows.len()))]
    fn replace_with_job(
        &self,
        table_id: &str,
        rows: &[CleanRow],
        meta: LoadJobMeta,
    ) -> LoadResult<LoadJob> {
        validate_identifier(table_id)?;
        let start_time = Instant::now();

        // Convert everything before touching the table
        let params: Vec<Vec<Value>> = rows
            .iter()
            .map(|row| self.row_params(table_id, row))
            .collect::<LoadResult<_>>()?;

        let mut conn = self.connect()?;
        Self::ensure_ledger(&conn)?;
        let tx = conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {};",
            quote_ident(table_id)
        ))?;
        tx.execute_batch(&self.create_table_sql(table_id))?;
        debug!(table_id, "destination table recreated");

        {
            let mut stmt = tx.prepare(&self.insert_sql(table_id))?;
            for values in &params {
                stmt.execute(params_from_iter(values.iter()))?;
            }
        }

        let report_json = meta
            .report
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let (total_rows, duplicate_rows, rejected_rows) = meta
            .report
            .as_ref()
            .map(|r| (r.input_rows, r.duplicate_rows, r.rejected_rows))
            .unwrap_or((rows.len(), 0, 0));

        let job = LoadJob {
            job_id: Uuid::new_v4().to_string(),
            dataset: self.dataset.clone(),
            table_id: table_id.to_string(),
            worksheet: meta.worksheet,
            total_rows,
            duplicate_rows,
            rejected_rows,
            loaded_rows: rows.len(),
            loaded_at: Utc::now(),
            elapsed_ms: start_time.elapsed().as_millis() as i64,
            report_json,
        };
        Self::insert_load_job_tx(&tx, &job)?;

        tx.commit()?;

        info!(
            job_id = %job.job_id,
            loaded_rows = job.loaded_rows,
            elapsed_ms = job.elapsed_ms,
            "Data loaded into the table {} successfully.",
            table_id
        );
        Ok(job)
    }
}
