//! SQLite backend: compiles query plans into SQL over a read-only connection.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::error::Result;

use super::models::{Client, File};
use super::plan::{Column, Constraint, QueryPlan, Target, Value};

const CLIENT_COLUMNS: &str = "SELECT c.id, c.sgroup, c.gender FROM client c";

const FILE_COLUMNS: &str = r#"SELECT f.id, f.client_id, f.path, f.purpose, f.session,
       f.expression, f.illumination, f.occlusion
FROM file f
JOIN client c ON f.client_id = c.id"#;

const PROTOCOL_JOIN: &str = r#"
JOIN protocol p ON f.expression = p.expression
               AND f.illumination = p.illumination
               AND f.occlusion = p.occlusion"#;

pub struct SqliteDb {
    conn: Connection,
}

impl SqliteDb {
    /// Open an existing database file without write access.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn fetch_clients(&self, plan: &QueryPlan) -> Result<Vec<Client>> {
        let (sql, params) = compile(plan);
        debug!(stream = ?plan.stream, %sql, "running client query");
        let mut stmt = self.conn.prepare(&sql)?;
        let clients = stmt
            .query_map(params_from_iter(params.iter()), Client::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    pub fn fetch_files(&self, plan: &QueryPlan) -> Result<Vec<File>> {
        let (sql, params) = compile(plan);
        debug!(stream = ?plan.stream, %sql, "running file query");
        let mut stmt = self.conn.prepare(&sql)?;
        let files = stmt
            .query_map(params_from_iter(params.iter()), File::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(files)
    }
}

fn column_sql(column: Column) -> &'static str {
    match column {
        Column::ClientId => "c.id",
        Column::ClientGroup => "c.sgroup",
        Column::ClientGender => "c.gender",
        Column::FileId => "f.id",
        Column::FilePurpose => "f.purpose",
        Column::FileSession => "f.session",
        Column::FileExpression => "f.expression",
        Column::FileIllumination => "f.illumination",
        Column::FileOcclusion => "f.occlusion",
        Column::ProtocolName => "p.name",
    }
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Integer(i) => SqlValue::Integer(*i),
    }
}

/// Build the statement text and its positional parameters for a plan.
pub(crate) fn compile(plan: &QueryPlan) -> (String, Vec<SqlValue>) {
    let target = plan.stream.target();
    let mut sql = match target {
        Target::Clients => CLIENT_COLUMNS.to_string(),
        Target::Files => FILE_COLUMNS.to_string(),
    };
    if plan.join_protocol && target == Target::Files {
        sql.push_str(PROTOCOL_JOIN);
    }

    let mut clauses = Vec::with_capacity(plan.constraints.len());
    let mut params = Vec::new();
    for constraint in &plan.constraints {
        match constraint {
            Constraint::Eq(column, value) => {
                clauses.push(format!("{} = ?", column_sql(*column)));
                params.push(to_sql_value(value));
            }
            Constraint::In(_, values) if values.is_empty() => {
                clauses.push("0".to_string());
            }
            Constraint::In(column, values) => {
                let marks = vec!["?"; values.len()].join(", ");
                clauses.push(format!("{} IN ({})", column_sql(*column), marks));
                params.extend(values.iter().map(to_sql_value));
            }
        }
    }

    if !clauses.is_empty() {
        sql.push_str("\nWHERE ");
        sql.push_str(&clauses.join("\n  AND "));
    }
    sql.push_str(match target {
        Target::Clients => "\nORDER BY c.id",
        Target::Files => "\nORDER BY f.id",
    });

    (sql, params)
}
