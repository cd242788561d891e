//! Record types returned by the query service.

use rusqlite::types::Type;
use rusqlite::Row;
use serde::Serialize;
use std::path::Path;

use super::choices::{Choice, Expression, Gender, Group, Illumination, Occlusion, Purpose, Session};

/// A subject of the database. Model ids and client ids share one id space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub group: Group,
    pub gender: Gender,
}

/// One recorded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: i64,
    pub client_id: String,
    /// Relative path without extension
    pub path: String,
    pub purpose: Purpose,
    pub session: Session,
    pub expression: Expression,
    pub illumination: Illumination,
    pub occlusion: Occlusion,
}

impl File {
    /// Render the stored stem below `directory` with `extension` appended.
    pub fn make_path(&self, directory: Option<&str>, extension: Option<&str>) -> String {
        let stem = format!("{}{}", self.path, extension.unwrap_or(""));
        match directory {
            Some(dir) if !dir.is_empty() => Path::new(dir).join(stem).to_string_lossy().into_owned(),
            _ => stem,
        }
    }
}

/// Row shape used by the JSON and CSV dump formats.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub id: i64,
    pub client_id: String,
    pub path: String,
}

/// Decode a categorical column, rejecting values outside the vocabulary.
pub(crate) fn choice_column<T: Choice>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let value: String = row.get(idx)?;
    T::from_str(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid {} \"{}\"; expected one of {}", T::FIELD, value, T::allowed()).into(),
        )
    })
}

impl Client {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Client {
            id: row.get(0)?,
            group: choice_column(row, 1)?,
            gender: choice_column(row, 2)?,
        })
    }
}

impl File {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(File {
            id: row.get(0)?,
            client_id: row.get(1)?,
            path: row.get(2)?,
            purpose: choice_column(row, 3)?,
            session: choice_column(row, 4)?,
            expression: choice_column(row, 5)?,
            illumination: choice_column(row, 6)?,
            occlusion: choice_column(row, 7)?,
        })
    }
}
