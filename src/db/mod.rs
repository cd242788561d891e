mod schema;
pub mod choices;
pub mod filter;
pub mod models;
pub mod plan;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use choices::{
    Choice, Expression, Gender, Group, Illumination, Occlusion, ProtocolName, Purpose, Session,
};
pub use filter::{validate_multi, validate_single, Filter, ObjectQuery};
pub use models::{Client, File, FileRecord};
pub use schema::SCHEMA;

use crate::config::Config;
use crate::error::{Error, Result};
use sqlite::SqliteDb;

/// Name used when reporting a missing database file.
pub const DATABASE_NAME: &str = "arface";

/// Query service over the AR face database.
///
/// The connection is opened read-only when the service is built. When the
/// database file does not exist the service stays usable but invalid, and
/// every data query fails with [`Error::Configuration`] until
/// [`Database::connect`] succeeds.
pub struct Database {
    path: PathBuf,
    inner: Option<SqliteDb>,
}

impl Database {
    /// Open the database at the location named by the configuration.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(config.db_path())
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let mut db = Self {
            path: path.into(),
            inner: None,
        };
        db.connect()?;
        Ok(db)
    }

    /// Try connecting, or re-connecting, to the database file.
    pub fn connect(&mut self) -> Result<()> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "database file not found");
            self.inner = None;
            return Ok(());
        }
        self.inner = Some(SqliteDb::open_read_only(&self.path)?);
        info!(path = %self.path.display(), "database opened read-only");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a connection to the database file is open.
    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    pub fn assert_validity(&self) -> Result<()> {
        self.store().map(|_| ())
    }

    fn store(&self) -> Result<&SqliteDb> {
        self.inner.as_ref().ok_or_else(|| Error::Configuration {
            name: DATABASE_NAME,
            path: self.path.clone(),
        })
    }

    // ========================================================================
    // Client operations
    // ========================================================================

    /// Clients of the given groups and genders. The protocol is ignored since
    /// clients are the same for every protocol.
    pub fn clients(
        &self,
        groups: &Filter<String>,
        genders: &Filter<String>,
        _protocol: &Filter<String>,
    ) -> Result<Vec<Client>> {
        let store = self.store()?;
        let groups: Vec<Group> = validate_multi(groups, None)?;
        let genders: Vec<Gender> = validate_multi(genders, None)?;
        store.fetch_clients(&plan::clients_plan(&groups, &genders))
    }

    pub fn client_ids(
        &self,
        groups: &Filter<String>,
        genders: &Filter<String>,
        protocol: &Filter<String>,
    ) -> Result<Vec<String>> {
        Ok(self
            .clients(groups, genders, protocol)?
            .into_iter()
            .map(|c| c.id)
            .collect())
    }

    /// Model ids are client ids in this database.
    pub fn model_ids(
        &self,
        groups: &Filter<String>,
        genders: &Filter<String>,
        protocol: &Filter<String>,
    ) -> Result<Vec<String>> {
        self.client_ids(groups, genders, protocol)
    }

    pub fn get_client_id_from_file_id(&self, file_id: i64) -> Result<String> {
        let store = self.store()?;
        let mut files = store.fetch_files(&plan::file_lookup_plan(file_id))?;
        if files.len() != 1 {
            return Err(Error::NotFound {
                file_id,
                matches: files.len(),
            });
        }
        Ok(files.remove(0).client_id)
    }

    pub fn get_client_id_from_model_id<'a>(&self, model_id: &'a str) -> &'a str {
        model_id
    }

    // ========================================================================
    // File operations
    // ========================================================================

    /// Files matching the query: world and enrolment files first, then probe
    /// files. Rows are not deduplicated across streams.
    pub fn objects(&self, query: &ObjectQuery) -> Result<Vec<File>> {
        let store = self.store()?;
        let validated = query.validate()?;

        let mut files = Vec::new();
        for plan in plan::objects_plans(&validated) {
            let rows = store.fetch_files(&plan)?;
            debug!(stream = ?plan.stream, rows = rows.len(), "query plan finished");
            files.extend(rows);
        }
        Ok(files)
    }

    /// File paths keyed by file id, rendered below `directory` with
    /// `extension` appended.
    pub fn files(
        &self,
        query: &ObjectQuery,
        directory: Option<&str>,
        extension: Option<&str>,
    ) -> Result<BTreeMap<i64, String>> {
        Ok(self
            .objects(query)?
            .into_iter()
            .map(|f| (f.id, f.make_path(directory, extension)))
            .collect())
    }
}
