//! Read-only query interface for the AR face database.
//!
//! The database lists the subjects (clients) of the corpus, every recorded
//! image with its capture conditions, and the protocol rules that select the
//! capture conditions used by an evaluation. [`Database`] validates filter
//! values against the fixed vocabularies in [`db::choices`] and returns the
//! matching clients or files.
//!
//! ```no_run
//! use arface_db::{Database, ObjectQuery};
//!
//! # fn main() -> arface_db::Result<()> {
//! let db = Database::open_at("/srv/arface/arface.sql3")?;
//! let probes = db.objects(
//!     &ObjectQuery::new()
//!         .groups("dev")
//!         .purposes("probe")
//!         .protocol("illumination"),
//! )?;
//! for file in probes {
//!     println!("{}", file.make_path(Some("/srv/arface/images"), Some(".bmp")));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod dump;
pub mod error;
pub mod logging;

pub use db::{Database, Filter, ObjectQuery};
pub use error::{Error, Result};
