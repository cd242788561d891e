use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::db::{Database, FileRecord, ObjectQuery};
use crate::error::Result;

/// Output format of a file list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    /// One path per line
    #[default]
    List,
    Json,
    Csv,
}

impl DumpFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DumpFormat::List => "list",
            DumpFormat::Json => "json",
            DumpFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "list" => Some(DumpFormat::List),
            "json" => Some(DumpFormat::Json),
            "csv" => Some(DumpFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Prepended to every path
    pub directory: Option<String>,
    /// Appended to every path
    pub extension: Option<String>,
    pub format: DumpFormat,
    /// Run the query and render the output, but discard it
    pub self_test: bool,
}

/// Write the files matching `query` to `output`, sorted by path.
///
/// Every file is listed once. Returns the number of entries.
pub fn dump_list<W: Write>(
    db: &Database,
    query: &ObjectQuery,
    options: &DumpOptions,
    output: &mut W,
) -> Result<usize> {
    let directory = options.directory.as_deref();
    let extension = options.extension.as_deref();

    let by_id: BTreeMap<i64, FileRecord> = db
        .objects(query)?
        .into_iter()
        .map(|f| {
            let record = FileRecord {
                id: f.id,
                path: f.make_path(directory, extension),
                client_id: f.client_id,
            };
            (record.id, record)
        })
        .collect();

    let mut records: Vec<FileRecord> = by_id.into_values().collect();
    records.sort_by(|a, b| a.path.cmp(&b.path));

    if options.self_test {
        write_records(&records, options.format, &mut io::sink())?;
    } else {
        write_records(&records, options.format, output)?;
    }

    Ok(records.len())
}

fn write_records<W: Write>(records: &[FileRecord], format: DumpFormat, output: &mut W) -> Result<()> {
    match format {
        DumpFormat::List => write_list(records, output)?,
        DumpFormat::Json => write_json(records, output)?,
        DumpFormat::Csv => write_csv(records, output)?,
    }
    output.flush()?;
    Ok(())
}

fn write_list<W: Write>(records: &[FileRecord], output: &mut W) -> Result<()> {
    for record in records {
        writeln!(output, "{}", record.path)?;
    }
    Ok(())
}

fn write_json<W: Write>(records: &[FileRecord], output: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *output, records)?;
    writeln!(output)?;
    Ok(())
}

fn write_csv<W: Write>(records: &[FileRecord], output: &mut W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(output);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
