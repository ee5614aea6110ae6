//! Archive of decoded frames
//!
//! Every frame is appended to two files per family in the archive directory:
//!
//! - `tlm_{family}.txt`: one `timestamp;source;raw;annotation` line per frame.
//! - `tbl_{family}.txt`: the frame's spreadsheet rows.

use std::{
    fs::{
        File,
        OpenOptions,
    },
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use chrono::{
    DateTime,
    Local,
};
use psat::{
    DecodedRecord,
    Family,
    Report,
};

use crate::Error;

#[derive(Debug)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_owned();
        tracing::debug!(dir = %dir.display(), "Opening archive");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn audit_path(&self, family: Family) -> PathBuf {
        self.dir.join(format!("tlm_{family}.txt"))
    }

    pub fn table_path(&self, family: Family) -> PathBuf {
        self.dir.join(format!("tbl_{family}.txt"))
    }

    /// Appends a record, timestamped with the current local time.
    pub fn append(
        &self,
        source: &str,
        raw: &str,
        record: &DecodedRecord,
        report: &Report,
    ) -> Result<(), Error> {
        self.append_at(Local::now(), source, raw, record, report)
    }

    pub fn append_at(
        &self,
        timestamp: DateTime<Local>,
        source: &str,
        raw: &str,
        record: &DecodedRecord,
        report: &Report,
    ) -> Result<(), Error> {
        let family = record.frame.family();

        let mut audit = open_append(self.audit_path(family))?;
        writeln!(
            audit,
            "{};{};{};{}",
            timestamp.format("%Y-%m-%d %H:%M:%S"),
            source,
            raw,
            record.annotation
        )?;

        let mut table = open_append(self.table_path(family))?;
        table.write_all(report.row.as_bytes())?;

        tracing::debug!(%family, annotation = %record.annotation, "Archived frame");

        Ok(())
    }
}

fn open_append(path: PathBuf) -> Result<File, Error> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
