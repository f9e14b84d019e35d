//! On-disk session files
//!
//! Each session lives in `<data_dir>/<HASH>.json`, where `HASH` is the
//! uppercase MD5 hex digest of the session name.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

use crate::error::Result;
use crate::session::DrawSession;

/// Directory holding saved sessions
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the data file for a session name
    pub fn data_file(&self, name: &str) -> PathBuf {
        let hash = Md5::digest(name.as_bytes());
        self.data_dir.join(format!("{hash:X}.json"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.data_file(name).is_file()
    }

    /// Save a session, replacing its previous file
    pub fn save_session(&self, session: &DrawSession) -> Result<PathBuf> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_file(session.name());
        let tmp = path.with_extension("json.tmp");

        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            session.save(&mut writer)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &path)?;

        log::info!("Session {:?} saved to {}", session.name(), path.display());
        Ok(path)
    }

    /// Restore a session from its file
    pub fn load_session(&self, session: &DrawSession) -> Result<()> {
        let path = self.data_file(session.name());
        let reader = BufReader::new(File::open(&path)?);
        session.load(reader)?;
        log::info!("Session {:?} loaded from {}", session.name(), path.display());
        Ok(())
    }
}
