//! Snapshot record and winners checksum

use std::collections::BTreeMap;
use std::io::{Read, Write};

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Participant, Prize, PrizeNo};

/// `last_updated` format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persisted form of a session.
///
/// Map fields may be null or absent in stored files; both read as empty.
/// Absent strings read as empty too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prizes: Option<BTreeMap<PrizeNo, Prize>>,
    #[serde(default)]
    pub participants: Option<BTreeMap<String, Participant>>,
    #[serde(default)]
    pub winners: Option<BTreeMap<PrizeNo, Vec<Participant>>>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub checksum: String,
}

impl SaveData {
    /// Build a snapshot stamped with the current local time
    pub fn capture(
        name: &str,
        prizes: &BTreeMap<PrizeNo, Prize>,
        participants: &BTreeMap<String, Participant>,
        winners: &BTreeMap<PrizeNo, Vec<Participant>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            prizes: Some(prizes.clone()),
            participants: Some(participants.clone()),
            winners: Some(winners.clone()),
            last_updated: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            checksum: winners_checksum(winners),
        }
    }

    /// Write as four-space indented JSON followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Uppercase hex MD5 checksum of the winners.
///
/// Prizes are fed in ascending order: the decimal prize number, then each
/// winner's id and name in draw order. Detects accidental corruption only.
pub fn winners_checksum(winners: &BTreeMap<PrizeNo, Vec<Participant>>) -> String {
    let mut hasher = Md5::new();
    for (no, list) in winners {
        hasher.update(no.to_string().as_bytes());
        for winner in list {
            hasher.update(winner.id.as_bytes());
            hasher.update(winner.name.as_bytes());
        }
    }
    format!("{:X}", hasher.finalize())
}
