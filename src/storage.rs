use crate::generator::RosterError;
use crate::io;
use crate::model::{AttendanceRow, ExistingRoster};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::debug;

/// Nouveau fichier (écrase) ou ajout à la suite du roster existant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    #[default]
    Fresh,
    Append,
}

impl FromStr for MergeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh" | "overwrite" => Ok(MergeMode::Fresh),
            "append" => Ok(MergeMode::Append),
            other => Err(format!("unknown merge mode: {other} (expected fresh or append)")),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeMode::Fresh => "fresh",
            MergeMode::Append => "append",
        })
    }
}

pub trait RosterStore {
    /// Roster présent sur le support, `None` s'il n'existe pas encore.
    fn load(&self) -> Result<Option<ExistingRoster>, RosterError>;
    /// Sauvegarde de manière atomique.
    fn save(&self, rows: &[AttendanceRow]) -> anyhow::Result<()>;

    /// Préfixe à passer au générateur selon le mode.
    fn existing_for(&self, mode: MergeMode) -> Result<Option<ExistingRoster>, RosterError> {
        match mode {
            MergeMode::Fresh => Ok(None),
            MergeMode::Append => self.load(),
        }
    }
}

/// Roster stocké dans un fichier CSV ou xlsx.
#[derive(Debug, Clone)]
pub struct FileRosterStore {
    path: PathBuf,
}

impl FileRosterStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for FileRosterStore {
    fn load(&self) -> Result<Option<ExistingRoster>, RosterError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no existing roster, starting empty");
            return Ok(None);
        }
        io::import_existing_roster(&self.path).map(Some)
    }

    fn save(&self, rows: &[AttendanceRow]) -> anyhow::Result<()> {
        io::export_roster(&self.path, rows)
    }
}

/// Écrit `bytes` via un fichier temporaire voisin puis renomme.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
