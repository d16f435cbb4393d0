use crate::generator::{GenerateOptions, RosterGenerator, ShiftSchedule, DEFAULT_ROLL_LENGTH};
use crate::storage::MergeMode;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Répertoire par défaut des profils.
pub const DEFAULT_PROFILES_DIR: &str = ".mockroster/profiles";

fn default_roll_length() -> usize {
    DEFAULT_ROLL_LENGTH
}

/// Paramètres de génération réutilisables (équivalent du formulaire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_date: NaiveDate,
    pub shifts: Vec<String>,
    #[serde(default = "default_roll_length")]
    pub roll_length: usize,
    #[serde(default)]
    pub mode: MergeMode,
    #[serde(default)]
    pub centres: Option<PathBuf>,
    #[serde(default)]
    pub existing: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("profile id cannot be empty");
        }
        if self.id.contains(['/', '\\']) {
            bail!("profile id cannot contain path separators");
        }
        if self.name.trim().is_empty() {
            bail!("profile name cannot be empty");
        }
        if self.roll_length == 0 {
            bail!("roll_length must be > 0");
        }
        if self.existing.is_some() && self.mode == MergeMode::Fresh {
            bail!("an existing roster requires mode = append");
        }
        self.schedule()?;
        Ok(())
    }

    pub fn schedule(&self) -> Result<ShiftSchedule> {
        Ok(ShiftSchedule::from_names(&self.shifts)?)
    }

    pub fn generator(&self) -> Result<RosterGenerator> {
        Ok(RosterGenerator::new(
            self.base_date,
            self.schedule()?,
            GenerateOptions {
                roll_length: self.roll_length,
            },
        ))
    }
}

#[derive(Debug, Clone)]
pub struct ProfileInfo {
    pub profile: Profile,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Profils persistés sur disque, un fichier `<id>.json` chacun.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    base_dir: PathBuf,
}

impl ProfileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.base_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating profile directory {}", self.base_dir.display()))
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    pub fn save(&self, profile: &Profile) -> Result<PathBuf> {
        profile.validate()?;
        self.ensure_dir()?;
        let path = self.path_for(&profile.id);
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json).with_context(|| format!("writing profile {}", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<Profile> {
        let path = self.path_for(id);
        let data = fs::read(&path).with_context(|| format!("reading profile {}", path.display()))?;
        let profile: Profile = serde_json::from_slice(&data)
            .with_context(|| format!("parsing profile {}", path.display()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn list(&self) -> Result<Vec<ProfileInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let data = fs::read(&path)?;
            let profile: Profile = match serde_json::from_slice(&data) {
                Ok(p) => p,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable profile");
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            infos.push(ProfileInfo {
                profile,
                path,
                modified,
            });
        }
        infos.sort_by(|a, b| a.profile.id.cmp(&b.profile.id));
        Ok(infos)
    }
}
