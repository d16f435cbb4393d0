#![forbid(unsafe_code)]
//! Mockroster — génération de feuilles d'émargement fictives pour examens blancs.
//!
//! - Produit cartésien shifts × centres × 5 candidats démo, ordre stable.
//! - Numéros de roll déterministes, complétés à gauche par des zéros.
//! - Lecture CSV/XLSX des centres, export CSV/XLSX, mode ajout explicite.
//! - Aucune I/O dans le générateur ; les fichiers restent à la charge de l'appelant.

pub mod generator;
pub mod io;
pub mod model;
pub mod profile;
pub mod report;
pub mod storage;

pub use generator::{
    generate_mock_roster, ErrorKind, GenerateOptions, Generation, RollNumberAssignment,
    RosterError, RosterGenerator, ShiftSchedule,
};
pub use model::{AttendanceRow, CentreRecord, DemoIdentity, ExistingRoster};
pub use profile::{Profile, ProfileInfo, ProfileStore};
pub use report::{render_summary, ReportRenderer, TextReport};
pub use storage::{FileRosterStore, MergeMode, RosterStore};
