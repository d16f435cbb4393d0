mod expand;
mod roll;
mod schedule;
mod types;

pub use roll::RollNumberAssignment;
pub use schedule::{format_shift_date, DatedShift, ShiftSchedule, SHIFT_DATE_FORMAT};
pub use types::{ErrorKind, GenerateOptions, RosterError, DEFAULT_ROLL_LENGTH};

use crate::model::{AttendanceRow, CentreRecord, DemoIdentity, ExistingRoster};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Résultat d'un run : lignes (existantes + nouvelles) et table des rolls.
#[derive(Debug, Clone)]
pub struct Generation {
    pub rows: Vec<AttendanceRow>,
    pub roll_numbers: RollNumberAssignment,
    /// Index de la première ligne du nouveau lot.
    pub batch_start: usize,
}

impl Generation {
    /// Lignes générées par ce run (sans le préfixe existant).
    pub fn new_rows(&self) -> &[AttendanceRow] {
        &self.rows[self.batch_start..]
    }

    pub fn existing_rows(&self) -> &[AttendanceRow] {
        &self.rows[..self.batch_start]
    }
}

/// Générateur de roster fictif : sans état, sans I/O.
#[derive(Debug, Clone)]
pub struct RosterGenerator {
    base_date: NaiveDate,
    shifts: ShiftSchedule,
    opts: GenerateOptions,
}

impl RosterGenerator {
    pub fn new(base_date: NaiveDate, shifts: ShiftSchedule, opts: GenerateOptions) -> Self {
        Self {
            base_date,
            shifts,
            opts,
        }
    }

    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }

    pub fn shifts(&self) -> &ShiftSchedule {
        &self.shifts
    }

    pub fn options(&self) -> GenerateOptions {
        self.opts
    }

    /// Taille du nouveau lot pour `centres` centres.
    pub fn batch_len(&self, centres: usize) -> usize {
        self.shifts.len() * centres * DemoIdentity::COUNT
    }

    pub fn roll_numbers(&self) -> Result<RollNumberAssignment, RosterError> {
        RollNumberAssignment::new(self.opts.roll_length)
    }

    /// Génère le lot et le place après `existing` s'il est fourni.
    pub fn generate(
        &self,
        centres: &[CentreRecord],
        existing: Option<ExistingRoster>,
    ) -> Result<Generation, RosterError> {
        let roll_numbers = self.roll_numbers()?;
        let dated = self.shifts.dated(self.base_date)?;

        if centres.is_empty() {
            warn!("centre table is empty; no rows will be generated");
        }

        let mut rows = existing.map(|e| e.rows).unwrap_or_default();
        let batch_start = rows.len();
        expand::expand(&dated, centres, &roll_numbers, &mut rows);

        info!(
            shifts = self.shifts.len(),
            centres = centres.len(),
            existing = batch_start,
            generated = rows.len() - batch_start,
            "mock roster generated"
        );

        Ok(Generation {
            rows,
            roll_numbers,
            batch_start,
        })
    }
}

/// Raccourci fonctionnel autour de [`RosterGenerator`].
pub fn generate_mock_roster(
    base_date: NaiveDate,
    shift_input: &str,
    roll_length: usize,
    centres: &[CentreRecord],
    existing: Option<ExistingRoster>,
) -> Result<Generation, RosterError> {
    let shifts = ShiftSchedule::parse(shift_input)?;
    RosterGenerator::new(base_date, shifts, GenerateOptions { roll_length }).generate(centres, existing)
}
