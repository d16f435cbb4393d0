use super::RosterError;
use chrono::{Days, NaiveDate};

/// Format d'affichage des dates de shift, ex. `01 Jan'25`.
pub const SHIFT_DATE_FORMAT: &str = "%d %b'%y";

/// Liste ordonnée des shifts saisis. Les doublons sont conservés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSchedule {
    names: Vec<String>,
}

impl ShiftSchedule {
    /// Parse une saisie brute `"Training 1, Mock 1, Mock 2"`.
    pub fn parse(raw: &str) -> Result<Self, RosterError> {
        Self::from_names(raw.split(','))
    }

    /// Nettoie (trim) et filtre les entrées vides ; échoue si rien ne reste.
    pub fn from_names<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            return Err(RosterError::MissingShifts);
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Un jour calendaire par index : `base + i jours`, quel que soit le nom.
    pub fn dated(&self, base: NaiveDate) -> Result<Vec<DatedShift<'_>>, RosterError> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let date = base
                    .checked_add_days(Days::new(index as u64))
                    .ok_or(RosterError::DateOutOfRange { index })?;
                Ok(DatedShift {
                    name,
                    date,
                    label: format_shift_date(date),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedShift<'a> {
    pub name: &'a str,
    pub date: NaiveDate,
    pub label: String,
}

pub fn format_shift_date(date: NaiveDate) -> String {
    date.format(SHIFT_DATE_FORMAT).to_string()
}
