use crate::generator::{RollNumberAssignment, RosterError};
use crate::model::{AttendanceRow, CentreRecord, ExistingRoster, ATTENDANCE_COLUMNS, CENTRE_COLUMNS};
use crate::storage::write_atomic;
use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use csv::{ReaderBuilder, WriterBuilder};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Nom de sortie par défaut (même nom que l'outil historique).
pub const DEFAULT_OUTPUT_NAME: &str = "FinalMock_Updated.xlsx";

const CENTRE_TABLE: &str = "centre";
const ROSTER_TABLE: &str = "existing roster";

/// Format physique d'une table, déduit de l'extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
    /// xlsm / xls / xlsb / ods : lecture seule
    Workbook,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "xlsx" => Some(TableFormat::Xlsx),
            "xlsm" | "xls" | "xlsb" | "ods" => Some(TableFormat::Workbook),
            _ => None,
        }
    }

    /// Seuls CSV et xlsx peuvent servir de sortie.
    pub fn is_writable(self) -> bool {
        matches!(self, TableFormat::Csv | TableFormat::Xlsx)
    }
}

/// Table brute : en-têtes + lignes de cellules texte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index des colonnes demandées, ou toutes les colonnes manquantes.
    pub fn require(
        &self,
        table: &'static str,
        columns: &[&'static str],
    ) -> Result<Vec<usize>, RosterError> {
        let mut found = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();
        for col in columns {
            match self.column_index(col) {
                Some(idx) => found.push(idx),
                None => missing.push(*col),
            }
        }
        if !missing.is_empty() {
            return Err(RosterError::MissingColumns { table, missing });
        }
        Ok(found)
    }

    fn project<const N: usize>(
        &self,
        table: &'static str,
        columns: [&'static str; N],
    ) -> Result<Vec<[String; N]>, RosterError> {
        let idx = self.require(table, &columns)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(n, row)| {
                let mut out: [String; N] = std::array::from_fn(|_| String::new());
                for (slot, (&i, col)) in out.iter_mut().zip(idx.iter().zip(columns)) {
                    *slot = row.get(i).cloned().ok_or_else(|| RosterError::MalformedRow {
                        table,
                        // ligne 1 = en-têtes
                        row: n + 2,
                        reason: format!("no value for column {col}"),
                    })?;
                }
                Ok(out)
            })
            .collect()
    }
}

/// Lit une table CSV ou classeur (première feuille, première ligne = en-têtes).
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table, RosterError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RosterError::unavailable(path.display(), "file not found"));
    }
    let table = match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => read_csv_table(path)?,
        Some(TableFormat::Xlsx | TableFormat::Workbook) => read_workbook_table(path)?,
        None => {
            return Err(RosterError::unavailable(
                path.display(),
                "unsupported file type (expected .csv, .xlsx, .xls, .xlsb or .ods)",
            ))
        }
    };
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "table loaded"
    );
    Ok(table)
}

fn read_csv_table(path: &Path) -> Result<Table, RosterError> {
    let unavailable = |e: csv::Error| RosterError::unavailable(path.display(), e);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unavailable)?;
    let headers: Vec<String> = rdr
        .headers()
        .map_err(unavailable)?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(unavailable)?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok(Table { headers, rows })
}

fn read_workbook_table(path: &Path) -> Result<Table, RosterError> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| RosterError::unavailable(path.display(), e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::unavailable(path.display(), "workbook contains no sheets"))?
        .map_err(|e| RosterError::unavailable(path.display(), e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| cell_text(c).trim().to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows
        .filter(|r| r.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|r| r.iter().map(cell_text).collect::<Vec<_>>())
        .collect();
    Ok(Table { headers, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // entiers stockés en flottant par Excel : 101.0 -> "101"
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        other => other.to_string(),
    }
}

/// Import des centres : colonnes `centre_code,centre_name,city,device_allotted`
/// (ordre libre, colonnes supplémentaires ignorées).
pub fn import_centres<P: AsRef<Path>>(path: P) -> Result<Vec<CentreRecord>, RosterError> {
    centres_from_table(&read_table(path)?)
}

pub fn centres_from_table(table: &Table) -> Result<Vec<CentreRecord>, RosterError> {
    Ok(table
        .project(CENTRE_TABLE, CENTRE_COLUMNS)?
        .into_iter()
        .map(|[centre_code, centre_name, city, device_allotted]| CentreRecord {
            centre_code,
            centre_name,
            city,
            device_allotted,
        })
        .collect())
}

/// Import d'un roster généré précédemment (8 colonnes d'émargement).
pub fn import_existing_roster<P: AsRef<Path>>(path: P) -> Result<ExistingRoster, RosterError> {
    existing_from_table(&read_table(path)?)
}

pub fn existing_from_table(table: &Table) -> Result<ExistingRoster, RosterError> {
    let rows = table
        .project(ROSTER_TABLE, ATTENDANCE_COLUMNS)?
        .into_iter()
        .map(
            |[roll_no, name, centre_code, centre_name, city, device_allotted, date, shift]| {
                AttendanceRow {
                    roll_no,
                    name,
                    centre_code,
                    centre_name,
                    city,
                    device_allotted,
                    date,
                    shift,
                }
            },
        )
        .collect();
    Ok(ExistingRoster::new(rows))
}

/// Ajoute `.xlsx` si le nom n'a pas d'extension de sortie (`.csv` / `.xlsx`).
pub fn normalize_output_name(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if TableFormat::from_path(&path).is_some_and(TableFormat::is_writable) {
        path
    } else {
        PathBuf::from(format!("{name}.xlsx"))
    }
}

/// Export du roster ; CSV ou xlsx selon l'extension, écriture atomique.
pub fn export_roster<P: AsRef<Path>>(path: P, rows: &[AttendanceRow]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => roster_csv_bytes(rows)?,
        Some(TableFormat::Xlsx) => roster_xlsx_bytes(rows)?,
        Some(TableFormat::Workbook) | None => anyhow::bail!(
            "unsupported output type: {} (expected .csv or .xlsx)",
            path.display()
        ),
    };
    write_atomic(path, &bytes).with_context(|| format!("writing roster {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "roster written");
    Ok(())
}

/// CSV : header `roll_no,name,centre_code,centre_name,city,device_allotted,date,shift`
pub fn roster_csv_bytes(rows: &[AttendanceRow]) -> anyhow::Result<Vec<u8>> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(ATTENDANCE_COLUMNS)?;
    for row in rows {
        w.write_record(row.fields())?;
    }
    w.flush()?;
    Ok(w.into_inner().map_err(|e| e.into_error())?)
}

pub fn roster_xlsx_bytes(rows: &[AttendanceRow]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1")?;

    for (col, name) in ATTENDANCE_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = u32::try_from(i + 1).context("roster too large for a worksheet")?;
        for (col, value) in row.fields().into_iter().enumerate() {
            write_cell(sheet, r, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

// centre_code / device_allotted restent numériques quand ils le sont
fn write_cell(sheet: &mut Worksheet, row: u32, col: usize, value: &str) -> anyhow::Result<()> {
    let numeric_column = matches!(ATTENDANCE_COLUMNS[col], "centre_code" | "device_allotted");
    match as_plain_integer(value) {
        Some(n) if numeric_column => {
            sheet.write_number(row, col as u16, n as f64)?;
        }
        _ => {
            sheet.write_string(row, col as u16, value)?;
        }
    }
    Ok(())
}

// seulement si la relecture redonne exactement le même texte
fn as_plain_integer(value: &str) -> Option<i64> {
    let n: i64 = value.parse().ok()?;
    (n.abs() < 1_000_000_000_000_000 && n.to_string() == value).then_some(n)
}

/// Export CSV de la table des rolls : header `name,roll_number`
pub fn export_roll_numbers_csv<P: AsRef<Path>>(
    path: P,
    rolls: &RollNumberAssignment,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["name", "roll_number"])?;
    for (id, roll) in rolls.iter() {
        let name = id.name();
        w.write_record([name.as_str(), roll])?;
    }
    w.flush()?;
    let bytes = w.into_inner().map_err(|e| e.into_error())?;
    write_atomic(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_lose_decimal_part() {
        assert_eq!(cell_text(&Data::Float(101.0)), "101");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn plain_integers_only() {
        assert_eq!(as_plain_integer("42"), Some(42));
        assert_eq!(as_plain_integer("0"), Some(0));
        assert_eq!(as_plain_integer("-12"), Some(-12));
        assert_eq!(as_plain_integer("007"), None);
        assert_eq!(as_plain_integer("+5"), None);
        assert_eq!(as_plain_integer("-0"), None);
        assert_eq!(as_plain_integer(" 5"), None);
        assert_eq!(as_plain_integer("C-12"), None);
        assert_eq!(as_plain_integer(""), None);
    }

    #[test]
    fn output_name_gets_xlsx() {
        assert_eq!(normalize_output_name("out"), PathBuf::from("out.xlsx"));
        assert_eq!(normalize_output_name("out.CSV"), PathBuf::from("out.CSV"));
        assert_eq!(normalize_output_name("a.b"), PathBuf::from("a.b.xlsx"));
        assert_eq!(normalize_output_name("r.ods"), PathBuf::from("r.ods.xlsx"));
        assert_eq!(normalize_output_name("r.xls"), PathBuf::from("r.xls.xlsx"));
        assert_eq!(normalize_output_name("r.xlsx"), PathBuf::from("r.xlsx"));
    }

    #[test]
    fn require_reports_every_missing_column() {
        let table = Table {
            headers: vec!["centre_code".into(), "centre_name".into()],
            rows: vec![],
        };
        match centres_from_table(&table) {
            Err(RosterError::MissingColumns { table, missing }) => {
                assert_eq!(table, "centre");
                assert_eq!(missing, ["city", "device_allotted"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let table = Table {
            headers: CENTRE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            rows: vec![vec!["1".into(), "A".into()]],
        };
        assert!(matches!(
            centres_from_table(&table),
            Err(RosterError::MalformedRow { row: 2, .. })
        ));
    }
}
