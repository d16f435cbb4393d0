use crate::generator::{Generation, RollNumberAssignment};
use crate::model::{AttendanceRow, ATTENDANCE_COLUMNS};

/// Nombre de lignes affichées par défaut dans l'aperçu.
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Permet de customiser le rendu (texte, markdown, etc.).
pub trait ReportRenderer {
    fn roll_table(&self, rolls: &RollNumberAssignment) -> String;
    fn preview(&self, rows: &[AttendanceRow]) -> String;
}

/// Tableau texte aligné, destiné au terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn roll_table(&self, rolls: &RollNumberAssignment) -> String {
        let body: Vec<Vec<String>> = rolls
            .iter()
            .map(|(id, roll)| vec![id.name(), roll.to_string()])
            .collect();
        render_grid(&["Name", "Roll Number"], &body)
    }

    fn preview(&self, rows: &[AttendanceRow]) -> String {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.fields().iter().map(|f| f.to_string()).collect())
            .collect();
        render_grid(&ATTENDANCE_COLUMNS, &body)
    }
}

/// Résumé complet d'un run : table des rolls puis aperçu des `limit` premières lignes.
pub fn render_summary(
    generation: &Generation,
    limit: usize,
    renderer: &dyn ReportRenderer,
) -> String {
    let shown = generation.rows.len().min(limit);
    let mut out = String::new();
    out.push_str("Fixed roll numbers\n");
    out.push_str(&renderer.roll_table(&generation.roll_numbers));
    out.push('\n');
    out.push_str(&format!(
        "Preview ({shown} of {} rows, {} new)\n",
        generation.rows.len(),
        generation.new_rows().len()
    ));
    out.push_str(&renderer.preview(&generation.rows[..shown]));
    out
}

fn render_grid(headers: &[&str], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths);
    for row in body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, w)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{cell:<w$}  "));
        }
    }
    out.push('\n');
}
