//! Plain-text rendering of the manager state.
//!
//! Pure functions of state: nothing here mutates or performs I/O.

use std::fmt::Write;

use crate::manager::{BarManager, DialogMode};
use crate::transport::Transport;
use crate::types::{BarField, BarFields, BarRecord};

const ACTIONS: &str = "Actions";

/// Title and submit-button label for the current dialog mode.
pub fn dialog_labels(mode: &DialogMode) -> (&'static str, &'static str) {
    match mode {
        DialogMode::Create => ("Add Bar", "Add"),
        DialogMode::Edit(_) => ("Edit Bar", "Update"),
    }
}

/// One row per record, one column per attribute, plus an actions cell.
pub fn render_table(bars: &[BarRecord]) -> String {
    let mut header: Vec<String> = BarField::ALL.iter().map(|f| f.label().to_string()).collect();
    header.push(ACTIONS.to_string());

    let rows: Vec<Vec<String>> = bars
        .iter()
        .map(|bar| {
            let mut cells: Vec<String> = BarField::ALL.iter().map(|f| bar.field_text(*f)).collect();
            cells.push(format!("[edit {id}] [delete {id}]", id = bar.id));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

/// The form, or `None` while the dialog is closed.
pub fn render_dialog<T: Transport>(manager: &BarManager<T>) -> Option<String> {
    if !manager.is_open() {
        return None;
    }
    let (title, submit) = dialog_labels(manager.mode());
    let label_width = BarField::ALL.iter().map(|f| f.label().len()).max().unwrap_or(0);

    let mut out = format!("== {title} ==\n");
    for field in BarField::ALL {
        let _ = writeln!(
            out,
            "  {:<label_width$} [{}]: {}",
            field.label(),
            field.key(),
            manager.field_text(field)
        );
    }
    let _ = writeln!(out, "  [cancel] [{submit}]");
    Some(out)
}

/// The error banner, or `None` when there is nothing to show.
pub fn render_banner(error: Option<&str>) -> Option<String> {
    error.map(|e| format!("!! {e}\n"))
}

/// Banner, table and dialog, in screen order.
pub fn render<T: Transport>(manager: &BarManager<T>) -> String {
    let mut out = String::new();
    if let Some(banner) = render_banner(manager.error()) {
        out.push_str(&banner);
    }
    out.push_str(&render_table(manager.bars()));
    if let Some(dialog) = render_dialog(manager) {
        out.push('\n');
        out.push_str(&dialog);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::tests::{bar, manager};
    use crate::types::BarId;

    #[test]
    fn table_has_one_row_per_record() {
        let record: BarRecord = serde_json::from_str(
            r#"{"id":1,"machine_id":"M1","lot_id":"L1","product_id":"P1","recipe_id":"R1","bar_count":5,"time_duration":12.5}"#,
        )
        .unwrap();
        let table = render_table(&[record]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Machine ID"));
        let cells: Vec<&str> = lines[2].split(" | ").map(str::trim).collect();
        assert_eq!(
            cells,
            vec!["M1", "L1", "P1", "R1", "5", "12.5", "[edit 1] [delete 1]"]
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 2);
        assert!(table.contains(ACTIONS));
    }

    #[test]
    fn dialog_labels_follow_mode() {
        let mut m = manager(vec![bar(3)]);
        assert!(render_dialog(&m).is_none());

        m.open_for_create();
        let dialog = render_dialog(&m).unwrap();
        assert!(dialog.starts_with("== Add Bar =="));
        assert!(dialog.contains("MACHINE1"));
        assert!(dialog.contains("[Add]"));

        m.open_for_edit(&bar(3));
        let dialog = render_dialog(&m).unwrap();
        assert!(dialog.starts_with("== Edit Bar =="));
        assert!(dialog.contains("M3"));
        assert!(dialog.contains("[Update]"));
    }

    #[test]
    fn banner_only_when_error_present() {
        assert_eq!(render_banner(None), None);
        assert_eq!(render_banner(Some("boom")).as_deref(), Some("!! boom\n"));

        let mut m = manager(Vec::new());
        m.delete(BarId(7), &mut |_: &str| true);
        assert!(render(&m).starts_with("!! Error deleting bar"));
    }
}
