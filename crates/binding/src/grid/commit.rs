//! Inline edit commit pipeline
//!
//! convert typed text -> write field -> required check -> save callback.
//! Conversion failures stay local to the cell; save failures propagate.

use contracts::shared::metadata::ValueKind;
use tracing::debug;

use super::column::ColumnDef;
use super::{CellState, Grid};
use crate::error::GridError;
use crate::record::{parse_value, BindableRecord, FieldBinding, FieldValue, RecordRef};

/// Result of finishing an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Value written and save callback succeeded
    Saved,
    /// Value written, no save callback registered
    Committed,
    /// Text did not convert; row untouched
    Rejected { message: String },
    /// Required field written empty; save skipped
    RequiredMissing { message: String },
}

impl CommitOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Saved | Self::Committed | Self::RequiredMissing { .. })
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

struct CommitTarget<R: 'static> {
    name: &'static str,
    kind: ValueKind,
    required: bool,
    binding: &'static FieldBinding<R>,
}

impl<R: BindableRecord> Grid<R> {
    /// Commit text typed into a plain editable cell
    pub fn on_edit_finished(
        &mut self,
        row: usize,
        column: &str,
        raw_text: &str,
    ) -> Result<CommitOutcome, GridError> {
        let target = self.edit_target(column, ColumnDef::is_text_editable)?;
        let row_id = self.row_id_at(row)?;

        let value = match parse_value(target.kind, raw_text) {
            Ok(value) => value,
            Err(e) => {
                debug!(row = %row_id, field = target.name, error = %e, "edit rejected");
                let message = self.messages.conversion_error.clone();
                self.set_cell_state(
                    row_id,
                    target.name,
                    CellState::Invalid {
                        message: message.clone(),
                    },
                );
                return Ok(CommitOutcome::Rejected { message });
            }
        };

        self.commit_value(row, row_id, &target, value)
    }

    /// Commit a record chosen through a picker cell
    pub fn commit_reference(
        &mut self,
        row: usize,
        column: &str,
        value: Option<RecordRef>,
    ) -> Result<CommitOutcome, GridError> {
        let target = self.edit_target(column, ColumnDef::is_picker_editable)?;
        let row_id = self.row_id_at(row)?;
        self.commit_value(row, row_id, &target, FieldValue::from(value))
    }

    fn edit_target(
        &self,
        column: &str,
        accepts: fn(&ColumnDef<R>) -> bool,
    ) -> Result<CommitTarget<R>, GridError> {
        let col = self
            .column(column)
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;
        if !accepts(col) {
            return Err(GridError::NotEditable(column.to_string()));
        }
        Ok(CommitTarget {
            name: col.name(),
            kind: col.descriptor.value_kind,
            required: col.descriptor.required,
            binding: col.binding,
        })
    }

    fn commit_value(
        &mut self,
        row: usize,
        row_id: String,
        target: &CommitTarget<R>,
        value: FieldValue,
    ) -> Result<CommitOutcome, GridError> {
        let set = target
            .binding
            .set
            .ok_or_else(|| GridError::NotEditable(target.name.to_string()))?;

        let missing = target.required && value.is_blank();
        self.rows
            .update(row, |r| set(r, value))
            .ok_or(GridError::RowOutOfRange {
                index: row,
                len: self.rows.len(),
            })?;

        if missing {
            let message = self.messages.required_error.clone();
            self.set_cell_state(
                row_id,
                target.name,
                CellState::RequiredMissing {
                    message: message.clone(),
                },
            );
            return Ok(CommitOutcome::RequiredMissing { message });
        }
        self.set_cell_state(row_id, target.name, CellState::Normal);

        let Some(saver) = self.saver.as_mut() else {
            return Ok(CommitOutcome::Committed);
        };
        let snapshot = self.rows.get(row).ok_or(GridError::RowOutOfRange {
            index: row,
            len: self.rows.len(),
        })?;
        saver(&snapshot)?;
        Ok(CommitOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{customer, grid_of, line};
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_grid() -> (Grid<crate::test_support::InvoiceLine>, Rc<RefCell<Vec<String>>>) {
        let saved = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&saved);
        let grid =
            grid_of(vec![line("a", "Анкер", 1), line("b", "Болт", 2)]).with_saver(move |row| {
                log.borrow_mut().push(row.id.clone());
                Ok(())
            });
        (grid, saved)
    }

    #[test]
    fn test_valid_integer_commit_saves_once() {
        let (mut grid, saved) = recording_grid();

        let outcome = grid.on_edit_finished(0, "quantity", "42").unwrap();

        assert_eq!(outcome, CommitOutcome::Saved);
        assert_eq!(grid.rows().get(0).unwrap().quantity, Some(42));
        assert_eq!(grid.cell_state(0, "quantity"), CellState::Normal);
        assert_eq!(*saved.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn test_same_value_twice_saves_twice() {
        let (mut grid, saved) = recording_grid();

        grid.on_edit_finished(1, "quantity", "42").unwrap();
        let after_first = grid.rows().get(1).unwrap().quantity;
        grid.on_edit_finished(1, "quantity", "42").unwrap();

        assert_eq!(grid.rows().get(1).unwrap().quantity, after_first);
        assert_eq!(saved.borrow().len(), 2);
    }

    #[test]
    fn test_invalid_text_leaves_row_untouched() {
        let (mut grid, saved) = recording_grid();

        let outcome = grid.on_edit_finished(0, "quantity", "abc").unwrap();

        assert!(matches!(outcome, CommitOutcome::Rejected { .. }));
        assert_eq!(grid.rows().get(0).unwrap().quantity, Some(1));
        assert!(grid.cell_state(0, "quantity").is_invalid());
        assert_eq!(grid.cell_class(0, "quantity"), Some("cell--invalid"));
        assert!(saved.borrow().is_empty());
    }

    #[test]
    fn test_valid_commit_clears_previous_invalid_state() {
        let (mut grid, _) = recording_grid();
        grid.on_edit_finished(0, "price", "12,5").unwrap();
        assert!(grid.cell_state(0, "price").is_invalid());

        grid.on_edit_finished(0, "price", "12.50").unwrap();
        assert_eq!(grid.cell_state(0, "price"), CellState::Normal);
        assert!(!grid.has_invalid_cells());
    }

    #[test]
    fn test_required_blank_skips_save() {
        let (mut grid, saved) = recording_grid();

        let outcome = grid.on_edit_finished(0, "description", "   ").unwrap();

        assert!(matches!(outcome, CommitOutcome::RequiredMissing { .. }));
        assert_eq!(grid.rows().get(0).unwrap().description, "");
        assert_eq!(grid.cell_class(0, "description"), Some("cell--required"));
        assert!(saved.borrow().is_empty());
    }

    #[test]
    fn test_optional_blank_commits_null() {
        let (mut grid, saved) = recording_grid();
        let outcome = grid.on_edit_finished(0, "quantity", "").unwrap();
        assert_eq!(outcome, CommitOutcome::Saved);
        assert_eq!(grid.rows().get(0).unwrap().quantity, None);
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_without_saver_value_is_committed() {
        let mut grid = grid_of(vec![line("a", "Анкер", 1)]);
        assert_eq!(
            grid.on_edit_finished(0, "note", "срочно").unwrap(),
            CommitOutcome::Committed
        );
        assert_eq!(grid.cell_text(0, "note").unwrap(), "срочно");
    }

    #[test]
    fn test_save_failure_propagates() {
        let mut grid = grid_of(vec![line("a", "Анкер", 1)])
            .with_saver(|_| Err(anyhow!("database is locked")));

        let err = grid.on_edit_finished(0, "quantity", "3").unwrap_err();

        assert!(matches!(err, GridError::Persistence(_)));
        assert_eq!(err.to_string(), "database is locked");
        assert_eq!(grid.rows().get(0).unwrap().quantity, Some(3));
    }

    #[test]
    fn test_read_only_and_unknown_columns() {
        let mut grid = grid_of(vec![line("a", "Анкер", 1)]);
        assert!(matches!(
            grid.on_edit_finished(0, "amount", "1"),
            Err(GridError::NotEditable(_))
        ));
        assert!(matches!(
            grid.on_edit_finished(0, "customer", "Рога"),
            Err(GridError::NotEditable(_))
        ));
        assert!(matches!(
            grid.on_edit_finished(0, "missing", "1"),
            Err(GridError::UnknownColumn(_))
        ));
        assert!(matches!(
            grid.on_edit_finished(5, "quantity", "1"),
            Err(GridError::RowOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn test_commit_reference_from_picker() {
        let (mut grid, saved) = recording_grid();
        let row = grid.rows().get(0).unwrap();
        let mut picker = grid.column("customer").unwrap().open_picker(&row).unwrap();
        picker.on_input("Рога");
        picker.select(0).unwrap();

        let outcome = grid
            .commit_reference(0, "customer", picker.value().cloned())
            .unwrap();

        assert_eq!(outcome, CommitOutcome::Saved);
        assert_eq!(grid.cell_text(0, "customer").unwrap(), "Рога и копыта");
        assert_eq!(saved.borrow().len(), 1);
    }

    #[test]
    fn test_clearing_required_reference() {
        let (mut grid, saved) = recording_grid();
        grid.commit_reference(1, "customer", Some(customer())).unwrap();
        let outcome = grid.commit_reference(1, "customer", None).unwrap();
        assert!(matches!(outcome, CommitOutcome::RequiredMissing { .. }));
        assert_eq!(saved.borrow().len(), 1);
    }
}
