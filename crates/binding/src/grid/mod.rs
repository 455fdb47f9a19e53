//! Metadata-driven grid
//!
//! [`GridBuilder`] derives typed columns from a record's field table,
//! [`Grid`] owns the rows plus per-cell validation state and runs the inline
//! edit commit pipeline, [`RowActionDispatcher`] handles create/edit/delete.

mod builder;
mod column;
mod commit;
mod row_actions;
mod rows;

use std::collections::HashMap;

use crate::config::{EngineConfig, GridConfig, MessagesConfig};
use crate::error::GridError;
use crate::record::BindableRecord;

pub use builder::GridBuilder;
pub use column::{CellKind, ColumnDef};
pub use commit::CommitOutcome;
pub use row_actions::{
    Confirmation, EditState, EditTarget, MenuItem, RowAction, RowActionDispatcher, RowEvent,
};
pub use rows::RowList;

/// Persistence callback invoked after a successful commit
pub type Saver<R> = Box<dyn FnMut(&R) -> anyhow::Result<()>>;

/// Visual validation state of a single cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Normal,
    /// Typed text did not convert to the field type
    Invalid { message: String },
    /// Required field committed empty
    RequiredMissing { message: String },
}

impl CellState {
    pub fn is_invalid(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Normal => None,
            Self::Invalid { message } | Self::RequiredMissing { message } => Some(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: &'static str,
    pub ascending: bool,
}

/// Grid bound to a record type
pub struct Grid<R: BindableRecord> {
    columns: Vec<ColumnDef<R>>,
    rows: RowList<R>,
    selected: Option<usize>,
    scroll_to: Option<usize>,
    /// Keyed by row id so state follows rows across sorting
    cell_states: HashMap<(String, &'static str), CellState>,
    saver: Option<Saver<R>>,
    sort: Option<SortState>,
    config: GridConfig,
    messages: MessagesConfig,
}

impl<R: BindableRecord> Grid<R> {
    pub(crate) fn new(columns: Vec<ColumnDef<R>>, rows: Vec<R>, config: &EngineConfig) -> Self {
        Self {
            columns,
            rows: RowList::new(rows),
            selected: None,
            scroll_to: None,
            cell_states: HashMap::new(),
            saver: None,
            sort: None,
            config: config.grid.clone(),
            messages: config.messages.clone(),
        }
    }

    /// Register the save callback invoked after each successful commit
    pub fn with_saver(mut self, saver: impl FnMut(&R) -> anyhow::Result<()> + 'static) -> Self {
        self.set_saver(saver);
        self
    }

    pub fn set_saver(&mut self, saver: impl FnMut(&R) -> anyhow::Result<()> + 'static) {
        self.saver = Some(Box::new(saver));
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Shared handle to the backing rows
    pub fn rows(&self) -> &RowList<R> {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_text(&self, row: usize, column: &str) -> Result<String, GridError> {
        let col = self
            .column(column)
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;
        self.rows
            .with(|rows| rows.get(row).map(|r| col.cell_text(r)))
            .ok_or(GridError::RowOutOfRange {
                index: row,
                len: self.rows.len(),
            })
    }

    pub fn cell_state(&self, row: usize, column: &str) -> CellState {
        let Some(name) = self.column(column).map(|c| c.name()) else {
            return CellState::Normal;
        };
        self.rows
            .with(|rows| rows.get(row).map(|r| r.row_id()))
            .and_then(|id| self.cell_states.get(&(id, name)).cloned())
            .unwrap_or_default()
    }

    /// CSS class for the cell's validation state
    pub fn cell_class(&self, row: usize, column: &str) -> Option<&str> {
        match self.cell_state(row, column) {
            CellState::Normal => None,
            CellState::Invalid { .. } => Some(self.config.invalid_cell_class.as_str()),
            CellState::RequiredMissing { .. } => Some(self.config.required_cell_class.as_str()),
        }
    }

    pub fn has_invalid_cells(&self) -> bool {
        self.cell_states.values().any(CellState::is_invalid)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<R> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    /// Select a row and request scrolling to it; out-of-range clears selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.rows.len());
        self.scroll_to = self.selected;
    }

    pub fn select_row_id(&mut self, row_id: &str) -> bool {
        let index = self.rows.position_of(row_id);
        self.select(index);
        index.is_some()
    }

    /// Row the view should scroll to after the last action
    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_to
    }

    /// Replace rows with freshly loaded data, keeping the selected row if still present
    pub fn reload(&mut self, rows: Vec<R>) {
        let selected_id = self.selected_row().map(|r| r.row_id());
        let previous_index = self.selected;
        self.rows.replace(rows);
        self.cell_states.clear();

        if let Some(sort) = self.sort {
            self.apply_sort(sort);
        }

        match selected_id {
            Some(id) if self.select_row_id(&id) => {}
            _ => {
                let len = self.rows.len();
                self.select(previous_index.filter(|_| len > 0).map(|i| i.min(len - 1)));
            }
        }
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Sort rows by a column; the selection follows its row
    pub fn sort_by_column(&mut self, column: &str, ascending: bool) -> Result<(), GridError> {
        let name = self
            .column(column)
            .map(|c| c.name())
            .ok_or_else(|| GridError::UnknownColumn(column.to_string()))?;

        let selected_id = self.selected_row().map(|r| r.row_id());
        let sort = SortState {
            column: name,
            ascending,
        };
        self.apply_sort(sort);
        self.sort = Some(sort);

        if let Some(id) = selected_id {
            self.select_row_id(&id);
        }
        Ok(())
    }

    fn apply_sort(&self, sort: SortState) {
        let Some(column) = self.column(sort.column) else {
            return;
        };
        let get = column.binding.get;
        self.rows.sort_by(|a, b| {
            let cmp = get(a).compare(&get(b));
            if sort.ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });
    }

    pub(crate) fn row_id_at(&self, row: usize) -> Result<String, GridError> {
        self.rows
            .with(|rows| rows.get(row).map(|r| r.row_id()))
            .ok_or(GridError::RowOutOfRange {
                index: row,
                len: self.rows.len(),
            })
    }

    pub(crate) fn set_cell_state(
        &mut self,
        row_id: String,
        column: &'static str,
        state: CellState,
    ) {
        if state == CellState::Normal {
            self.cell_states.remove(&(row_id, column));
        } else {
            self.cell_states.insert((row_id, column), state);
        }
    }

    pub(crate) fn forget_row(&mut self, row_id: &str) {
        self.cell_states.retain(|(id, _), _| id != row_id);
    }
}
