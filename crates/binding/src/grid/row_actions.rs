//! Row actions: create / edit / delete
//!
//! Edit lifecycle: `create`/`edit` move `Idle -> Editing` and enable the
//! input controls. `save` runs the creator/updater and returns to `Idle` on
//! success; a failed callback keeps `Editing` so the form stays open.
//! `cancel` returns to `Idle` without invoking any callback.

use tracing::info;

use super::Grid;
use crate::config::EngineConfig;
use crate::error::GridError;
use crate::record::BindableRecord;

pub type Creator = Box<dyn FnMut() -> anyhow::Result<()>>;
pub type RowCallback<R> = Box<dyn FnMut(&R) -> anyhow::Result<()>>;
pub type Refresher<R> = Box<dyn FnMut() -> anyhow::Result<Vec<R>>>;

/// Yes/no confirmation round-trip
pub trait Confirmation {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirmation for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing { row_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Create,
    Edit,
    Delete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Создать",
            Self::Edit => "Изменить",
            Self::Delete => "Удалить",
        }
    }
}

/// Context menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub action: RowAction,
    pub label: &'static str,
    pub enabled: bool,
}

/// User interaction with grid rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    DoubleClick(usize),
    ContextMenu(RowAction),
    Save,
    Cancel,
}

pub struct RowActionDispatcher<R> {
    creator: Option<Creator>,
    updater: Option<RowCallback<R>>,
    deleter: Option<RowCallback<R>>,
    refresher: Option<Refresher<R>>,
    state: EditState,
    delete_prompt: String,
}

impl<R: BindableRecord> RowActionDispatcher<R> {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            creator: None,
            updater: None,
            deleter: None,
            refresher: None,
            state: EditState::Idle,
            delete_prompt: config.messages.delete_confirmation.clone(),
        }
    }

    pub fn with_creator(mut self, creator: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        self.creator = Some(Box::new(creator));
        self
    }

    pub fn with_updater(mut self, updater: impl FnMut(&R) -> anyhow::Result<()> + 'static) -> Self {
        self.updater = Some(Box::new(updater));
        self
    }

    pub fn with_deleter(mut self, deleter: impl FnMut(&R) -> anyhow::Result<()> + 'static) -> Self {
        self.deleter = Some(Box::new(deleter));
        self
    }

    /// Loader used to refresh the grid after create/edit
    pub fn with_refresher(
        mut self,
        refresher: impl FnMut() -> anyhow::Result<Vec<R>> + 'static,
    ) -> Self {
        self.refresher = Some(Box::new(refresher));
        self
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Input controls are enabled only while editing
    pub fn controls_enabled(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// Start a row-independent "new" action
    pub fn create(&mut self) -> bool {
        if self.creator.is_none() {
            return false;
        }
        self.state = EditState::Editing(EditTarget::New);
        true
    }

    /// Start editing the selected row; no-op without selection
    pub fn edit(&mut self, grid: &Grid<R>) -> bool {
        let (Some(_), Some(row)) = (self.updater.as_ref(), grid.selected_row()) else {
            return false;
        };
        self.state = EditState::Editing(EditTarget::Existing {
            row_id: row.row_id(),
        });
        true
    }

    /// Finish the current action: invoke the creator or updater, refresh
    /// the grid and return to `Idle`. Does nothing while `Idle`.
    pub fn save(&mut self, grid: &mut Grid<R>) -> Result<bool, GridError> {
        match self.state.clone() {
            EditState::Idle => Ok(false),
            EditState::Editing(EditTarget::New) => {
                if let Some(creator) = self.creator.as_mut() {
                    creator()?;
                }
                self.refresh(grid)?;
                self.state = EditState::Idle;
                Ok(true)
            }
            EditState::Editing(EditTarget::Existing { row_id }) => {
                let row = grid
                    .rows()
                    .position_of(&row_id)
                    .and_then(|i| grid.rows().get(i))
                    .ok_or_else(|| GridError::RowNotFound(row_id.clone()))?;
                if let Some(updater) = self.updater.as_mut() {
                    updater(&row)?;
                }
                self.refresh(grid)?;
                grid.select_row_id(&row_id);
                self.state = EditState::Idle;
                Ok(true)
            }
        }
    }

    /// Delete the selected row after confirmation
    pub fn delete(
        &mut self,
        grid: &mut Grid<R>,
        confirmation: &mut dyn Confirmation,
    ) -> Result<bool, GridError> {
        let (Some(deleter), Some(index), Some(row)) =
            (self.deleter.as_mut(), grid.selected(), grid.selected_row())
        else {
            return Ok(false);
        };
        let row_id = row.row_id();

        if !confirmation.confirm(&self.delete_prompt) {
            info!(row = %row_id, "delete declined");
            return Ok(false);
        }

        deleter(&row)?;

        if let Some(position) = grid.rows().position_of(&row_id) {
            grid.rows().remove(position);
        }
        grid.forget_row(&row_id);

        let len = grid.row_count();
        grid.select((len > 0).then(|| index.min(len - 1)));
        Ok(true)
    }

    /// Explicit escape: back to `Idle` without invoking any callback
    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    pub fn context_menu(&self, grid: &Grid<R>) -> Vec<MenuItem> {
        let has_selection = grid.selected().is_some();
        [
            (RowAction::Create, self.creator.is_some()),
            (RowAction::Edit, self.updater.is_some() && has_selection),
            (RowAction::Delete, self.deleter.is_some() && has_selection),
        ]
        .into_iter()
        .map(|(action, enabled)| MenuItem {
            action,
            label: action.label(),
            enabled,
        })
        .collect()
    }

    pub fn dispatch(
        &mut self,
        grid: &mut Grid<R>,
        event: RowEvent,
        confirmation: &mut dyn Confirmation,
    ) -> Result<bool, GridError> {
        match event {
            RowEvent::DoubleClick(index) => {
                grid.select(Some(index));
                Ok(self.edit(grid))
            }
            RowEvent::ContextMenu(RowAction::Create) => Ok(self.create()),
            RowEvent::ContextMenu(RowAction::Edit) => Ok(self.edit(grid)),
            RowEvent::ContextMenu(RowAction::Delete) => self.delete(grid, confirmation),
            RowEvent::Save => self.save(grid),
            RowEvent::Cancel => {
                self.cancel();
                Ok(true)
            }
        }
    }

    fn refresh(&mut self, grid: &mut Grid<R>) -> Result<(), GridError> {
        if let Some(refresher) = self.refresher.as_mut() {
            let rows = refresher()?;
            grid.reload(rows);
        }
        Ok(())
    }
}
