use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::record::BindableRecord;

/// Shared backing list of grid rows
///
/// Cloning the handle shares the list, so persistence callbacks may edit it
/// directly. The list is never borrowed while a callback runs.
pub struct RowList<R>(Rc<RefCell<Vec<R>>>);

impl<R> Clone for RowList<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<R: fmt::Debug> fmt::Debug for RowList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

impl<R: BindableRecord> RowList<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self(Rc::new(RefCell::new(rows)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of the row at `index`
    pub fn get(&self, index: usize) -> Option<R> {
        self.0.borrow().get(index).cloned()
    }

    pub fn with<T>(&self, f: impl FnOnce(&[R]) -> T) -> T {
        f(&self.0.borrow())
    }

    pub fn update<T>(&self, index: usize, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        self.0.borrow_mut().get_mut(index).map(f)
    }

    pub fn replace(&self, rows: Vec<R>) {
        *self.0.borrow_mut() = rows;
    }

    pub fn push(&self, row: R) {
        self.0.borrow_mut().push(row);
    }

    pub fn remove(&self, index: usize) -> Option<R> {
        let mut rows = self.0.borrow_mut();
        (index < rows.len()).then(|| rows.remove(index))
    }

    pub fn position_of(&self, row_id: &str) -> Option<usize> {
        self.0.borrow().iter().position(|r| r.row_id() == row_id)
    }

    pub fn remove_by_id(&self, row_id: &str) -> Option<R> {
        let index = self.position_of(row_id)?;
        self.remove(index)
    }

    pub fn sort_by(&self, compare: impl FnMut(&R, &R) -> std::cmp::Ordering) {
        self.0.borrow_mut().sort_by(compare);
    }

    pub fn snapshot(&self) -> Vec<R> {
        self.0.borrow().clone()
    }
}
