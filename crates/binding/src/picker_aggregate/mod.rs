//! Reference Picker System
//!
//! Поля, ссылающиеся на записи другого справочника, редактируются через
//! пикер с поиском по частичному вводу.
//!
//! ## Использование
//!
//! ```rust,ignore
//! use binding::picker_aggregate::{ReferencePicker, SearchServiceRegistry};
//!
//! // 1. Зарегистрируйте сервис поиска под ключом из метаданных поля
//! registry.register("a003_counterparty", Rc::new(CounterpartySearch::new(api)));
//!
//! // 2. Колонка-пикер создаёт адаптер с текущим значением ячейки
//! let column = grid.column("customer").unwrap();
//! let row_value = grid.rows().get(row).unwrap();
//! let mut picker = column.open_picker(&row_value).unwrap();
//! picker.on_input("Рома");
//! picker.select(0);
//! grid.commit_reference(row, "customer", picker.value().cloned())?;
//! ```

pub mod adapter;
pub mod registry;
pub mod traits;

pub use adapter::ReferencePicker;
pub use registry::SearchServiceRegistry;
pub use traits::{AggregatePickerResult, ReferenceSearchService};
