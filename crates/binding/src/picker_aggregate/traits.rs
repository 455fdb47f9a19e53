use crate::record::RecordRef;

/// Базовый трейт для элементов, которые можно выбирать через пикер
pub trait AggregatePickerResult {
    fn id(&self) -> String;
    fn display_name(&self) -> String;
}

/// Источник кандидатов для пикера: поиск по частичному вводу
pub trait ReferenceSearchService {
    fn search(&self, partial_text: &str) -> anyhow::Result<Vec<RecordRef>>;

    /// Минимальная длина ввода до первого запроса; `None` - значение из конфигурации
    fn min_search_length(&self) -> Option<usize> {
        None
    }
}
