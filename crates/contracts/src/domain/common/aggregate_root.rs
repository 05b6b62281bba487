/// Трейт для корня агрегата
///
/// Статические метаданные агрегата: индекс и имя коллекции
pub trait AggregateRoot {
    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "issue")
    fn collection_name() -> &'static str;

    /// Полное имя агрегата, оно же имя таблицы БД (например, "a001_issue")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
