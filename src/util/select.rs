/// Result of a first-match-or-fallback lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a, T> {
    pub item: &'a T,
    /// False when nothing matched and the first element was used instead.
    pub matched: bool,
}

/// Returns the first element satisfying `pred`, or the first element of the
/// slice when none does. `None` only for an empty slice.
pub fn select_or_first<'a, T, F>(items: &'a [T], pred: F) -> Option<Selection<'a, T>>
where
    F: Fn(&T) -> bool,
{
    if let Some(item) = items.iter().find(|item| pred(item)) {
        return Some(Selection { item, matched: true });
    }
    items.first().map(|item| Selection {
        item,
        matched: false,
    })
}

/// Like `select_or_first`, but tries each predicate in turn before falling
/// back. `matched` is true if any predicate hit.
pub fn select_by_preference<'a, T>(
    items: &'a [T],
    preferences: &[&dyn Fn(&T) -> bool],
) -> Option<Selection<'a, T>> {
    for pred in preferences {
        if let Some(item) = items.iter().find(|item| pred(item)) {
            return Some(Selection { item, matched: true });
        }
    }
    select_or_first(items, |_| false)
}
