mod heat;
mod json;
mod query;
mod select;

pub use heat::{annotate_heat, format_heat, heat_label, heat_score};
pub use json::*;
pub use query::QueryParams;
pub use select::{select_by_preference, select_or_first, Selection};
