//! Category selection over a loaded table.

use indexmap::IndexSet;

use crate::data::Table;

/// Selected categories, kept in the order they were first seen.
pub type Selection = IndexSet<String>;

/// Distinct categories present in `table`, in order of first appearance.
pub fn available_categories(table: &Table) -> Selection {
    table.iter().map(|row| row.category.clone()).collect()
}

/// The selection shown on first render: everything.
pub fn default_selection(table: &Table) -> Selection {
    available_categories(table)
}

/// Rows of `table` whose category is selected, in their original order.
pub fn apply_selection(table: &Table, selected: &Selection) -> Table {
    if selected.is_empty() {
        return Table::empty();
    }

    table
        .iter()
        .filter(|row| selected.contains(&row.category))
        .cloned()
        .collect()
}
