//! Session state behind the window: loader, current selection, and the
//! frame to draw after every event.

use std::rc::Rc;

use crate::config::MapSettings;
use crate::data::Table;
use crate::filter::{apply_selection, available_categories, default_selection, Selection};
use crate::loader::DataLoader;
use crate::map_builder::{build_map, MapView};

pub const NO_DATA_TITLE: &str = "No data to display";

/// What the window should show after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Nothing to plot: the file is missing, unreadable, or has no rows.
    Unavailable { message: String },
    Ready(View),
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub categories: Selection,
    pub selection: Selection,
    pub filtered: Table,
    pub count_text: String,
    pub map: MapView,
}

pub fn count_text(count: usize) -> String {
    format!("Showing {} projects.", count)
}

pub struct Dashboard {
    loader: DataLoader,
    map_settings: MapSettings,
    table: Option<Rc<Table>>,
    selection: Selection,
}

impl Dashboard {
    pub fn new(loader: DataLoader, map_settings: MapSettings) -> Self {
        Self {
            loader,
            map_settings,
            table: None,
            selection: Selection::new(),
        }
    }

    /// Load the table (cached after the first success) and show everything.
    pub fn open(&mut self) -> Frame {
        match self.loader.load() {
            Ok(table) if table.is_empty() => {
                tracing::warn!(path = %self.loader.path().display(), "projects file has no rows");
                self.table = None;
                self.selection.clear();
                Frame::Unavailable {
                    message: format!(
                        "{} has no project rows. Please add projects to the file.",
                        self.loader.path().display()
                    ),
                }
            }
            Ok(table) => {
                self.selection = default_selection(&table);
                self.table = Some(table);
                self.compose()
            }
            Err(err) => {
                tracing::warn!("projects unavailable: {err}");
                self.table = None;
                self.selection.clear();
                Frame::Unavailable {
                    message: err.to_string(),
                }
            }
        }
    }

    /// The selection changed: re-filter the cached table and rebuild the map.
    pub fn select(&mut self, selection: Selection) -> Frame {
        tracing::debug!(selected = selection.len(), "selection changed");
        self.selection = selection;
        self.compose()
    }

    /// Drop the cached table and load it again.
    pub fn reload(&mut self) -> Frame {
        self.loader.invalidate();
        self.open()
    }

    /// Reload if the file changed on disk since the last load.
    pub fn reload_if_stale(&mut self) -> Option<Frame> {
        if self.loader.is_stale() {
            tracing::info!(path = %self.loader.path().display(), "projects file changed");
            Some(self.reload())
        } else {
            None
        }
    }

    fn compose(&self) -> Frame {
        let Some(table) = &self.table else {
            return Frame::Unavailable {
                message: format!("{} has not been loaded.", self.loader.path().display()),
            };
        };

        let filtered = apply_selection(table, &self.selection);
        let map = build_map(filtered.rows(), &self.map_settings);

        Frame::Ready(View {
            categories: available_categories(table),
            selection: self.selection.clone(),
            count_text: count_text(filtered.len()),
            filtered,
            map,
        })
    }
}
