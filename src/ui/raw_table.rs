use gtk::prelude::*;
use gtk::Label;

use crate::data::{ProjectRecord, Table, REQUIRED_COLUMNS};

/// Collapsible grid listing the currently filtered rows.
#[derive(Clone)]
pub struct RawTable {
    expander: gtk::Expander,
    grid: gtk::Grid,
}

impl RawTable {
    pub fn new() -> Self {
        let grid = gtk::Grid::builder()
            .column_spacing(16)
            .row_spacing(4)
            .margin_top(8)
            .margin_bottom(8)
            .margin_start(8)
            .margin_end(8)
            .build();
        grid.add_css_class("raw-data-grid");

        let scrolled = gtk::ScrolledWindow::builder()
            .min_content_height(160)
            .max_content_height(320)
            .propagate_natural_height(true)
            .hscrollbar_policy(gtk::PolicyType::Automatic)
            .vscrollbar_policy(gtk::PolicyType::Automatic)
            .child(&grid)
            .build();

        let expander = gtk::Expander::builder()
            .label("View Raw Project Data")
            .child(&scrolled)
            .build();

        Self { expander, grid }
    }

    pub fn root(&self) -> &gtk::Expander {
        &self.expander
    }

    pub fn set_rows(&self, table: &Table) {
        self.clear();

        for (column, title) in REQUIRED_COLUMNS.iter().enumerate() {
            let header = Label::builder()
                .label(*title)
                .xalign(0.0)
                .build();
            header.add_css_class("heading");
            self.grid.attach(&header, column as i32, 0, 1, 1);
        }

        for (index, row) in table.iter().enumerate() {
            for (column, value) in row_cells(row).into_iter().enumerate() {
                let cell = Label::builder()
                    .label(value)
                    .xalign(0.0)
                    .selectable(true)
                    .ellipsize(gtk::pango::EllipsizeMode::End)
                    .max_width_chars(40)
                    .build();
                self.grid.attach(&cell, column as i32, index as i32 + 1, 1, 1);
            }
        }
    }

    pub fn clear(&self) {
        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }
    }
}

fn row_cells(row: &ProjectRecord) -> [String; 6] {
    [
        row.project_name.clone(),
        row.category.clone(),
        row.screen_size.clone(),
        row.image_url.clone(),
        row.latitude.to_string(),
        row.longitude.to_string(),
    ]
}
