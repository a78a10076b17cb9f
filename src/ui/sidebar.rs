use gtk::prelude::*;
use gtk::{CheckButton, Label, Orientation};
use std::cell::RefCell;
use std::rc::Rc;

use crate::filter::Selection;

/// "Portfolio Filters" panel with one check button per category.
#[derive(Clone)]
pub struct Sidebar {
    root: gtk::Box,
    options: gtk::Box,
    checks: Rc<RefCell<Vec<(String, CheckButton)>>>,
}

impl Sidebar {
    pub fn new() -> Self {
        let root = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(8)
            .margin_top(12)
            .margin_bottom(12)
            .margin_start(12)
            .margin_end(12)
            .build();

        let header = Label::builder()
            .label("Portfolio Filters")
            .xalign(0.0)
            .build();
        header.add_css_class("title-4");

        let caption = Label::builder()
            .label("Filter by Project Type")
            .xalign(0.0)
            .build();
        caption.add_css_class("dim-label");
        caption.add_css_class("caption");

        let options = gtk::Box::builder()
            .orientation(Orientation::Vertical)
            .spacing(2)
            .build();
        options.add_css_class("category-options");

        root.append(&header);
        root.append(&caption);
        root.append(&options);

        Self {
            root,
            options,
            checks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn root(&self) -> &gtk::Box {
        &self.root
    }

    /// Replace the options with `categories`, ticking those in `selected`.
    /// `on_change` receives the full selection after every toggle.
    pub fn set_categories<F>(&self, categories: &Selection, selected: &Selection, on_change: F)
    where
        F: Fn(Selection) + 'static,
    {
        self.clear();

        let on_change: Rc<dyn Fn(Selection)> = Rc::new(on_change);
        let mut checks = self.checks.borrow_mut();

        for category in categories {
            let check = CheckButton::builder()
                .label(category.as_str())
                .active(selected.contains(category))
                .build();

            let checks_ref = self.checks.clone();
            let on_change = on_change.clone();
            check.connect_toggled(move |_| {
                let selection = current_selection(&checks_ref.borrow());
                on_change(selection);
            });

            self.options.append(&check);
            checks.push((category.clone(), check));
        }
    }

    pub fn clear(&self) {
        while let Some(child) = self.options.first_child() {
            self.options.remove(&child);
        }
        self.checks.borrow_mut().clear();
    }
}

fn current_selection(checks: &[(String, CheckButton)]) -> Selection {
    checks
        .iter()
        .filter(|(_, check)| check.is_active())
        .map(|(category, _)| category.clone())
        .collect()
}
