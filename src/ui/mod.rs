//! GTK front end: draws [`Frame`]s and feeds widget events back into the
//! [`Dashboard`].

mod map;
mod raw_table;
mod sidebar;
mod style;

use gtk::prelude::*;
use gtk::{glib, Align, Application, Label, Orientation};
use libadwaita::{prelude::*, ApplicationWindow, ColorScheme, HeaderBar, StatusPage, StyleManager, ToolbarView};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::dashboard::{Dashboard, Frame, View, NO_DATA_TITLE};
use crate::filter::Selection;
use crate::loader::DataLoader;

use map::MapPanel;
use raw_table::RawTable;
use sidebar::Sidebar;

const WARNING_PAGE: &str = "warning";
const DASHBOARD_PAGE: &str = "dashboard";

pub fn build_ui(app: &Application, config: &Config) {
    // Light scheme to match the neutral basemap
    StyleManager::default().set_color_scheme(ColorScheme::PreferLight);

    let dashboard = Dashboard::new(DataLoader::new(&config.data_path), config.map.clone());

    let header_bar = HeaderBar::builder().build();

    let status_label = Label::builder()
        .label("Loading...")
        .build();
    status_label.add_css_class("monospace");
    status_label.add_css_class("status-display");

    let reload_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .tooltip_text("Reload project data")
        .build();

    header_bar.pack_start(&reload_button);
    header_bar.set_title_widget(Some(&status_label));

    let shell = Shell::new(dashboard, status_label);

    let shell_for_reload = shell.clone();
    reload_button.connect_clicked(move |_| {
        shell_for_reload.reload();
    });

    // Poll the data file and reload when it changes on disk
    if config.watch_interval_secs > 0 {
        let shell_for_watch = shell.clone();
        glib::timeout_add_seconds_local(config.watch_interval_secs, move || {
            let frame = shell_for_watch.dashboard.borrow_mut().reload_if_stale();
            if let Some(frame) = frame {
                shell_for_watch.show(frame);
            }
            glib::ControlFlow::Continue
        });
    }

    let toolbar_view = ToolbarView::builder().build();
    toolbar_view.add_top_bar(&header_bar);
    toolbar_view.set_content(Some(&shell.stack));

    let window = ApplicationWindow::builder()
        .application(app)
        .title("Global LED Portfolio")
        .default_width(1200)
        .default_height(800)
        .build();

    style::install(&window);

    window.set_content(Some(&toolbar_view));

    let frame = shell.dashboard.borrow_mut().open();
    shell.show(frame);

    window.present();
}

/// Widgets that change between renders, plus the session behind them.
#[derive(Clone)]
struct Shell {
    dashboard: Rc<RefCell<Dashboard>>,
    stack: gtk::Stack,
    warning: StatusPage,
    status_label: Label,
    sidebar: Sidebar,
    count_label: Label,
    map: MapPanel,
    raw_table: RawTable,
}

impl Shell {
    fn new(dashboard: Dashboard, status_label: Label) -> Self {
        let stack = gtk::Stack::builder()
            .transition_type(gtk::StackTransitionType::Crossfade)
            .build();

        let warning = StatusPage::builder()
            .icon_name("dialog-warning-symbolic")
            .title(NO_DATA_TITLE)
            .vexpand(true)
            .build();
        stack.add_named(&warning, Some(WARNING_PAGE));

        let sidebar = Sidebar::new();

        let count_label = Label::builder()
            .xalign(0.0)
            .build();
        count_label.add_css_class("project-count");

        let map = MapPanel::new();
        let raw_table = RawTable::new();

        let page = create_dashboard_page(&sidebar, &count_label, &map, &raw_table);
        stack.add_named(&page, Some(DASHBOARD_PAGE));

        Self {
            dashboard: Rc::new(RefCell::new(dashboard)),
            stack,
            warning,
            status_label,
            sidebar,
            count_label,
            map,
            raw_table,
        }
    }

    /// Full render after a (re)load: rebuilds the sidebar options and
    /// recenters the map.
    fn show(&self, frame: Frame) {
        let now = chrono::Local::now().format("%H:%M:%S");

        match frame {
            Frame::Unavailable { message } => {
                self.warning
                    .set_description(Some(glib::markup_escape_text(&message).as_str()));
                self.sidebar.clear();
                self.map.clear();
                self.raw_table.clear();
                self.stack.set_visible_child_name(WARNING_PAGE);
                self.status_label.set_label(&format!("No data · {}", now));
            }
            Frame::Ready(view) => {
                let shell = self.clone();
                self.sidebar.set_categories(&view.categories, &view.selection, move |selection| {
                    shell.on_selection_changed(selection);
                });
                self.map.configure(&view.map);
                self.update(&view);
                self.stack.set_visible_child_name(DASHBOARD_PAGE);

                self.status_label.set_label(&format!(
                    "{} projects · loaded {}",
                    view.filtered.len(),
                    now
                ));
            }
        }
    }

    fn on_selection_changed(&self, selection: Selection) {
        let frame = self.dashboard.borrow_mut().select(selection);
        match frame {
            Frame::Ready(view) => self.update(&view),
            unavailable => self.show(unavailable),
        }
    }

    fn reload(&self) {
        tracing::info!("reload requested");
        let frame = self.dashboard.borrow_mut().reload();
        self.show(frame);
    }

    fn update(&self, view: &View) {
        self.count_label.set_label(&view.count_text);
        self.map.show_markers(&view.map);
        self.raw_table.set_rows(&view.filtered);
    }
}

fn create_dashboard_page(
    sidebar: &Sidebar,
    count_label: &Label,
    map: &MapPanel,
    raw_table: &RawTable,
) -> gtk::Paned {
    let sidebar_scroll = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .build();
    sidebar_scroll.set_child(Some(sidebar.root()));
    sidebar_scroll.add_css_class("sidebar-pane");

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(8)
        .margin_top(12)
        .margin_bottom(12)
        .margin_start(12)
        .margin_end(12)
        .build();

    let title = Label::builder()
        .label("🌍 Global LED Installation Map")
        .xalign(0.0)
        .halign(Align::Start)
        .build();
    title.add_css_class("title-1");

    content.append(&title);
    content.append(count_label);

    let map_frame = gtk::Frame::builder()
        .child(map.widget())
        .vexpand(true)
        .hexpand(true)
        .height_request(400)
        .build();
    content.append(&map_frame);
    content.append(raw_table.root());

    let paned = gtk::Paned::builder()
        .orientation(Orientation::Horizontal)
        .wide_handle(true)
        .build();

    paned.set_start_child(Some(&sidebar_scroll));
    paned.set_resize_start_child(false);
    paned.set_shrink_start_child(false);

    paned.set_end_child(Some(&content));
    paned.set_resize_end_child(true);
    paned.set_shrink_end_child(false);

    paned.set_position(260);

    // Sidebar on the left in landscape windows, on top in portrait ones
    let paned_weak = paned.downgrade();
    paned.add_tick_callback(move |_widget, _clock| {
        if let Some(paned) = paned_weak.upgrade() {
            let width = paned.width();
            let height = paned.height();

            if width > 0 && height > 0 {
                let should_be_horizontal = width > height;
                let is_horizontal = paned.orientation() == Orientation::Horizontal;

                if should_be_horizontal != is_horizontal {
                    if should_be_horizontal {
                        paned.set_orientation(Orientation::Horizontal);
                        paned.set_position(260);
                    } else {
                        paned.set_orientation(Orientation::Vertical);
                        paned.set_position(180);
                    }
                }
            }
        }
        glib::ControlFlow::Continue
    });

    paned
}
