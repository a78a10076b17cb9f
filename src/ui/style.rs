use gtk::prelude::*;

const STYLESHEET: &str = "
.map-marker {
    background-color: alpha(@accent_bg_color, 0.85);
    color: @accent_fg_color;
    border-radius: 16px;
    padding: 4px;
    min-height: 0;
    min-width: 0;
    box-shadow: 0 2px 6px alpha(black, 0.4);
}
.map-marker:hover {
    background-color: @accent_bg_color;
    box-shadow: 0 3px 8px alpha(black, 0.5);
}
.map-popover > contents {
    background-color: alpha(@card_bg_color, 0.97);
    border-radius: 12px;
    box-shadow: 0 4px 16px alpha(black, 0.3);
}
.status-display {
    font-size: 13px;
    font-weight: 600;
    padding: 4px 12px;
    background-color: alpha(@accent_bg_color, 0.15);
    border-radius: 6px;
}
.badge {
    border-radius: 4px;
    padding: 2px 6px;
    font-size: 10px;
    font-weight: 600;
    min-height: 0;
}
.badge-category {
    background-color: #333333;
    color: #ffffff;
}
.popup-image {
    border-radius: 5px;
    margin-top: 5px;
}
.project-count {
    font-size: 15px;
}
.sidebar-pane {
    background-color: alpha(@sidebar_bg_color, 0.6);
}
.raw-data-grid .heading {
    color: alpha(@window_fg_color, 0.7);
}";

pub fn install(window: &impl IsA<gtk::Widget>) {
    let css_provider = gtk::CssProvider::new();
    css_provider.load_from_data(STYLESHEET);

    gtk::style_context_add_provider_for_display(
        &window.display(),
        &css_provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
