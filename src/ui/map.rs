use gtk::prelude::*;
use gtk::{glib, Label, Orientation, Popover};
use libshumate::prelude::{LocationExt, MarkerExt};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::map_builder::{MapView, MarkerSpec, PopupContent};

const POPUP_WIDTH: i32 = 220;
const POPUP_IMAGE_HEIGHT: i32 = 140;

/// The libshumate map plus the single marker layer every project goes on.
#[derive(Clone)]
pub struct MapPanel {
    map: libshumate::SimpleMap,
    marker_layer: Option<libshumate::MarkerLayer>,
    tile_url: Rc<RefCell<Option<String>>>,
}

impl MapPanel {
    pub fn new() -> Self {
        let map = libshumate::SimpleMap::new();
        map.set_vexpand(true);
        map.set_hexpand(true);

        let marker_layer = map.map().and_then(|map_view| {
            let viewport = map_view.viewport()?;
            let layer = libshumate::MarkerLayer::new(&viewport);
            map_view.add_layer(&layer);
            Some(layer)
        });

        if marker_layer.is_none() {
            tracing::warn!("map has no viewport, markers will not be shown");
        }

        Self {
            map,
            marker_layer,
            tile_url: Rc::new(RefCell::new(None)),
        }
    }

    pub fn widget(&self) -> &libshumate::SimpleMap {
        &self.map
    }

    /// Apply the tile source, zoom limits and starting position of `view`.
    pub fn configure(&self, view: &MapView) {
        let mut current = self.tile_url.borrow_mut();
        if current.as_deref() != Some(view.tile_url.as_str()) {
            let map_source = libshumate::RasterRenderer::from_url(&view.tile_url);
            self.map.set_map_source(Some(&map_source));
            *current = Some(view.tile_url.clone());
        }

        if let Some(map_view) = self.map.map() {
            if let Some(viewport) = map_view.viewport() {
                viewport.set_min_zoom_level(view.min_zoom);
                viewport.set_max_zoom_level(view.max_zoom);
            }
            let (latitude, longitude) = view.center;
            map_view.go_to_full(latitude, longitude, view.zoom);
        }
    }

    pub fn show_markers(&self, view: &MapView) {
        let Some(layer) = &self.marker_layer else {
            return;
        };

        layer.remove_all();
        for spec in &view.markers {
            create_project_marker(layer, spec);
        }
        tracing::debug!(markers = view.markers.len(), "placed markers");
    }

    pub fn clear(&self) {
        if let Some(layer) = &self.marker_layer {
            layer.remove_all();
        }
    }
}

/// A uniform pin with a hover label and a popover holding the project card.
fn create_project_marker(marker_layer: &libshumate::MarkerLayer, spec: &MarkerSpec) {
    let marker_button = gtk::Button::builder()
        .icon_name("mark-location-symbolic")
        .tooltip_text(spec.tooltip.as_str())
        .build();
    marker_button.add_css_class("map-marker");

    let popover = Popover::builder().build();
    popover.add_css_class("map-popover");

    let (card, picture, placeholder) = create_popup_card(&spec.popup);
    popover.set_child(Some(&card));
    popover.set_parent(&marker_button);

    // Image is fetched the first time the popup opens
    let image_requested = Rc::new(Cell::new(false));
    let image_url = spec.popup.image_url.clone();
    let popover_for_click = popover.clone();
    marker_button.connect_clicked(move |_| {
        if !image_requested.replace(true) {
            let url = image_url.clone();
            let picture = picture.clone();
            let placeholder = placeholder.clone();
            glib::spawn_future_local(async move {
                load_popup_image(&url, &picture, &placeholder).await;
            });
        }
        popover_for_click.popup();
    });

    marker_button.connect_destroy(move |_| {
        popover.unparent();
    });

    let marker = libshumate::Marker::new();
    marker.set_child(Some(&marker_button));
    marker.set_location(spec.latitude, spec.longitude);

    marker_layer.add_marker(&marker);
}

fn create_popup_card(content: &PopupContent) -> (gtk::Box, gtk::Picture, gtk::Image) {
    let card = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .spacing(6)
        .width_request(POPUP_WIDTH)
        .margin_top(10)
        .margin_bottom(10)
        .margin_start(10)
        .margin_end(10)
        .build();

    let heading = Label::builder()
        .label(content.heading.as_str())
        .wrap(true)
        .wrap_mode(gtk::pango::WrapMode::WordChar)
        .xalign(0.0)
        .max_width_chars(28)
        .build();
    heading.add_css_class("title-4");
    card.append(&heading);

    let badge = Label::builder()
        .label(content.badge.as_str())
        .halign(gtk::Align::Start)
        .build();
    badge.add_css_class("badge");
    badge.add_css_class("badge-category");
    card.append(&badge);

    let screen_size = Label::builder()
        .use_markup(true)
        .label(format!(
            "<b>Screen Size:</b> {}",
            glib::markup_escape_text(&content.screen_size)
        ))
        .wrap(true)
        .xalign(0.0)
        .build();
    screen_size.add_css_class("popup-screen-size");
    card.append(&screen_size);

    let picture = gtk::Picture::builder()
        .height_request(POPUP_IMAGE_HEIGHT)
        .hexpand(true)
        .can_shrink(true)
        .content_fit(gtk::ContentFit::Cover)
        .visible(false)
        .build();
    picture.add_css_class("popup-image");

    // Broken image stand-in
    let placeholder = gtk::Image::builder()
        .icon_name("image-missing-symbolic")
        .pixel_size(48)
        .height_request(POPUP_IMAGE_HEIGHT)
        .visible(false)
        .build();
    placeholder.add_css_class("dim-label");
    placeholder.set_tooltip_text(Some(&content.image_url));

    // Open the full image in the browser
    let gesture = gtk::GestureClick::new();
    let url = content.image_url.clone();
    gesture.connect_released(move |_, _, _, _| {
        if let Err(e) = open::that(&url) {
            tracing::warn!("failed to open {url}: {e}");
        }
    });
    picture.add_controller(gesture);
    picture.add_css_class("activatable");

    card.append(&picture);
    card.append(&placeholder);

    (card, picture, placeholder)
}

async fn load_popup_image(url: &str, picture: &gtk::Picture, placeholder: &gtk::Image) {
    match fetch_texture(url).await {
        Ok(texture) => {
            picture.set_paintable(Some(&texture));
            picture.set_visible(true);
        }
        Err(e) => {
            tracing::warn!("failed to load image {url}: {e:#}");
            placeholder.set_visible(true);
        }
    }
}

async fn fetch_texture(url: &str) -> anyhow::Result<gdk::Texture> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    let texture = gdk::Texture::from_bytes(&glib::Bytes::from_owned(bytes))?;
    Ok(texture)
}
