pub mod config_view;
pub mod contacts_view;
pub mod dialogs;
pub mod main_window;

use gtk4 as gtk;

/// Installs the application stylesheet on the default display.
pub fn load_stylesheet() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(crate::export::STYLESHEET);
    match gtk::gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => log::warn!("No display available, skipping stylesheet"),
    }
}
