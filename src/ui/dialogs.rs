use adw::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;

fn message_content(message: &str) -> gtk::Box {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let info = gtk::Label::new(Some(message));
    info.set_wrap(true);
    info.set_halign(gtk::Align::Start);
    content.append(&info);
    content
}

/// Two-button modal. `on_answer` runs once, with `true` only for the confirm button.
pub fn confirm_dialog<W, F>(parent: &W, message: &str, on_answer: F) -> gtk::Dialog
where
    W: IsA<gtk::Window>,
    F: Fn(bool) + 'static,
{
    let dialog = gtk::Dialog::builder()
        .title("Confirm")
        .transient_for(parent)
        .modal(true)
        .build();
    dialog.content_area().append(&message_content(message));

    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ok_btn = dialog.add_button("Delete", gtk::ResponseType::Ok);
    ok_btn.add_css_class("destructive-action");
    dialog.set_default_response(gtk::ResponseType::Cancel);

    let answered = Cell::new(false);
    dialog.connect_response(move |dlg, resp| {
        if answered.replace(true) {
            return;
        }
        on_answer(resp == gtk::ResponseType::Ok);
        dlg.close();
    });

    dialog.present();
    dialog
}

/// Blocking notice with a single dismiss button.
pub fn alert<W: IsA<gtk::Window>>(parent: &W, title: &str, message: &str) {
    let dialog = gtk::Dialog::builder()
        .title(title)
        .transient_for(parent)
        .modal(true)
        .build();
    dialog.content_area().append(&message_content(message));
    let _ = dialog.add_button("OK", gtk::ResponseType::Close);
    dialog.connect_response(|dlg, _| dlg.close());
    dialog.present();
}
