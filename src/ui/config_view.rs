use adw::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

use crate::config::Config;
use crate::error::ValidationError;

/// Token, base id and table name form shown until a configuration is saved.
pub struct ConfigView {
    root: gtk::Box,
    token_entry: gtk::PasswordEntry,
    base_entry: gtk::Entry,
    table_entry: gtk::Entry,
    status: gtk::Label,
    save_btn: gtk::Button,
}

impl ConfigView {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.set_margin_top(24);
        root.set_margin_bottom(24);
        root.set_margin_start(24);
        root.set_margin_end(24);
        root.set_valign(gtk::Align::Center);
        root.set_halign(gtk::Align::Center);
        root.set_width_request(420);

        let title = gtk::Label::new(Some("Connect to Airtable"));
        title.add_css_class("title-2");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let hint = gtk::Label::new(Some(
            "Enter a personal access token, the base ID and the name of the table that holds your contacts.",
        ));
        hint.add_css_class("dim-label");
        hint.set_wrap(true);
        hint.set_xalign(0.0);
        root.append(&hint);

        let token_entry = gtk::PasswordEntry::new();
        token_entry.set_placeholder_text(Some("Personal access token"));
        token_entry.set_show_peek_icon(true);
        token_entry.set_hexpand(true);

        let base_entry = gtk::Entry::new();
        base_entry.set_placeholder_text(Some("Base ID (e.g. appXXXXXXXXXXXXXX)"));
        base_entry.set_hexpand(true);

        let table_entry = gtk::Entry::new();
        table_entry.set_placeholder_text(Some("Table name (case-sensitive)"));
        table_entry.set_hexpand(true);

        let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
        form.append(&token_entry);
        form.append(&base_entry);
        form.append(&table_entry);
        root.append(&form);

        let status = gtk::Label::new(None);
        status.add_css_class("error");
        status.set_halign(gtk::Align::Start);
        status.set_visible(false);
        root.append(&status);

        let save_btn = gtk::Button::with_label("Save and continue");
        save_btn.add_css_class("suggested-action");
        save_btn.set_halign(gtk::Align::End);
        root.append(&save_btn);

        Self { root, token_entry, base_entry, table_entry, status, save_btn }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Calls `on_submit(token, base_id, table_name)` on the button or Enter in any field.
    pub fn connect_submit<F: Fn(String, String, String) + 'static>(&self, on_submit: F) {
        let submit: Rc<dyn Fn()> = {
            let token_entry = self.token_entry.clone();
            let base_entry = self.base_entry.clone();
            let table_entry = self.table_entry.clone();
            Rc::new(move || {
                on_submit(
                    token_entry.text().to_string(),
                    base_entry.text().to_string(),
                    table_entry.text().to_string(),
                )
            })
        };
        {
            let submit = submit.clone();
            self.save_btn.connect_clicked(move |_| (submit)());
        }
        {
            let submit = submit.clone();
            self.token_entry.connect_activate(move |_| (submit)());
        }
        {
            let submit = submit.clone();
            self.base_entry.connect_activate(move |_| (submit)());
        }
        self.table_entry.connect_activate(move |_| (submit)());
    }

    pub fn fill(&self, config: &Config) {
        self.token_entry.set_text(&config.token);
        self.base_entry.set_text(&config.base_id);
        self.table_entry.set_text(&config.table_name);
    }

    pub fn show_validation(&self, err: Option<&ValidationError>) {
        match err {
            Some(e) => {
                self.status.set_label(&e.to_string());
                self.status.set_visible(true);
            }
            None => self.status.set_visible(false),
        }
    }
}
