use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ValidationError;
use crate::export::CARD_TEMPLATE;
use crate::render::ContactCard;
use crate::state::{Display, ErrorPanel};

const GUIDANCE_ITEMS: [&str; 3] = [
    "Table name: is it spelled exactly as in Airtable? Names are case-sensitive.",
    "Token permissions: can the token reach this base with the data.records:read and data.records:write scopes?",
    "IDs: is the Base ID correct?",
];

/// Add-contact form above a stack with one page per display state.
pub struct ContactsView {
    root: gtk::Box,
    name_entry: gtk::Entry,
    email_entry: gtk::Entry,
    phone_entry: gtk::Entry,
    add_btn: gtk::Button,
    form_status: gtk::Label,
    pages: gtk::Stack,
    spinner: gtk::Spinner,
    error_page: adw::StatusPage,
    guidance: gtk::Box,
    reset_btn: gtk::Button,
    flow: gtk::FlowBox,
    shown: RefCell<Option<Display>>,
}

impl ContactsView {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.set_margin_top(12);
        root.set_margin_bottom(12);
        root.set_margin_start(12);
        root.set_margin_end(12);

        let heading = gtk::Label::new(Some("Add contact"));
        heading.add_css_class("heading");
        heading.set_halign(gtk::Align::Start);
        root.append(&heading);

        let form = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let name_entry = gtk::Entry::new();
        name_entry.set_placeholder_text(Some("Full name"));
        name_entry.set_hexpand(true);
        let email_entry = gtk::Entry::new();
        email_entry.set_placeholder_text(Some("Email"));
        email_entry.set_input_purpose(gtk::InputPurpose::Email);
        email_entry.set_hexpand(true);
        let phone_entry = gtk::Entry::new();
        phone_entry.set_placeholder_text(Some("Phone"));
        phone_entry.set_input_purpose(gtk::InputPurpose::Phone);
        phone_entry.set_hexpand(true);
        let add_btn = gtk::Button::with_label("Add");
        add_btn.add_css_class("suggested-action");
        form.append(&name_entry);
        form.append(&email_entry);
        form.append(&phone_entry);
        form.append(&add_btn);
        root.append(&form);

        let form_status = gtk::Label::new(None);
        form_status.add_css_class("error");
        form_status.set_halign(gtk::Align::Start);
        form_status.set_visible(false);
        root.append(&form_status);

        let pages = gtk::Stack::new();
        pages.set_vexpand(true);

        pages.add_named(&gtk::Box::new(gtk::Orientation::Vertical, 0), Some("idle"));

        let spinner = gtk::Spinner::new();
        spinner.set_size_request(32, 32);
        spinner.set_halign(gtk::Align::Center);
        spinner.set_valign(gtk::Align::Center);
        pages.add_named(&spinner, Some("loading"));

        let guidance = gtk::Box::new(gtk::Orientation::Vertical, 6);
        guidance.add_css_class("guidance-list");
        let intro = gtk::Label::new(Some("Could not connect to your base. Check the following:"));
        intro.set_wrap(true);
        intro.set_xalign(0.0);
        guidance.append(&intro);
        for item in GUIDANCE_ITEMS {
            let lbl = gtk::Label::new(Some(&format!("• {}", item)));
            lbl.set_wrap(true);
            lbl.set_xalign(0.0);
            guidance.append(&lbl);
        }
        let reset_btn = gtk::Button::with_label("Change configuration");
        reset_btn.add_css_class("suggested-action");
        reset_btn.set_halign(gtk::Align::Center);
        reset_btn.set_margin_top(12);
        guidance.append(&reset_btn);

        let error_page = adw::StatusPage::builder()
            .icon_name("dialog-error-symbolic")
            .build();
        error_page.set_child(Some(&guidance));
        pages.add_named(&error_page, Some("error"));

        let empty_page = adw::StatusPage::builder()
            .icon_name("avatar-default-symbolic")
            .title("No contacts yet")
            .description("Add your first contact with the form above.")
            .build();
        pages.add_named(&empty_page, Some("empty"));

        let flow = gtk::FlowBox::new();
        flow.set_selection_mode(gtk::SelectionMode::None);
        flow.set_valign(gtk::Align::Start);
        flow.set_max_children_per_line(3);
        flow.set_column_spacing(12);
        flow.set_row_spacing(12);
        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        scroller.set_child(Some(&flow));
        pages.add_named(&scroller, Some("list"));

        root.append(&pages);

        Self {
            root,
            name_entry,
            email_entry,
            phone_entry,
            add_btn,
            form_status,
            pages,
            spinner,
            error_page,
            guidance,
            reset_btn,
            flow,
            shown: RefCell::new(None),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    /// Calls `on_add(full_name, email, phone)` on the button or Enter in any field.
    pub fn connect_add<F: Fn(String, String, String) + 'static>(&self, on_add: F) {
        let add: Rc<dyn Fn()> = {
            let name_entry = self.name_entry.clone();
            let email_entry = self.email_entry.clone();
            let phone_entry = self.phone_entry.clone();
            Rc::new(move || {
                on_add(
                    name_entry.text().to_string(),
                    email_entry.text().to_string(),
                    phone_entry.text().to_string(),
                )
            })
        };
        for entry in [&self.name_entry, &self.email_entry, &self.phone_entry] {
            let add = add.clone();
            entry.connect_activate(move |_| (add)());
        }
        self.add_btn.connect_clicked(move |_| (add)());
    }

    pub fn connect_reset<F: Fn() + 'static>(&self, on_reset: F) {
        self.reset_btn.connect_clicked(move |_| on_reset());
    }

    pub fn clear_form(&self) {
        self.name_entry.set_text("");
        self.email_entry.set_text("");
        self.phone_entry.set_text("");
    }

    pub fn show_validation(&self, err: Option<&ValidationError>) {
        match err {
            Some(e) => {
                self.form_status.set_label(&e.to_string());
                self.form_status.set_visible(true);
            }
            None => self.form_status.set_visible(false),
        }
    }

    /// Switches to the page for `display`. Cards are rebuilt only when the display changed.
    pub fn show(&self, display: &Display, on_delete: Rc<dyn Fn(String)>) {
        if self.shown.borrow().as_ref() == Some(display) {
            return;
        }
        self.spinner.stop();
        match display {
            Display::Idle => self.pages.set_visible_child_name("idle"),
            Display::Loading => {
                self.spinner.start();
                self.pages.set_visible_child_name("loading");
            }
            Display::Error(panel) => {
                self.show_error(panel);
                self.pages.set_visible_child_name("error");
            }
            Display::Empty => self.pages.set_visible_child_name("empty"),
            Display::Populated(cards) => {
                self.set_cards(cards, &on_delete);
                self.pages.set_visible_child_name("list");
            }
        }
        *self.shown.borrow_mut() = Some(display.clone());
    }

    fn show_error(&self, panel: &ErrorPanel) {
        let title = match panel {
            ErrorPanel::Generic(_) => "An unexpected error occurred",
            ErrorPanel::ConfigurationGuidance(_) => "Configuration or permission error",
        };
        self.error_page.set_title(title);
        self.error_page.set_description(Some(panel.message()));
        self.guidance.set_visible(panel.offers_reset());
    }

    fn set_cards(&self, cards: &[ContactCard], on_delete: &Rc<dyn Fn(String)>) {
        while let Some(child) = self.flow.first_child() {
            self.flow.remove(&child);
        }
        for card in cards {
            match build_card(card, on_delete) {
                Some(widget) => self.flow.insert(&widget, -1),
                None => log::error!("Card template is missing an expected object"),
            }
        }
    }
}

fn build_card(card: &ContactCard, on_delete: &Rc<dyn Fn(String)>) -> Option<gtk::Widget> {
    let builder = gtk::Builder::from_string(CARD_TEMPLATE);
    let root: gtk::Box = builder.object("card")?;
    builder.object::<gtk::Label>("name_label")?.set_label(&card.name);
    builder.object::<gtk::Label>("email_label")?.set_label(&card.email);
    builder.object::<gtk::Label>("phone_label")?.set_label(&card.phone);

    let delete_btn: gtk::Button = builder.object("delete_button")?;
    let id = card.id.clone();
    let on_delete = on_delete.clone();
    delete_btn.connect_clicked(move |_| on_delete(id.clone()));
    Some(root.upcast())
}
