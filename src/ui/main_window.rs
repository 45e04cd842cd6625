use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use crate::app::{Controller, Dispatched, airtable_connector};
use crate::config::session_store;
use crate::export::{self, EmbeddedAssets};
use crate::state::{Action, View};
use crate::ui::config_view::ConfigView;
use crate::ui::contacts_view::ContactsView;
use crate::ui::dialogs;

struct Shell {
    controller: RefCell<Controller>,
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    views: gtk::Stack,
    reset_btn: gtk::Button,
    config_view: ConfigView,
    contacts_view: ContactsView,
    confirm: RefCell<Option<gtk::Dialog>>,
}

pub fn show_main_window(app: &Application) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Airtable Contacts")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();

    let config_view = ConfigView::new();
    let contacts_view = ContactsView::new();
    let views = gtk::Stack::new();
    views.set_transition_type(gtk::StackTransitionType::Crossfade);
    views.add_named(&config_view.widget(), Some("configuration"));
    views.add_named(&contacts_view.widget(), Some("application"));
    overlay.set_child(Some(&views));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Contacts"));
    header.set_title_widget(Some(&title));

    let export_btn = gtk::Button::from_icon_name("folder-download-symbolic");
    export_btn.set_tooltip_text(Some("Download the application as a ZIP archive"));
    header.pack_start(&export_btn);

    let reset_btn = gtk::Button::with_label("Change configuration");
    reset_btn.set_visible(false);
    header.pack_end(&reset_btn);

    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let shell = Rc::new(Shell {
        controller: RefCell::new(Controller::new(session_store(), airtable_connector())),
        window: window.clone(),
        overlay,
        views,
        reset_btn,
        config_view,
        contacts_view,
        confirm: RefCell::new(None),
    });

    {
        let shell_for_submit = shell.clone();
        shell.config_view.connect_submit(move |token, base_id, table_name| {
            dispatch(&shell_for_submit, Action::ConfigSubmitted { token, base_id, table_name });
        });
    }
    {
        let shell_for_add = shell.clone();
        shell.contacts_view.connect_add(move |full_name, email, phone| {
            dispatch(&shell_for_add, Action::ContactSubmitted { full_name, email, phone });
        });
    }
    {
        let shell_for_reset = shell.clone();
        shell.contacts_view.connect_reset(move || dispatch(&shell_for_reset, Action::ConfigReset));
    }
    {
        let shell_for_reset = shell.clone();
        shell.reset_btn.connect_clicked(move |_| dispatch(&shell_for_reset, Action::ConfigReset));
    }
    {
        let window = window.clone();
        let overlay = shell.overlay.clone();
        export_btn.connect_clicked(move |_| {
            let rx = crate::utils::run_async_to_main(async move {
                export::export_to(&EmbeddedAssets, &export::default_export_dir())
            });
            let window = window.clone();
            let overlay = overlay.clone();
            rx.attach(None, move |res| {
                match res {
                    Ok(path) => overlay.add_toast(adw::Toast::new(&format!("Saved {}", path.display()))),
                    Err(err) => {
                        log::error!("Export failed: {}", err);
                        dialogs::alert(&window, "Download failed", &err.to_string());
                    }
                }
                glib::ControlFlow::Continue
            });
        });
    }

    window.present();

    let started = shell.controller.borrow_mut().start();
    apply(&shell, started);
}

fn dispatch(shell: &Rc<Shell>, action: Action) {
    let dispatched = shell.controller.borrow_mut().dispatch(action);
    apply(shell, dispatched);
}

fn apply(shell: &Rc<Shell>, dispatched: Dispatched) {
    if dispatched.clear_contact_form {
        shell.contacts_view.clear_form();
    }
    for notice in &dispatched.notices {
        shell.overlay.add_toast(adw::Toast::new(notice));
    }
    sync(shell);

    for task in dispatched.tasks {
        log::debug!("Running {:?}", task.command());
        let rx = crate::utils::run_async_to_main(async move { Ok::<Action, Infallible>(task.run().await) });
        let shell = shell.clone();
        rx.attach(None, move |res| {
            if let Ok(action) = res {
                dispatch(&shell, action);
            }
            glib::ControlFlow::Continue
        });
    }
}

/// Brings every widget in line with the controller's state.
fn sync(shell: &Rc<Shell>) {
    let on_delete: Rc<dyn Fn(String)> = {
        let shell = shell.clone();
        Rc::new(move |id| dispatch(&shell, Action::DeleteRequested(id)))
    };

    let pending = {
        let controller = shell.controller.borrow();
        let state = controller.state();
        let in_app = state.view == View::Application;

        shell.views.set_visible_child_name(if in_app { "application" } else { "configuration" });
        shell.reset_btn.set_visible(in_app);
        if let Some(config) = &state.config {
            shell.config_view.fill(config);
        }
        shell.config_view.show_validation(state.validation.as_ref().filter(|_| !in_app));
        shell.contacts_view.show_validation(state.validation.as_ref().filter(|_| in_app));
        shell.contacts_view.show(&state.display, on_delete);

        state.confirmation.pending().cloned()
    };

    let dialog_open = shell.confirm.borrow().is_some();
    match pending {
        Some(confirmation) if !dialog_open => {
            let shell_for_answer = shell.clone();
            let dialog = dialogs::confirm_dialog(&shell.window, &confirmation.message, move |accepted| {
                shell_for_answer.confirm.borrow_mut().take();
                let action = if accepted { Action::ConfirmAccepted } else { Action::ConfirmCancelled };
                dispatch(&shell_for_answer, action);
            });
            *shell.confirm.borrow_mut() = Some(dialog);
        }
        None if dialog_open => {
            let stale = shell.confirm.borrow_mut().take();
            if let Some(dialog) = stale {
                dialog.close();
            }
        }
        _ => {}
    }
}
