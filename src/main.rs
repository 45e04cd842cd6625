use adw::prelude::*;
use adw::Application;

fn main() -> gtk4::glib::ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app = Application::builder()
        .application_id("com.example.AirtableContactsGtk")
        .build();
    app.connect_startup(|_| contacts_gtk::ui::load_stylesheet());
    app.connect_activate(|app| {
        contacts_gtk::ui::main_window::show_main_window(app);
    });
    app.run()
}
