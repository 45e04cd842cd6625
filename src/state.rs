//! Application state and the pure transitions between its states.
//!
//! Handlers never touch the network or the session store. `reduce` returns the next state plus the
//! [`Effect`]s the caller must carry out, and results come back in as [`Action::CommandFinished`].

use crate::api::models::NewContact;
use crate::config::Config;
use crate::confirm::{ConfirmSlot, DELETE_CONTACT_PROMPT, PendingAction};
use crate::contacts::{Command, Outcome};
use crate::error::{RequestError, ValidationError};
use crate::render::{ContactCard, render_cards};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Configuration,
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPanel {
    Generic(String),
    /// The message looks like a wrong table, base or token scope.
    ConfigurationGuidance(String),
}

const GUIDANCE_MARKERS: [&str; 2] = ["invalid permissions", "not found"];

impl ErrorPanel {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if GUIDANCE_MARKERS.iter().any(|m| lower.contains(m)) {
            ErrorPanel::ConfigurationGuidance(message.to_string())
        } else {
            ErrorPanel::Generic(message.to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorPanel::Generic(m) | ErrorPanel::ConfigurationGuidance(m) => m,
        }
    }

    pub fn offers_reset(&self) -> bool {
        matches!(self, ErrorPanel::ConfigurationGuidance(_))
    }
}

/// Exactly one of these is on screen in the application view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Idle,
    Loading,
    Error(ErrorPanel),
    Empty,
    Populated(Vec<ContactCard>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub view: View,
    pub display: Display,
    pub config: Option<Config>,
    pub validation: Option<ValidationError>,
    pub confirmation: ConfirmSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SessionRestored(Option<Config>),
    ConfigSubmitted { token: String, base_id: String, table_name: String },
    ConfigReset,
    ContactSubmitted { full_name: String, email: String, phone: String },
    DeleteRequested(String),
    ConfirmCancelled,
    ConfirmAccepted,
    CommandFinished(Result<Outcome, RequestError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistConfig(Config),
    ClearConfig,
    ClearContactForm,
    Execute(Command),
}

fn enter_application(mut state: AppState, config: Config) -> AppState {
    state.config = Some(config);
    state.view = View::Application;
    state.validation = None;
    state
}

fn reload(mut state: AppState, mut effects: Vec<Effect>) -> (AppState, Vec<Effect>) {
    state.display = Display::Loading;
    effects.push(Effect::Execute(Command::LoadContacts));
    (state, effects)
}

pub fn reduce(mut state: AppState, action: Action) -> (AppState, Vec<Effect>) {
    match action {
        Action::SessionRestored(Some(config)) => {
            log::info!("Restored session for base {}", config.base_id);
            reload(enter_application(state, config), Vec::new())
        }
        Action::SessionRestored(None) => {
            state.view = View::Configuration;
            (state, Vec::new())
        }
        Action::ConfigSubmitted { token, base_id, table_name } => {
            match Config::from_input(&token, &base_id, &table_name) {
                Ok(config) => {
                    let persist = Effect::PersistConfig(config.clone());
                    reload(enter_application(state, config), vec![persist])
                }
                Err(e) => {
                    state.validation = Some(e);
                    (state, Vec::new())
                }
            }
        }
        Action::ConfigReset => {
            (AppState::default(), vec![Effect::ClearConfig])
        }
        Action::ContactSubmitted { full_name, email, phone } => {
            match NewContact::from_input(&full_name, &email, &phone) {
                Ok(contact) => {
                    state.validation = None;
                    (state, vec![Effect::Execute(Command::CreateContact(contact))])
                }
                Err(e) => {
                    state.validation = Some(e);
                    (state, Vec::new())
                }
            }
        }
        Action::DeleteRequested(id) => {
            state.confirmation.show(DELETE_CONTACT_PROMPT, PendingAction::DeleteContact(id));
            (state, Vec::new())
        }
        Action::ConfirmCancelled => {
            state.confirmation.cancel();
            (state, Vec::new())
        }
        Action::ConfirmAccepted => match state.confirmation.confirm() {
            Some(PendingAction::DeleteContact(id)) => {
                (state, vec![Effect::Execute(Command::DeleteContact(id))])
            }
            None => (state, Vec::new()),
        },
        Action::CommandFinished(Ok(Outcome::Loaded(records))) => {
            state.display = if records.is_empty() {
                Display::Empty
            } else {
                Display::Populated(render_cards(&records))
            };
            (state, Vec::new())
        }
        Action::CommandFinished(Ok(Outcome::Created)) => reload(state, vec![Effect::ClearContactForm]),
        Action::CommandFinished(Ok(Outcome::Deleted(_))) => reload(state, Vec::new()),
        Action::CommandFinished(Err(e)) => {
            state.display = Display::Error(ErrorPanel::classify(&e.message));
            (state, Vec::new())
        }
    }
}
