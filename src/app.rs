use crate::api::records::{AirtableTable, RecordStore};
use crate::config::{Config, SessionStore};
use crate::contacts::{self, Command};
use crate::error::RequestError;
use crate::state::{Action, AppState, Effect, reduce};
use std::collections::VecDeque;
use std::sync::Arc;

/// Opens the record store for a configuration. Swapped for a fake in tests.
pub type Connector = Box<dyn Fn(&Config) -> Result<Arc<dyn RecordStore>, RequestError>>;

pub fn airtable_connector() -> Connector {
    Box::new(|config: &Config| {
        let table = AirtableTable::new(config)?;
        log::debug!("Connected to {}", table.endpoint());
        Ok(Arc::new(table) as Arc<dyn RecordStore>)
    })
}

/// A command bound to the store it runs against. Owned and `Send`, so it can cross onto the runtime.
pub struct Task {
    store: Arc<dyn RecordStore>,
    command: Command,
}

impl Task {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub async fn run(self) -> Action {
        Action::CommandFinished(contacts::execute(self.store.as_ref(), self.command).await)
    }
}

/// What the shell has to do after a dispatch.
#[derive(Default)]
pub struct Dispatched {
    pub tasks: Vec<Task>,
    pub clear_contact_form: bool,
    pub notices: Vec<String>,
}

pub struct Controller {
    state: AppState,
    session: Box<dyn SessionStore>,
    connect: Connector,
    store: Option<(Config, Arc<dyn RecordStore>)>,
}

impl Controller {
    pub fn new(session: Box<dyn SessionStore>, connect: Connector) -> Self {
        Self { state: AppState::default(), session, connect, store: None }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Restores a saved configuration, if any, and kicks off the first load.
    pub fn start(&mut self) -> Dispatched {
        let restored = self.session.load();
        self.dispatch(Action::SessionRestored(restored))
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatched {
        let mut out = Dispatched::default();
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            let (next, effects) = reduce(std::mem::take(&mut self.state), action);
            self.state = next;
            for effect in effects {
                match effect {
                    Effect::PersistConfig(config) => {
                        if let Err(e) = self.session.save(&config) {
                            log::warn!("Failed to save session: {}", e);
                            out.notices.push(format!("Failed to save settings: {}", e));
                        }
                    }
                    Effect::ClearConfig => {
                        self.store = None;
                        if let Err(e) = self.session.clear() {
                            log::warn!("Failed to clear session: {}", e);
                            out.notices.push(format!("Failed to clear settings: {}", e));
                        }
                    }
                    Effect::ClearContactForm => out.clear_contact_form = true,
                    Effect::Execute(command) => match self.task(command) {
                        Ok(task) => out.tasks.push(task),
                        Err(e) => queue.push_back(Action::CommandFinished(Err(e))),
                    },
                }
            }
        }
        out
    }

    fn task(&mut self, command: Command) -> Result<Task, RequestError> {
        let config = self
            .state
            .config
            .clone()
            .ok_or_else(|| RequestError::new(None, "No configuration has been saved"))?;
        let store = match &self.store {
            Some((current, store)) if *current == config => store.clone(),
            _ => {
                let store = (self.connect)(&config)?;
                self.store = Some((config, store.clone()));
                store
            }
        };
        Ok(Task { store, command })
    }
}
