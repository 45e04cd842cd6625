use async_trait::async_trait;
use contacts_gtk::api::models::{ContactFields, ContactRecord, NewContact};
use contacts_gtk::api::records::RecordStore;
use contacts_gtk::app::{Connector, Controller, Dispatched};
use contacts_gtk::config::{Config, MemorySessionStore, SessionStore};
use contacts_gtk::error::RequestError;
use contacts_gtk::state::Action;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory table that counts every call and can be told to fail.
#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<ContactRecord>>,
    next_id: AtomicUsize,
    failure: Mutex<Option<RequestError>>,
    pub lists: AtomicUsize,
    pub creates: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FakeStore {
    pub fn with_rows(rows: Vec<ContactRecord>) -> Arc<Self> {
        let store = Self::default();
        *store.rows.lock().unwrap() = rows;
        Arc::new(store)
    }

    pub fn fail_with(&self, err: RequestError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn rows(&self) -> Vec<ContactRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.lists.load(Ordering::SeqCst),
            self.creates.load(Ordering::SeqCst),
            self.deletes.load(Ordering::SeqCst),
        )
    }

    fn check(&self) -> Result<(), RequestError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn contact(id: &str, name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> ContactRecord {
    ContactRecord {
        id: id.to_string(),
        fields: ContactFields {
            full_name: name.map(str::to_string),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
        },
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, RequestError> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.rows())
    }

    async fn create_contact(&self, new: &NewContact) -> Result<(), RequestError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let id = format!("recNew{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let blank = |s: &str| if s.is_empty() { None } else { Some(s.to_string()) };
        self.rows.lock().unwrap().push(ContactRecord {
            id,
            fields: ContactFields {
                full_name: blank(&new.full_name),
                email: blank(&new.email),
                phone: blank(&new.phone),
            },
        });
        Ok(())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), RequestError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

pub fn connector(store: Arc<FakeStore>) -> Connector {
    Box::new(move |_config: &Config| Ok(store.clone() as Arc<dyn RecordStore>))
}

pub fn controller(store: Arc<FakeStore>, session: Box<dyn SessionStore>) -> Controller {
    Controller::new(session, connector(store))
}

pub fn empty_session() -> Box<dyn SessionStore> {
    Box::new(MemorySessionStore::new())
}

/// Runs every task a dispatch produced, feeding results back until nothing is left.
/// Returns whether any step asked for the contact form to be cleared.
pub async fn settle(controller: &mut Controller, first: Dispatched) -> bool {
    let mut cleared = first.clear_contact_form;
    let mut tasks: Vec<_> = first.tasks;
    while let Some(task) = tasks.pop() {
        let action: Action = task.run().await;
        let next = controller.dispatch(action);
        cleared |= next.clear_contact_form;
        tasks.extend(next.tasks);
    }
    cleared
}
