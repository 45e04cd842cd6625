use crate::api::models::{ContactRecord, NewContact};
use crate::api::records::RecordStore;
use crate::error::{RequestError, ValidationError};
use crate::utils::non_empty_trimmed;

/// One round trip against the remote table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadContacts,
    CreateContact(NewContact),
    DeleteContact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded(Vec<ContactRecord>),
    Created,
    Deleted(String),
}

impl NewContact {
    /// Full name is required; email and phone may be left blank.
    pub fn from_input(full_name: &str, email: &str, phone: &str) -> Result<Self, ValidationError> {
        let full_name = non_empty_trimmed(full_name).ok_or(ValidationError::MissingContactName)?;
        Ok(NewContact {
            full_name,
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        })
    }
}

pub async fn execute(store: &dyn RecordStore, command: Command) -> Result<Outcome, RequestError> {
    match command {
        Command::LoadContacts => {
            let records = store.list_contacts().await?;
            log::debug!("Loaded {} contacts", records.len());
            Ok(Outcome::Loaded(records))
        }
        Command::CreateContact(contact) => {
            store.create_contact(&contact).await?;
            Ok(Outcome::Created)
        }
        Command::DeleteContact(id) => {
            store.delete_contact(&id).await?;
            Ok(Outcome::Deleted(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_requires_a_name() {
        assert_eq!(NewContact::from_input("  ", "a@x.com", ""), Err(ValidationError::MissingContactName));
        let c = NewContact::from_input(" Ana ", " a@x.com", "").unwrap();
        assert_eq!(c.full_name, "Ana");
        assert_eq!(c.email, "a@x.com");
        assert_eq!(c.phone, "");
    }
}
