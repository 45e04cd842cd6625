use crate::api::models::ContactRecord;

pub const NAME_PLACEHOLDER: &str = "No name";
pub const EMAIL_PLACEHOLDER: &str = "No email";
pub const PHONE_PLACEHOLDER: &str = "No phone";

/// What one card on screen shows. `id` travels with the card's delete button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&ContactRecord> for ContactCard {
    fn from(record: &ContactRecord) -> Self {
        let f = &record.fields;
        ContactCard {
            id: record.id.clone(),
            name: f.full_name.clone().unwrap_or_else(|| NAME_PLACEHOLDER.to_string()),
            email: f.email.clone().unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
            phone: f.phone.clone().unwrap_or_else(|| PHONE_PLACEHOLDER.to_string()),
        }
    }
}

pub fn render_cards(records: &[ContactRecord]) -> Vec<ContactCard> {
    records.iter().map(ContactCard::from).collect()
}
