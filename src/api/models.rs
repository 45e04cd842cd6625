use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Column names the remote table must contain verbatim.
pub const FULL_NAME_COLUMN: &str = "Nome Completo";
pub const EMAIL_COLUMN: &str = "E-mail";
pub const PHONE_COLUMN: &str = "Telefone";

/// Body of a list-records response. `offset` is present when more pages exist; it is not followed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListRecordsResponse {
    #[serde(default)]
    pub records: Vec<RawRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// A row exactly as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: String,
    pub fields: ContactFields,
}

/// Form input for a new row. Blank email or phone is sent as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

fn text_field(fields: &Map<String, Value>, column: &str) -> Option<String> {
    match fields.get(column)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl From<RawRecord> for ContactRecord {
    fn from(raw: RawRecord) -> Self {
        let fields = ContactFields {
            full_name: text_field(&raw.fields, FULL_NAME_COLUMN),
            email: text_field(&raw.fields, EMAIL_COLUMN),
            phone: text_field(&raw.fields, PHONE_COLUMN),
        };
        ContactRecord { id: raw.id, fields }
    }
}

impl NewContact {
    pub fn create_body(&self) -> Value {
        serde_json::json!({
            "fields": {
                FULL_NAME_COLUMN: self.full_name,
                EMAIL_COLUMN: self.email,
                PHONE_COLUMN: self.phone,
            }
        })
    }
}
