use crate::api::client::{AIRTABLE_API_BASE, ApiClient, RequestOptions};
use crate::api::models::{ContactRecord, ListRecordsResponse, NewContact};
use crate::config::Config;
use crate::error::RequestError;
use async_trait::async_trait;
use url::Url;

/// Network side of the contact list. Everything that talks to the remote table goes through here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, RequestError>;
    async fn create_contact(&self, contact: &NewContact) -> Result<(), RequestError>;
    async fn delete_contact(&self, id: &str) -> Result<(), RequestError>;
}

pub struct AirtableTable {
    client: ApiClient,
    endpoint: Url,
}

impl AirtableTable {
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        Self::with_api_base(ApiClient::new(config.token.clone()), AIRTABLE_API_BASE, config)
    }

    pub fn with_api_base(client: ApiClient, api_base: &str, config: &Config) -> Result<Self, RequestError> {
        let endpoint = table_endpoint(api_base, &config.base_id, &config.table_name)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }
}

/// `<api_base>/<base_id>/<table_name>`, each identifier encoded as one path segment.
pub fn table_endpoint(api_base: &str, base_id: &str, table_name: &str) -> Result<Url, RequestError> {
    let mut url = Url::parse(api_base).map_err(|e| RequestError::new(None, format!("Invalid API address: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| RequestError::new(None, "Invalid API address"))?
        .pop_if_empty()
        .push(base_id)
        .push(table_name);
    Ok(url)
}

#[async_trait]
impl RecordStore for AirtableTable {
    async fn list_contacts(&self) -> Result<Vec<ContactRecord>, RequestError> {
        let body = self.client.request(self.endpoint.clone(), RequestOptions::get()).await?;
        let parsed = match body {
            Some(value) => serde_json::from_value::<ListRecordsResponse>(value)
                .map_err(|e| RequestError::new(None, format!("Unexpected response: {}", e)))?,
            None => ListRecordsResponse::default(),
        };
        if parsed.offset.is_some() {
            log::debug!("More records are available; only the first page is shown");
        }
        Ok(parsed.records.into_iter().map(ContactRecord::from).collect())
    }

    async fn create_contact(&self, contact: &NewContact) -> Result<(), RequestError> {
        self.client
            .request(self.endpoint.clone(), RequestOptions::post(contact.create_body()))
            .await?;
        log::info!("Created contact {}", contact.full_name);
        Ok(())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), RequestError> {
        self.client.request(self.record_url(id), RequestOptions::delete()).await?;
        log::info!("Deleted contact {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(table: &str) -> Config {
        Config::from_input("t1", "appXXX", table).unwrap()
    }

    #[test]
    fn endpoint_encodes_table_name() {
        let url = table_endpoint(AIRTABLE_API_BASE, "appXXX", "My Contacts/2024").unwrap();
        assert_eq!(url.as_str(), "https://api.airtable.com/v0/appXXX/My%20Contacts%2F2024");
    }

    #[test]
    fn endpoint_accepts_base_without_trailing_slash() {
        let url = table_endpoint("http://127.0.0.1:8080/v0", "appXXX", "Contacts").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v0/appXXX/Contacts");
    }

    #[test]
    fn record_url_appends_id() {
        let table = AirtableTable::new(&config("Contacts")).unwrap();
        assert_eq!(table.record_url("rec1").as_str(), "https://api.airtable.com/v0/appXXX/Contacts/rec1");
    }

    #[test]
    fn rejects_unparseable_api_base() {
        assert!(table_endpoint("not a url", "appXXX", "Contacts").is_err());
    }
}
