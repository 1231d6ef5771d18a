//! Remote collection client.
//!
//! The store keeps one named collection of user documents and exposes the
//! four operations the application needs: create, read-all, update-by-id
//! and delete-by-id. [`UserStore`] is the seam the application state is
//! built against; [`HttpUserStore`] is the production implementation
//! speaking a document-store REST dialect over blocking HTTP.

pub mod config;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Context, Result, simple_error};
pub use config::StoreConfig;

/// The mutable fields of a user document, as they cross the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub profession: String,
}

/// One document from the collection. `id` and `created_at` are assigned at
/// creation and never change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub fields: UserFields,
    pub created_at: Option<DateTime<Utc>>,
}

/// The remote collection operations the two screens depend on.
///
/// Implementations do not retry and impose no timeout; a request that
/// fails surfaces its transport or server error to the caller unchanged.
pub trait UserStore {
    /// Insert a new document and return the identifier the store assigned.
    fn create(&self, fields: &UserFields) -> Result<String>;
    /// Fetch every document in the collection, in unspecified order.
    fn list_all(&self) -> Result<Vec<UserRecord>>;
    /// Replace the mutable fields of the document with the given id.
    fn update(&self, id: &str, fields: &UserFields) -> Result<()>;
    /// Remove the document with the given id.
    fn delete(&self, id: &str) -> Result<()>;
}

impl<T: UserStore + ?Sized> UserStore for std::rc::Rc<T> {
    fn create(&self, fields: &UserFields) -> Result<String> {
        (**self).create(fields)
    }
    fn list_all(&self) -> Result<Vec<UserRecord>> {
        (**self).list_all()
    }
    fn update(&self, id: &str, fields: &UserFields) -> Result<()> {
        (**self).update(id, fields)
    }
    fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewDocument<'a> {
    #[serde(flatten)]
    fields: &'a UserFields,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentDto {
    id: String,
    #[serde(flatten)]
    fields: UserFields,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<DocumentDto>,
}

impl From<DocumentDto> for UserRecord {
    fn from(doc: DocumentDto) -> Self {
        Self {
            id: doc.id,
            fields: doc.fields,
            created_at: doc.created_at,
        }
    }
}

/// Blocking HTTP client for the document store.
pub struct HttpUserStore {
    client: reqwest::blocking::Client,
    config: StoreConfig,
}

impl HttpUserStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.collection
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.documents_url(), id)
    }

    fn authorize(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        match &self.config.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

impl UserStore for HttpUserStore {
    fn create(&self, fields: &UserFields) -> Result<String> {
        let payload = NewDocument {
            fields,
            created_at: Utc::now(),
        };
        let resp = self
            .authorize(self.client.post(self.documents_url()))
            .json(&payload)
            .send()
            .with_ctx(|| format!("create document in '{}'", self.config.collection))?;
        let resp = check_status(resp)?;
        let created: CreatedResponse = resp
            .json()
            .with_ctx(|| "decode create response".to_string())?;
        Ok(created.id)
    }

    fn list_all(&self) -> Result<Vec<UserRecord>> {
        let resp = self
            .authorize(self.client.get(self.documents_url()))
            .send()
            .with_ctx(|| format!("list documents in '{}'", self.config.collection))?;
        let resp = check_status(resp)?;
        let list: ListResponse = resp
            .json()
            .with_ctx(|| "decode document list".to_string())?;
        Ok(list.documents.into_iter().map(UserRecord::from).collect())
    }

    fn update(&self, id: &str, fields: &UserFields) -> Result<()> {
        let resp = self
            .authorize(self.client.patch(self.document_url(id)))
            .json(fields)
            .send()
            .with_ctx(|| format!("update document '{id}'"))?;
        check_status(resp)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let resp = self
            .authorize(self.client.delete(self.document_url(id)))
            .send()
            .with_ctx(|| format!("delete document '{id}'"))?;
        check_status(resp)?;
        Ok(())
    }
}

/// Turn a non-2xx response into an error carrying the status and whatever
/// message body the server sent along.
fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        Err(simple_error(format!("server returned {status}")))
    } else {
        Err(simple_error(format!("server returned {status}: {body}")))
    }
}
