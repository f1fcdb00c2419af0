//! Record operations over the `contacts` table.

use reqwest::Method;
use uuid::Uuid;

use touchbase_shared::{Contact, ContactChange, NewContact};

use crate::error::{service_error, ApiError, ApiResult};
use crate::Supabase;

const CONTACTS_PATH: &str = "/rest/v1/contacts";

impl Supabase {
    /// Fetch every contact, oldest last-contact date first. Ordering
    /// is done by the service so the UI renders rows as returned.
    #[tracing::instrument(skip(self))]
    pub async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        let response = self
            .request(Method::GET, CONTACTS_PATH)
            .query(&[("select", "*"), ("order", "last_contact_date.asc")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        let contacts: Vec<Contact> = response.json().await?;
        tracing::debug!(count = contacts.len(), "fetched contacts");
        Ok(contacts)
    }

    /// Insert one contact and return the stored row.
    #[tracing::instrument(skip(self, contact), fields(name = %contact.name))]
    pub async fn insert_contact(&self, contact: &NewContact) -> ApiResult<Contact> {
        let response = self
            .request(Method::POST, CONTACTS_PATH)
            .header("Prefer", "return=representation")
            .json(contact)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        single_row(response.json().await?)
    }

    /// Update name, date and image URL of one contact by id.
    #[tracing::instrument(skip(self, change))]
    pub async fn update_contact_row(
        &self,
        id: Uuid,
        change: &ContactChange,
    ) -> ApiResult<Contact> {
        let response = self
            .request(Method::PATCH, CONTACTS_PATH)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(change)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        single_row(response.json().await?)
    }

    /// Delete one contact by id.
    #[tracing::instrument(skip(self))]
    pub async fn delete_contact(&self, id: Uuid) -> ApiResult<()> {
        let response = self
            .request(Method::DELETE, CONTACTS_PATH)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        Ok(())
    }
}

/// PostgREST returns an array even when exactly one row was written.
fn single_row(mut rows: Vec<Contact>) -> ApiResult<Contact> {
    match rows.pop() {
        Some(contact) if rows.is_empty() => Ok(contact),
        Some(_) => Err(ApiError::Decode("expected exactly one row".to_string())),
        None => Err(ApiError::Decode("empty result set".to_string())),
    }
}
