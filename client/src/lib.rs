//! Client for the hosted Supabase project backing the contacts UI.
//!
//! Wraps the PostgREST surface over the `contacts` table and the
//! storage bucket holding avatar images. Builds for both wasm32 (the
//! browser app) and native targets (the test suite).

use chrono::{NaiveDate, Utc};
use reqwest::Method;
use uuid::Uuid;

use touchbase_shared::{Contact, ContactChange, NewContact};

pub mod contacts;
pub mod error;
pub mod storage;

pub use error::{ApiError, ApiResult};

/// Handle to one Supabase project. Cheap to clone; holds no session
/// state beyond the project URL and the public anon key.
#[derive(Debug, Clone)]
pub struct Supabase {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Avatar bytes read from the picked file, with their MIME type.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Supabase {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            anon_key: anon_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request builder with the project auth headers applied.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Upload the avatar, derive its public URL and insert the contact
    /// record. A failed insert removes the just-uploaded object again
    /// so it does not linger unreferenced.
    #[tracing::instrument(skip(self, avatar))]
    pub async fn create_contact(
        &self,
        name: &str,
        last_contact_date: NaiveDate,
        avatar: AvatarUpload,
    ) -> ApiResult<Contact> {
        let path = avatar_object_path(Utc::now().timestamp_millis());
        let stored = self
            .upload_avatar(&path, avatar.bytes, &avatar.content_type)
            .await?;
        let new_contact = NewContact {
            name: name.to_string(),
            image_url: self.public_avatar_url(&stored),
            last_contact_date,
        };
        match self.insert_contact(&new_contact).await {
            Ok(contact) => Ok(contact),
            Err(err) => {
                self.discard_upload(&stored).await;
                Err(err)
            }
        }
    }

    /// Update a contact, optionally replacing its avatar first. On a
    /// failed record write the replacement upload is removed again;
    /// the previously stored object is never touched.
    #[tracing::instrument(skip(self, current_image_url, replacement))]
    pub async fn update_contact(
        &self,
        id: Uuid,
        name: &str,
        last_contact_date: NaiveDate,
        current_image_url: &str,
        replacement: Option<AvatarUpload>,
    ) -> ApiResult<Contact> {
        let (image_url, uploaded) = match replacement {
            Some(avatar) => {
                let path = avatar_object_path(Utc::now().timestamp_millis());
                let stored = self
                    .upload_avatar(&path, avatar.bytes, &avatar.content_type)
                    .await?;
                (self.public_avatar_url(&stored), Some(stored))
            }
            None => (current_image_url.to_string(), None),
        };
        let change = ContactChange {
            name: name.to_string(),
            image_url,
            last_contact_date,
        };
        match self.update_contact_row(id, &change).await {
            Ok(contact) => Ok(contact),
            Err(err) => {
                if let Some(path) = uploaded {
                    self.discard_upload(&path).await;
                }
                Err(err)
            }
        }
    }

    /// Best-effort removal of an upload whose record write failed. The
    /// original write error is what the caller sees.
    async fn discard_upload(&self, path: &str) {
        if let Err(err) = self.remove_avatar(path).await {
            tracing::warn!(path, error = %err, "could not remove orphaned avatar");
        }
    }
}

/// Object paths are keyed by upload time, matching the layout the
/// bucket was seeded with.
fn avatar_object_path(millis: i64) -> String {
    format!("public/{millis}")
}

#[cfg(test)]
mod tests;
