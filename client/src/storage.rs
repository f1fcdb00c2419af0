//! Object storage operations for avatar images.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;

use crate::error::{service_error, ApiResult};
use crate::Supabase;

/// Bucket holding every uploaded avatar. Public, so derived URLs
/// resolve without signing.
pub const AVATAR_BUCKET: &str = "contact-images";

#[derive(Debug, Deserialize)]
struct UploadedObject {
    #[serde(rename = "Key")]
    key: String,
}

impl Supabase {
    /// Upload avatar bytes under `path`, returning the stored object
    /// path as reported by the service.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<String> {
        let response = self
            .request(
                Method::POST,
                &format!("/storage/v1/object/{AVATAR_BUCKET}/{path}"),
            )
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        // The "Key" in the response is prefixed with the bucket name.
        let uploaded: UploadedObject = response.json().await?;
        let stored = uploaded
            .key
            .strip_prefix(&format!("{AVATAR_BUCKET}/"))
            .unwrap_or(&uploaded.key)
            .to_string();
        tracing::debug!(path = %stored, "avatar uploaded");
        Ok(stored)
    }

    /// Public address of a stored avatar, derived locally.
    pub fn public_avatar_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{AVATAR_BUCKET}/{path}",
            self.base_url
        )
    }

    /// Remove a stored avatar object.
    #[tracing::instrument(skip(self))]
    pub async fn remove_avatar(&self, path: &str) -> ApiResult<()> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/storage/v1/object/{AVATAR_BUCKET}/{path}"),
            )
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        Ok(())
    }
}
