use std::future::Future;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

use crate::config::Configuration;
use crate::error::Error;
use crate::photos::PhotoRecord;
use crate::render::ResourceLoader;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The backend's read surface, as a trait so tests script responses.
pub trait PhotoBackend {
    /// Retrieve the full photo snapshot. An empty array is a valid answer
    /// meaning "no photos currently held".
    fn fetch_photos(&self) -> impl Future<Output = Result<Vec<PhotoRecord>, Error>> + Send;
}

/// Talks to the real photo backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    photos_path: String,
    upload_path: String,
}

impl HttpBackend {
    pub fn new(cfg: &Configuration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: cfg.backend_url.trim_end_matches('/').to_string(),
            photos_path: cfg.photos_path.clone(),
            upload_path: cfg.upload_path.clone(),
        })
    }

    /// Photo urls from the backend are usually relative (`/images/...`).
    fn absolute_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else {
            format!("{}{}", self.base_url, path_or_url)
        }
    }

    /// Upload one image file as the multipart field `photo`.
    ///
    /// On a non-success status the JSON body is parsed for a message,
    /// preferring `detail`, then `error`, then a generic fallback (the
    /// backend emits both shapes).
    pub async fn upload_photo(&self, file: &Path) -> Result<Value, Error> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo")
            .to_string();
        let form = Form::new().part("photo", Part::bytes(bytes).file_name(file_name));

        let url = self.absolute_url(&self.upload_path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|_| {
                Error::Transport("network error; check your connection and try again".into())
            })?;

        if !response.status().is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            return Err(Error::Transport(upload_error_message(&body)));
        }
        response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("invalid upload response: {e}")))
    }
}

/// Extract the human-readable message from an upload failure body.
pub fn upload_error_message(body: &Value) -> String {
    body.get("detail")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("Failed to upload photo")
        .to_string()
}

impl PhotoBackend for HttpBackend {
    async fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, Error> {
        let url = self.absolute_url(&self.photos_path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Transport(e.to_string()))?;
        let photos: Vec<PhotoRecord> = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("invalid photo list payload: {e}")))?;
        debug!(count = photos.len(), "photo snapshot fetched");
        Ok(photos)
    }
}

impl ResourceLoader for HttpBackend {
    /// "Loading" here means pulling the image bytes to completion, the
    /// equivalent of waiting for an image element's load event. The bytes
    /// are discarded; the kiosk chrome fetches them again from its cache.
    async fn load(&self, url: &str) -> Result<(), Error> {
        let absolute = self.absolute_url(url);
        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::ResourceLoad {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        response.bytes().await.map_err(|e| Error::ResourceLoad {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::upload_error_message;
    use serde_json::json;

    #[test]
    fn prefers_detail_over_error_over_fallback() {
        assert_eq!(
            upload_error_message(&json!({"detail": "too large", "error": "nope"})),
            "too large"
        );
        assert_eq!(upload_error_message(&json!({"error": "nope"})), "nope");
        assert_eq!(
            upload_error_message(&json!({"status": 500})),
            "Failed to upload photo"
        );
        assert_eq!(
            upload_error_message(&serde_json::Value::Null),
            "Failed to upload photo"
        );
    }
}
