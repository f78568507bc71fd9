use reqwest::StatusCode;

use crate::dto::products::FeedRecord;
use crate::error::{AppError, AppResult};

/// Read-only client for the external product feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full product feed. An empty body or empty array is a
    /// successful no-op; any transport or decode failure is an upstream
    /// error.
    pub async fn fetch_products(&self) -> AppResult<Vec<FeedRecord>> {
        let url = format!("{}/products", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::Upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "feed returned status {status} for {url}"
            )));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| AppError::Upstream(err.to_string()))?;
        if body.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&body)
            .map_err(|err| AppError::Upstream(format!("malformed feed payload: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_array_decodes() {
        let raw = r#"[
            { "id": 1, "title": "A", "price": 1.50 },
            { "id": 2, "title": "B", "price": 2.00, "category": "tools" }
        ]"#;
        let records: Vec<FeedRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].product.category.as_deref(), Some("tools"));
    }

    #[test]
    fn empty_feed_array_is_ok() {
        let records: Vec<FeedRecord> = serde_json::from_str("[]").unwrap();
        assert!(records.is_empty());
    }
}
