use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// GitHub's maximum page size for list endpoints.
pub const PER_PAGE: u32 = 100;

/// Walks a GitHub list endpoint by following the `rel="next"` URL of each
/// response's `Link` header.
pub struct Paginator<'a> {
    client: &'a Client,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// `what` names the listing in errors, e.g. "issues of acme/api".
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        base_url: &str,
        what: &str,
    ) -> Result<Vec<T>> {
        let separator = if base_url.contains('?') { "&" } else { "?" };
        let mut next = Some(format!("{}{}per_page={}&page=1", base_url, separator, PER_PAGE));
        let mut all_items = Vec::new();
        let mut pages = 0;

        while let Some(url) = next.take() {
            pages += 1;
            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::GitHubApi(format!(
                    "Failed to list {} (page {}): {} - {}",
                    what, pages, status, body
                )));
            }

            next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .and_then(next_link);

            let items: Vec<T> = response.json().await?;
            all_items.extend(items);
        }

        tracing::debug!("Listed {} {} in {} pages", all_items.len(), what, pages);
        Ok(all_items)
    }
}

/// Extracts the `rel="next"` target from a `Link` header value.
fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == "rel=\"next\"") {
            return None;
        }
        let target = target.trim();
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
