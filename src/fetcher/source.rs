use async_trait::async_trait;
use url::Url;

use crate::fetcher::{client, errors::FetchError};

/// Where documentation pages come from. The provider only needs the decoded
/// body; status failures surface as [`FetchError::Http`].
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP with the shared client.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpPageSource;

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let page = client::fetch(url).await?;
        Ok(page.body)
    }
}
