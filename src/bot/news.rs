//! NewsAPI top-headlines client.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

const HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// How many headlines to request and relay.
pub const PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
}

#[derive(Deserialize)]
struct HeadlinesResponse {
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
struct RawArticle {
    title: String,
    url: String,
}

pub struct NewsClient {
    api_key: String,
    http: reqwest::Client,
}

impl NewsClient {
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, http }
    }

    /// Fetch up to [`PAGE_SIZE`] most recent headlines for a country, in
    /// provider order.
    pub async fn top_headlines(&self, country: &str) -> Result<Vec<NewsItem>, Error> {
        info!("Requesting top headlines (country: {country})");

        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(HEADLINES_URL)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("country", country),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let parsed: HeadlinesResponse =
            response.json().await.map_err(|e| Error::Parse(e.to_string()))?;

        Ok(parsed
            .articles
            .into_iter()
            .map(|a| NewsItem { title: a.title, url: a.url })
            .collect())
    }
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Api(String),
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_response_shape() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "First", "url": "https://example.com/1", "author": "a"},
                {"title": "Second", "url": "https://example.com/2", "author": null}
            ]
        }"#;
        let parsed: HeadlinesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(parsed.articles[0].title, "First");
        assert_eq!(parsed.articles[1].url, "https://example.com/2");
    }

    #[test]
    fn test_zero_articles() {
        let parsed: HeadlinesResponse =
            serde_json::from_str(r#"{"status":"ok","totalResults":0,"articles":[]}"#).unwrap();
        assert!(parsed.articles.is_empty());
    }
}
