//! chucknorris.io random joke client.

use serde::Deserialize;
use std::time::Duration;

const JOKE_URL: &str = "https://api.chucknorris.io/jokes/random";

#[derive(Deserialize)]
struct JokeResponse {
    value: String,
}

pub struct JokeClient {
    http: reqwest::Client,
}

impl JokeClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    /// Fetch one random joke, relayed verbatim.
    pub async fn random(&self) -> Result<String, Error> {
        let response = self
            .http
            .get(JOKE_URL)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("joke lookup: {}", response.status())));
        }

        let parsed: JokeResponse = response.json().await.map_err(|e| Error::Parse(e.to_string()))?;
        Ok(parsed.value)
    }
}

impl Default for JokeClient {
    fn default() -> Self {
        Self::new()
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
    fn test_joke_response_shape() {
        let body = r#"{"categories":[],"id":"abc","value":"Chuck Norris counted to infinity. Twice."}"#;
        let parsed: JokeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.value, "Chuck Norris counted to infinity. Twice.");
    }
}
