//! OpenAI client for text completions and image generation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";
const IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";

const COMPLETION_MODEL: &str = "text-davinci-002";
const IMAGE_MODEL: &str = "image-alpha-001";

pub struct OpenAiClient {
    api_key: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    frequency_penalty: u32,
    presence_penalty: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    text: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    num_images: u32,
    size: &'static str,
    response_format: &'static str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, http }
    }

    /// Single-turn completion. The prompt already carries the
    /// `User: ... / Chatbot:` framing; the caller does no truncation, so a
    /// very long message can exceed the provider's token limit and come
    /// back as an API error.
    pub async fn complete(&self, prompt: &str) -> Result<String, Error> {
        let request = CompletionRequest {
            model: COMPLETION_MODEL,
            prompt,
            max_tokens: 2048,
            temperature: 0.5,
            frequency_penalty: 1,
            presence_penalty: 1,
        };

        info!(
            "Sending completion request (model: {}, prompt: {} chars)",
            COMPLETION_MODEL,
            prompt.len()
        );

        let response: CompletionResponse = self.post_json(COMPLETIONS_URL, &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(Error::Empty)
    }

    /// Generate one 512x512 image and return its retrievable URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, Error> {
        let request = ImageRequest {
            model: IMAGE_MODEL,
            prompt,
            num_images: 1,
            size: "512x512",
            response_format: "url",
        };

        info!(
            "Sending image request (model: {}, prompt: {} chars)",
            IMAGE_MODEL,
            prompt.len()
        );

        let response: ImageResponse = self.post_json(IMAGES_URL, &request).await?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or(Error::Empty)
    }

    async fn post_json<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<R, Error> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }
}

#[derive(Debug)]
pub enum Error {
    Http(String),
    Api(String),
    Parse(String),
    Empty,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Api(e) => write!(f, "API error: {e}"),
            Error::Parse(e) => write!(f, "Parse error: {e}"),
            Error::Empty => write!(f, "Empty response"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_response_shape() {
        let body = r#"{"id":"cmpl-1","choices":[{"text":"Hello there!","index":0}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].text, "Hello there!");
    }

    #[test]
    fn test_image_response_shape() {
        let body = r#"{"created":1700000000,"data":[{"url":"https://oai.example/img.png"}]}"#;
        let parsed: ImageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].url, "https://oai.example/img.png");
    }
}
