//! Two-step geolocation: public-IP lookup, then IP-to-location lookup.
//!
//! The IP seen by ipify is this process's network-egress address, so the
//! derived location is where the bot runs, not where the chat user is.
//! Callers treat the result as a best-effort default and fall back to the
//! statically configured country/city when the lookup fails.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const IP_URL: &str = "https://api64.ipify.org?format=json";
const GEO_URL_BASE: &str = "https://ipapi.co";

/// Approximate location derived from the egress IP. Any field past `ip`
/// may be absent when the geolocation provider has no data.
#[derive(Debug, Clone)]
pub struct Location {
    pub ip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_code: Option<String>,
}

#[derive(Deserialize)]
struct IpResponse {
    ip: String,
}

#[derive(Deserialize)]
struct GeoResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    country_code: Option<String>,
}

pub struct Geolocator {
    http: reqwest::Client,
}

impl Geolocator {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { http }
    }

    pub async fn resolve(&self) -> Result<Location, Error> {
        let ip = self.public_ip().await?;
        debug!("Egress IP: {ip}");

        let url = format!("{GEO_URL_BASE}/{ip}/json/");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("geolocation lookup: {}", response.status())));
        }

        let geo: GeoResponse = response.json().await.map_err(|e| Error::Parse(e.to_string()))?;

        Ok(Location {
            ip,
            latitude: geo.latitude,
            longitude: geo.longitude,
            country_code: geo.country_code.map(|cc| cc.to_lowercase()),
        })
    }

    async fn public_ip(&self) -> Result<String, Error> {
        let response = self
            .http
            .get(IP_URL)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("IP lookup: {}", response.status())));
        }

        let parsed: IpResponse = response.json().await.map_err(|e| Error::Parse(e.to_string()))?;
        Ok(parsed.ip)
    }
}

impl Default for Geolocator {
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
    fn test_ip_response_shape() {
        let parsed: IpResponse = serde_json::from_str(r#"{"ip":"203.0.113.9"}"#).unwrap();
        assert_eq!(parsed.ip, "203.0.113.9");
    }

    #[test]
    fn test_geo_response_shape() {
        let body = r#"{"latitude":52.52,"longitude":13.405,"country_code":"DE","city":"Berlin"}"#;
        let parsed: GeoResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.latitude, Some(52.52));
        assert_eq!(parsed.country_code.as_deref(), Some("DE"));
    }

    #[test]
    fn test_geo_response_tolerates_missing_fields() {
        let parsed: GeoResponse = serde_json::from_str(r#"{"latitude":null}"#).unwrap();
        assert!(parsed.latitude.is_none());
        assert!(parsed.country_code.is_none());
    }
}
