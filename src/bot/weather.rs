//! OpenWeatherMap 5-day/3-hour forecast client.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// One time-stamped entry from the provider's forecast list. Temperatures
/// stay in Kelvin here; conversion happens at formatting time.
#[derive(Debug, Clone)]
pub struct ForecastEntry {
    pub timestamp: String,
    pub temp_k: f64,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
}

/// Where to forecast for: resolved coordinates, or a configured city id
/// when geolocation is unavailable.
#[derive(Debug, Clone, Copy)]
pub enum Place {
    Coords { lat: f64, lon: f64 },
    CityId(u64),
}

#[derive(Deserialize)]
struct ForecastResponse {
    list: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    dt_txt: String,
    main: RawMain,
    wind: RawWind,
    weather: Vec<RawWeather>,
}

#[derive(Deserialize)]
struct RawMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Deserialize)]
struct RawWeather {
    description: String,
}

pub struct WeatherClient {
    api_key: String,
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { api_key, http }
    }

    pub async fn forecast(&self, place: Place) -> Result<Vec<ForecastEntry>, Error> {
        let mut query: Vec<(&str, String)> = vec![("appid", self.api_key.clone())];
        match place {
            Place::Coords { lat, lon } => {
                query.push(("lat", lat.to_string()));
                query.push(("lon", lon.to_string()));
            }
            Place::CityId(id) => query.push(("id", id.to_string())),
        }

        info!("Requesting forecast for {:?}", place);

        let response = self
            .http
            .get(FORECAST_URL)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{status}: {body}")));
        }

        let parsed: ForecastResponse =
            response.json().await.map_err(|e| Error::Parse(e.to_string()))?;

        let entries = parsed
            .list
            .into_iter()
            .map(|raw| {
                let description = raw
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .unwrap_or_default();
                ForecastEntry {
                    timestamp: raw.dt_txt,
                    temp_k: raw.main.temp,
                    temp_min_k: raw.main.temp_min,
                    temp_max_k: raw.main.temp_max,
                    humidity: raw.main.humidity,
                    wind_speed: raw.wind.speed,
                    description,
                }
            })
            .collect();

        Ok(entries)
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
    fn test_forecast_response_shape() {
        let body = r#"{
            "cod": "200",
            "list": [{
                "dt": 1700000000,
                "dt_txt": "2023-11-14 12:00:00",
                "main": {"temp": 283.15, "temp_min": 281.0, "temp_max": 284.5, "humidity": 71, "pressure": 1013},
                "wind": {"speed": 3.4, "deg": 220},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]
            }]
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.list.len(), 1);
        let entry = &parsed.list[0];
        assert_eq!(entry.dt_txt, "2023-11-14 12:00:00");
        assert_eq!(entry.main.temp, 283.15);
        assert_eq!(entry.main.humidity, 71);
        assert_eq!(entry.wind.speed, 3.4);
        assert_eq!(entry.weather[0].description, "light rain");
    }

    #[test]
    fn test_empty_weather_array_yields_empty_description() {
        let raw = RawEntry {
            dt_txt: "2023-11-14 12:00:00".into(),
            main: RawMain { temp: 280.0, temp_min: 279.0, temp_max: 281.0, humidity: 50 },
            wind: RawWind { speed: 1.0 },
            weather: vec![],
        };
        let description = raw
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();
        assert_eq!(description, "");
    }
}
