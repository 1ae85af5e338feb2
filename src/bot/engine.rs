//! Command dispatch and handler bodies.
//!
//! Every handler performs at most one outbound API call, turns the payload
//! into a reply, and hands it to the delivery sink. Failures never reach
//! the user raw: each capability has a fixed apology string, and the
//! provider error only goes to the log.

use tracing::{error, info, warn};

use crate::config::Config;

use super::delivery::Delivery;
use super::event::InboundEvent;
use super::format;
use super::geo::Geolocator;
use super::joke::{self, JokeClient};
use super::news::{self, NewsClient};
use super::openai::{self, OpenAiClient};
use super::router::{self, Route};
use super::weather::{self, Place, WeatherClient};

pub const CHAT_APOLOGY: &str =
    "An error occurred while generating a response, please try again later";
pub const IMAGE_APOLOGY: &str =
    "An error occurred while generating an image, please try again later";
pub const WEATHER_APOLOGY: &str =
    "An error occurred while retrieving a weather forecast, please try again later";
pub const NEWS_APOLOGY: &str =
    "An error occurred while retrieving news, please try again later";
pub const JOKE_APOLOGY: &str =
    "An error occurred while retrieving a joke, please try again later";

/// What a handler decided to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Photo by URL, passed through to the platform untouched.
    Photo(String),
}

/// Turn a completion result into a reply. The completion text is relayed
/// verbatim; no post-processing.
pub fn chat_reply(result: Result<String, openai::Error>) -> Reply {
    match result {
        Ok(text) => Reply::Text(text),
        Err(e) => {
            error!("OpenAI completion request failed: {e}");
            Reply::Text(CHAT_APOLOGY.to_string())
        }
    }
}

pub fn image_reply(result: Result<String, openai::Error>) -> Reply {
    match result {
        Ok(url) => Reply::Photo(url),
        Err(e) => {
            error!("OpenAI image request failed: {e}");
            Reply::Text(IMAGE_APOLOGY.to_string())
        }
    }
}

pub fn weather_reply(result: Result<Vec<weather::ForecastEntry>, weather::Error>) -> Reply {
    match result {
        Ok(entries) => Reply::Text(format::forecast_report(&entries)),
        Err(e) => {
            error!("OpenWeatherMap request failed: {e}");
            Reply::Text(WEATHER_APOLOGY.to_string())
        }
    }
}

pub fn news_reply(result: Result<Vec<news::NewsItem>, news::Error>) -> Reply {
    match result {
        Ok(items) => Reply::Text(format::headlines_report(&items)),
        Err(e) => {
            error!("News API request failed: {e}");
            Reply::Text(NEWS_APOLOGY.to_string())
        }
    }
}

pub fn joke_reply(result: Result<String, joke::Error>) -> Reply {
    match result {
        Ok(joke) => Reply::Text(joke),
        Err(e) => {
            error!("Joke API request failed: {e}");
            Reply::Text(JOKE_APOLOGY.to_string())
        }
    }
}

/// The router-plus-handlers pipeline. Immutable after construction; one
/// instance is shared across all chats.
pub struct Engine<D: Delivery> {
    delivery: D,
    openai: OpenAiClient,
    weather: WeatherClient,
    news: NewsClient,
    joke: JokeClient,
    geo: Geolocator,
    /// Static fallback country for headlines when geolocation fails.
    country_code: Option<String>,
    /// Static fallback city for forecasts when geolocation fails.
    city_id: Option<u64>,
}

impl<D: Delivery> Engine<D> {
    pub fn new(config: &Config, delivery: D) -> Self {
        Self {
            delivery,
            openai: OpenAiClient::new(config.openai_api_key.clone()),
            weather: WeatherClient::new(config.openweathermap_api_key.clone()),
            news: NewsClient::new(config.newsapi_api_key.clone()),
            joke: JokeClient::new(),
            geo: Geolocator::new(),
            country_code: config.country_code.clone(),
            city_id: config.city_id,
        }
    }

    /// Handle one inbound event end to end: route, call out, reply.
    pub async fn handle_event(&self, event: InboundEvent) {
        let route = router::route(&event);
        info!("Chat {}: routed to {}", event.chat_id, route_name(&route));

        let reply = match route {
            Route::Start => Reply::Text(format::start_text(event.sender_name.as_deref())),
            Route::Help => Reply::Text(format::help_text()),
            Route::About => Reply::Text(format::ABOUT_TEXT.to_string()),
            Route::Chat(prompt) => self.chat(&prompt).await,
            Route::Image(prompt) => self.image(&prompt).await,
            Route::Weather => self.weather().await,
            Route::News => self.news().await,
            Route::Joke => self.joke().await,
            Route::Unrecognized(token) => {
                warn!("Chat {}: unrecognized command /{token}", event.chat_id);
                Reply::Text(format::UNRECOGNIZED_TEXT.to_string())
            }
        };

        self.deliver(event.chat_id, reply).await;
    }

    async fn deliver(&self, chat_id: i64, reply: Reply) {
        let result = match &reply {
            Reply::Text(text) => self.delivery.send_text(chat_id, text).await,
            Reply::Photo(url) => self.delivery.send_photo_url(chat_id, url).await,
        };
        if let Err(e) = result {
            warn!("Delivery to chat {chat_id} failed: {e}");
        }
    }

    async fn chat(&self, text: &str) -> Reply {
        let prompt = format!("User: {text}\nChatbot: ");
        chat_reply(self.openai.complete(&prompt).await)
    }

    async fn image(&self, prompt: &str) -> Reply {
        image_reply(self.openai.generate_image(prompt).await)
    }

    async fn weather(&self) -> Reply {
        let Some(place) = self.forecast_place().await else {
            return Reply::Text(WEATHER_APOLOGY.to_string());
        };
        weather_reply(self.weather.forecast(place).await)
    }

    async fn news(&self) -> Reply {
        let Some(country) = self.headline_country().await else {
            return Reply::Text(NEWS_APOLOGY.to_string());
        };
        news_reply(self.news.top_headlines(&country).await)
    }

    async fn joke(&self) -> Reply {
        joke_reply(self.joke.random().await)
    }

    /// Coordinates from geolocation, or the configured city id when the
    /// lookup fails or comes back without coordinates.
    async fn forecast_place(&self) -> Option<Place> {
        match self.geo.resolve().await {
            Ok(location) => {
                if let (Some(lat), Some(lon)) = (location.latitude, location.longitude) {
                    return Some(Place::Coords { lat, lon });
                }
                warn!("Geolocation for {} has no coordinates", location.ip);
            }
            Err(e) => warn!("Geolocation failed: {e}"),
        }
        match self.city_id {
            Some(id) => Some(Place::CityId(id)),
            None => {
                error!("No location available for forecast (no coordinates, no city_id)");
                None
            }
        }
    }

    async fn headline_country(&self) -> Option<String> {
        match self.geo.resolve().await {
            Ok(location) => {
                if let Some(cc) = location.country_code {
                    return Some(cc);
                }
                warn!("Geolocation for {} has no country code", location.ip);
            }
            Err(e) => warn!("Geolocation failed: {e}"),
        }
        match self.country_code.clone() {
            Some(cc) => Some(cc),
            None => {
                error!("No country available for headlines (no geolocation, no country_code)");
                None
            }
        }
    }
}

fn route_name(route: &Route) -> &'static str {
    match route {
        Route::Start => "start",
        Route::Help => "help",
        Route::About => "about",
        Route::Chat(_) => "chat",
        Route::Image(_) => "image",
        Route::Weather => "weather",
        Route::News => "news",
        Route::Joke => "joke",
        Route::Unrecognized(_) => "unrecognized",
    }
}
