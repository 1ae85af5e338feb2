//! Pure response formatting: raw API payloads to user-facing text.

use std::fmt::Write;

use super::news::NewsItem;
use super::weather::ForecastEntry;

/// Forecast periods shown to the user.
pub const FORECAST_PERIODS: usize = 5;

const KELVIN_OFFSET: f64 = 273.15;

const COMMAND_LIST: &[&str] = &[
    "/help - show available commands",
    "/about - learn more about me",
    "/chat - send me a message",
    "/image - generate an image",
    "/weather - give me the weather forecast",
    "/news - give me the latest news",
    "/joke - tell me a joke",
];

pub const ABOUT_TEXT: &str = "I am a chatbot built on a large language model. \
I can hold a natural conversation, answer questions, generate images from a \
description, and fetch the weather forecast, top news headlines, or a joke on \
demand.\n\nEverything I know about the world comes from the APIs behind each \
command, so my answers are only as fresh as those services. Conversations are \
not stored: every message is handled on its own, with no memory of what came \
before.\n\nSend /help at any time to see what I can do.";

pub const UNRECOGNIZED_TEXT: &str =
    "Sorry, I don't recognize that command. Send /help to see what I understand.";

/// Substitute used when the headlines provider returns zero articles, so we
/// never hand the platform an empty message body.
pub const NO_NEWS_TEXT: &str = "No news available right now, please try again later";

pub fn help_text() -> String {
    COMMAND_LIST.join("\n")
}

/// Greeting sent for /start. Uses the sender's first name when known.
pub fn start_text(first_name: Option<&str>) -> String {
    let name = first_name.unwrap_or("there");
    format!(
        "Hi, {name}! I am a chatbot powered by a large language model. My \
purpose is to assist you in having natural conversations and answering your \
questions to the best of my ability.\n\nAvailable commands:\n{}",
        help_text()
    )
}

fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

/// Build the multi-paragraph forecast report: one paragraph per period, at
/// most [`FORECAST_PERIODS`] of them, in provider (chronological) order.
pub fn forecast_report(entries: &[ForecastEntry]) -> String {
    let shown = &entries[..entries.len().min(FORECAST_PERIODS)];

    let mut report = String::new();
    for entry in shown {
        // Writing into a String cannot fail.
        let _ = writeln!(report, "Time: {}", entry.timestamp);
        let _ = writeln!(
            report,
            "Temperature: {:.1}°C (min: {:.1}°C, max: {:.1}°C)",
            kelvin_to_celsius(entry.temp_k),
            kelvin_to_celsius(entry.temp_min_k),
            kelvin_to_celsius(entry.temp_max_k),
        );
        let _ = writeln!(report, "Humidity: {}%", entry.humidity);
        let _ = writeln!(report, "Wind Speed: {} m/s", entry.wind_speed);
        let _ = writeln!(report, "Conditions: {}", entry.description);
        report.push('\n');
    }
    report
}

/// Build the headline list: one `- title: url` line per article, provider
/// order, preceded by a newline. Zero articles yields [`NO_NEWS_TEXT`].
pub fn headlines_report(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return NO_NEWS_TEXT.to_string();
    }

    let mut message = String::new();
    for item in items {
        let _ = write!(message, "\n- {}: {}", item.title, item.url);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u32) -> ForecastEntry {
        ForecastEntry {
            timestamp: format!("2023-11-14 {:02}:00:00", n * 3),
            temp_k: 283.15 + n as f64,
            temp_min_k: 280.65 + n as f64,
            temp_max_k: 285.15 + n as f64,
            humidity: 60 + n as u8,
            wind_speed: 2.5,
            description: format!("condition {n}"),
        }
    }

    fn item(n: u32) -> NewsItem {
        NewsItem {
            title: format!("Headline {n}"),
            url: format!("https://example.com/{n}"),
        }
    }

    #[test]
    fn test_forecast_five_paragraphs_in_order() {
        let entries: Vec<_> = (0..5).map(entry).collect();
        let report = forecast_report(&entries);

        let paragraphs: Vec<&str> = report.split("\n\n").filter(|p| !p.is_empty()).collect();
        assert_eq!(paragraphs.len(), 5);
        for (n, paragraph) in paragraphs.iter().enumerate() {
            assert!(paragraph.starts_with(&format!("Time: 2023-11-14 {:02}:00:00", n * 3)));
            assert!(paragraph.contains(&format!("condition {n}")));
        }
    }

    #[test]
    fn test_forecast_clamps_to_five() {
        let entries: Vec<_> = (0..8).map(entry).collect();
        let report = forecast_report(&entries);
        assert_eq!(report.matches("Time:").count(), 5);
        // The sixth entry never appears.
        assert!(!report.contains("condition 5"));
    }

    #[test]
    fn test_forecast_short_list_does_not_panic() {
        let entries: Vec<_> = (0..2).map(entry).collect();
        let report = forecast_report(&entries);
        assert_eq!(report.matches("Time:").count(), 2);
    }

    #[test]
    fn test_kelvin_conversion_one_decimal() {
        let report = forecast_report(&[entry(0)]);
        // 283.15 K = 10.0 °C, min 280.65 K = 7.5 °C, max 285.15 K = 12.0 °C
        assert!(report.contains("Temperature: 10.0°C (min: 7.5°C, max: 12.0°C)"));
    }

    #[test]
    fn test_forecast_paragraph_line_order() {
        let report = forecast_report(&[entry(1)]);
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("Time:"));
        assert!(lines[1].starts_with("Temperature:"));
        assert_eq!(lines[2], "Humidity: 61%");
        assert_eq!(lines[3], "Wind Speed: 2.5 m/s");
        assert_eq!(lines[4], "Conditions: condition 1");
    }

    #[test]
    fn test_headlines_five_lines_in_order() {
        let items: Vec<_> = (1..=5).map(item).collect();
        let report = headlines_report(&items);

        assert!(report.starts_with('\n'));
        let lines: Vec<&str> = report.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 5);
        for (i, line) in lines.iter().enumerate() {
            let n = i + 1;
            assert_eq!(*line, format!("- Headline {n}: https://example.com/{n}"));
        }
    }

    #[test]
    fn test_headlines_empty_substitutes_message() {
        let report = headlines_report(&[]);
        assert_eq!(report, NO_NEWS_TEXT);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_start_text_greets_by_name() {
        let text = start_text(Some("Alice"));
        assert!(text.starts_with("Hi, Alice!"));
        assert!(text.contains("/weather"));
    }

    #[test]
    fn test_start_text_without_name() {
        let text = start_text(None);
        assert!(text.starts_with("Hi, there!"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = help_text();
        for cmd in ["/help", "/about", "/chat", "/image", "/weather", "/news", "/joke"] {
            assert!(text.contains(cmd), "missing {cmd}");
        }
    }
}
