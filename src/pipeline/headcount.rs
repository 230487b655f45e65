//! Best-effort employee headcount from a company's own website.
//!
//! Looks at the home page and `/about`, preferring structured data
//! (`application/ld+json`) over phrases in the page text. The figure is
//! advisory: any failure simply yields `None`.

use crate::metrics::{HttpTimer, Metrics};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "lead-finder/0.1 (+info)";

/// JSON-LD keys that carry an employee count.
const JSON_LD_KEYS: &[&str] = &["numberOfEmployees", "employees", "employee", "staff"];

/// Delay between the pages of one domain.
pub const DEFAULT_PAGE_PAUSE: Duration = Duration::from_millis(800);

static PLUS_EMPLOYEES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,4})\s*\+\s*employees").expect("Failed to compile headcount regex")
});

static RANGE_EMPLOYEES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,4})\s*-\s*([0-9]{1,4})\s*employees")
        .expect("Failed to compile headcount regex")
});

static PLAIN_EMPLOYEES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,4})\s*employees").expect("Failed to compile headcount regex")
});

static TEAM_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)team\s+of\s+([0-9]{1,4})\b").expect("Failed to compile headcount regex")
});

/// Pages inspected for a domain, in order.
pub fn page_urls(domain: &str) -> [String; 2] {
    [
        format!("https://{}/", domain),
        format!("https://{}/about", domain),
    ]
}

/// Extract a positive headcount from one HTML document.
pub fn estimate_from_html(html: &str) -> Option<u32> {
    if html.trim().is_empty() {
        return None;
    }

    let document = Html::parse_document(html);

    if let Some(count) = from_json_ld(&document) {
        return Some(count);
    }

    let text = document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    from_text(&text)
}

fn from_json_ld(document: &Html) -> Option<u32> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(raw.trim()) else {
            continue;
        };

        let objects = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        for object in objects.iter().filter_map(Value::as_object) {
            for key in JSON_LD_KEYS {
                let count = match object.get(*key) {
                    Some(Value::Object(inner)) => inner.get("value").and_then(positive_int),
                    Some(value) => positive_int(value),
                    None => None,
                };
                if count.is_some() {
                    return count;
                }
            }
        }
    }

    None
}

fn positive_int(value: &Value) -> Option<u32> {
    value
        .as_i64()
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
}

fn from_text(text: &str) -> Option<u32> {
    let capture = |re: &Regex, group: usize| -> Option<u32> {
        re.captures(text)
            .and_then(|caps| caps.get(group)?.as_str().parse::<u32>().ok())
            .filter(|n| *n > 0)
    };

    if let Some(n) = capture(&PLUS_EMPLOYEES, 1) {
        return Some(n);
    }

    if let Some(caps) = RANGE_EMPLOYEES.captures(text) {
        let bound = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        if let (Some(lo), Some(hi)) = (bound(1), bound(2)) {
            let mid = (lo + hi) / 2;
            if mid > 0 {
                return Some(mid);
            }
        }
    }

    capture(&PLAIN_EMPLOYEES, 1).or_else(|| capture(&TEAM_OF, 1))
}

/// Fetches company pages and extracts a headcount.
#[derive(Clone)]
pub struct HeadcountEstimator {
    agent: Arc<ureq::Agent>,
    pause: Duration,
    metrics: Metrics,
}

impl HeadcountEstimator {
    pub fn new(timeout: Duration, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();

        Self {
            agent: Arc::new(agent),
            pause: DEFAULT_PAGE_PAUSE,
            metrics,
        }
    }

    /// Override the delay between pages.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Headcount for a domain from its home and about pages.
    pub fn estimate(&self, domain: &str) -> Option<u32> {
        if domain.is_empty() {
            return None;
        }
        self.estimate_from_urls(&page_urls(domain))
    }

    /// First positive headcount found across `urls`, fetched in order.
    pub fn estimate_from_urls(&self, urls: &[String]) -> Option<u32> {
        let mut pause_before_next = false;

        for url in urls {
            if pause_before_next && !self.pause.is_zero() {
                thread::sleep(self.pause);
            }

            let Some(html) = self.fetch_html(url) else {
                pause_before_next = false;
                continue;
            };
            pause_before_next = true;

            if let Some(count) = estimate_from_html(&html) {
                debug!("Estimated headcount {} from {}", count, url);
                return Some(count);
            }
        }

        None
    }

    /// Body of a `200 text/html` response, or `None`.
    fn fetch_html(&self, url: &str) -> Option<String> {
        let timer = HttpTimer::new(self.metrics.clone());

        let response = match self.agent.get(url).call() {
            Ok(response) => {
                timer.complete();
                response
            }
            Err(e) => {
                timer.complete_with_error();
                debug!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let is_html = response
            .header("Content-Type")
            .is_some_and(|ct| ct.contains("text/html"));
        if response.status() != 200 || !is_html {
            debug!(
                "Skipping {} (status {}, content type {:?})",
                url,
                response.status(),
                response.header("Content-Type")
            );
            return None;
        }

        response.into_string().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_number_of_employees() {
        let html = r#"<html><head><script type="application/ld+json">
            {"@type":"Organization","numberOfEmployees":{"@type":"QuantitativeValue","value":120}}
            </script></head><body>We are 5 employees</body></html>"#;
        assert_eq!(estimate_from_html(html), Some(120));
    }

    #[test]
    fn test_json_ld_array_and_plain_int() {
        let html = r#"<script type="application/ld+json">
            [{"@type":"WebSite"},{"@type":"Organization","staff":42}]
            </script>"#;
        assert_eq!(estimate_from_html(html), Some(42));
    }

    #[test]
    fn test_bad_json_ld_falls_back_to_text() {
        let html = r#"<script type="application/ld+json">{not json</script>
            <p>A team of 35 people</p>"#;
        assert_eq!(estimate_from_html(html), Some(35));
    }

    #[test]
    fn test_text_patterns() {
        assert_eq!(from_text("Over 250+ employees worldwide"), Some(250));
        assert_eq!(from_text("Company size: 11-50 employees"), Some(30));
        assert_eq!(from_text("We have 80 Employees"), Some(80));
        assert_eq!(from_text("A small team of 7"), Some(7));
        assert_eq!(from_text("No numbers here"), None);
    }

    #[test]
    fn test_plus_pattern_wins_over_plain() {
        assert_eq!(from_text("12 employees in Denver, 500+ employees overall"), Some(500));
    }

    #[test]
    fn test_zero_is_ignored() {
        assert_eq!(from_text("0 employees, team of 4"), Some(4));
        assert_eq!(estimate_from_html(""), None);
    }

    #[test]
    fn test_page_urls() {
        assert_eq!(
            page_urls("acme.com"),
            ["https://acme.com/".to_string(), "https://acme.com/about".to_string()]
        );
    }
}
