//! Calendar alerts for upcoming surges.
//!
//! Produces a prefilled calendar "create event" link that staff can open to
//! add an all-day surge reminder. Opening the link is left to the caller.

use url::Url;

use super::festival::Festival;
use crate::error::Result;

const CALENDAR_RENDER_URL: &str = "https://www.google.com/calendar/render";

/// Event title used for a festival's surge reminder.
pub fn alert_title(festival: &Festival) -> String {
    format!("Waste Surge Alert: {}", festival.name)
}

/// Build the calendar template link for a festival.
///
/// # Errors
///
/// Only fails if the base URL constant is malformed.
pub fn calendar_alert_url(festival: &Festival) -> Result<Url> {
    let day = festival.date.format("%Y%m%d").to_string();
    let details = format!(
        "{} - Predicted Surge: {}",
        festival.description, festival.surge_level
    );
    let url = Url::parse_with_params(
        CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", alert_title(festival).as_str()),
            ("dates", format!("{day}/{day}").as_str()),
            ("details", details.as_str()),
            ("sf", "true"),
            ("output", "xml"),
        ],
    )?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surge::FestivalCalendar;
    use std::collections::HashMap;

    #[test]
    fn alert_url_carries_festival_details() {
        let calendar = FestivalCalendar::tamil_nadu();
        let diwali = calendar.find("Diwali").unwrap();
        let url = calendar_alert_url(diwali).unwrap();

        assert_eq!(url.host_str(), Some("www.google.com"));
        assert_eq!(url.path(), "/calendar/render");

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params["action"], "TEMPLATE");
        assert_eq!(params["text"], "Waste Surge Alert: Diwali");
        assert_eq!(params["dates"], "20261108/20261108");
        assert!(params["details"].ends_with("- Predicted Surge: High"));
        assert!(params["details"].starts_with("Firecracker waste"));
        assert_eq!(params["sf"], "true");
        assert_eq!(params["output"], "xml");
    }
}
