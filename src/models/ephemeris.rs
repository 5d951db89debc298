use serde::Serialize;

use super::event::{Event, Year};

/// Light view returned by `/api/ephemeris/today`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub year: Year,
    pub text: String,
    #[serde(rename = "hasDetails")]
    pub has_details: bool,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            year: event.year.clone().unwrap_or_else(Year::unknown),
            text: event.text.clone().unwrap_or_default(),
            has_details: !event.pages.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// Expanded view returned by `/api/ephemeris/details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetail {
    pub year: Year,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub links: Vec<Link>,
}

impl EventDetail {
    /// Description and thumbnail come from the first page only; links come
    /// from every page with a desktop URL, in feed order.
    pub fn from_event(event: &Event) -> Self {
        let mut detail = Self {
            year: event.year.clone().unwrap_or_else(Year::unknown),
            text: event.text.clone().unwrap_or_default(),
            description: None,
            thumbnail: None,
            links: Vec::new(),
        };

        let Some(main_page) = event.pages.first() else {
            return detail;
        };

        detail.description = Some(main_page.extract.clone().unwrap_or_default());
        detail.thumbnail = Some(main_page.thumbnail_source().unwrap_or_default().to_string());
        detail.links = event
            .pages
            .iter()
            .filter_map(|page| {
                page.desktop_url().map(|url| Link {
                    title: page.title.clone().unwrap_or_default(),
                    url: url.to_string(),
                })
            })
            .collect();

        detail
    }
}
