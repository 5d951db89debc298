use serde::{Deserialize, Serialize};
use std::fmt;

/// Year of an event as the feed reports it. Equality is exact, a
/// `Text("1492")` never equals `Number(1492)`. Any other JSON shape is kept
/// as `Other` so one odd event does not fail the whole day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Year {
    pub fn unknown() -> Self {
        Year::Text("Unknown".to_string())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => f.write_str(s),
            Year::Other(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<PageUrls>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl Page {
    pub fn desktop_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()?
            .desktop
            .as_ref()?
            .page
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    pub fn thumbnail_source(&self) -> Option<&str> {
        self.thumbnail.as_ref()?.source.as_deref()
    }
}

/// Body of `feed/onthisday/events/MM/DD`.
#[derive(Debug, Default, Deserialize)]
pub struct OnThisDayFeed {
    #[serde(default)]
    pub events: Vec<Event>,
}
