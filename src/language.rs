use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UI language. Each one is backed by exactly one Wikipedia feed language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ca,
    Es,
    En,
}

impl Language {
    pub const SUPPORTED: [Language; 3] = [Language::Ca, Language::Es, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ca => "ca",
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Language sent to the feed. There is no Catalan on-this-day feed, so
    /// Catalan reads the Spanish one.
    pub fn source(self) -> Language {
        match self {
            Language::Ca | Language::Es => Language::Es,
            Language::En => Language::En,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::SUPPORTED
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalan_reads_spanish_feed() {
        assert_eq!(Language::Ca.source(), Language::Es);
        assert_eq!(Language::Es.source(), Language::Es);
        assert_eq!(Language::En.source(), Language::En);
    }

    #[test]
    fn parses_only_supported_codes() {
        assert_eq!("ca".parse::<Language>(), Ok(Language::Ca));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
        assert!("CA".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn default_is_catalan() {
        assert_eq!(Language::default(), Language::Ca);
        assert_eq!(Language::default().to_string(), "ca");
    }
}
