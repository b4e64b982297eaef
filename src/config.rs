//! Study plan configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How familiar the learner already is with the topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Level {
    /// New to the topic
    #[default]
    Beginner,
    /// Knows the basics
    Intermediate,
    /// Experienced
    Advance,
}

impl Level {
    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advance => "Advance",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advance" | "advanced" => Ok(Level::Advance),
            other => Err(Error::InvalidInput(format!(
                "unknown familiarity level '{}' (expected Beginner, Intermediate or Advance)",
                other
            ))),
        }
    }
}

/// Everything a study plan run needs, passed explicitly.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Serper web search API key
    pub serper_api_key: String,

    /// Topic to learn about
    pub topic: String,

    /// Learner familiarity level
    pub level: Level,
}

impl StudyConfig {
    /// Create a configuration for a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Set the Gemini API key.
    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = key.into();
        self
    }

    /// Set the Serper API key.
    pub fn with_serper_key(mut self, key: impl Into<String>) -> Self {
        self.serper_api_key = key.into();
        self
    }

    /// Set the familiarity level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Check that both credentials and a topic are present.
    pub fn validate(&self) -> Result<()> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(Error::MissingCredential("Gemini API key"));
        }
        if self.serper_api_key.trim().is_empty() {
            return Err(Error::MissingCredential("Serper API key"));
        }
        if self.topic.trim().is_empty() {
            return Err(Error::InvalidInput("please enter a topic".to_string()));
        }
        Ok(())
    }

    /// Topic with surrounding whitespace removed.
    pub fn topic(&self) -> &str {
        self.topic.trim()
    }
}

impl fmt::Debug for StudyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyConfig")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("serper_api_key", &redact(&self.serper_api_key))
            .field("topic", &self.topic)
            .field("level", &self.level)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> StudyConfig {
        StudyConfig::new("LoRA")
            .with_gemini_key("g-key")
            .with_serper_key("s-key")
            .with_level(Level::Intermediate)
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("beginner".parse::<Level>().unwrap(), Level::Beginner);
        assert_eq!(" Intermediate ".parse::<Level>().unwrap(), Level::Intermediate);
        assert_eq!("Advanced".parse::<Level>().unwrap(), Level::Advance);
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Advance.to_string(), "Advance");
        assert_eq!(Level::default(), Level::Beginner);
    }

    #[test]
    fn test_validate_ok() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_keys() {
        let config = complete().with_gemini_key("  ");
        assert!(matches!(
            config.validate(),
            Err(Error::MissingCredential("Gemini API key"))
        ));

        let config = complete().with_serper_key("");
        assert!(matches!(
            config.validate(),
            Err(Error::MissingCredential("Serper API key"))
        ));
    }

    #[test]
    fn test_validate_missing_topic() {
        let mut config = complete();
        config.topic = "   ".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let debug = format!("{:?}", complete());
        assert!(!debug.contains("g-key"));
        assert!(!debug.contains("s-key"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("LoRA"));
    }
}
