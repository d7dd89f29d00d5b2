//! Content item enumerations: category discriminator and language tag.
//!
//! Both are stored as text columns with CHECK constraints; the enums here
//! are the single source of truth for the accepted values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Discriminator for the unified content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Script,
    Faq,
    Question,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Script => "script",
            Category::Faq => "faq",
            Category::Question => "question",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "script" => Ok(Category::Script),
            "faq" => Ok(Category::Faq),
            "question" => Ok(Category::Question),
            other => Err(CoreError::Validation(format!(
                "Unknown content category: {other}"
            ))),
        }
    }
}

/// Language tag on a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ua,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ua => "ua",
            Language::Ru => "ru",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "en" => Ok(Language::En),
            "ua" => Ok(Language::Ua),
            "ru" => Ok(Language::Ru),
            other => Err(CoreError::Validation(format!("Unknown language: {other}"))),
        }
    }
}
