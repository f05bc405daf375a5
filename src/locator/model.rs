//! Locator data model
//!
//! Definitions are immutable once loaded; `Strategy` is the executable form
//! a definition resolves to.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// A single locator definition as it appears in a page's locator record
#[derive(Debug, Clone, Deserialize)]
pub struct LocatorDefinition {
    /// Lookup strategy type (case-insensitive, synonyms accepted)
    #[serde(rename = "type")]
    pub kind: String,

    /// Selector value interpreted according to the type
    pub value: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Per-element wait timeout override in milliseconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// A page's locator collection, keyed by element name
#[derive(Debug, Clone, Deserialize)]
pub struct PageLocatorSet {
    #[serde(rename = "pageName")]
    pub page_name: String,

    #[serde(rename = "pageUrl", default)]
    pub page_url: Option<String>,

    pub locators: HashMap<String, LocatorDefinition>,
}

impl PageLocatorSet {
    /// Look up a definition by element name
    pub fn locator(&self, element_name: &str) -> Option<&LocatorDefinition> {
        self.locators.get(element_name)
    }
}

/// Executable element-lookup strategy
///
/// Closed set of lookup rules a definition can resolve to. Unrecognized
/// definition types fail with [`Error::UnsupportedStrategy`]; there is no
/// silent default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Strategy {
    Id(String),
    Name(String),
    ClassName(String),
    TagName(String),
    LinkText(String),
    PartialLinkText(String),
    Css(String),
    XPath(String),
}

impl Strategy {
    /// Translate a definition into its executable strategy.
    ///
    /// Pure mapping; the type string is matched case-insensitively and
    /// common synonyms are accepted ("css"/"cssselector", "class"/
    /// "classname", "tag"/"tagname", "link"/"linktext", "partiallink"/
    /// "partiallinktext").
    pub fn from_definition(definition: &LocatorDefinition) -> Result<Self> {
        let value = definition.value.clone();
        match definition.kind.to_lowercase().as_str() {
            "id" => Ok(Strategy::Id(value)),
            "name" => Ok(Strategy::Name(value)),
            "classname" | "class" => Ok(Strategy::ClassName(value)),
            "tagname" | "tag" => Ok(Strategy::TagName(value)),
            "linktext" | "link" => Ok(Strategy::LinkText(value)),
            "partiallinktext" | "partiallink" => Ok(Strategy::PartialLinkText(value)),
            "cssselector" | "css" => Ok(Strategy::Css(value)),
            "xpath" => Ok(Strategy::XPath(value)),
            other => Err(Error::UnsupportedStrategy(other.to_string())),
        }
    }

    /// The selector value this strategy carries
    pub fn value(&self) -> &str {
        match self {
            Strategy::Id(v)
            | Strategy::Name(v)
            | Strategy::ClassName(v)
            | Strategy::TagName(v)
            | Strategy::LinkText(v)
            | Strategy::PartialLinkText(v)
            | Strategy::Css(v)
            | Strategy::XPath(v) => v,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Id(v) => write!(f, "id '{}'", v),
            Strategy::Name(v) => write!(f, "name '{}'", v),
            Strategy::ClassName(v) => write!(f, "class name '{}'", v),
            Strategy::TagName(v) => write!(f, "tag name '{}'", v),
            Strategy::LinkText(v) => write!(f, "link text '{}'", v),
            Strategy::PartialLinkText(v) => write!(f, "partial link text '{}'", v),
            Strategy::Css(v) => write!(f, "css selector '{}'", v),
            Strategy::XPath(v) => write!(f, "xpath '{}'", v),
        }
    }
}
