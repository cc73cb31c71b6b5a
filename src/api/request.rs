//! Request construction for TheMealDB endpoints.
//!
//! Every outgoing request is described by a [`RequestTag`]: what it is for and
//! which generation of list/detail interest it belongs to. The tag travels in
//! the Zellij `web_request` context map and comes back untouched with the
//! response, which is how stale responses are recognised.

use crate::domain::error::{Result, ZmealsError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the serialized [`RequestTag`] is stored in the request context.
pub const CONTEXT_KEY: &str = "zmeals_request";

/// Characters left unescaped, matching `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What a request is fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestPurpose {
    /// Unfiltered list: every recipe starting with the configured letter.
    InitialList { letter: char },
    /// Recipes whose name matches a sanitized search term.
    Search { term: String },
    /// Recipes from one region (area).
    Region { region: String },
    /// All region names, for the dropdown.
    Regions,
    /// One full recipe record.
    Detail { id: String },
}

impl RequestPurpose {
    /// Whether a successful response replaces the recipe list.
    #[must_use]
    pub const fn replaces_list(&self) -> bool {
        matches!(
            self,
            Self::InitialList { .. } | Self::Search { .. } | Self::Region { .. }
        )
    }

    /// Builds the absolute URL for this request against `base_url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmeals::api::RequestPurpose;
    ///
    /// let purpose = RequestPurpose::Search { term: "beef stew".into() };
    /// assert_eq!(
    ///     purpose.url("https://www.themealdb.com/api/json/v1/1/"),
    ///     "https://www.themealdb.com/api/json/v1/1/search.php?s=beef%20stew"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::InitialList { letter } => {
                format!("{base}/search.php?f={}", encode(&letter.to_string()))
            }
            Self::Search { term } => format!("{base}/search.php?s={}", encode(term)),
            Self::Region { region } => format!("{base}/filter.php?a={}", encode(region)),
            Self::Regions => format!("{base}/list.php?a=list"),
            Self::Detail { id } => format!("{base}/lookup.php?i={}", encode(id)),
        }
    }

    /// Short human description used in notices and logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::InitialList { .. } => "load recipes".to_string(),
            Self::Search { term } => format!("search for \"{term}\""),
            Self::Region { region } => format!("filter by {region}"),
            Self::Regions => "load regions".to_string(),
            Self::Detail { .. } => "load recipe details".to_string(),
        }
    }
}

/// A request purpose stamped with the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTag {
    pub purpose: RequestPurpose,
    pub generation: u64,
}

impl RequestTag {
    #[must_use]
    pub const fn new(purpose: RequestPurpose, generation: u64) -> Self {
        Self {
            purpose,
            generation,
        }
    }

    /// Encodes the tag into a Zellij web request context map.
    ///
    /// # Errors
    ///
    /// Returns [`ZmealsError::Decode`] if the tag cannot be serialized.
    pub fn to_context(&self) -> Result<BTreeMap<String, String>> {
        let payload = serde_json::to_string(self)?;
        Ok(BTreeMap::from([(CONTEXT_KEY.to_string(), payload)]))
    }

    /// Recovers the tag from a context map returned with a web response.
    ///
    /// # Errors
    ///
    /// Returns [`ZmealsError::Decode`] if the key is missing or malformed,
    /// which means the response was not issued by this plugin.
    pub fn from_context(context: &BTreeMap<String, String>) -> Result<Self> {
        let payload = context
            .get(CONTEXT_KEY)
            .ok_or_else(|| ZmealsError::Decode(format!("missing {CONTEXT_KEY} context")))?;
        Ok(serde_json::from_str(payload)?)
    }
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, QUERY_COMPONENT).to_string()
}
