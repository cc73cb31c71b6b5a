//! Response decoding for TheMealDB endpoints.
//!
//! Every endpoint wraps its payload in `{ "meals": [...] }`. The API answers
//! "no match" with `"meals": null` (and some error pages omit the field), so a
//! missing or null list decodes to an empty result rather than an error. Only
//! a body that is not JSON of the expected shape, or a non-success HTTP status,
//! is an error.

use crate::domain::error::{Result, ZmealsError};
use crate::domain::recipe::null_as_default;
use crate::domain::{RecipeDetail, RecipeSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    #[serde(default = "Option::default")]
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct RegionEntry {
    #[serde(rename = "strArea", default, deserialize_with = "null_as_default")]
    area: String,
}

/// Maps an HTTP status and body into the body bytes or an API error.
///
/// # Errors
///
/// Returns [`ZmealsError::Api`] for any status outside `200..300`, and for a
/// success status whose body is empty or whitespace.
pub fn check_status(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    if !(200..300).contains(&status) {
        return Err(ZmealsError::Api(format!("HTTP {status}")));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ZmealsError::Api(format!("HTTP {status} with empty body")));
    }
    Ok(body)
}

fn decode_meals<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>> {
    let envelope: MealsEnvelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.meals.unwrap_or_default())
}

/// Decodes a search, first-letter or region listing.
///
/// # Errors
///
/// Returns [`ZmealsError::Decode`] if the body is not a meals envelope.
///
/// # Examples
///
/// ```
/// use zmeals::api::decode_summaries;
///
/// assert!(decode_summaries(br#"{"meals": null}"#).unwrap().is_empty());
/// ```
pub fn decode_summaries(body: &[u8]) -> Result<Vec<RecipeSummary>> {
    let summaries = decode_meals::<RecipeSummary>(body)?;
    tracing::debug!(count = summaries.len(), "decoded recipe summaries");
    Ok(summaries)
}

/// Decodes the region list used to populate the dropdown.
///
/// Blank names are dropped; order is preserved.
///
/// # Errors
///
/// Returns [`ZmealsError::Decode`] if the body is not a meals envelope.
pub fn decode_regions(body: &[u8]) -> Result<Vec<String>> {
    let regions: Vec<String> = decode_meals::<RegionEntry>(body)?
        .into_iter()
        .map(|entry| entry.area.trim().to_string())
        .filter(|area| !area.is_empty())
        .collect();
    tracing::debug!(count = regions.len(), "decoded regions");
    Ok(regions)
}

/// Decodes a `lookup.php` response into the first recipe record, if any.
///
/// # Errors
///
/// Returns [`ZmealsError::Decode`] if the body is not a meals envelope of objects.
pub fn decode_detail(body: &[u8]) -> Result<Option<RecipeDetail>> {
    let records = decode_meals::<Map<String, Value>>(body)?;
    Ok(records.first().map(RecipeDetail::from_raw))
}
