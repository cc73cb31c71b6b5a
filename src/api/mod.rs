//! Remote recipe source (TheMealDB).
//!
//! The plugin never performs I/O here: [`request`] describes what to fetch and
//! how to tag it, [`response`] turns returned bodies into domain types. The
//! actual HTTP call is a Zellij `web_request` issued by the plugin shim.
//!
//! - [`request`]: endpoint URLs, request purposes and generation tags
//! - [`response`]: status checking and JSON decoding

pub mod request;
pub mod response;

pub use request::{RequestPurpose, RequestTag, CONTEXT_KEY};
pub use response::{check_status, decode_detail, decode_regions, decode_summaries};

/// Default API root, version 1 with the public test key.
pub const DEFAULT_API_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
