//! open-notify API access.

/// HTTP client and the backend trait used by the data source.
pub mod client;
/// Wire records and their domain forms.
pub mod types;
