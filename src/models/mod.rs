pub mod payload;

/// Value of the `message` field upstream sends when the API key is rejected.
pub(crate) const INVALID_API_KEY: &str = "INVALID_API_KEY";
