//! Fixed API root and the resource endpoints the client may target.

/// Root of the hosted Lucent API. Endpoint literals are appended verbatim.
pub const BASE_URL: &str = "https://api.lucentcms.com/api/";

/// Every endpoint `LucentClient::build_request` accepts.
pub const VALID_ENDPOINTS: [&str; 6] = [
    "documents",
    "documents/",
    "channels",
    "channels/",
    "files",
    "files/",
];

pub fn is_valid_endpoint(endpoint: &str) -> bool {
    VALID_ENDPOINTS.contains(&endpoint)
}
