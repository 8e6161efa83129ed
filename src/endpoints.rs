//! The API endpoint URIs.

/// The route for listing the locations known to the backend.
pub const LOCATIONS: &str = "/api/locations";
/// The route for the client to sign out the current user.
pub const SIGN_OUT: &str = "/api/signout";
/// The route for the configuration that is safe to share with the browser.
pub const PUBLIC_CONFIG: &str = "/api/config";

/// The path on the backend that lists locations, relative to the backend base URL.
pub const BACKEND_LOCATIONS: &str = "/api/locations/v1/";
