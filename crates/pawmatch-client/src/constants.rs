// API path constants for the dog adoption service

/// Public deployment of the service
pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Page size requested by every search
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Name of the pagination token carried by `next`/`prev` links
pub const CURSOR_PARAM: &str = "from";

pub mod api_path {
    // Auth
    pub const AUTH_LOGIN: &str = "/auth/login";
    pub const AUTH_LOGOUT: &str = "/auth/logout";

    // Dogs
    pub const DOG_BREEDS: &str = "/dogs/breeds";
    pub const DOG_SEARCH: &str = "/dogs/search";
    pub const DOGS: &str = "/dogs";
    pub const DOG_MATCH: &str = "/dogs/match";
}
