/// Target service API root used when neither CLI nor config sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
/// Shared password for every generated `testuser_<n>` account.
pub const DEFAULT_PASSWORD: &str = "password123";
pub const DEFAULT_TRANSFER_RECIPIENT: &str = "admin";
pub const DEFAULT_ITEM: &str = "pen";

pub const DEFAULT_USER_AGENT: &str = concat!("merchload/", env!("CARGO_PKG_VERSION"));

pub(super) const DEFAULT_VUS: &str = "100";
pub(super) const DEFAULT_DURATION: &str = "30s";
pub(super) const DEFAULT_PACE: &str = "1s";
pub(super) const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub(super) const DEFAULT_AMOUNT: &str = "1";
