use serde::Serialize;

const STATUS_OK: u16 = 200;
const STATUS_BAD_REQUEST: u16 = 400;
const STATUS_INTERNAL_ERROR: u16 = 500;

/// Workflow steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Register,
    Authenticate,
    FetchProfile,
    Transfer,
    Purchase,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Register,
        Step::Authenticate,
        Step::FetchProfile,
        Step::Transfer,
        Step::Purchase,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Step::Register => "register",
            Step::Authenticate => "authenticate",
            Step::FetchProfile => "fetch_profile",
            Step::Transfer => "transfer",
            Step::Purchase => "purchase",
        }
    }

    /// Name of the check recorded for this step.
    #[must_use]
    pub const fn check_name(self) -> &'static str {
        match self {
            Step::Register => "registration succeeded",
            Step::Authenticate => "authentication succeeded",
            Step::FetchProfile => "profile fetched",
            Step::Transfer => "coins transferred",
            Step::Purchase => "item purchased",
        }
    }

    /// Whether `status` passes this step's check.
    ///
    /// Registration tolerates 500 because every iteration re-registers the
    /// same account. Transfers tolerate 400 because balances drain under load.
    #[must_use]
    pub const fn accepts(self, status: u16) -> bool {
        match self {
            Step::Register => matches!(status, STATUS_OK | STATUS_INTERNAL_ERROR),
            Step::Transfer => matches!(status, STATUS_OK | STATUS_BAD_REQUEST),
            Step::Authenticate | Step::FetchProfile | Step::Purchase => status == STATUS_OK,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Step::Register => 0,
            Step::Authenticate => 1,
            Step::FetchProfile => 2,
            Step::Transfer => 3,
            Step::Purchase => 4,
        }
    }
}
