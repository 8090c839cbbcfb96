use std::fmt;

pub const USERNAME_PREFIX: &str = "testuser_";

/// Identity of one virtual user, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualUser {
    index: u64,
}

impl VirtualUser {
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }

    #[must_use]
    pub const fn index(self) -> u64 {
        self.index
    }

    /// Account name registered and authenticated by this user on every
    /// iteration.
    #[must_use]
    pub fn username(self) -> String {
        format!("{}{}", USERNAME_PREFIX, self.index)
    }
}

impl fmt::Display for VirtualUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", USERNAME_PREFIX, self.index)
    }
}
