use serde::{Deserialize, Serialize};

/// One parsed mailbox from an address header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub name: String,
    pub email: String,
}

impl Mailbox {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
        }
    }

    /// A mailbox without an email is a parse miss the caller drops.
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn domain(&self) -> Option<&str> {
        super::domain_of(&self.email)
    }
}
