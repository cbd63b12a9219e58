use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl Default for UserProfile {
    /// Shown until the user edits their profile.
    fn default() -> Self {
        Self {
            name: "User".into(),
            email: "user@example.com".into(),
        }
    }
}
