use serde::{Deserialize, Serialize};

/// Replacement string shown in place of a collected password.
pub const MASKED_PASSWORD: &str = "********";

/// The registration data collected so far.
///
/// The registration service owns the canonical snapshot; the chat client only
/// mirrors the latest copy it received and replaces it wholesale on every
/// reply. Fields are `None` until the corresponding answer has been accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedInfo {
    /// The registrant's display name.
    pub name: Option<String>,

    /// The chosen login name.
    pub username: Option<String>,

    /// The chosen password, stored verbatim.
    pub password: Option<String>,

    /// Workplace or school.
    pub workplace: Option<String>,
}

impl CollectedInfo {
    /// Create an empty snapshot with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once every field has been collected.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.username.is_some()
            && self.password.is_some()
            && self.workplace.is_some()
    }

    /// Returns a display copy with the password replaced by
    /// [`MASKED_PASSWORD`].
    ///
    /// The canonical snapshot is never mutated; masking applies only to the
    /// derived copy handed to rendering.
    pub fn masked(&self) -> Self {
        let mut display = self.clone();
        if display.password.is_some() {
            display.password = Some(MASKED_PASSWORD.to_string());
        }
        display
    }
}
