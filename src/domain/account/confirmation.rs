//! Two-step confirmation for irreversible account deletion.
//!
//! Step one shows [`DELETION_WARNING`] and asks for a yes/no answer. Step two
//! shows [`DELETION_PROMPT`] and the user must type [`DELETION_CONFIRMATION_TOKEN`]
//! exactly. Only then is a [`DeletionAuthorization`] handed out, and wiping
//! the store requires one.

/// Text shown before the yes/no step.
pub const DELETION_WARNING: &str = "This will PERMANENTLY delete:\n\n\
• All notes\n\
• All settings\n\
• Your Pro license\n\n\
This CANNOT be undone. Are you absolutely sure?";

/// Prompt for the typed confirmation step.
pub const DELETION_PROMPT: &str = "Type YES to confirm deletion:";

/// The literal the user must type. Case-sensitive, not trimmed.
pub const DELETION_CONFIRMATION_TOKEN: &str = "YES";

/// Proof that the user passed both confirmation steps.
///
/// Cannot be constructed outside this module and is consumed by the wipe.
#[derive(Debug)]
pub struct DeletionAuthorization {
    _private: (),
}

impl DeletionAuthorization {
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self { _private: () }
    }
}

/// Outcome of the confirmation protocol.
#[derive(Debug)]
pub enum ConfirmationDecision {
    /// Both steps passed.
    Authorized(DeletionAuthorization),
    /// The user answered no at step one.
    Declined,
    /// The typed response was missing or not the exact token.
    TokenMismatch,
}

impl ConfirmationDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, ConfirmationDecision::Authorized(_))
    }

    pub fn into_authorization(self) -> Option<DeletionAuthorization> {
        match self {
            ConfirmationDecision::Authorized(auth) => Some(auth),
            _ => None,
        }
    }

    /// Short explanation for a decision that stops the deletion.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfirmationDecision::Authorized(_) => "Deletion confirmed.",
            ConfirmationDecision::Declined => "Deletion cancelled.",
            ConfirmationDecision::TokenMismatch => {
                "Deletion cancelled: confirmation text did not match."
            }
        }
    }
}

/// Runs both confirmation steps over the user's answers.
pub fn authorize_deletion(acknowledged: bool, typed: Option<&str>) -> ConfirmationDecision {
    if !acknowledged {
        return ConfirmationDecision::Declined;
    }
    match typed {
        Some(response) if response == DELETION_CONFIRMATION_TOKEN => {
            ConfirmationDecision::Authorized(DeletionAuthorization { _private: () })
        }
        _ => ConfirmationDecision::TokenMismatch,
    }
}
