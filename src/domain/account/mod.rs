//! Account domain module.
//!
//! Guards the irreversible "delete all data" action.

mod confirmation;

pub use confirmation::{
    authorize_deletion, ConfirmationDecision, DeletionAuthorization, DELETION_CONFIRMATION_TOKEN,
    DELETION_PROMPT, DELETION_WARNING,
};
