//! Entitlement-gated Pro panel controller and its view model.

mod pro_controller;
mod view;

pub use pro_controller::{
    restore_confirmation_message, ControllerOutcome, ProController, CHECKOUT_OPENED_MESSAGE,
    DELETE_SUCCESS_MESSAGE, PRO_REQUIRED_MESSAGE, RESTORE_SUCCESS_MESSAGE,
};
pub use view::{
    AccountAction, FeatureTile, PrimaryAction, ProPanel, UpgradeOffer, PRO_BENEFITS, PRO_PRICE,
};
