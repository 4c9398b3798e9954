//! Browser integration adapters.

mod linked_session;
mod tab_opener;

pub use linked_session::NoLinkedSession;
pub use tab_opener::LoggingTabOpener;
