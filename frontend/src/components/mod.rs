pub mod contact_info_modal;
pub mod new_contact_modal;

pub use contact_info_modal::*;
pub use new_contact_modal::*;
