//! Database entities.

#![allow(missing_docs)]

pub mod complaint;
pub mod complaint_history;
pub mod department;
pub mod nature_type;
pub mod notification;
pub mod user;

pub use complaint::Entity as Complaint;
pub use complaint_history::Entity as ComplaintHistory;
pub use department::Entity as Department;
pub use nature_type::Entity as NatureType;
pub use notification::Entity as Notification;
pub use user::Entity as User;
