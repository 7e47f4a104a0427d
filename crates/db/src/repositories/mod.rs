//! Database repositories.

#![allow(missing_docs)]

pub mod complaint;
pub mod complaint_history;
pub mod department;
pub mod nature_type;
pub mod notification;
pub mod user;

pub use complaint::{ComplaintFilter, ComplaintRepository};
pub use complaint_history::ComplaintHistoryRepository;
pub use department::DepartmentRepository;
pub use nature_type::NatureTypeRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
