//! Business logic services.

#![allow(missing_docs)]

pub mod actor;
pub mod complaint;
pub mod department;
pub mod email;
pub mod nature_type;
pub mod notification;
pub mod user;
pub mod workflow;

pub use actor::ActorContext;
pub use complaint::{
    ComplaintService, ComplaintWithHistory, CreateComplaintInput, ListComplaintsQuery,
    ReassignInput, UpdateStatusInput,
};
pub use department::{CreateDepartmentInput, DepartmentService, UpdateDepartmentInput};
pub use email::EmailService;
pub use nature_type::{CreateNatureTypeInput, NatureTypeService, UpdateNatureTypeInput};
pub use notification::NotificationService;
pub use user::{CreateUserInput, SignupInput, UpdateUserInput, UserService};
