//! Project and task types returned by the API.
//!
//! These mirror the server's JSON. Business rules live on the server; the
//! types only give the payloads a shape.

mod project;
mod task;

pub use project::{Project, ProjectFilter, ProjectMember, ProjectOwner, ProjectStatus};
pub use task::{
    NewTask, Task, TaskAssignee, TaskPriority, TaskProject, TaskStatus, TaskUpdate, TaskUser,
};
