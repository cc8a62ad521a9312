pub mod task;
pub mod user;

pub use task::{Task, TaskInput, TaskUpdate};
pub use user::{normalize_email, User};
