pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskChanges, DEFAULT_TASK_STATUS};
pub use user::{NewUser, User, UserRecord};
