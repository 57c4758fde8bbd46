pub mod todo;
pub mod user;

pub use todo::{ItemInput, Todo, TodoInput, TodoItem};
pub use user::{PublicUser, User};
