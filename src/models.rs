pub mod note;
pub mod page;
