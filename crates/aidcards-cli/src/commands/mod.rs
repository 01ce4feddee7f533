pub mod build;
pub mod convert;
pub mod list;
pub mod plan;
pub mod show;
pub mod summary;
pub mod validate;
