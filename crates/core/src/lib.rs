pub mod config;
pub mod file;

pub use config::Config;
pub use file::{FileKind, UploadedFile};
