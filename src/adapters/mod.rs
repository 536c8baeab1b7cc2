pub mod filesystem;
pub mod yaml;

pub use filesystem::FilesystemStore;
