mod mock_filesystem;

pub use mock_filesystem::MockFilesystem;
