mod workflow_filesystem;

pub use workflow_filesystem::WorkflowFilesystem;
