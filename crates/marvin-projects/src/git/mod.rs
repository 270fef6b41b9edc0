//! Git operations for generated projects

mod init;

pub use init::{check_git_available, init_repository};
