//! Built-in tool implementations for Swarmlet agents.
//!
//! The set mirrors what the demo drivers need: run shell commands, read files,
//! write files. All of them follow the handler contract — anticipated failures
//! (denied commands, non-zero exits, I/O errors) come back as
//! `{"success": false, "error": ...}` data so a single bad call never aborts
//! the enclosing agent turn; only malformed arguments take the error path.

pub mod file_read;
pub mod file_write;
pub mod shell;

pub use file_read::FileReadTool;
pub use file_write::FileWriteTool;
pub use shell::ShellTool;

use std::sync::Arc;
use swarmlet_core::ToolSet;

/// Create the default tool set.
///
/// The shell tool carries a conservative allowlist of common read-mostly
/// commands; file tools are unrestricted.
pub fn default_toolset() -> ToolSet {
    let safe_commands = vec![
        "ls".into(),
        "cat".into(),
        "head".into(),
        "tail".into(),
        "echo".into(),
        "pwd".into(),
        "date".into(),
        "wc".into(),
        "grep".into(),
        "find".into(),
        "which".into(),
        "mkdir".into(),
        "git".into(),
        "cargo".into(),
        "node".into(),
        "npm".into(),
        "python".into(),
    ];
    ToolSet::new()
        .with(Arc::new(ShellTool::new(safe_commands)))
        .with(Arc::new(FileReadTool))
        .with(Arc::new(FileWriteTool))
}
