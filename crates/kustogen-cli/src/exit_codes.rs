//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Config error - missing or invalid generator config
pub const CONFIG_ERROR: i32 = 2;

/// Resolve error - registry unreachable, chart or version not found
pub const RESOLVE_ERROR: i32 = 3;

/// Render error - engine missing or failed
pub const RENDER_ERROR: i32 = 4;

/// IO error - listing, copying or writing output failed
pub const IO_ERROR: i32 = 5;
