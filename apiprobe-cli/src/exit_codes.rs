/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
/// Bad input: unreadable spec or context file, unknown operation, no base URL.
pub const VALIDATION_FAILED: i32 = 2;
/// The run completed but at least one step failed.
pub const RUN_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
