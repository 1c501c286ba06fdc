//! Exit code constants for the agentmd CLI.
//!
//! - 0: Success
//! - 1: Validation failure (at least one error-severity diagnostic)
//! - 2: User error (bad args, unknown agent, unloadable agent)
//! - 3: Configuration error (invalid `agentmd.yaml`)
//!
//! Warnings alone never fail a run.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Validation failure: one or more agent files reported error-severity diagnostics.
pub const VALIDATION_FAILURE: i32 = 1;

/// User error: bad arguments, missing agent, or an agent that cannot be loaded.
pub const USER_ERROR: i32 = 2;

/// Tool configuration could not be read or failed validation.
pub const CONFIG_ERROR: i32 = 3;
