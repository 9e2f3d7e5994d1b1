//! Agent module - the conversational wrapper around the remote model.
//!
//! The agent owns a single lazily-opened chat session and issues templated
//! requests over it:
//! 1. `invoke` sends the instructional preamble plus the user's input
//! 2. `execute_multi_step_task` sends three fixed prompts in sequence
//!    (analysis, gathering, synthesis) and combines the replies
//!
//! Remote failures are converted to user-facing strings at this boundary;
//! nothing propagates past it.

mod prompt;
mod wrapper;

pub use wrapper::{Agent, AgentInfo, InvokeResponse};
