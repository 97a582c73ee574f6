//! Interactive shell: prompt/banner producers and the session loop.

pub mod display;
pub mod session;

pub use display::{DisplayBuilder, DisplayContext, DisplayText, default_banner, default_prompt};
pub use session::{SessionState, ShellSession};
