//! Handler trait and outcome values.

use crate::error::HandlerError;

use super::Context;

/// What a handler asks the engine to do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Finished normally.
    #[default]
    Done,
    /// Finished; stop a running shell session and report this exit code.
    Exit(i32),
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Done => 0,
            Outcome::Exit(code) => code,
        }
    }
}

pub type HandlerResult = Result<Outcome, HandlerError>;

/// Code run when an action is invoked.
///
/// Closures `Fn(&mut Context) -> HandlerResult` implement it; implement it
/// directly for handlers that carry state.
pub trait Handler {
    fn call(&self, ctx: &mut Context<'_>) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&mut Context<'_>) -> HandlerResult,
{
    fn call(&self, ctx: &mut Context<'_>) -> HandlerResult {
        self(ctx)
    }
}
