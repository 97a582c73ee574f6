//! The shell's read-dispatch-print loop.

use tracing::{debug, info, warn};

use crate::cli::InvocationMode;
use crate::cli::dispatch::{Context, Dispatcher, Outcome, Streams};
use crate::cli::parser::OptionValues;
use crate::error::HandlerError;
use crate::tree::{ActionNode, CommandTree, Event};

use super::display::{DisplayContext, default_banner, default_prompt};

/// Line treated as input when the reader reaches end of input.
const EOF_LINE: &str = "exit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Started,
    Running,
    Stopped,
}

/// One interactive session over a command tree.
pub struct ShellSession<'t> {
    tree: &'t CommandTree,
    node: &'t ActionNode,
    options: OptionValues,
    counter: u64,
    exit_code: i32,
    state: SessionState,
}

impl<'t> ShellSession<'t> {
    /// `node` is the shell action and `options` the values its invocation
    /// was given; both are exposed to hooks.
    pub fn new(tree: &'t CommandTree, node: &'t ActionNode, options: OptionValues) -> Self {
        Self {
            tree,
            node,
            options,
            counter: 1,
            exit_code: 0,
            state: SessionState::Started,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of the next line to be read.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Run the session to completion and return its exit code.
    ///
    /// Once started, the session always stops through [`ShellSession::stop`],
    /// even when reading or writing a line fails.
    pub fn run(&mut self, streams: &mut Streams<'_>) -> Result<i32, HandlerError> {
        self.start(streams)?;
        let looped = self.run_lines(streams);
        if let Err(err) = &looped {
            warn!(error = %err, "shell session interrupted");
        }
        let stopped = self.stop(streams);
        looped?;
        stopped?;
        Ok(self.exit_code)
    }

    fn run_lines(&mut self, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        while self.state == SessionState::Running {
            self.step(streams)?;
        }
        Ok(())
    }

    /// Write the banner and fire start hooks.
    pub fn start(&mut self, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        let ctx = self.display_context();
        let banner = match self.tree.shell().banner() {
            Some(banner) => banner.render(&ctx),
            None => default_banner(&ctx),
        };
        writeln!(streams.output, "{banner}")?;
        self.fire(Event::ShellStart, streams)?;
        self.state = SessionState::Running;
        info!(command = self.tree.name(), "shell session started");
        Ok(())
    }

    /// Prompt, read and process one line.
    pub fn step(&mut self, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        let prompt = self.prompt();
        write!(streams.output, "{prompt}")?;
        streams.output.flush()?;

        // Invalid UTF-8 is replaced rather than failing the whole session.
        let mut bytes = Vec::new();
        let read = streams.input.read_until(b'\n', &mut bytes)?;
        let buf = String::from_utf8_lossy(&bytes);
        let at_eof = read == 0;
        let line = if at_eof {
            EOF_LINE
        } else {
            buf.trim_end_matches(['\r', '\n'])
        };
        if at_eof || self.tree.shell().echo_input() {
            writeln!(streams.output, "{line}")?;
        }
        self.counter += 1;

        match line.trim() {
            "" => {}
            "exit" | "quit" => self.state = SessionState::Stopped,
            command => self.dispatch_line(command, streams)?,
        }
        Ok(())
    }

    /// Fire stop hooks and write the closing line.
    pub fn stop(&mut self, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        self.state = SessionState::Stopped;
        self.fire(Event::ShellStop, streams)?;
        writeln!(streams.output, "shell exited with code {}", self.exit_code)?;
        info!(code = self.exit_code, "shell session stopped");
        Ok(())
    }

    fn dispatch_line(&mut self, line: &str, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
        match Dispatcher::new(self.tree, InvocationMode::Shell).dispatch(&tokens, streams) {
            Ok(Outcome::Done) => {}
            Ok(Outcome::Exit(code)) => {
                self.exit_code = code;
                self.state = SessionState::Stopped;
            }
            Err(err) => {
                debug!(line, error = %err, "shell line failed");
                writeln!(streams.output, "{err}")?;
            }
        }
        Ok(())
    }

    fn fire(&self, event: Event, streams: &mut Streams<'_>) -> Result<(), HandlerError> {
        for hook in self.tree.shell().hooks(event) {
            let mut ctx = Context::new(
                self.node,
                &self.options,
                &[],
                self.tree.painter(),
                &mut *streams.output,
            );
            hook(&mut ctx)?;
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        let ctx = self.display_context();
        match self.tree.shell().prompt() {
            Some(prompt) => prompt.render(&ctx),
            None => default_prompt(&ctx),
        }
    }

    fn display_context(&self) -> DisplayContext<'t> {
        DisplayContext {
            command: self.tree.name(),
            invocation: self.counter,
            painter: self.tree.painter(),
        }
    }
}
