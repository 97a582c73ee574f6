//! `cmdt` - a sample command tree driven by cmdtree.
//!
//! ```bash
//! cmdt greet --name Ada        # hello Ada
//! cmdt math add 2 3            # 5
//! cmdt echo --upper a b        # A B
//! cmdt shell                   # interactive session
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;

use cmdtree::cli::entrypoint;
use cmdtree::{
    Action, CmdtreeConfig, ColorMode, CommandBuilder, CommandTree, Context, Event, HandlerError, OptionSpec,
    OptionValue, Outcome, ShellBuilder,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "cmdt")]
#[command(about = "Sample command tree with an interactive shell")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Config file (default: .cmdtree/config.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Colour mode (auto, always, never)
    #[arg(long)]
    color: Option<ColorMode>,

    /// Action path, options and arguments for the command tree
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

// ============================================================================
// Sample Tree
// ============================================================================

fn numbers(ctx: &Context<'_>) -> Result<Vec<i64>, HandlerError> {
    ctx.arguments()
        .iter()
        .map(|arg| arg.parse::<i64>().map_err(HandlerError::from))
        .collect()
}

/// Trims `--name` and refuses blank names.
fn greeting_name(value: &OptionValue) -> Result<OptionValue> {
    let name = value.as_text().context("name must be text")?.trim();
    anyhow::ensure!(!name.is_empty(), "name must not be blank");
    Ok(name.into())
}

fn math_action() -> Action {
    Action::new("math")
        .description("integer arithmetic")
        .action(
            Action::new("add")
                .description("add all arguments")
                .handler(|ctx| {
                    let sum: i64 = numbers(ctx)?.into_iter().sum();
                    ctx.println(sum)?;
                    Ok(Outcome::Done)
                }),
        )
        .action(
            Action::new("mul")
                .description("multiply all arguments")
                .handler(|ctx| {
                    let product: i64 = numbers(ctx)?.into_iter().product();
                    ctx.println(product)?;
                    Ok(Outcome::Done)
                }),
        )
}

fn build_tree(args: &Args, config: &CmdtreeConfig) -> Result<CommandTree> {
    let mut builder = CommandBuilder::new("cmdt")
        .description("sample command tree")
        .arguments(false)
        .config(config)
        .action(
            Action::new("greet")
                .description("print a greeting")
                .option(
                    OptionSpec::new("name")
                        .short('n')
                        .description("who to greet")
                        .with_default("world")
                        .operator(|value| greeting_name(&value).map_err(|err| HandlerError::from_anyhow(&err))),
                )
                .option(OptionSpec::numeric("times").short('t').with_default(1i64))
                .handler(|ctx| {
                    let name = ctx.text("name").unwrap_or_default().to_string();
                    let times = ctx.number("times").unwrap_or(1);
                    for _ in 0..times {
                        let line = format!("hello {}", ctx.painter().green(&name));
                        ctx.println(line)?;
                    }
                    Ok(Outcome::Done)
                }),
        )
        .action(math_action())
        .action(
            Action::new("echo")
                .description("print the arguments")
                .option(OptionSpec::flag("upper").short('u'))
                .handler(|ctx| {
                    let mut line = ctx.arguments().join(" ");
                    if ctx.flag("upper") {
                        line = line.to_uppercase();
                    }
                    ctx.println(line)?;
                    Ok(Outcome::Done)
                }),
        )
        .action(
            Action::new("exit-with")
                .description("stop with the given exit code")
                .handler(|ctx| {
                    let code = match ctx.arguments().first() {
                        Some(code) => code.parse::<i32>()?,
                        None => 0,
                    };
                    Ok(Outcome::Exit(code))
                }),
        )
        .on(Event::ShellStop, |ctx| {
            debug!(action = ctx.path(), "shell stop hook");
            Ok(())
        });

    let mut shell = ShellBuilder::enabled().description("start an interactive session");
    if std::io::stdin().is_terminal() {
        shell = shell.echo_input(false);
    }
    builder = builder.shell(shell);
    if let Some(color) = args.color {
        builder = builder.color(color);
    }

    builder.build().context("invalid command tree")
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.parse().unwrap_or_default()),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            CmdtreeConfig::load_from_path(path)
        }
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            CmdtreeConfig::load(&cwd)
        }
    };
    debug!(?config, "loaded configuration");

    let tree = build_tree(&args, &config)?;
    Ok(entrypoint::run(&tree, &args.command))
}
