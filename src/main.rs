use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use zcalc::calculator::{CalcResult, ExpressionEngine};
use zcalc::config::Config;
use zcalc::input::Input;
use zcalc::ui::{Calculator, RecordingDisplay, run_interactive};

#[derive(Parser)]
#[command(name = "zcalc", version, about = "A keyboard-driven calculator")]
struct Cli {
    /// Path to a config file (defaults to ~/.config/zcalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive terminal calculator (default)
    Interactive,

    /// Press a sequence of buttons and print the final display
    Press {
        /// Print the display after every button
        #[arg(long)]
        trace: bool,

        /// Buttons: digits, `.`, `+ - * /`, or action names such as
        /// `equals`, `sqrt`, `percent`, `toggle-sign`, `parenthesis`
        #[arg(required = true, allow_hyphen_values = true)]
        buttons: Vec<String>,
    },

    /// Evaluate a single expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    let command = cli.command.unwrap_or(Command::Interactive);
    let interactive = matches!(command, Command::Interactive);
    init_tracing(&config, cli.verbose, interactive);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "zcalc starting");

    let engine = ExpressionEngine::new(config.evaluator());

    match command {
        Command::Interactive => {
            run_interactive(engine, &config.display.error_marker)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Press { trace, buttons } => press(engine, &buttons, trace),
        Command::Eval { expression, json } => eval(&config, &expression, json),
    }
}

fn press(engine: ExpressionEngine, buttons: &[String], trace: bool) -> Result<ExitCode> {
    let inputs = buttons
        .iter()
        .map(|button| Input::from_button(button))
        .collect::<Result<Vec<_>, _>>()?;

    let mut calc = Calculator::new(engine, RecordingDisplay::new());
    for input in inputs {
        calc.dispatch(input);
    }

    let frames = calc.surface().frames();
    if trace {
        for (button, frame) in buttons.iter().zip(frames.iter().skip(1)) {
            println!("{button:>12}  {frame}");
        }
    } else if let Some(current) = calc.surface().current() {
        println!("{current}");
    }

    Ok(ExitCode::SUCCESS)
}

fn eval(config: &Config, expression: &str, json: bool) -> Result<ExitCode> {
    let result = config.evaluator().evaluate(expression);
    tracing::debug!(
        expression = result.expression(),
        success = result.is_success(),
        "evaluated"
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize result")?
        );
    } else {
        println!("{}", result.display());
    }

    Ok(match result {
        CalcResult::Success { .. } => ExitCode::SUCCESS,
        CalcResult::Error { .. } => ExitCode::FAILURE,
    })
}

fn init_tracing(config: &Config, verbose: bool, interactive: bool) {
    // Stay quiet in the interactive widget unless asked, stderr shares the screen
    let default_level = match (verbose, interactive) {
        (true, _) => "debug",
        (false, true) => "off",
        (false, false) => config.log.level.as_str(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
