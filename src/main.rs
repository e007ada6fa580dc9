// RecurTTY: Step-by-Step Recursion Visualizer

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use recurtty::engine::algorithms::{
    InputKind, FACTORIAL_DEFAULT_N, FIBONACCI_DEFAULT_N, PALINDROME_DEFAULT_TEXT, POWER_DEFAULT_N,
};
use recurtty::engine::{Algorithm, Controller, NoPacing, PlaybackConfig, Speed};
use recurtty::ui::App;

/// Watch recursive algorithms build their call tree, step by step.
///
/// EXAMPLES:
///     recurtty factorial -n 6          Open the TUI with factorial(6) ready
///     recurtty palindrome -s level     Check a word for palindromes
///     recurtty fibonacci --headless    Print the final state without a TUI
#[derive(Parser, Debug)]
#[command(name = "recurtty", version)]
struct Cli {
    /// Algorithm to visualize: factorial, fibonacci, power, or palindrome
    #[arg(default_value = "factorial")]
    algorithm: Algorithm,

    /// Numeric input (clamped per algorithm; malformed values use the default)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    number: Option<String>,

    /// Text input for the palindrome check
    #[arg(short = 's', long)]
    text: Option<String>,

    /// Playback speed: 1, 2, 5, or max
    #[arg(long, default_value = "1")]
    speed: Speed,

    /// Delay between steps at 1x, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Run once without the TUI and print the result
    #[arg(long)]
    headless: bool,

    /// Write diagnostic logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn default_number(&self) -> String {
        let default = match self.algorithm {
            Algorithm::Fibonacci => FIBONACCI_DEFAULT_N,
            Algorithm::Power => POWER_DEFAULT_N,
            Algorithm::Factorial | Algorithm::Palindrome => FACTORIAL_DEFAULT_N,
        };
        default.to_string()
    }
}

fn init_tracing(cli: &Cli) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    // Without a log file the TUI runs with no subscriber installed

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = PlaybackConfig {
        base_delay: Duration::from_millis(cli.delay_ms),
        speed: cli.speed,
    };

    let number = cli.number.clone().unwrap_or_else(|| cli.default_number());
    let text = cli
        .text
        .clone()
        .unwrap_or_else(|| PALINDROME_DEFAULT_TEXT.to_string());

    let mut controller = Controller::new(config);
    controller.select(cli.algorithm);

    if cli.headless {
        return run_headless(&mut controller, cli.algorithm, &number, &text);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(controller, number, text);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_headless(
    controller: &mut Controller,
    algorithm: Algorithm,
    number: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.set_speed(Speed::INSTANT);

    let input = match algorithm.input_kind() {
        InputKind::Number => number,
        InputKind::Text => text,
    };
    let invocation = algorithm.invocation(number, text);
    let summary = controller.run(invocation, &mut NoPacing)?;

    println!("{} (input {:?})", summary.invocation, input);
    println!("result: {}", summary.result);
    println!("steps:  {}", summary.steps);
    println!("frames: {}", summary.frames);
    println!();

    for entry in controller.displayed().log.entries() {
        println!("[{}] {:<7} {}", entry.timestamp, entry.kind.label(), entry.message);
    }

    Ok(())
}
