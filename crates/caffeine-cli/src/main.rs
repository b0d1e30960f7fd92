use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "caffeine-cli", version, about = "Caffeine tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Caffeine remaining over time
    Curve(commands::curve::CurveArgs),
    /// Place each intake on the decay curve
    Annotate(commands::annotate::AnnotateArgs),
    /// Today's intake against the daily allowance
    Meter(commands::meter::MeterArgs),
    /// Caffeine logs on the server
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Ask the AI assistant a question
    Chat(commands::chat::ChatArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn init_logging() {
    // stdout carries command output, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Annotate(args) => commands::annotate::run(args),
        Commands::Meter(args) => commands::meter::run(args),
        Commands::Log { action } => commands::log::run(action),
        Commands::Chat(args) => commands::chat::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "caffeine-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
