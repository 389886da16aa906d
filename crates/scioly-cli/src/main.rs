//! scioly CLI: Science Olympiad study and timed drill tool.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;
mod export;
mod terminal;

#[derive(Parser)]
#[command(
    name = "scioly",
    version,
    about = "Science Olympiad question bank, study mode and timed drills"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads the question bank.
#[derive(Args, Debug, Clone, Default)]
pub struct BankArgs {
    /// Question bank JSON file (overrides the config)
    #[arg(long)]
    pub bank: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Options for study and drill runs.
#[derive(Args, Debug, Clone)]
pub struct QuizArgs {
    #[command(flatten)]
    pub bank: BankArgs,

    /// Event to quiz on (defaults to the config, then the first event)
    #[arg(long)]
    pub event: Option<String>,

    /// Topics to include, comma-separated (default: all)
    #[arg(long)]
    pub topics: Option<String>,

    /// Difficulties to include, comma-separated (default: all)
    #[arg(long)]
    pub difficulties: Option<String>,

    /// Shuffle seed for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep bank order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Output directory for the cheat sheet
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format: text, html, json, all, none
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter question bank and config
    Init,

    /// Check a question bank for problems
    Validate {
        #[command(flatten)]
        bank: BankArgs,
    },

    /// List the questions in the bank
    View {
        #[command(flatten)]
        bank: BankArgs,

        /// Only show this event
        #[arg(long)]
        event: Option<String>,

        /// Print the questions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a question to the bank
    Add {
        #[command(flatten)]
        bank: BankArgs,

        /// Event the question belongs to (default: Unknown)
        #[arg(long)]
        event: Option<String>,

        /// Question text
        #[arg(long)]
        question: String,

        /// Correct answer
        #[arg(long)]
        answer: String,

        /// Topic within the event
        #[arg(long)]
        topic: Option<String>,

        /// Difficulty label
        #[arg(long)]
        difficulty: Option<String>,

        /// Answer option (repeat for each option)
        #[arg(long = "option")]
        options: Vec<String>,

        /// Hint shown on request
        #[arg(long)]
        hint: Option<String>,
    },

    /// Go through every selected question once
    Study(QuizArgs),

    /// Answer as many questions as possible before time runs out
    Drill {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Time limit in seconds (default: seconds_per_question per question)
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<String>,
    },

    /// Interactive numbered menu
    Menu {
        #[command(flatten)]
        bank: BankArgs,

        /// Event to start on
        #[arg(long)]
        event: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scioly=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::View { bank, event, json } => commands::view::execute(bank, event, json),
        Commands::Add {
            bank,
            event,
            question,
            answer,
            topic,
            difficulty,
            options,
            hint,
        } => commands::add::execute(
            bank,
            commands::add::NewQuestion {
                event,
                question,
                answer,
                topic,
                difficulty,
                options,
                hint,
            },
        ),
        Commands::Study(quiz) => commands::quiz::study(quiz),
        Commands::Drill { quiz, limit } => commands::quiz::drill(quiz, limit),
        Commands::Menu { bank, event } => commands::menu::execute(bank, event),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
