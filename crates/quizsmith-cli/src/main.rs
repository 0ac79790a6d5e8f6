//! quizsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizsmith",
    version,
    about = "LLM-powered study-test generator and trainer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new test and store it
    Generate {
        /// Subject area, e.g. "Linear Algebra"
        #[arg(long)]
        subject: String,

        /// Comma-separated focus topics
        #[arg(long)]
        topics: Option<String>,

        /// Difficulty: beginner, intermediate, advanced
        #[arg(long, default_value = "intermediate")]
        difficulty: String,

        /// Provider/model override, e.g. "groq/llama3-70b-8192"
        #[arg(long)]
        model: Option<String>,

        /// Directory for stored tests and results
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a stored test interactively
    Take {
        /// Id of the test to take
        test_id: Uuid,

        /// Time budget in seconds
        #[arg(long, default_value_t = quizsmith_core::session::TIME_LIMIT_SECS)]
        time_limit: u64,

        /// Directory for stored tests and results
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored tests
    List {
        /// Directory for stored tests and results
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show result history and progress
    Results {
        /// Restrict to one test
        #[arg(long)]
        test_id: Option<Uuid>,

        /// Directory for stored tests and results
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a learning pathway
    Pathway {
        /// What to learn, e.g. "Rust"
        #[arg(long)]
        goal: String,

        /// Current level: beginner, intermediate, advanced
        #[arg(long, default_value = "beginner")]
        level: String,

        /// Weekly time commitment in hours, e.g. "5-10"
        #[arg(long, default_value = "5-10")]
        hours: String,

        /// Preferred learning method (repeatable)
        #[arg(long)]
        method: Vec<String>,

        /// Provider/model override
        #[arg(long)]
        model: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            subject,
            topics,
            difficulty,
            model,
            data_dir,
            config,
        } => commands::generate::execute(subject, topics, difficulty, model, data_dir, config).await,
        Commands::Take {
            test_id,
            time_limit,
            data_dir,
            config,
        } => commands::take::execute(test_id, time_limit, data_dir, config).await,
        Commands::List { data_dir, config } => commands::list::execute(data_dir, config).await,
        Commands::Results {
            test_id,
            data_dir,
            config,
        } => commands::results::execute(test_id, data_dir, config).await,
        Commands::Pathway {
            goal,
            level,
            hours,
            method,
            model,
            config,
        } => commands::pathway::execute(goal, level, hours, method, model, config).await,
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
