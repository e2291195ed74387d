use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use study_quiz::config::{QuizConfig, load_config_from};
use study_quiz::GradingScale;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "study-quiz", version, about = "Multiple-choice quizzes from YAML question sets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// YAML file to preload into the import editor
    #[arg(short, long, global = true)]
    questions: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for the saved question set and the log file
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Base URL of the subject catalog
    #[arg(long, global = true)]
    catalog_url: Option<String>,

    /// Report the score without a grade
    #[arg(long, global = true)]
    score_only: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive quiz (default)
    Run,

    /// Validate a YAML question set
    Check {
        /// Path to the YAML file
        file: PathBuf,
    },

    /// Score a list of answers against a YAML question set
    Grade {
        /// Path to the YAML file
        file: PathBuf,

        /// Chosen option per question, zero-based; "-" leaves one unanswered
        #[arg(long, default_value = "")]
        answers: String,
    },
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<QuizConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.storage_dir {
            config.storage_dir = Some(dir.clone());
        }
        if let Some(url) = &self.catalog_url {
            config.catalog_url = url.clone();
        }
        if self.score_only {
            config.grading = GradingScale::ScoreOnly;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        None | Some(Commands::Run) => commands::run::execute(config, cli.questions).await,
        Some(Commands::Check { file }) => {
            commands::init_stderr_logging(&config);
            commands::check::execute(file)
        }
        Some(Commands::Grade { file, answers }) => {
            commands::init_stderr_logging(&config);
            commands::grade::execute(file, &answers, config.grading)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
