use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use textbook_core::augmentation::AugmentationKind;
use textbook_core::profile::{
    ExperienceLevel, HardwareBackground, Interest, ProgrammingLanguage, SoftwareBackground,
};
use textbook_infrastructure::TextbookPaths;

mod commands;
mod context;
mod logging;

use commands::auth::SignupArgs;
use context::AppContext;

#[derive(Parser)]
#[command(name = "textbook")]
#[command(about = "Physical AI Textbook companion - profile, personalization, translation and tutor chat", long_about = None)]
struct Cli {
    /// Keep config and data under this directory instead of the platform defaults
    #[arg(long, global = true, env = "TEXTBOOK_HOME")]
    home: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and answer the background questions
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        level: ExperienceLevel,
        /// none, student, webdev, data, ml, systems or other
        #[arg(long)]
        software: Option<SoftwareBackground>,
        /// none, arduino, raspi, robotics, professional, mechanical or electrical
        #[arg(long)]
        hardware: Option<HardwareBackground>,
        /// Repeatable, e.g. --language Python --language "C++"
        #[arg(long = "language")]
        languages: Vec<ProgrammingLanguage>,
        /// Repeatable, e.g. --interest "AI/ML" --interest Drones
        #[arg(long = "interest")]
        interests: Vec<Interest>,
    },
    /// Sign in with the account stored on this device
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored account
    Logout,
    /// Show who is signed in
    Whoami,
    /// Insert a personalized summary into a Markdown chapter
    Personalize {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Insert an Urdu translation into a Markdown chapter
    Translate {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ask the AI tutor; without a question, start an interactive session
    Chat {
        /// Text to ask about, as if highlighted on the page
        #[arg(long)]
        selection: Option<String>,
        question: Vec<String>,
    },
    /// Check that the backend is reachable
    Health,
    /// Inspect or create config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths =
        TextbookPaths::new(cli.home.as_deref()).context("Failed to resolve textbook directories")?;
    let _log_guard = logging::init_logging(&paths.logs_dir(), &cli.log_level)?;
    let ctx = AppContext::load(paths)?;

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
            level,
            software,
            hardware,
            languages,
            interests,
        } => commands::auth::signup(
            &ctx,
            SignupArgs {
                name,
                email,
                password,
                level,
                software,
                hardware,
                languages,
                interests,
            },
        )?,
        Commands::Signin { email, password } => commands::auth::signin(&ctx, &email, &password)?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx)?,
        Commands::Personalize { file, output } => {
            commands::augment::run(&ctx, AugmentationKind::Personalize, &file, output.as_deref())
                .await?
        }
        Commands::Translate { file, output } => {
            commands::augment::run(&ctx, AugmentationKind::Translate, &file, output.as_deref())
                .await?
        }
        Commands::Chat {
            selection,
            question,
        } => {
            let question = question.join(" ");
            let question = (!question.trim().is_empty()).then_some(question.as_str());
            commands::chat::run(&ctx, selection.as_deref(), question).await?
        }
        Commands::Health => commands::config::health(&ctx).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx)?,
            ConfigAction::Init => commands::config::init(&ctx)?,
        },
    }

    Ok(())
}
