//! TaskFlow CLI
//!
//! Command-line front end for TaskFlow:
//! - Log in and out (the session persists between runs)
//! - Show the dashboard figures
//! - Run the time tracker

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use taskflow::client::ApiClient;
use taskflow::config::{generate_default_config, Config};
use taskflow::dashboard::{weekly_bars, Dashboard, DashboardState};
use taskflow::guard::{Admission, Route, RouterGuard};
use taskflow::session::{FileStorage, SessionStore};
use taskflow::timer::{Stopwatch, DASHBOARD_START_SECS};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TaskFlow task management from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API origin (overrides config and TASKFLOW_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show dashboard statistics, projects and team
    Dashboard {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run the time tracker
    Timer {
        /// How long to run, in seconds
        #[arg(short, long, default_value = "5")]
        seconds: u64,
        /// Starting value of the counter
        #[arg(long, default_value_t = DASHBOARD_START_SECS)]
        from: u64,
    },

    /// Print or write a default config file
    Config {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    taskflow::logging::init(&config.logging, "");

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
            Ok(())
        }

        Commands::Timer { seconds, from } => run_timer(seconds, from).await,

        command => {
            let session = open_session(&config)?;
            match command {
                Commands::Login { email, password } => {
                    let record = session
                        .login(&email, &password)
                        .await
                        .context("Login failed")?;
                    println!(
                        "Logged in as {}",
                        record.display_name().or(record.email()).unwrap_or(&email)
                    );
                    Ok(())
                }
                Commands::Logout => {
                    session.logout();
                    println!("Logged out");
                    Ok(())
                }
                Commands::Whoami => {
                    match session.user() {
                        Some(user) => println!("{}", user.to_json()),
                        None => println!("Not logged in"),
                    }
                    Ok(())
                }
                Commands::Dashboard { format } => show_dashboard(&session, format).await,
                Commands::Config { .. } | Commands::Timer { .. } => Ok(()),
            }
        }
    }
}

fn open_session(config: &Config) -> anyhow::Result<SessionStore> {
    let client = ApiClient::from_config(&config.api).context("Failed to create API client")?;
    let storage = Arc::new(FileStorage::new(config.session.storage_path()));
    Ok(SessionStore::new(client, storage))
}

async fn show_dashboard(session: &SessionStore, format: OutputFormat) -> anyhow::Result<()> {
    if let Admission::Redirect(Route::Login) = RouterGuard::new(session).admit(Route::Dashboard) {
        bail!("Not logged in. Run `taskflow login --email <EMAIL> --password <PASSWORD>` first.");
    }

    let dashboard = Dashboard::mount(session.client().clone(), session);
    let state = dashboard.settled().await;
    dashboard.unmount();

    match format {
        OutputFormat::Json => {
            let body = json!({
                "stats": state.stats(),
                "projects": state.projects(),
                "team": state.team(),
                "weekly": weekly_bars(),
                "errors": section_errors(&state),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => print_dashboard(&state),
    }
    Ok(())
}

fn section_errors(state: &DashboardState) -> serde_json::Value {
    json!({
        "overview": state.overview.error,
        "products": state.products.error,
        "users": state.users.error,
    })
}

fn print_dashboard(state: &DashboardState) {
    let stats = state.stats();

    println!("{}", Route::Dashboard.title());
    println!();
    println!("Projects");
    println!("{}", "-".repeat(40));
    println!("{:<20} {:>8}", "Total", stats.total_projects);
    println!("{:<20} {:>8}", "Ended", stats.ended_projects);
    println!("{:<20} {:>8}", "Running", stats.running_projects);
    println!("{:<20} {:>8}", "Pending", stats.pending_projects);
    println!("{:<20} {:>8}", "Completed", stats.completion_label());
    println!();

    println!("{:<30} {}", "Project", "Due");
    println!("{}", "-".repeat(46));
    for project in state.projects() {
        println!("{:<30} {}", project.name, project.due);
    }
    println!();

    println!("{:<22} {:<42} {}", "Member", "Task", "Status");
    println!("{}", "-".repeat(78));
    for member in state.team() {
        println!(
            "{:<22} {:<42} {}",
            member.name,
            member.task,
            member.status.label()
        );
    }
    println!();

    let bars: Vec<String> = weekly_bars()
        .iter()
        .map(|b| format!("{}:{}", b.day, b.height))
        .collect();
    println!("Weekly: {}", bars.join(" "));

    for (section, error) in [
        ("overview", &state.overview.error),
        ("products", &state.products.error),
        ("users", &state.users.error),
    ] {
        if let Some(error) = error {
            eprintln!("warning: {} unavailable ({})", section, error);
        }
    }
}

async fn run_timer(seconds: u64, from: u64) -> anyhow::Result<()> {
    let mut stopwatch = Stopwatch::new(from);
    stopwatch.start();
    println!("{}", stopwatch.display());

    let mut ticks = tokio::time::interval(Duration::from_secs(1));
    ticks.tick().await;
    for _ in 0..seconds {
        tokio::select! {
            _ = ticks.tick() => println!("{}", stopwatch.display()),
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    stopwatch.stop();
    println!("Stopped at {}", stopwatch.display());
    Ok(())
}
