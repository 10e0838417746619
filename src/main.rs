//! tubesum CLI - summarize YouTube videos through the summarizer backend.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use tubesum::form::Field;
use tubesum::prompt::{self, Source, should_reprompt};
use tubesum::{ApiClient, App, Config, Console, CopyTarget, Osc52Clipboard, VideoApi};

/// Summarize YouTube videos into chapters.
#[derive(Parser, Debug)]
#[command(name = "tubesum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides config and TUBESUM_API_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to the config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a video and print its chapters.
    Summarize(SummarizeArgs),

    /// Check that the backend is up.
    Health,
}

#[derive(ClapArgs, Debug)]
struct SummarizeArgs {
    /// YouTube video URL. Prompted for when omitted.
    url: Option<String>,

    /// Gemini API key. Prompted for when omitted.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Copy the full summary to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Copy chapter N (1-based) to the clipboard.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    copy_chapter: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    config.apply_env();
    config.apply_base_url_override(cli.base_url.clone());
    config.validate().context("Invalid configuration")?;

    let console = Console::from_config(&config.display);
    let app = App::new(ApiClient::new(config.api.base_url.clone()));

    match cli.command {
        Command::Health => run_health(&app, &console).await,
        Command::Summarize(args) => run_summarize(app, &console, args).await,
    }
}

async fn run_health(app: &App<ApiClient>, console: &Console) -> Result<ExitCode> {
    console.info(&format!("Checking {}", app.api().base_url()));

    match app.check_health().await {
        Ok(health) => {
            let mut line = format!("{} ({})", health.status, health.service);
            if let Some(version) = &health.version {
                line.push_str(&format!(" v{}", version));
            }
            console.success(&line);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            console.error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_summarize<A: VideoApi>(
    mut app: App<A>,
    console: &Console,
    args: SummarizeArgs,
) -> Result<ExitCode> {
    let interactive = io::stdin().is_terminal();

    let (url, url_source) = match args.url {
        Some(url) => (url, Source::Flag),
        None => (ask(console, Field::YoutubeUrl)?, Source::Prompt),
    };
    let (key, key_source) = match args.api_key {
        Some(key) => (key, Source::Flag),
        None => (ask(console, Field::GeminiApiKey)?, Source::Prompt),
    };
    app.form_mut().set_youtube_url(url);
    app.form_mut().set_gemini_api_key(key);

    let request = loop {
        if let Some(request) = app.form_mut().submit(|request| request) {
            break request;
        }

        print!("{}", app.form().render(console));
        if !should_reprompt(interactive, url_source, key_source) {
            return Ok(ExitCode::FAILURE);
        }

        if app.form().errors().get(Field::YoutubeUrl).is_some() {
            let url = ask(console, Field::YoutubeUrl)?;
            app.form_mut().set_youtube_url(url);
        }
        if app.form().errors().get(Field::GeminiApiKey).is_some() {
            let key = ask(console, Field::GeminiApiKey)?;
            app.form_mut().set_gemini_api_key(key);
        }
    };

    let spinner = create_spinner(tubesum::form::submit_label(true));
    app.handle_submit(request).await;
    spinner.finish_and_clear();

    if let Some(message) = app.error() {
        eprintln!("{}", console.error_banner(message));
        return Ok(ExitCode::FAILURE);
    }

    let now = Instant::now();
    let Some(view) = app.result_mut() else {
        return Ok(ExitCode::FAILURE);
    };

    let mut clipboard = Osc52Clipboard::stdout();
    if let Some(n) = args.copy_chapter {
        let target = CopyTarget::Chapter(n as usize - 1);
        if view.copy_text(target).is_none() {
            console.warning(&format!(
                "Chapter {} does not exist ({} chapters)",
                n,
                view.result().chapters.len()
            ));
        } else {
            view.copy(target, &mut clipboard, now);
        }
    }
    if args.copy {
        view.copy_all(&mut clipboard, now);
    }

    println!();
    print!("{}", view.render(console, now));

    Ok(ExitCode::SUCCESS)
}

/// Prompts for one field. The API key is read without echo.
fn ask(console: &Console, field: Field) -> Result<String> {
    let hint = match field {
        Field::YoutubeUrl => "https://www.youtube.com/watch?v=...",
        Field::GeminiApiKey => "Enter your Gemini API key",
    };
    print!("{} {}: ", field.label(), console.muted(&format!("({})", hint)));
    io::stdout().flush()?;

    let value = match field {
        Field::YoutubeUrl => prompt::read_line(field.label()),
        Field::GeminiApiKey => prompt::read_secret(field.label()),
    };
    value.with_context(|| format!("Failed to read {}", field.label()))
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
