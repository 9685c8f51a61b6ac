use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use postcraft_core::session::MISSING_MANUAL_FIELDS_WARNING;
use postcraft_core::{
    Composer, Controller, DEFAULT_AUDIENCE, Extractor, FetchConfig, GeminiClient, HttpFetcher, ManualInput, Render,
    Settings, Tone, fetch_file,
};
use tracing_subscriber::EnvFilter;

mod echo;
mod interactive;

use interactive::Preferences;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Turn articles into LinkedIn posts with Google Gemini
#[derive(Parser, Debug)]
#[command(name = "postcraft")]
#[command(author = "Postcraft Contributors")]
#[command(version)]
#[command(about = "Turn articles into LinkedIn posts with Google Gemini", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Tone of the post (professional, inspirational, witty, casual, formal)
    #[arg(short, long, global = true, default_value = "professional", value_name = "TONE")]
    tone: Tone,

    /// Who the post is written for
    #[arg(short, long, global = true, default_value = DEFAULT_AUDIENCE, value_name = "TEXT")]
    audience: String,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive session (the default)
    Interactive,

    /// Write a post about the article at URL
    Url {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Write a post from a topic and some context
    Topic {
        /// Title or topic of the post
        #[arg(long)]
        topic: String,

        /// Key points, a summary, or pasted article text
        #[arg(long)]
        context: String,
    },

    /// Print the extracted article as JSON without writing a post
    Extract {
        /// Article URL
        #[arg(value_name = "URL", required_unless_present = "file", conflicts_with = "file")]
        url: Option<String>,

        /// Local HTML file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,postcraft=debug,postcraft_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn load_settings(fetch: FetchConfig) -> anyhow::Result<Settings> {
    let mut settings = Settings::from_env()?;
    settings.fetch = fetch;

    tracing::debug!(model = %settings.model_name, api_base = %settings.api_base_url, "settings loaded");
    Ok(settings)
}

fn build_composer(settings: &Settings) -> anyhow::Result<Composer<GeminiClient>> {
    let model = settings.gemini_client().context("Failed to build Gemini client")?;
    Ok(Composer::new(model))
}

fn build_controller(settings: &Settings) -> anyhow::Result<Controller<HttpFetcher, GeminiClient>> {
    let extractor = Extractor::new(settings.fetch.clone()).context("Failed to build HTTP client")?;
    Ok(Controller::new(extractor, build_composer(settings)?))
}

async fn run_url(settings: &Settings, url: &str, prefs: &Preferences, verbose: bool) -> anyhow::Result<ExitCode> {
    let mut controller = build_controller(settings)?;

    if verbose {
        echo::print_banner();
        echo::print_info(&format!("Reading {}", url.bright_white().underline()));
        echo::print_info(&format!("Tone: {} | Audience: {}", prefs.tone, prefs.audience));
    }

    let started = Instant::now();
    let render = controller.submit_url(url, prefs.tone, &prefs.audience).await;

    if verbose {
        echo::print_timing("Extract and compose", started.elapsed());
    }

    interactive::show(&render);

    match render {
        Render::Post { success, .. } => Ok(exit_code(success)),
        Render::Fallback { .. } if std::io::stdin().is_terminal() => {
            let success = interactive::complete_manually(&mut controller, prefs).await?;
            Ok(exit_code(success))
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

async fn run_topic(settings: &Settings, topic: &str, context: &str, prefs: &Preferences) -> anyhow::Result<ExitCode> {
    if topic.trim().is_empty() || context.trim().is_empty() {
        echo::print_warning(MISSING_MANUAL_FIELDS_WARNING);
        return Ok(ExitCode::FAILURE);
    }

    let composer = build_composer(settings)?;
    let input = ManualInput::new(topic.trim(), context.trim());
    let outcome = composer.compose_outcome(&input, prefs.tone, &prefs.audience).await;

    let success = outcome.is_success();
    let render = Render::Post { text: outcome.into_text(), success };
    interactive::show(&render);

    Ok(exit_code(success))
}

async fn run_extract(
    url: Option<String>, file: Option<PathBuf>, fetch: FetchConfig, verbose: bool,
) -> anyhow::Result<ExitCode> {
    let extractor = Extractor::new(fetch).context("Failed to build HTTP client")?;
    let started = Instant::now();

    let result = match (file, url) {
        (Some(path), _) => {
            if verbose {
                echo::print_info(&format!("Reading from file {}", path.display().bright_white()));
            }
            let html = fetch_file(&path.to_string_lossy())
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            if verbose {
                eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
            }
            extractor.extract_html(&html)
        }
        (None, Some(url)) => {
            if verbose {
                echo::print_info(&format!("Fetching from {}", url.bright_white().underline()));
            }
            extractor.extract(&url).await
        }
        (None, None) => anyhow::bail!("Either a URL or --file is required"),
    };

    match result {
        Ok(article) => {
            if verbose {
                echo::print_timing("Extraction", started.elapsed());
                echo::print_article_details(&article);
            }
            println!("{}", serde_json::to_string_pretty(&article).context("Failed to serialize article")?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            echo::print_error(&err.message);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("{} Failed to read .env file: {}", "⚠".yellow(), err);
    }

    let Args { command, tone, audience, timeout, user_agent, verbose } = Args::parse();
    init_logging(verbose);

    let fetch = FetchConfig { timeout, user_agent: user_agent.unwrap_or_else(|| FetchConfig::default().user_agent) };
    let prefs = Preferences { tone, audience };

    match command.unwrap_or(Command::Interactive) {
        Command::Extract { url, file } => run_extract(url, file, fetch, verbose).await,
        Command::Url { url } => {
            let settings = load_settings(fetch)?;
            run_url(&settings, &url, &prefs, verbose).await
        }
        Command::Topic { topic, context } => {
            let settings = load_settings(fetch)?;
            run_topic(&settings, &topic, &context, &prefs).await
        }
        Command::Interactive => {
            let settings = load_settings(fetch)?;
            let mut controller = build_controller(&settings)?;
            interactive::run_session(&mut controller, prefs).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
