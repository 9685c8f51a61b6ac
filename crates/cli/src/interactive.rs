//! Interactive session mode.
//!
//! Mirrors the two forms of the session: a URL prompt while
//! [`postcraft_core::SessionState::AwaitingUrl`], and a topic/context form while
//! [`postcraft_core::SessionState::AwaitingManualInput`]. Lines starting with `:` are commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use owo_colors::OwoColorize;
use postcraft_core::{Controller, GenerativeModel, HtmlSource, Render, Tone};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::echo;

const HELP: &[(&str, &str)] = &[
    ("<url>", "Write a post about the article at <url>"),
    (":tone [name|number]", "Show or change the tone"),
    (":audience [text]", "Show or change the target audience"),
    (":reset", "Abandon manual input and go back to the URL prompt"),
    (":help", "Show this help"),
    (":quit", "Leave the session"),
];

/// Tone and audience applied to every post in the session.
#[derive(Debug, Clone)]
pub struct Preferences {
    pub tone: Tone,
    pub audience: String,
}

enum Input {
    Line(String),
    Cancelled,
    Quit,
}

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Quit,
    Help,
    Reset,
    Tone(Option<String>),
    Audience(Option<String>),
    Unknown(String),
    Text(String),
}

#[derive(Debug, PartialEq)]
enum Step {
    Continue,
    Quit,
    Posted { success: bool },
}

/// Run the interactive session until the user quits.
pub async fn run_session<S, M>(controller: &mut Controller<S, M>, mut prefs: Preferences) -> anyhow::Result<()>
where
    S: HtmlSource,
    M: GenerativeModel,
{
    echo::print_banner();
    echo::print_info("Paste an article URL to write a post. Type :help for commands, :quit to leave.");
    print_preferences(&prefs);

    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    let history_path = history_path();
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        let step = if controller.state().is_awaiting_manual_input() {
            manual_turn(&mut editor, controller, &mut prefs).await?
        } else {
            url_turn(&mut editor, controller, &mut prefs).await?
        };

        if step == Step::Quit {
            break;
        }
    }

    if let Some(path) = &history_path {
        save_history(&mut editor, path);
    }

    Ok(())
}

/// Collect manual input after a failed extraction, once.
///
/// Returns whether a post was generated.
pub async fn complete_manually<S, M>(controller: &mut Controller<S, M>, prefs: &Preferences) -> anyhow::Result<bool>
where
    S: HtmlSource,
    M: GenerativeModel,
{
    let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
    let mut prefs = prefs.clone();

    while controller.state().is_awaiting_manual_input() {
        match manual_turn(&mut editor, controller, &mut prefs).await? {
            Step::Posted { success } => return Ok(success),
            Step::Quit => return Ok(false),
            Step::Continue => {}
        }
    }

    Ok(false)
}

/// Show a controller result.
pub fn show(render: &Render) {
    match render {
        Render::Warning(message) => echo::print_warning(message),
        Render::Fallback { error_message } => {
            echo::print_error(error_message);
            echo::print_info("Enter a topic and some context below and the post will be written from that.");
        }
        Render::Post { text, success: true } => echo::print_post(text),
        Render::Post { text, success: false } => echo::print_error(text),
    }
}

async fn url_turn<S, M>(
    editor: &mut DefaultEditor, controller: &mut Controller<S, M>, prefs: &mut Preferences,
) -> anyhow::Result<Step>
where
    S: HtmlSource,
    M: GenerativeModel,
{
    let line = match read_line(editor, "url> ")? {
        Input::Line(line) => line,
        Input::Cancelled => {
            echo::print_info("Type :quit to leave.");
            return Ok(Step::Continue);
        }
        Input::Quit => return Ok(Step::Quit),
    };

    match parse_command(&line) {
        ReplCommand::Text(url) => {
            echo::print_info("Reading the article and drafting your post...");
            let render = controller.submit_url(&url, prefs.tone, &prefs.audience).await;
            show(&render);
            Ok(step_for(&render))
        }
        other => run_command(other, editor, controller, prefs),
    }
}

async fn manual_turn<S, M>(
    editor: &mut DefaultEditor, controller: &mut Controller<S, M>, prefs: &mut Preferences,
) -> anyhow::Result<Step>
where
    S: HtmlSource,
    M: GenerativeModel,
{
    echo::print_info("Manual input: a topic, then context ending with an empty line. Ctrl-C cancels.");

    let topic = match read_line(editor, "topic> ")? {
        Input::Line(line) => line,
        Input::Cancelled => {
            echo::print_info("Manual input cancelled. Type :reset to go back to the URL prompt.");
            return Ok(Step::Continue);
        }
        Input::Quit => return Ok(Step::Quit),
    };

    let topic = match parse_command(&topic) {
        ReplCommand::Text(topic) => topic,
        other => return run_command(other, editor, controller, prefs),
    };

    let context = match read_context(editor)? {
        Input::Line(context) => context,
        Input::Cancelled => {
            echo::print_info("Manual input cancelled.");
            return Ok(Step::Continue);
        }
        Input::Quit => return Ok(Step::Quit),
    };

    echo::print_info("Drafting your post...");
    let render = controller.submit_manual(&topic, &context, prefs.tone, &prefs.audience).await;
    show(&render);
    Ok(step_for(&render))
}

fn run_command<S, M>(
    command: ReplCommand, editor: &mut DefaultEditor, controller: &mut Controller<S, M>, prefs: &mut Preferences,
) -> anyhow::Result<Step>
where
    S: HtmlSource,
    M: GenerativeModel,
{
    match command {
        ReplCommand::Quit => return Ok(Step::Quit),
        ReplCommand::Help => print_help(),
        ReplCommand::Reset => {
            controller.reset();
            echo::print_info("Back to the URL prompt.");
        }
        ReplCommand::Tone(Some(value)) => set_tone(prefs, &value),
        ReplCommand::Tone(None) => {
            echo::print_tone_menu(prefs.tone);
            if let Input::Line(value) = read_line(editor, "tone> ")?
                && !value.trim().is_empty()
            {
                set_tone(prefs, &value);
            }
        }
        ReplCommand::Audience(Some(value)) => {
            prefs.audience = value;
            echo::print_success(&format!("Audience set to {}", prefs.audience));
        }
        ReplCommand::Audience(None) => print_preferences(prefs),
        ReplCommand::Unknown(name) => {
            echo::print_warning(&format!("Unknown command: {}. Type :help for available commands.", name));
        }
        ReplCommand::Text(_) => {}
    }

    Ok(Step::Continue)
}

fn step_for(render: &Render) -> Step {
    match render {
        Render::Post { success, .. } => Step::Posted { success: *success },
        _ => Step::Continue,
    }
}

fn read_line(editor: &mut DefaultEditor, prompt: &str) -> anyhow::Result<Input> {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor.add_history_entry(line.as_str()).ok();
            }
            Ok(Input::Line(line))
        }
        Err(ReadlineError::Interrupted) => Ok(Input::Cancelled),
        Err(ReadlineError::Eof) => Ok(Input::Quit),
        Err(err) => Err(err).context("Failed to read input"),
    }
}

/// Reads context lines until an empty one.
fn read_context(editor: &mut DefaultEditor) -> anyhow::Result<Input> {
    let mut lines = Vec::new();

    loop {
        let prompt = if lines.is_empty() { "context> " } else { "     ..> " };
        match read_line(editor, prompt)? {
            Input::Line(line) if line.trim().is_empty() => break,
            Input::Line(line) => lines.push(line),
            Input::Quit if !lines.is_empty() => break,
            other => return Ok(other),
        }
    }

    Ok(Input::Line(lines.join("\n")))
}

fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Text(line.to_string());
    };

    let (name, rest) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    let argument = Some(rest.trim()).filter(|r| !r.is_empty()).map(str::to_string);

    match name {
        "q" | "quit" | "exit" => ReplCommand::Quit,
        "h" | "help" | "?" => ReplCommand::Help,
        "reset" => ReplCommand::Reset,
        "tone" => ReplCommand::Tone(argument),
        "audience" => ReplCommand::Audience(argument),
        _ => ReplCommand::Unknown(name.to_string()),
    }
}

/// Accepts a menu number (1-based) or a tone name.
fn parse_tone(value: &str) -> Result<Tone, String> {
    let value = value.trim();
    match value.parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| Tone::ALL.get(i).copied())
            .ok_or_else(|| format!("Pick a tone between 1 and {}", Tone::ALL.len())),
        Err(_) => value.parse(),
    }
}

fn set_tone(prefs: &mut Preferences, value: &str) {
    match parse_tone(value) {
        Ok(tone) => {
            prefs.tone = tone;
            echo::print_success(&format!("Tone set to {}", tone));
        }
        Err(err) => echo::print_warning(&err),
    }
}

fn print_preferences(prefs: &Preferences) {
    eprintln!(
        "  {} {}  {} {}\n",
        "Tone:".dimmed(),
        prefs.tone.bright_white(),
        "Audience:".dimmed(),
        prefs.audience.bright_white()
    );
}

fn print_help() {
    for (usage, description) in HELP {
        eprintln!("  {:<22} {}", usage.bright_cyan(), description.dimmed());
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".postcraft").join("history.txt"))
}

fn save_history(editor: &mut DefaultEditor, path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(err) = std::fs::create_dir_all(parent)
    {
        tracing::debug!(error = %err, "could not create history directory");
        return;
    }

    if let Err(err) = editor.save_history(path) {
        tracing::debug!(error = %err, "could not save history");
    }
}
