//! Terminal front end for the resume viewer session.
//!
//! Reads one command per line from stdin and redraws the view on stdout after
//! each. Logs go to stderr.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_viewer::client::search::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, RESULT_SEPARATOR};
use resume_viewer::client::{
    Body, HttpSectionStore, Session, SessionMode, SessionState, StoreError, UploadFile,
};
use resume_viewer::config::ViewerConfig;

const HELP: &str = "\
commands:
  upload <path>    send a resume to the store
  sections         list sections
  open <id>        show a section (`all` for the whole resume)
  search <query>   search the resume
  edit             start editing the shown section
  draft            replace the draft; end input with a lone `.`
  append <text>    add a line to the draft
  save | cancel    finish editing
  show             redraw
  help | quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Upload(String),
    Sections,
    Open(String),
    Search(String),
    Edit,
    Draft,
    Append(String),
    Save,
    Cancel,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word {
            "upload" => Command::Upload(rest.to_string()),
            "sections" | "ls" => Command::Sections,
            "open" => Command::Open(rest.to_string()),
            "search" | "/" => Command::Search(rest.to_string()),
            "edit" => Command::Edit,
            "draft" => Command::Draft,
            "append" => Command::Append(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Turns highlight markup into terminal text: bold-yellow matches, blank
/// lines between results, entities decoded.
fn markup_to_terminal(markup: &str) -> String {
    markup
        .replace(RESULT_SEPARATOR, "\n\n")
        .replace(HIGHLIGHT_OPEN, "\x1b[1;33m")
        .replace(HIGHLIGHT_CLOSE, "\x1b[0m")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn render(state: &SessionState) -> String {
    let mut out = String::new();
    if let Some(info) = &state.view.file_info {
        out.push_str(info);
        out.push('\n');
    }

    let listing: Vec<String> = state
        .view
        .sections
        .entries()
        .iter()
        .map(|e| {
            if e.active {
                format!("[{}]", e.id)
            } else {
                e.id.to_string()
            }
        })
        .collect();
    out.push_str(&format!("sections: {}\n", listing.join(" ")));

    out.push_str(&format!("== {} ==\n", state.view.title));
    match (&state.mode, &state.view.body) {
        (SessionMode::Editing { draft }, _) => {
            out.push_str("-- editing --\n");
            out.push_str(&draft.text);
        }
        (_, Body::Markup(markup)) => out.push_str(&markup_to_terminal(markup)),
        (_, body) => out.push_str(body.as_str()),
    }
    out.push('\n');

    let actions = state.actions();
    let enabled: Vec<&str> = [
        (actions.edit, "edit"),
        (actions.save, "save"),
        (actions.cancel, "cancel"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    out.push_str(&format!("actions: {}\n", enabled.join(" ")));
    out.push_str(&format!("status: {}\n", state.status.message()));
    out
}

/// Failures are already in the status line; only trace them here.
fn settle(result: Result<(), StoreError>) {
    if let Err(e) = result {
        debug!(error = %e, "action failed");
    }
}

async fn read_draft(lines: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    let mut text = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line == "." {
            break;
        }
        text.push(line);
    }
    Ok(text.join("\n"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = ViewerConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_viewer={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = HttpSectionStore::new(&config.store_url, config.request_timeout)?;
    info!("Using section store at {}", store.base_url());

    let mut session = Session::new(store);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Upload(path) => match UploadFile::from_path(&path).await {
                Ok(file) => settle(session.upload(&file).await),
                Err(e) => println!("{e:#}"),
            },
            Command::Sections | Command::Show => {}
            Command::Open(id) => settle(session.select_section(&id).await),
            Command::Search(query) => settle(session.search(&query).await),
            Command::Edit => match session.edit_entry() {
                Some(entry) => {
                    entry.start();
                }
                None => println!("edit is not available right now"),
            },
            Command::Draft => {
                if session.editing().is_none() {
                    println!("not editing");
                    continue;
                }
                let text = read_draft(&mut lines).await?;
                if let Some(mut editing) = session.editing() {
                    *editing.draft_mut() = text;
                }
            }
            Command::Append(text) => match session.editing() {
                Some(mut editing) => {
                    let draft = editing.draft_mut();
                    if !draft.is_empty() && !draft.ends_with('\n') {
                        draft.push('\n');
                    }
                    draft.push_str(&text);
                }
                None => println!("not editing"),
            },
            Command::Save => match session.editing() {
                Some(editing) => settle(editing.save().await),
                None => println!("save is not available right now"),
            },
            Command::Cancel => match session.editing() {
                Some(editing) => settle(editing.cancel().await),
                None => println!("cancel is not available right now"),
            },
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
            Command::Unknown(word) => {
                println!("unknown command '{word}', try `help`");
                continue;
            }
        }

        print!("{}", render(session.state()));
    }

    Ok(())
}
