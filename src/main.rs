#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # graddy
//!
//! Runs the grading backend, or scores a single submission locally with the
//! relevance heuristic.
//!
//! Configuration is read from the environment (a `.env` file is honoured):
//! `OPENAI_API_KEY`, `OPENAI_ENDPOINT`, `OPENAI_MODEL`, `GRADDY_BIND_ADDR`, and
//! friends.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bpaf::*;
use dotenvy::dotenv;
use graddy::{
    config::{ConfigHandle, ConfigState},
    relevance::{RelevanceScorer, ScoreReport},
    server,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::SubscriberInitExt};

/// Where the submission text comes from.
#[derive(Debug, Clone)]
enum Submission {
    /// Given inline.
    Text(String),
    /// Read from a file.
    File(PathBuf),
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Run the HTTP server
    Serve(Option<SocketAddr>),
    /// Score a submission with the local heuristic
    Score {
        /// Assignment title
        title:        String,
        /// Assignment description
        description:  String,
        /// Submission text or file
        submission:   Submission,
        /// Optional attached file content
        file_content: Option<PathBuf>,
    },
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let addr = long("addr")
        .help("Address to listen on, overrides GRADDY_BIND_ADDR")
        .argument::<SocketAddr>("ADDR")
        .optional();
    let serve = construct!(Cmd::Serve(addr))
        .to_options()
        .command("serve")
        .help("Run the grading backend");

    let title = long("title")
        .short('t')
        .help("Assignment title")
        .argument::<String>("TITLE");
    let description = long("description")
        .short('d')
        .help("Assignment description")
        .argument::<String>("TEXT");
    let text = long("submission")
        .short('s')
        .help("Submission text")
        .argument::<String>("TEXT")
        .map(Submission::Text);
    let file = long("submission-file")
        .help("Read the submission from a file")
        .argument::<PathBuf>("PATH")
        .map(Submission::File);
    let submission = construct!([text, file]);
    let file_content = long("file-content-file")
        .help("Attached file content to include in the relevance score")
        .argument::<PathBuf>("PATH")
        .optional();
    let score = construct!(Cmd::Score {
        title,
        description,
        submission,
        file_content
    })
    .to_options()
    .command("score")
    .help("Print the relevance heuristic's signals for a submission as JSON");

    construct!([serve, score])
        .to_options()
        .descr("Curriculum, assignment and feedback generation backend")
        .run()
}

/// Reads a text file with a helpful error.
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::INFO).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Serve(addr) => {
            let mut config = ConfigState::from_env()?;
            if let Some(addr) = addr {
                config.set_bind_addr(addr);
            }
            server::serve(ConfigHandle::new(config)).await?;
        }
        Cmd::Score {
            title,
            description,
            submission,
            file_content,
        } => {
            let submission = match submission {
                Submission::Text(text) => text,
                Submission::File(path) => read_text(&path)?,
            };
            let file_content = file_content.as_deref().map(read_text).transpose()?;

            let report = ScoreReport::compute(
                &RelevanceScorer::default(),
                &title,
                &description,
                submission.as_str(),
                file_content.as_deref(),
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    };

    Ok(())
}
