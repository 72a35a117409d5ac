#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quiz_core::{Catalog, Question};
use services::{Clock, QuizFlow};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{QuizOutcome, QuizVm};

mod render;

const DEFAULT_LOG_FILTER: &str = "quiz=info,services=info";

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --catalog value: {raw}")]
    InvalidCatalogPath { raw: String },
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--catalog <path.json>] [--json] [--log <filter>]");
    eprintln!();
    eprintln!("Controls:");
    eprintln!("  1-4      pick an option");
    eprintln!("  <  >     previous / next question");
    eprintln!("  Enter    next question (or submit a typed value)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_LOG, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    catalog: Option<PathBuf>,
    json: bool,
    log: String,
    help: bool,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut catalog = env("QUIZ_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut log = env("QUIZ_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let mut json = false;
        let mut help = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidCatalogPath { raw: value });
                    }
                    catalog = Some(PathBuf::from(value));
                }
                "--log" => log = require_value(args, "--log")?,
                "--json" => json = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog,
            json,
            log,
            help,
        })
    }
}

fn init_tracing(default_filter: &str) {
    // Logs go to stderr so the quiz itself owns stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Catalog::standard());
    };
    let raw = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&raw)?;
    let catalog = Catalog::new(questions)?;
    tracing::info!(path = %path.display(), questions = catalog.len(), "loaded catalog");
    Ok(catalog)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, |key| std::env::var(key).ok()).inspect_err(|_| {
        print_usage();
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing(&args.log);

    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut vm = QuizVm::new(QuizFlow::new(Arc::new(catalog), Clock::system()));
    vm.start();

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    render::question(&mut vm, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(intent) = vm.intent_for_line(&line) else {
            render::notice(&mut out, "Opção inválida")?;
            continue;
        };

        match vm.apply(intent) {
            QuizOutcome::Continue => render::question(&mut vm, &mut out)?,
            QuizOutcome::Invalid { message } => render::notice(&mut out, &message)?,
            QuizOutcome::Ignored => render::notice(&mut out, "Opção inválida")?,
            QuizOutcome::Blocked(err) => render::notice(&mut out, &render::blocked_message(err))?,
            QuizOutcome::Finished(result) => {
                if args.json {
                    writeln!(out, "{}", vm.flow().report()?.to_json()?)?;
                } else {
                    render::result(&mut out, &result)?;
                }
                return Ok(());
            }
        }
    }

    tracing::warn!(
        position = vm.progress().position,
        "input closed before the quiz finished"
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
