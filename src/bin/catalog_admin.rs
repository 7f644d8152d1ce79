use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;

use question_catalog::db::{establish_connection_pool, run_migrations};
use question_catalog::domain::category::NewCategory;
use question_catalog::domain::question::{NewQuestion, QuestionLinks};
use question_catalog::domain::types::{
    CategoryTitle, QuestionId, QuestionTitle, ResourceLink, TypeConstraintError, parse_tag_list,
};
use question_catalog::forms::seed::SeedDocument;
use question_catalog::models::config::ServerConfig;
use question_catalog::repository::DieselRepository;
use question_catalog::services::categories::add_category;
use question_catalog::services::questions::{add_question, delete_question};
use question_catalog::services::seed::seed_catalog;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Maintenance commands for the question catalog store.
#[derive(Debug, Parser)]
#[command(name = "catalog-admin", version)]
struct Cli {
    /// Database to operate on; defaults to the server configuration.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Wipe the catalog and import a seed document.
    Seed(SeedSource),
    /// Store one question without touching the rest of the catalog.
    AddQuestion(QuestionArgs),
    /// Store a category referencing existing questions, in the given order.
    AddCategory {
        #[arg(long)]
        title: String,
        /// Question identifier; repeat to add several.
        #[arg(long = "question")]
        questions: Vec<i32>,
    },
    /// Delete one question and remove it from every category.
    DeleteQuestion {
        /// Identifier of the question.
        id: i32,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct SeedSource {
    /// Read the seed document from a local JSON file.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Download the seed document.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Args)]
struct QuestionArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    yt_link: Option<String>,
    #[arg(long)]
    p1_link: Option<String>,
    #[arg(long)]
    p2_link: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    tags: Option<String>,
}

impl QuestionArgs {
    fn into_new_question(self) -> Result<NewQuestion, TypeConstraintError> {
        let link = |value: Option<String>| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(ResourceLink::new)
                .transpose()
        };

        Ok(NewQuestion {
            title: QuestionTitle::new(self.title)?,
            url: QuestionLinks {
                yt_link: link(self.yt_link)?,
                p1_link: link(self.p1_link)?,
                p2_link: link(self.p2_link)?,
            },
            tags: self.tags.as_deref().map(parse_tag_list).unwrap_or_default(),
        })
    }
}

fn read_document(source: &SeedSource) -> Result<String, String> {
    if let Some(path) = &source.file {
        return fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()));
    }

    let url = source.url.as_deref().ok_or("no seed source given")?;
    log::info!("Fetching seed document from {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| e.to_string())?;
    client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(|e| format!("failed to download {url}: {e}"))
}

fn run(cli: Cli) -> Result<(), String> {
    let database_url = match cli.database_url {
        Some(url) => url,
        None => {
            ServerConfig::load()
                .map_err(|e| format!("invalid configuration: {e}"))?
                .database_url
        }
    };

    let pool = establish_connection_pool(&database_url).map_err(|e| e.to_string())?;
    run_migrations(&pool).map_err(|e| e.to_string())?;
    let repo = DieselRepository::new(pool);

    match cli.command {
        Command::Seed(source) => {
            let raw = read_document(&source)?;
            let document = SeedDocument::from_json(&raw).map_err(|e| e.to_string())?;
            let report = seed_catalog(document, &repo).map_err(|e| e.to_string())?;
            let rendered = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
            println!("{rendered}");
        }
        Command::AddQuestion(args) => {
            let question = args.into_new_question().map_err(|e| e.to_string())?;
            let id = add_question(question, &repo).map_err(|e| e.to_string())?;
            println!("Created question {id}");
        }
        Command::AddCategory { title, questions } => {
            let category = NewCategory {
                title: CategoryTitle::new(title).map_err(|e| e.to_string())?,
                question_ids: questions
                    .into_iter()
                    .map(QuestionId::new)
                    .collect::<Result<_, _>>()
                    .map_err(|e| e.to_string())?,
            };
            let id = add_category(category, &repo).map_err(|e| e.to_string())?;
            println!("Created category {id}");
        }
        Command::DeleteQuestion { id } => {
            delete_question(id, &repo).map_err(|e| format!("question {id}: {e}"))?;
            println!("Deleted question {id}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
