use crate::api::{self, Components};
use crate::import::{self, RowInput};
use crate::services::log::ActivityLogger;
use crate::services::store::LocalFsStore;
use crate::types::{ApiResponse, Relance, RelanceChannel, Status};
use crate::{error::*, types::NewApplication};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "becandidature",
    version,
    about = "Track job applications: heuristic import + follow-up scheduling (JSON only)"
)]
pub struct Cli {
    /// Owner key records are filed under
    #[arg(long, global = true, default_value = "default")]
    owner: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(subcommand)]
    Import(ImportCmd),
    #[command(subcommand)]
    Record(RecordCmd),
    /// Records whose follow-up falls due within the horizon
    Agenda(AgendaArgs),
    /// Show the activity log
    Activity(ActivityArgs),
}

#[derive(Subcommand)]
enum ImportCmd {
    /// Parse a pasted email (file or stdin) into a draft
    Text(TextArgs),
    /// Parse a job-posting URL into a draft
    Url(UrlArgs),
    /// Create records from JSON rows on stdin
    Rows,
}

#[derive(Args)]
struct TextArgs {
    file: Option<PathBuf>,
    /// Save the draft as a record dated today instead of just printing it
    #[arg(long)]
    save: bool,
}

#[derive(Args)]
struct UrlArgs {
    url: String,
    /// Page title hint ("Title | Company"); overrides fetched values
    #[arg(long)]
    hint: Option<String>,
    /// Skip the page-enrichment fetch
    #[arg(long = "no-fetch")]
    no_fetch: bool,
    /// Save the draft as a record dated today instead of just printing it
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum RecordCmd {
    /// Create a record
    Add(AddArgs),
    /// List records, most recent application first
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one record
    Show { id: String },
    /// Change status (appends to history, recomputes the follow-up)
    Status {
        id: String,
        status: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Log a relance
    Relance {
        id: String,
        #[arg(long, default_value = "email")]
        channel: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Edit the application date and/or notes
    Edit {
        id: String,
        #[arg(long)]
        applied_on: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete one record, or all of them
    Delete {
        /// <id> | all
        target: String,
        #[arg(long = "yes")]
        yes: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    company: String,
    #[arg(long)]
    title: String,
    /// Application date, defaults to today
    #[arg(long)]
    applied_on: Option<String>,
    #[arg(long, default_value = "pending")]
    status: String,
    #[arg(long)]
    contract: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args)]
struct AgendaArgs {
    #[arg(long, default_value_t = 7)]
    within: i64,
}

#[derive(Args)]
struct ActivityArgs {
    /// Errors only
    #[arg(long)]
    errors: bool,
    /// Only entries for the current owner
    #[arg(long)]
    mine: bool,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = LocalFsStore::new()?;
    let components = Components::default();

    match cli.cmd {
        Command::Import(ic) => import_cmd(&store, &components, &cli.owner, ic),
        Command::Record(rc) => record_cmd(&store, &cli.owner, rc),
        Command::Agenda(args) => finish(api::agenda(&store, &cli.owner, args.within)),
        Command::Activity(args) => activity_cmd(&cli.owner, args),
    }
    Ok(())
}

fn import_cmd(store: &LocalFsStore, components: &Components, owner: &str, ic: ImportCmd) {
    match ic {
        ImportCmd::Text(TextArgs { file, save }) => {
            let text = match read_text(file) {
                Ok(t) => t,
                Err(e) => return print_json(ApiResponse::<()>::err(e.to_string())),
            };
            let draft = api::quick_import_text(&text);
            if save {
                let new = draft.into_new(Utc::now().date_naive());
                finish(api::record_create(store, owner, new));
            } else {
                finish(Ok(draft));
            }
        }
        ImportCmd::Url(UrlArgs {
            url,
            hint,
            no_fetch,
            save,
        }) => {
            let draft =
                api::quick_import_url(&*components.fetcher, &url, hint.as_deref(), !no_fetch);
            match draft {
                Ok(draft) if save => {
                    let new = draft.into_new(Utc::now().date_naive());
                    finish(api::record_create(store, owner, new));
                }
                other => finish(other),
            }
        }
        ImportCmd::Rows => {
            let rows: Result<Vec<RowInput>> =
                serde_json::from_reader(std::io::stdin()).map_err(TrackerError::from);
            match rows {
                Ok(rows) => finish(Ok(api::import_rows(store, owner, rows))),
                Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
            }
        }
    }
}

fn record_cmd(store: &LocalFsStore, owner: &str, rc: RecordCmd) {
    match rc {
        RecordCmd::Add(args) => finish(add_args_to_new(args).and_then(|new| {
            api::record_create(store, owner, new)
        })),
        RecordCmd::List { status } => {
            let status = match status.as_deref().map(parse_status).transpose() {
                Ok(s) => s,
                Err(e) => return print_json(ApiResponse::<()>::err(e.to_string())),
            };
            finish(api::record_list(store, owner, status));
        }
        RecordCmd::Show { id } => finish(api::record_read(store, owner, &id)),
        RecordCmd::Status { id, status, note } => finish(
            parse_status(&status)
                .and_then(|s| api::record_set_status(store, owner, &id, s, note)),
        ),
        RecordCmd::Relance { id, channel, note } => finish(channel.parse::<RelanceChannel>().and_then(|channel| {
            let relance = Relance {
                on: Utc::now().date_naive(),
                channel,
                note,
            };
            api::record_add_relance(store, owner, &id, relance)
        })),
        RecordCmd::Edit {
            id,
            applied_on,
            notes,
        } => finish(
            applied_on
                .as_deref()
                .map(parse_date)
                .transpose()
                .and_then(|date| api::record_edit(store, owner, &id, date, notes)),
        ),
        RecordCmd::Delete { target, yes } => {
            if !yes {
                return print_json(ApiResponse::<()>::err("refusing to delete without --yes"));
            }
            if target == "all" {
                finish(api::record_delete_all(store, owner));
            } else {
                finish(
                    api::record_delete(store, owner, &target)
                        .map(|_| serde_json::json!({ "deleted": target })),
                );
            }
        }
    }
}

fn activity_cmd(owner: &str, args: ActivityArgs) {
    let result = ActivityLogger::new()
        .and_then(|logger| logger.read_logs(args.mine.then_some(owner), args.errors));
    finish(result);
}

fn add_args_to_new(args: AddArgs) -> Result<NewApplication> {
    let applied_on = match args.applied_on.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    Ok(NewApplication {
        company: args.company,
        title: args.title,
        applied_on,
        status: parse_status(&args.status)?,
        contract: args.contract,
        contact: args.contact,
        email: args.email,
        link: args.link,
        notes: args.notes,
    })
}

/// Friendly parse: accepts anything the spreadsheet normalizer accepts.
fn parse_status(raw: &str) -> Result<Status> {
    import::normalize_status(raw).ok_or_else(|| TrackerError::UnknownStatus(raw.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    import::parse_sheet_date(raw).ok_or_else(|| TrackerError::InvalidDate(raw.to_string()))
}

fn read_text(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn finish<T: serde::Serialize>(res: Result<T>) {
    match res {
        Ok(v) => print_json(ApiResponse::ok(v)),
        Err(e) => print_json(ApiResponse::<()>::err(e.to_string())),
    }
}

fn print_json<T: serde::Serialize>(val: T) {
    println!("{}", serde_json::to_string_pretty(&val).unwrap());
}
