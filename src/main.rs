use anyhow::Result;
use clap::{Parser, Subcommand};
use revfilter::areas::config::{DEFAULT_LOG_FILTER, LOG_ENV, Settings};
use revfilter::areas::workbench::Workbench;
use revfilter::commands::evaluate::EvalOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "revfilter",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Manage and evaluate file and revision filter collections",
    long_about = "This tool manages named collections of file and revision filters \
    and evaluates them against a list of files, deciding which files and which revisions \
    of their branched, labeled history pass.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Path of the filter store (defaults to $REVFILTER_STORE)")]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "kinds",
        about = "List the available filter kinds",
        long_about = "This command lists every filter kind with the decision it makes \
        (per file or per revision) and the data it expects."
    )]
    Kinds,
    #[command(
        name = "list",
        about = "List filter collections",
        long_about = "This command lists the stored filter collections, optionally only those \
        that apply to the given project."
    )]
    List {
        #[arg(short, long, help = "Only list collections that apply to this project")]
        project: Option<String>,
    },
    #[command(name = "show", about = "Show the filters of a collection")]
    Show {
        #[arg(index = 1, help = "The collection name")]
        collection: String,
    },
    #[command(
        name = "create",
        about = "Create an empty filter collection",
        long_about = "This command creates an empty, user-defined filter collection. \
        Without a project the collection applies to every project."
    )]
    Create {
        #[arg(index = 1, help = "The collection name")]
        name: String,
        #[arg(short, long, help = "The project the collection applies to")]
        project: Option<String>,
    },
    #[command(
        name = "copy",
        about = "Copy a filter collection under a new name",
        long_about = "This command copies every filter of an existing collection into a new, \
        user-defined collection."
    )]
    Copy {
        #[arg(index = 1, help = "The collection to copy")]
        source: String,
        #[arg(index = 2, help = "The name of the copy")]
        destination: String,
        #[arg(short, long, help = "The project the copy applies to")]
        project: Option<String>,
    },
    #[command(name = "delete", about = "Delete a user-defined filter collection")]
    Delete {
        #[arg(index = 1, help = "The collection name")]
        name: String,
    },
    #[command(
        name = "add-filter",
        about = "Add a filter to a collection",
        long_about = "This command adds a filter to a user-defined collection. \
        Filters are AND filters unless --or is given."
    )]
    AddFilter {
        #[arg(index = 1, help = "The collection name")]
        collection: String,
        #[arg(short, long, help = "The filter kind, as listed by `kinds`")]
        kind: String,
        #[arg(short, long, default_value = "", help = "The filter data")]
        data: String,
        #[arg(long, help = "Make the filter an OR filter")]
        or: bool,
    },
    #[command(name = "remove-filter", about = "Remove a filter from a collection")]
    RemoveFilter {
        #[arg(index = 1, help = "The collection name")]
        collection: String,
        #[arg(short, long, help = "The filter kind, as listed by `kinds`")]
        kind: String,
        #[arg(short, long, default_value = "", help = "The filter data")]
        data: String,
    },
    #[command(
        name = "reset",
        about = "Restore the default filter collections",
        long_about = "This command deletes every user-defined collection, leaving only the \
        built-in ones."
    )]
    Reset,
    #[command(
        name = "eval",
        about = "Evaluate a collection against a list of files",
        long_about = "This command reads a JSON list of files, with their archives, and reports \
        which files pass the collection. With --report it also lists the passing revisions."
    )]
    Eval {
        #[arg(index = 1, help = "The collection name")]
        collection: String,
        #[arg(index = 2, help = "The JSON file list")]
        files: PathBuf,
        #[arg(short, long, help = "List the passing revisions of every passing file")]
        report: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env(cli.store)?;
    colored::control::set_override(settings.color());
    let workbench = Workbench::new(settings, Box::new(std::io::stdout()));

    match cli.command {
        Commands::Kinds => workbench.kinds()?,
        Commands::List { project } => workbench.list(project.as_deref())?,
        Commands::Show { collection } => workbench.show(&collection)?,
        Commands::Create { name, project } => workbench.create(&name, project)?,
        Commands::Copy {
            source,
            destination,
            project,
        } => workbench.copy(&source, &destination, project)?,
        Commands::Delete { name } => workbench.delete(&name)?,
        Commands::AddFilter {
            collection,
            kind,
            data,
            or,
        } => workbench.add_filter(&collection, &kind, &data, !or)?,
        Commands::RemoveFilter {
            collection,
            kind,
            data,
        } => workbench.remove_filter(&collection, &kind, &data)?,
        Commands::Reset => workbench.reset()?,
        Commands::Eval {
            collection,
            files,
            report,
        } => workbench.eval(&collection, &files, EvalOptions { report })?,
    }

    Ok(())
}
