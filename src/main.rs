use anyhow::Result;
use clap::{Parser, Subcommand};
use rowbit::areas::repository::Repository;
use rowbit::artifacts::commit::policy::CommitArgs;
use rowbit::artifacts::session::Session;
use rowbit::commands::procedures;
use std::io::Write;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rowbit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Version control for tables",
    long_about = "rowbit tracks named tables the way git tracks files. \
    Every commit snapshots the whole set of tables, and branches can track \
    remote-tracking branches to report how far they have diverged.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "table", about = "Import or drop tables in the working set")]
    Table {
        #[command(subcommand)]
        command: TableCommands,
    },
    #[command(
        name = "add",
        about = "Stage tables for the next commit",
        long_about = "This command stages the working version of the named tables. Use '.' to stage every table."
    )]
    Add {
        #[arg(required = true, help = "The tables to stage, or '.'")]
        tables: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged tables as a new commit",
        long_about = "This command creates a new commit on the current branch and prints its hash. \
        Nothing is printed when --skip-empty skips the commit."
    )]
    Commit {
        #[command(flatten)]
        args: CommitArgs,
    },
    #[command(name = "status", about = "Show the branch, upstream and table status")]
    Status,
    #[command(name = "log", about = "Show the commit history")]
    Log {
        #[arg(index = 1, help = "The revision to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(name = "branch", about = "Create or list branches and configure upstreams")]
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },
    #[command(name = "remote", about = "Manage remotes")]
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },
    #[command(
        name = "update-ref",
        about = "Point a ref at a commit",
        long_about = "This command writes the commit a revision resolves to into a ref, \
        e.g. refs/remotes/origin/main to record the last known remote tip."
    )]
    UpdateRef {
        #[arg(index = 1, help = "The full ref path (refs/...)")]
        reference: String,
        #[arg(index = 2, help = "The revision to point it at")]
        revision: String,
    },
    #[command(
        name = "call",
        about = "Run a procedure and print its result rows",
        long_about = "This command runs one of the procedures (commit, commit_hash_out) with \
        string arguments, the way a stored procedure is called."
    )]
    Call {
        #[arg(index = 1, help = "The procedure name")]
        procedure: String,
        #[arg(index = 2, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand)]
enum TableCommands {
    #[command(about = "Load a CSV file (header line first) into a table")]
    Import {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        file: PathBuf,
    },
    #[command(about = "Remove a table from the working set")]
    Drop {
        #[arg(index = 1)]
        name: String,
    },
}

#[derive(Subcommand)]
enum BranchCommands {
    #[command(about = "Create a branch at a revision (HEAD by default)")]
    Create {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        start: Option<String>,
    },
    #[command(about = "List local branches")]
    List,
    #[command(about = "Track <remote>/<branch> from a local branch")]
    SetUpstream {
        #[arg(index = 1)]
        branch: String,
        #[arg(index = 2)]
        upstream: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    #[command(about = "Register a remote")]
    Add {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        url: String,
    },
}

fn init_tracing() {
    let default_filter = if cfg!(feature = "debug_merge") {
        "warn,rowbit::merge=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::open(&pwd.to_string_lossy(), Box::new(std::io::stdout()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cancel = CancellationToken::new();

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::Table { command } => {
            let repository = open_repository()?;
            match command {
                TableCommands::Import { name, file } => repository.import_table(name, file).await?,
                TableCommands::Drop { name } => repository.drop_table(name).await?,
            }
        }
        Commands::Add { tables } => open_repository()?.add(tables).await?,
        Commands::Commit { args } => {
            let session = Session::from_env();
            open_repository()?.commit(&session, args).await?
        }
        Commands::Status => open_repository()?.status(&cancel).await?,
        Commands::Log { revision } => open_repository()?.log(revision.as_deref(), &cancel)?,
        Commands::Branch { command } => {
            let repository = open_repository()?;
            match command {
                BranchCommands::Create { name, start } => {
                    repository.create_branch(name, start.as_deref())?
                }
                BranchCommands::List => repository.list_branches()?,
                BranchCommands::SetUpstream { branch, upstream } => {
                    repository.set_upstream(branch, upstream)?
                }
            }
        }
        Commands::Remote { command } => {
            let repository = open_repository()?;
            match command {
                RemoteCommands::Add { name, url } => repository.add_remote(name, url)?,
            }
        }
        Commands::UpdateRef {
            reference,
            revision,
        } => open_repository()?.update_ref(reference, revision)?,
        Commands::Call { procedure, args } => {
            let repository = open_repository()?;
            let session = Session::from_env();
            let rows = procedures::call(&repository, &session, procedure, args).await?;

            let mut stdout = std::io::stdout().lock();
            for row in rows {
                writeln!(stdout, "{}", row.join("\t"))?;
            }
        }
    }

    Ok(())
}
