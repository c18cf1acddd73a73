use crate::artifacts::commit::metadata::{parse_author, parse_date};
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::session::Session;
use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser};

/// Flags shared by `rowbit commit` and the `commit` procedures
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct CommitArgs {
    #[arg(short, long, help = "Use the given message as the commit message")]
    pub message: Option<String>,
    #[arg(long, help = "Allow recording a commit with the same data as its parent")]
    pub allow_empty: bool,
    #[arg(
        long,
        help = "Succeed without committing when nothing is staged (wins over --allow-empty)"
    )]
    pub skip_empty: bool,
    #[arg(
        short = 'a',
        long = "all",
        conflicts_with = "stage_all",
        help = "Stage modified and deleted tables before committing (new tables are left out)"
    )]
    pub stage_modified: bool,
    #[arg(
        short = 'A',
        long = "ALL",
        help = "Stage every table, including new ones, before committing"
    )]
    pub stage_all: bool,
    #[arg(long, help = "Replace the tip of the current branch")]
    pub amend: bool,
    #[arg(short, long, help = "Allow amending a commit already on the upstream branch")]
    pub force: bool,
    #[arg(long, value_name = "NAME <EMAIL>", help = "Override the commit author")]
    pub author: Option<String>,
    #[arg(long, help = "Override the commit date")]
    pub date: Option<String>,
}

/// Argument parser for the procedure surface, where flags arrive as strings
#[derive(Debug, Parser)]
#[command(name = "commit", no_binary_name = true)]
struct ProcedureArgs {
    #[command(flatten)]
    args: CommitArgs,
}

impl CommitArgs {
    /// Parse procedure arguments; clap errors become `InvalidArgument`
    pub fn try_parse_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        ProcedureArgs::try_parse_from(args)
            .map(|parsed| parsed.args)
            .map_err(|error| RepoError::invalid_argument(error.to_string().trim().to_string()).into())
    }

    pub fn staging_mode(&self) -> StagingMode {
        if self.stage_all {
            StagingMode::StageAll
        } else if self.stage_modified {
            StagingMode::StageModifiedAndDeleted
        } else {
            StagingMode::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingMode {
    None,
    StageAll,
    StageModifiedAndDeleted,
}

/// Resolved options of one commit invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPolicy {
    pub message: Option<String>,
    pub date: DateTime<FixedOffset>,
    pub allow_empty: bool,
    pub skip_empty: bool,
    pub amend: bool,
    pub force: bool,
    pub author_name: String,
    pub author_email: String,
}

impl CommitPolicy {
    /// Resolve author, message and date.
    ///
    /// `head_message` is only consulted when amending without `--message`.
    pub fn resolve(
        args: &CommitArgs,
        session: &Session,
        head_message: impl FnOnce() -> anyhow::Result<String>,
    ) -> anyhow::Result<Self> {
        let (author_name, author_email) = match &args.author {
            Some(author) => parse_author(author)?,
            None => (session.user().to_string(), session.default_email()),
        };

        let message = match &args.message {
            Some(message) => Some(message.clone()),
            None if args.amend => Some(head_message()?),
            None => return Err(RepoError::MissingCommitMessage.into()),
        };

        let date = match &args.date {
            Some(date) => parse_date(date)?,
            None => session.query_time(),
        };

        Ok(CommitPolicy {
            message,
            date,
            allow_empty: args.allow_empty,
            skip_empty: args.skip_empty,
            amend: args.amend,
            force: args.force,
            author_name,
            author_email,
        })
    }

    /// What to do when the staged root equals the parent root
    pub fn empty_commit_behavior(&self) -> EmptyCommitBehavior {
        if self.skip_empty {
            EmptyCommitBehavior::Skip
        } else if self.allow_empty {
            EmptyCommitBehavior::Allow
        } else {
            EmptyCommitBehavior::Reject
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyCommitBehavior {
    Skip,
    Allow,
    Reject,
}
