//! strata CLI - query a jj repository through typed revsets
//!
//! Usage:
//!   strata init                 Write a default `.strata/config.toml`
//!   strata render [FILTERS]     Print the revset built from filters
//!   strata template <KIND>      Print a JSON-lines template
//!   strata log [FILTERS]        Print matching commits as JSON lines
//!   strata show [FILTERS]       Print a single commit as JSON
//!   strata diff [FILTERS]       Print the diff summary as JSON lines
//!   strata bookmarks [FILTERS]  Print bookmark names

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use strata_core::StrataConfig;
use strata_jj::{
    BookmarkCommand, DiffCommand, JjCommand, JjExecutor, LogCommand, Pattern, Render, Revset, ShowCommand,
    BOOKMARK_TEMPLATE, COMMIT_TEMPLATE,
};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about = "Typed revset queries over the jj CLI")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Repository root (detected with `jj root` when omitted)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Repository path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the revset built from the given filters
    Render {
        #[command(flatten)]
        filters: RevsetArgs,
    },

    /// Print a JSON-lines template
    Template {
        #[arg(value_enum, default_value = "commit")]
        kind: TemplateKind,
    },

    /// Print matching commits as JSON lines
    Log {
        #[command(flatten)]
        filters: RevsetArgs,

        /// Maximum number of commits
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print a single commit as JSON
    Show {
        #[command(flatten)]
        filters: RevsetArgs,
    },

    /// Print the diff summary of a revision as JSON lines
    Diff {
        #[command(flatten)]
        filters: RevsetArgs,
    },

    /// Print bookmark names
    Bookmarks {
        #[command(flatten)]
        filters: RevsetArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateKind {
    Commit,
    Bookmark,
}

/// Filters combined with AND into one revset
#[derive(Args, Default)]
struct RevsetArgs {
    /// Raw revset, passed through unchanged
    #[arg(short = 'r', long)]
    revset: Option<String>,

    /// Commit IDs (any of)
    #[arg(long = "commit")]
    commits: Vec<String>,

    /// Author or committer name
    #[arg(long)]
    user: Option<String>,

    /// Author name
    #[arg(long)]
    author: Option<String>,

    /// Workspace-relative paths touched (any of)
    #[arg(long = "file")]
    files: Vec<String>,

    /// Substring of the description
    #[arg(long)]
    description: Option<String>,

    /// Match description and paths case-insensitively
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Committed after this date
    #[arg(long)]
    after: Option<String>,

    /// Committed before this date
    #[arg(long)]
    before: Option<String>,

    /// Range start (`FROM::`)
    #[arg(long)]
    from: Option<String>,

    /// Range end (`::TO`)
    #[arg(long)]
    to: Option<String>,

    /// Select the parents of the result
    #[arg(long)]
    parent: bool,
}

impl RevsetArgs {
    /// Build the revset, or `None` when no filter was given
    fn build(&self) -> Result<Option<Revset>> {
        let case_sensitive = !self.ignore_case;
        let mut terms = Vec::new();

        if let Some(raw) = &self.revset {
            terms.push(Revset::symbol(raw.clone()));
        }
        if !self.commits.is_empty() {
            terms.push(Revset::or(
                self.commits.iter().map(|c| Revset::commit_id(c.clone())).collect(),
            ));
        }
        if let Some(user) = &self.user {
            terms.push(Revset::user(user.clone()));
        }
        if let Some(author) = &self.author {
            terms.push(Revset::author(author.clone()));
        }
        if !self.files.is_empty() {
            let patterns = self
                .files
                .iter()
                .map(|f| Pattern::root(f.clone(), case_sensitive))
                .collect();
            terms.push(Revset::files(Pattern::or(patterns)?));
        }
        if let Some(text) = &self.description {
            terms.push(Revset::description(Pattern::substring(text.clone(), case_sensitive)));
        }
        match (&self.after, &self.before) {
            (Some(after), Some(before)) => terms.push(Revset::committer_date(Pattern::and(vec![
                Pattern::date_after(after.clone()),
                Pattern::date_before(before.clone()),
            ])?)),
            (Some(after), None) => terms.push(Revset::committer_date(Pattern::date_after(after.clone()))),
            (None, Some(before)) => terms.push(Revset::committer_date(Pattern::date_before(before.clone()))),
            (None, None) => {}
        }
        if self.from.is_some() || self.to.is_some() {
            terms.push(Revset::range_with_root(
                self.from.clone().map(|s| Revset::symbol(s)),
                self.to.clone().map(|s| Revset::symbol(s)),
            ));
        }

        let combined = terms.into_iter().reduce(Revset::and);
        Ok(match combined {
            Some(revset) if self.parent => Some(Revset::parent_of(revset)),
            Some(revset) => Some(revset),
            None if self.parent => Some(Revset::parent_of(Revset::WORKING_COPY)),
            None => None,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Render { filters } => cmd_render(filters),
        Commands::Template { kind } => cmd_template(kind),
        Commands::Log { filters, limit } => cmd_log(cli.repo, filters, limit).await,
        Commands::Show { filters } => cmd_show(cli.repo, filters).await,
        Commands::Diff { filters } => cmd_diff(cli.repo, filters).await,
        Commands::Bookmarks { filters } => cmd_bookmarks(cli.repo, filters).await,
    }
}

/// Executor and configuration for the target repository
async fn open_repo(repo: Option<PathBuf>) -> Result<(JjCommand, StrataConfig)> {
    let root = match repo {
        Some(root) => root,
        None => JjCommand::detect(&StrataConfig::default())
            .await
            .context("Not in a JJ repository")?
            .repo_root()
            .clone(),
    };
    let config = StrataConfig::load_or_default(&root)
        .with_context(|| format!("Failed to load config for {}", root.display()))?;
    debug!("Using repository {}", root.display());
    Ok((JjCommand::with_config(root, &config), config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn cmd_init(path: PathBuf) -> Result<()> {
    info!("Initializing strata in {:?}", path);
    StrataConfig::write_default(&path).context("Failed to write config")?;
    println!("Wrote {}", path.join(".strata/config.toml").display());
    Ok(())
}

fn cmd_render(filters: RevsetArgs) -> Result<()> {
    let revset = filters.build()?.unwrap_or(Revset::ALL);
    println!("{}", revset.render());
    Ok(())
}

fn cmd_template(kind: TemplateKind) -> Result<()> {
    match kind {
        TemplateKind::Commit => println!("{}", COMMIT_TEMPLATE.as_str()),
        TemplateKind::Bookmark => println!("{}", BOOKMARK_TEMPLATE.as_str()),
    }
    Ok(())
}

async fn cmd_log(repo: Option<PathBuf>, filters: RevsetArgs, limit: Option<usize>) -> Result<()> {
    let (jj, config) = open_repo(repo).await?;
    let log = LogCommand::new(jj).with_default_limit(config.default_log_limit);

    let revset = filters.build()?;
    for commit in log.commits(revset.as_ref(), limit).await? {
        print_json(&commit)?;
    }
    Ok(())
}

async fn cmd_show(repo: Option<PathBuf>, filters: RevsetArgs) -> Result<()> {
    let (jj, _) = open_repo(repo).await?;
    let revset = filters.build()?;

    match ShowCommand::new(jj).commit(revset.as_ref()).await? {
        Some(commit) => print_json(&commit),
        None => anyhow::bail!("No commit matched"),
    }
}

async fn cmd_diff(repo: Option<PathBuf>, filters: RevsetArgs) -> Result<()> {
    let (jj, _) = open_repo(repo).await?;
    let revset = filters.build()?.unwrap_or(Revset::WORKING_COPY);

    for entry in DiffCommand::new(jj).entries(&revset).await? {
        print_json(&entry)?;
    }
    Ok(())
}

async fn cmd_bookmarks(repo: Option<PathBuf>, filters: RevsetArgs) -> Result<()> {
    let (jj, _) = open_repo(repo).await?;
    let revset = filters.build()?;

    for name in BookmarkCommand::new(jj).bookmark_names(revset.as_ref()).await? {
        println!("{}", name);
    }
    Ok(())
}
