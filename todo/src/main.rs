//! Command-line front end for the todo list.
//!
//! # Usage
//!
//! ```bash
//! todomvc add Buy milk
//! todomvc add Walk the dog
//! todomvc toggle 1
//! todomvc list --filter active
//! todomvc edit 2 Walk the cat
//! todomvc clear-completed
//! todomvc summary
//! ```
//!
//! Indices on the command line start at 1. The list is stored in
//! `TODO_DATA_FILE` (default `todos.json`) under `TODO_STORAGE_KEY`.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use todomvc::{
    FileStorage, Filter, TodoAction, TodoConfig, TodoEnvironment, TodoPersistence, TodoReducer,
    TodoState,
};
use todomvc_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "todomvc", version, about = "Keep track of things to do")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a todo
    Add {
        /// Label words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        label: Vec<String>,
    },
    /// Show todos
    List {
        /// Which todos to show
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Flip a todo between active and completed
    Toggle {
        /// 1-based position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
    /// Mark every todo completed (or active with --undo)
    ToggleAll {
        /// Mark every todo active instead
        #[arg(long)]
        undo: bool,
    },
    /// Replace the label of a todo
    Edit {
        /// 1-based position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
        /// New label words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        label: Vec<String>,
    },
    /// Delete a todo
    Destroy {
        /// 1-based position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        index: u64,
    },
    /// Delete every completed todo
    ClearCompleted,
    /// Show counts
    Summary,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Active => Self::Active,
            FilterArg::Completed => Self::Completed,
        }
    }
}

/// Converts a 1-based command-line position to a list index
fn position(index: u64) -> anyhow::Result<usize> {
    usize::try_from(index - 1).context("index too large")
}

/// Actions a command sends, in order
fn actions_for(command: &Command) -> anyhow::Result<Vec<TodoAction>> {
    let actions = match command {
        Command::Add { label } => vec![TodoAction::Create {
            label: label.join(" "),
        }],
        Command::List { filter } => vec![TodoAction::SetFilter {
            filter: (*filter).into(),
        }],
        Command::Toggle { index } => vec![TodoAction::Toggle {
            index: position(*index)?,
        }],
        Command::ToggleAll { undo } => vec![TodoAction::ToggleAll { completed: !undo }],
        Command::Edit { index, label } => {
            let index = position(*index)?;
            vec![
                TodoAction::BeginEdit { index },
                TodoAction::EditLabel {
                    index,
                    label: label.join(" "),
                },
                TodoAction::CommitEdit { index },
            ]
        },
        Command::Destroy { index } => vec![TodoAction::Destroy {
            index: position(*index)?,
        }],
        Command::ClearCompleted => vec![TodoAction::ClearCompleted],
        Command::Summary => Vec::new(),
    };
    Ok(actions)
}

/// Rejections that are reported as warnings instead of failing the command
fn is_recoverable(action: &TodoAction) -> bool {
    matches!(action, TodoAction::Create { label } if label.trim().is_empty())
}

fn print_list(state: &TodoState) {
    for (i, todo) in state.todos.iter().enumerate() {
        if state.filter.matches(todo) {
            let mark = if todo.completed { "x" } else { " " };
            println!("{:>3}. [{mark}] {}", i + 1, todo.label);
        }
    }
}

fn print_summary(state: &TodoState) {
    let summary = state.todos.summary();
    println!("{}", summary.items_left());
    if summary.completed_count > 0 {
        println!("{} completed", summary.completed_count);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = TodoConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(?config, "Loaded configuration");

    let storage = Arc::new(FileStorage::new(&config.data_file));
    let persistence = TodoPersistence::with_key(storage, config.storage_key.clone());
    let items = persistence
        .load()
        .with_context(|| format!("loading todos from {}", config.data_file.display()))?;
    tracing::info!(count = items.len(), "Loaded todos");

    let store = Store::new(
        TodoState::from_items(items),
        TodoReducer::new(),
        TodoEnvironment::new(persistence),
    );

    for action in actions_for(&cli.command)? {
        let recoverable = is_recoverable(&action);
        store.send(action).await?;
        match store.state(|s| s.last_error.clone()).await {
            Some(error) if recoverable => eprintln!("warning: {error}"),
            Some(error) => bail!(error),
            None => {},
        }
    }

    match cli.command {
        Command::Summary => store.state(print_summary).await,
        _ => store.state(print_list).await,
    }

    Ok(())
}
