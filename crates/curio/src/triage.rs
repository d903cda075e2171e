// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `curio triage` command implementation.
//!
//! A line-based swipe deck: `h`/`left` passes the head card, `l`/`right`
//! keeps it, `q` quits. Each commit waits for its status write so the
//! outcome can be printed next to the card.

use std::sync::Arc;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use curio_config::model::CurioConfig;
use curio_core::models::WishlistItem;
use curio_core::{CurationStore, CurioError, PluginAdapter, StaticIdentity};
use curio_curation::{Direction, MutationActions, TriageDeck, TriageSettings};
use curio_storage::SqliteStorage;

/// One line of input at the triage prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Swipe(Direction),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "h" | "left" => Some(Command::Swipe(Direction::Left)),
        "l" | "right" => Some(Command::Swipe(Direction::Right)),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn describe(item: &WishlistItem) -> String {
    let brand = item.brand.as_deref().unwrap_or("");
    format!(
        "{} {}{:.2} {}",
        item.name.bold(),
        item.currency,
        item.price,
        brand.dimmed()
    )
}

/// Runs the `curio triage` command against the configured store.
pub async fn run_triage(config: CurioConfig) -> Result<(), CurioError> {
    let storage = Arc::new(SqliteStorage::new(
        config.storage.clone(),
        &config.wishlist,
    ));
    storage.initialize().await?;

    let result = triage_loop(&config, storage.clone()).await;
    storage.shutdown().await?;
    result
}

async fn triage_loop(config: &CurioConfig, store: Arc<SqliteStorage>) -> Result<(), CurioError> {
    let items = store.fetch_wishlist().await?;
    let actions = Arc::new(MutationActions::new(
        store,
        Arc::new(StaticIdentity::anonymous()),
    ));
    let settings = TriageSettings::from(&config.triage);
    let mut deck = {
        let mut rng = rand::thread_rng();
        TriageDeck::new(items, &settings, actions, &mut rng)
    };
    info!(cards = deck.remaining(), "terminal triage started");

    let mut rl = DefaultEditor::new()
        .map_err(|e| CurioError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "curio triage".bold().green());
    println!(
        "{} pass, {} keep, {} quit\n",
        "h".yellow(),
        "l".yellow(),
        "q".yellow()
    );

    let (mut kept, mut passed) = (0usize, 0usize);
    loop {
        let Some(head) = deck.head() else {
            println!("{}", "Deck empty.".green());
            break;
        };
        println!("{}  ({} left)", describe(head), deck.remaining());

        match rl.readline("> ") {
            Ok(line) => match parse_command(&line) {
                Some(Command::Quit) => break,
                Some(Command::Swipe(direction)) => {
                    let Some(commit) = deck.commit(direction) else {
                        continue;
                    };
                    let written = commit.write.await.unwrap_or(false);
                    match direction {
                        Direction::Left => passed += 1,
                        Direction::Right => kept += 1,
                    }
                    let label = match direction {
                        Direction::Left => "passed".red(),
                        Direction::Right => "kept".green(),
                    };
                    if written {
                        println!("{label} {}", commit.item.name);
                    } else {
                        eprintln!(
                            "{}: status write for {} failed",
                            "error".red(),
                            commit.item.name
                        );
                    }
                }
                None => println!("{}", "h, l or q".dimmed()),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", format!("kept {kept}, passed {passed}").dimmed());
    Ok(())
}
