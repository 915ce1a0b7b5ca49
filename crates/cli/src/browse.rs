use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use stonks_core::domain::{BrowseMode, PageDescriptor};
use stonks_core::store::catalog::FIRST_PAGE;
use stonks_core::store::{CatalogState, CatalogStore, RecommendationState, RecommendationStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::render;

const HELP: &str = "commands: n (next page), p (previous page), g N (go to page), \
s TICKER (search), c (clear search), r (recommendations), h (help), q (quit)";

type Intent = Pin<Box<dyn Future<Output = ()> + Send>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Next,
    Previous,
    Goto(u32),
    Search(String),
    Clear,
    Recommendations,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let cmd = match (head, arg) {
        ("n" | "next", None) => BrowseCommand::Next,
        ("p" | "prev", None) => BrowseCommand::Previous,
        ("g" | "goto", Some(n)) => match n.parse::<u32>() {
            Ok(page) if page >= FIRST_PAGE => BrowseCommand::Goto(page),
            _ => return Err(format!("invalid page: {n}")),
        },
        ("s" | "search", Some(ticker)) => BrowseCommand::Search(ticker.to_uppercase()),
        ("c" | "clear", None) => BrowseCommand::Clear,
        ("r" | "recs", None) => BrowseCommand::Recommendations,
        ("h" | "help", None) => BrowseCommand::Help,
        ("q" | "quit", None) => BrowseCommand::Quit,
        _ => return Err(format!("unrecognized command: {}", line.trim())),
    };

    if parts.next().is_some() {
        return Err(format!("unexpected arguments: {}", line.trim()));
    }
    Ok(Some(cmd))
}

pub async fn run(
    catalog: CatalogStore,
    recommendations: RecommendationStore,
    json: bool,
) -> anyhow::Result<()> {
    let catalog_watch = tokio::spawn(log_catalog_changes(catalog.subscribe()));
    let recs_watch = tokio::spawn(log_recommendation_changes(recommendations.subscribe()));

    catalog.load_page(FIRST_PAGE).await;
    render::print_catalog(&catalog.snapshot(), json)?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}\n{HELP}");
                continue;
            }
        };

        match cmd {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Recommendations => {
                recommendations.load_recommendations().await;
                render::print_recommendations(&recommendations.snapshot(), json)?;
            }
            cmd => {
                let Some(intent) = catalog_intent(&catalog, cmd) else {
                    continue;
                };
                intent.await;
                render::print_catalog(&catalog.snapshot(), json)?;
            }
        }
    }

    catalog_watch.abort();
    recs_watch.abort();
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
}

/// Page to load for a next/previous step, or why paging is refused.
fn step_target(
    mode: &BrowseMode,
    page: &PageDescriptor,
    step: Step,
) -> Result<u32, &'static str> {
    if mode.is_search() {
        return Err("clear the search (c) before paging");
    }
    match step {
        Step::Next if page.has_next_page() => Ok(page.current_page + 1),
        Step::Next => Err("already on the last page"),
        Step::Previous if page.has_previous_page() => Ok(page.current_page - 1),
        Step::Previous => Err("already on the first page"),
    }
}

fn catalog_intent(catalog: &CatalogStore, cmd: BrowseCommand) -> Option<Intent> {
    let state = catalog.snapshot();
    match cmd {
        BrowseCommand::Next | BrowseCommand::Previous => {
            let step = if cmd == BrowseCommand::Next {
                Step::Next
            } else {
                Step::Previous
            };
            match step_target(state.mode(), state.pagination(), step) {
                Ok(page) => Some(Box::pin(catalog.load_page(page)) as Intent),
                Err(refusal) => {
                    println!("{refusal}");
                    None
                }
            }
        }
        BrowseCommand::Goto(page) => Some(Box::pin(catalog.load_page(page)) as Intent),
        BrowseCommand::Search(ticker) => {
            Some(Box::pin(catalog.search_by_ticker(&ticker)) as Intent)
        }
        BrowseCommand::Clear => Some(Box::pin(catalog.clear_search()) as Intent),
        BrowseCommand::Recommendations | BrowseCommand::Help | BrowseCommand::Quit => None,
    }
}

async fn log_catalog_changes(mut rx: watch::Receiver<CatalogState>) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        tracing::debug!(
            loading = state.loading(),
            search_ticker = state.search_ticker(),
            page = state.pagination().current_page,
            items = state.items().len(),
            error = ?state.error(),
            "catalog state changed"
        );
    }
}

async fn log_recommendation_changes(mut rx: watch::Receiver<RecommendationState>) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        tracing::debug!(
            loading = state.loading(),
            items = state.items().len(),
            error = ?state.error(),
            "recommendations state changed"
        );
    }
}
