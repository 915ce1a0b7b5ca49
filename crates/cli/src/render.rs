use anyhow::Context;
use stonks_core::domain::{BrowseMode, RatingEvent};
use stonks_core::store::{CatalogState, RecommendationState};

pub fn print_catalog(state: &CatalogState, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(state);
    }
    print!("{}", catalog_table(state));
    Ok(())
}

pub fn print_recommendations(state: &RecommendationState, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(state);
    }
    print!("{}", recommendations_table(state));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize state")?;
    println!("{out}");
    Ok(())
}

pub fn catalog_table(state: &CatalogState) -> String {
    let mut out = String::new();
    match state.mode() {
        BrowseMode::Listing => {
            let p = state.pagination();
            out.push_str(&format!(
                "Page {}/{} ({} ratings)\n",
                p.current_page, p.total_pages, p.total_count
            ));
        }
        BrowseMode::Search(ticker) => {
            out.push_str(&format!("Search: {ticker}\n"));
        }
    }

    if let Some(error) = state.error() {
        out.push_str(&format!("! {error}\n"));
    }

    for event in state.items() {
        out.push_str(&event_row(event));
        out.push('\n');
    }
    out
}

pub fn recommendations_table(state: &RecommendationState) -> String {
    let mut out = String::new();
    if let Some(error) = state.error() {
        out.push_str(&format!("! {error}\n"));
    }
    if state.items().is_empty() && state.error().is_none() {
        out.push_str("No recommendations available\n");
    }

    for (idx, rec) in state.items().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<6} score {:>5.1}  {}\n    {}\n",
            idx + 1,
            rec.event.ticker,
            rec.score,
            rec.reason,
            event_row(&rec.event)
        ));
    }
    out
}

fn event_row(event: &RatingEvent) -> String {
    format!(
        "{:<6} {:<28} {:<24} {:<20} {} -> {}  ${:.2} -> ${:.2}  {}",
        event.ticker,
        truncate(&event.company, 28),
        truncate(&event.brokerage, 24),
        event.action,
        event.rating_from,
        event.rating_to,
        event.target_from,
        event.target_to,
        event.time.format("%Y-%m-%d")
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
