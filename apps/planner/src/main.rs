use std::{process::ExitCode, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_itinerary, CatalogClient, CatalogSource, DropOutcome, FoodBrowser, ItinerarySummary,
    MoveOutcome, PlannerError, PlanningSession, RenderAdapter, SelectedRow, DEFAULT_SERVER_URL,
};
use shared::domain::{City, CityId};
use storage::Storage;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Plan a trip across the catalog cities")]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[arg(long, default_value = "sqlite://planner.db")]
    database_url: String,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the catalog server answers.
    Health,
    /// List every city in the catalog.
    Cities,
    /// Show the food browser, opening the given cities' panels.
    Foods {
        #[arg(long = "open")]
        open: Vec<i64>,
    },
    /// Select cities, reorder them and save the itinerary.
    Plan {
        #[arg(long = "select", num_args = 1.., required = true)]
        select: Vec<i64>,
        #[arg(long = "deselect")]
        deselect: Vec<i64>,
        /// Itinerary positions as FROM:TO, counted from 1.
        #[arg(long = "move", value_parser = parse_move)]
        moves: Vec<(usize, usize)>,
    },
    /// Print the saved itinerary with leg distances.
    Summary,
}

/// Mirrors the planner lists as text; the last frame is printed on exit.
#[derive(Default)]
struct TextRenderer {
    available: Vec<String>,
    selected: Vec<String>,
    frames: usize,
}

impl RenderAdapter for TextRenderer {
    fn render_available(&mut self, cities: &[City]) {
        self.available = cities.iter().map(|c| c.name.clone()).collect();
        self.frames += 1;
    }

    fn render_selected(&mut self, rows: &[SelectedRow]) {
        self.selected = rows.iter().map(SelectedRow::label).collect();
    }

    fn render_drag_indicator(&mut self, dragging: Option<usize>) {
        debug!(?dragging, "drag indicator");
    }
}

impl TextRenderer {
    fn print(&self) {
        println!("Available cities: {}", self.available.join(", "));
        println!("Selected cities:");
        for line in &self.selected {
            println!("  {line}");
        }
    }
}

fn parse_move(raw: &str) -> Result<(usize, usize), String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{raw}'"))?;
    let position = |s: &str| match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{s}' is not a position (1, 2, ...)")),
    };
    Ok((position(from)?, position(to)?))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", present(&err));
            ExitCode::FAILURE
        }
    }
}

fn present(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PlannerError>() {
        Some(planner) => planner.user_message(),
        None => format!("{err:#}"),
    }
}

async fn run(args: Args) -> Result<()> {
    let client = CatalogClient::new(&args.server_url, Duration::from_secs(args.timeout_secs))?;

    match args.command {
        Command::Health => {
            println!("{}", client.check_health().await?);
        }
        Command::Cities => {
            for city in client.list_cities().await? {
                println!("{} {}", city.id, city.name);
            }
        }
        Command::Foods { open } => {
            let mut browser = FoodBrowser::load(&client).await?;
            for id in open {
                browser.toggle(CityId(id), &client).await?;
            }
            for panel in browser.panels() {
                let chevron = if panel.is_open() { "^" } else { "v" };
                println!("{} {}", chevron, panel.city().name);
                for line in panel.lines() {
                    println!("    {line}");
                }
            }
        }
        Command::Plan {
            select,
            deselect,
            moves,
        } => {
            let mut session = PlanningSession::new(TextRenderer::default());
            session.load(&client).await?;
            apply_plan(&mut session, &select, &deselect, &moves);
            session.renderer().print();

            let storage = Storage::new(&args.database_url)
                .await
                .with_context(|| format!("failed to open '{}'", args.database_url))?;
            let submission = session.submit(&storage).await?;
            debug!(frames = session.renderer().frames, "plan rendered");
            println!(
                "Saved {} cities under '{}'.",
                submission.city_count, submission.key
            );
        }
        Command::Summary => {
            let storage = Storage::new(&args.database_url)
                .await
                .with_context(|| format!("failed to open '{}'", args.database_url))?;
            let itinerary = load_itinerary(&storage).await?;
            if itinerary.is_empty() {
                bail!("No saved itinerary. Run `plan` first.");
            }
            let distances = client.list_distances().await?;
            print_summary(&ItinerarySummary::build(&itinerary, &distances));
        }
    }
    Ok(())
}

/// Applies plan arguments in order and returns how many were ignored.
fn apply_plan<R: RenderAdapter>(
    session: &mut PlanningSession<R>,
    select: &[i64],
    deselect: &[i64],
    moves: &[(usize, usize)],
) -> usize {
    let mut ignored = 0;
    for &id in select {
        if session.select_id(CityId(id)) == MoveOutcome::Unchanged {
            warn!(city_id = id, "select ignored: city is not available");
            ignored += 1;
        }
    }
    for &id in deselect {
        if session.deselect_id(CityId(id)) == MoveOutcome::Unchanged {
            warn!(city_id = id, "deselect ignored: city is not selected");
            ignored += 1;
        }
    }
    for &(from, to) in moves {
        if session.reorder(from, to) == DropOutcome::Rejected {
            warn!(from = from + 1, to = to + 1, "move ignored");
            ignored += 1;
        }
    }
    ignored
}

fn print_summary(summary: &ItinerarySummary) {
    for stop in &summary.stops {
        println!("{}. {}", stop.ordinal, stop.city.name);
    }
    for (pair, leg) in summary.stops.windows(2).zip(&summary.legs) {
        let (from, to) = (&pair[0].city.name, &pair[1].city.name);
        match leg.distance {
            Some(km) => println!("  {from} -> {to}: {km} km"),
            None => println!("  {from} -> {to}: unknown"),
        }
    }
    print!("Total: {} km", summary.total_known_distance());
    if summary.has_unknown_legs() {
        print!(" (some legs unknown)");
    }
    println!();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
