//! TafelTour CLI
//!
//! Location-triggered Wikipedia lookups from the command line.
//!
//! Usage:
//!     tafeltour import tafeln.geojson
//!     tafeltour list --at 49.3786,10.1787
//!     tafeltour near --at 49.3786,10.1787
//!     tafeltour tour < positions.txt

use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use tafeltour::adapters::geojson;
use tafeltour::adapters::store::JsonStore;
use tafeltour::adapters::wikipedia::WikipediaClient;
use tafeltour::core::{Board, Id, LatLon, ProximityResolver, TourConfig};
use tafeltour::pipeline::{LookupPipeline, Summary};
use tafeltour::ports::BoardStore;
use tafeltour::session::{TourEvent, TourSession};

/// TafelTour - Wikipedia summaries for nearby information boards
#[derive(Parser)]
#[command(name = "tafeltour")]
#[command(version)]
#[command(about = "Location-triggered Wikipedia lookups for tourist boards", long_about = None)]
struct Cli {
    /// Board store file
    #[arg(long, default_value = "~/.tafeltour/boards.json", global = true)]
    store: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import boards from a GeoJSON feature collection
    Import {
        /// GeoJSON file with point features
        file: PathBuf,
    },

    /// List stored boards, nearest first when a position is given
    List {
        /// Position as lat,lon
        #[arg(long, value_parser = parse_position)]
        at: Option<LatLon>,

        /// Only show boards whose label contains this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show the board considered nearby at a position
    Near {
        /// Position as lat,lon
        #[arg(long, value_parser = parse_position)]
        at: LatLon,

        /// Proximity threshold in metres
        #[arg(long, default_value = "1000")]
        threshold: f64,
    },

    /// Fetch the Wikipedia summary for a stored board
    Lookup {
        /// Board label (case-insensitive substring match)
        label: String,

        /// Wikipedia language edition
        #[arg(short, long, default_value = "de")]
        language: String,
    },

    /// Follow positions from stdin and announce nearby boards
    Tour {
        /// Wikipedia language edition
        #[arg(short, long, default_value = "de")]
        language: String,

        /// Proximity threshold in metres
        #[arg(long, default_value = "1000")]
        threshold: f64,
    },
}

fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

fn parse_position(s: &str) -> Result<LatLon, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lon, got {:?}", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude {:?}", lat))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude {:?}", lon))?;
    Ok(LatLon::new(lat, lon))
}

fn open_store(path: &str) -> Result<JsonStore, Box<dyn Error>> {
    let path = expand_path(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(JsonStore::open(path)?)
}

fn print_summary(summary: &Summary) {
    println!("{}", summary.title);
    println!();
    println!("{}", summary.extract);
    if let Some(url) = &summary.page_url {
        println!();
        println!("  {}", url);
    }
}

fn cmd_import(store_path: &str, file: &PathBuf) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(store_path)?;
    let boards = geojson::import_file(file)?;
    let count = boards.len();
    store.insert(boards)?;

    println!(
        "Imported {} boards ({} total in {})",
        count,
        store.len(),
        store.path().display()
    );
    Ok(())
}

fn cmd_list(
    store_path: &str,
    at: Option<LatLon>,
    filter: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let store = open_store(store_path)?;
    let mut resolver = ProximityResolver::new(TourConfig::default());
    resolver.set_boards(store.boards()?);
    if let Some(position) = at {
        resolver.update(position);
    }

    let rows = resolver.listing(filter);
    if rows.is_empty() {
        println!("No boards. Import some with: tafeltour import <file.geojson>");
        return Ok(());
    }

    for (distance, board) in rows {
        let marker = if board.resolved_title.is_some() {
            "*"
        } else {
            " "
        };
        match distance {
            Some(m) => println!("{:>9.2} km {} {}", m / 1000.0, marker, board.label),
            None => println!("{:>12} {} {}", "", marker, board.label),
        }
    }
    Ok(())
}

fn cmd_near(store_path: &str, at: LatLon, threshold: f64) -> Result<(), Box<dyn Error>> {
    let store = open_store(store_path)?;
    let mut resolver = ProximityResolver::new(TourConfig::new().with_threshold_m(threshold));
    resolver.set_boards(store.boards()?);
    resolver.update(at);

    match resolver.nearby_board() {
        Some(board) => println!("{} ({})", board.label, board.coords),
        None => println!("No board within {} m.", threshold),
    }
    Ok(())
}

fn cmd_lookup(store_path: &str, label: &str, language: &str) -> Result<(), Box<dyn Error>> {
    let store = open_store(store_path)?;
    let needle = label.to_lowercase();
    let board = store
        .boards()?
        .into_iter()
        .find(|b| b.label.to_lowercase().contains(&needle))
        .ok_or_else(|| format!("no stored board matches {:?}", label))?;

    let client = WikipediaClient::for_language(language);
    let mut pipeline = LookupPipeline::new(client, store);

    match pipeline.resolve(&board) {
        Some(summary) => print_summary(&summary),
        None => println!("No usable article for {:?}.", board.label),
    }
    Ok(())
}

fn cmd_tour(store_path: &str, language: &str, threshold: f64) -> Result<(), Box<dyn Error>> {
    let store = open_store(store_path)?;
    let boards = store.boards()?;

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                 TAFELTOUR - Follow the boards                    ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Boards: {:<55} ║", boards.len());
    println!("║  Threshold: {:<49} m ║", threshold);
    println!("║  Wikipedia: {:<52} ║", format!("{}.wikipedia.org", language));
    println!("║  Feed positions as lat,lon lines on stdin                        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let mut session =
        TourSession::new(ProximityResolver::new(TourConfig::new().with_threshold_m(threshold)));
    session.set_boards(boards);

    let client = WikipediaClient::for_language(language);
    let mut pipeline = LookupPipeline::new(client, store);

    // Lookups run on their own thread so reading positions never waits
    // on the network
    let (job_tx, job_rx) = mpsc::channel::<Board>();
    let (result_tx, result_rx) = mpsc::channel::<(Id, Option<Summary>)>();

    let worker = thread::spawn(move || {
        while let Ok(board) = job_rx.recv() {
            let id = board.id;
            let summary = pipeline.resolve(&board);
            if result_tx.send((id, summary)).is_err() {
                break;
            }
        }
    });

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let position = match parse_position(line) {
            Ok(position) => position,
            Err(err) => {
                warn!("Ignoring {:?}: {}", line, err);
                continue;
            }
        };

        match session.on_position(position) {
            Some(TourEvent::Approaching(board)) => {
                println!(">> Approaching {}", board.label);
                if !board.note.is_empty() {
                    println!("   {}", board.note);
                }
                job_tx.send(board).ok();
            }
            Some(TourEvent::Departed) => println!(">> No board nearby."),
            None => {}
        }

        for (id, summary) in result_rx.try_iter() {
            present(&session, id, summary);
        }
    }

    // Let in-flight lookups finish, then drain what is still current
    drop(job_tx);
    for (id, summary) in result_rx.iter() {
        present(&session, id, summary);
    }
    if worker.join().is_err() {
        warn!("Lookup worker panicked");
    }

    Ok(())
}

/// Print a finished lookup unless its board stopped being the nearby
/// one while the lookup was in flight
fn present(session: &TourSession, id: Id, summary: Option<Summary>) {
    if !session.admit(id) {
        debug!("Discarding stale lookup result for {}", id);
        return;
    }
    match summary {
        Some(summary) => {
            println!();
            print_summary(&summary);
            println!();
        }
        None => println!("   No usable article for this board."),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Import { file } => cmd_import(&cli.store, file),
        Commands::List { at, filter } => cmd_list(&cli.store, *at, filter.as_deref()),
        Commands::Near { at, threshold } => cmd_near(&cli.store, *at, *threshold),
        Commands::Lookup { label, language } => cmd_lookup(&cli.store, label, language),
        Commands::Tour {
            language,
            threshold,
        } => cmd_tour(&cli.store, language, *threshold),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
