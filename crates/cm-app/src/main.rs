//! Main application entry point

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use cm_core::events::events::{DatasetLoaded, DatasetLoadFailed};
use cm_core::events::{handler_from_fn, EventBus};
use cm_core::navigation::YearCursor;
use cm_core::records::DatasetKind;
use cm_core::selection::SelectionState;
use cm_data::index::TemporalIndex;
use cm_data::loader::DatasetLoader;
use cm_data::sources::CsvRowSource;
use cm_data::DatasetsConfig;
use cm_views::browser::MapBrowser;
use cm_views::surface::MapDefaults;

mod console;
mod demo;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting chronomap");

    let runtime = tokio::runtime::Runtime::new()?;

    let index = Arc::new(TemporalIndex::new());
    let events = Arc::new(EventBus::new());
    subscribe_load_logging(&events);

    let loader = DatasetLoader::new(index.clone(), events);
    load_datasets(&runtime, &loader)?;

    let surface = Arc::new(console::ConsoleSurface::new(MapDefaults::default()));
    let browser = MapBrowser::new(
        index,
        Arc::new(YearCursor::new()),
        Arc::new(SelectionState::new()),
        surface.clone(),
        surface,
    );

    run_command_loop(&browser)
}

/// Mirror load lifecycle events into the log
fn subscribe_load_logging(events: &EventBus) {
    events.subscribe::<DatasetLoaded>(handler_from_fn(|event| {
        if let Some(loaded) = event.as_any().downcast_ref::<DatasetLoaded>() {
            info!(
                dataset = loaded.dataset.as_str(),
                source = %loaded.source_name,
                records = loaded.record_count,
                "dataset ready"
            );
        }
    }));
    events.subscribe::<DatasetLoadFailed>(handler_from_fn(|event| {
        if let Some(failed) = event.as_any().downcast_ref::<DatasetLoadFailed>() {
            warn!(
                dataset = failed.dataset.as_str(),
                source = %failed.source_name,
                error = %failed.error,
                "dataset unavailable, map will show the other dataset only"
            );
        }
    }));
}

/// Load both datasets from the configured CSV files, or fall back to the
/// built-in demo rows when no configuration is given.
///
/// A failed dataset leaves its index empty; the browser still runs with
/// whatever did load.
fn load_datasets(runtime: &tokio::runtime::Runtime, loader: &DatasetLoader) -> Result<()> {
    match std::env::args().nth(1) {
        Some(config_path) => {
            let config = DatasetsConfig::load(Path::new(&config_path))?;
            let bread = CsvRowSource::new(&config.bread.path, DatasetKind::Bread)
                .with_delimiter(delimiter_byte(config.bread.delimiter));
            let history = CsvRowSource::new(&config.history.path, DatasetKind::History)
                .with_delimiter(delimiter_byte(config.history.delimiter));

            runtime.block_on(async {
                tokio::join!(loader.load_bread(&bread), loader.load_history(&history));
            });
        }
        None => {
            info!("no dataset config given, using built-in demo data");
            let (bread, history) = demo::demo_sources();
            runtime.block_on(async {
                tokio::join!(loader.load_bread(&bread), loader.load_history(&history));
            });
        }
    }
    Ok(())
}

fn delimiter_byte(delimiter: char) -> u8 {
    u8::try_from(delimiter).unwrap_or_else(|_| {
        warn!(%delimiter, "non-ascii delimiter, falling back to comma");
        b','
    })
}

fn print_help() {
    println!("commands:");
    println!("  back / forward   step the year cursor by 100 years");
    println!("  reset            restore the initial year and recenter the map");
    println!("  markers          reprint the visible marker set");
    println!("  list             print every record, mappable or not");
    println!("  years            print the populated year buckets");
    println!("  open <n>         open the detail view for visible marker n");
    println!("  select <n>       open listing entry n and fly to it");
    println!("  close            dismiss the detail view");
    println!("  quit             exit");
}

fn print_listing(browser: &MapBrowser) {
    for (position, entry) in browser.listing().iter().enumerate() {
        let year = entry
            .year_category
            .map(cm_core::navigation::year_label)
            .unwrap_or_else(|| "unmapped".to_string());
        let located = if entry.fly_target().is_some() {
            ""
        } else {
            " (no location)"
        };
        println!(
            "  [{position}] {} {} - {}{}",
            entry.source.as_str(),
            year,
            entry.label,
            located
        );
    }
}

fn run_command_loop(browser: &MapBrowser) -> Result<()> {
    print_help();

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{} > ", browser.current_year_label());
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("back") | Some("b") => {
                browser.step_back();
            }
            Some("forward") | Some("f") => {
                browser.step_forward();
            }
            Some("reset") => browser.reset_view(),
            Some("markers") | Some("m") => browser.refresh(),
            Some("list") | Some("l") => print_listing(browser),
            Some("years") | Some("y") => {
                let labels: Vec<String> = browser
                    .populated_years()
                    .into_iter()
                    .map(cm_core::navigation::year_label)
                    .collect();
                println!("  {}", labels.join(", "));
            }
            Some("open") | Some("o") => match parts.next().and_then(|raw| raw.parse().ok()) {
                Some(position) => {
                    if !browser.activate_marker(position) {
                        println!("no visible marker {position}");
                    }
                }
                None => println!("usage: open <marker#>"),
            },
            Some("select") | Some("s") => match parts.next().and_then(|raw| raw.parse::<usize>().ok()) {
                Some(position) => {
                    let listing = browser.listing();
                    match listing.get(position) {
                        Some(entry) => browser.activate_list_entry(entry),
                        None => println!("no listing entry {position}"),
                    }
                }
                None => println!("usage: select <entry#>"),
            },
            Some("close") | Some("c") => browser.dismiss_detail(),
            Some("help") | Some("h") => print_help(),
            Some("quit") | Some("q") => break,
            Some(other) => println!("unknown command: {other} (try help)"),
            None => {}
        }
    }

    Ok(())
}
