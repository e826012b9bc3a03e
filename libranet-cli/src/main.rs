//! libranet CLI
//!
//! Command-line driver for the lending-library catalog.

use chrono::{Days, Local};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use libranet_catalog::LibraryCatalog;
use libranet_core::{
    AudiobookDetails, BookDetails, CatalogError, ItemDetails, ItemKind, MagazineDetails, NewItem,
};

mod settings;

#[derive(Parser)]
#[command(name = "libranet")]
#[command(about = "Manage a lending-library catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a seeded catalog through the full lending lifecycle
    Demo {
        /// Fine charged per overdue day (overrides settings.toml)
        #[arg(long)]
        fine_rate: Option<f64>,

        /// Print closing statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported item kinds and their aliases
    Kinds,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { fine_rate, json } => {
            if let Err(e) = run_demo(fine_rate, json) {
                eprintln!(
                    "{} {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e,
                );
                std::process::exit(1);
            }
        }
        Commands::Kinds => run_kinds(),
    }
}

/// Build the three seed items for the demo catalog.
fn seed_items() -> Result<Vec<NewItem>, CatalogError> {
    let book = NewItem::new(
        "The Name of the Wind",
        "Patrick Rothfuss",
        ItemDetails::Book(BookDetails::new(
            662,
            "978-0-7564-0474-1",
            "Fantasy",
            "DAW Books",
            2007,
        )?),
    )?;
    let audiobook = NewItem::new(
        "Project Hail Mary",
        "Andy Weir",
        ItemDetails::Audiobook(AudiobookDetails::new(
            970,
            "Ray Porter",
            "M4B",
            645.8,
            true,
            "High",
            "English",
        )?),
    )?;
    let today = Local::now().date_naive();
    let published = today.checked_sub_days(Days::new(10)).unwrap_or(today);
    let magazine = NewItem::new(
        "National Geographic",
        "Editorial Staff",
        ItemDetails::EMagazine(MagazineDetails::new(
            256,
            "National Geographic Society",
            "Science",
            published,
            120,
            "https://example.com/covers/natgeo-256.jpg",
        )?),
    )?;
    Ok(vec![book, audiobook, magazine])
}

fn run_demo(fine_rate: Option<f64>, json: bool) -> Result<(), CatalogError> {
    let rate = settings::resolve_fine_rate(fine_rate);
    let today = Local::now().date_naive();
    let mut catalog = LibraryCatalog::with_fine_rate(rate);

    println!(
        "{} (fine rate: {rate:.2}/day)",
        "Cataloging items".if_supports_color(Stdout, |t| t.bold()),
    );
    for draft in seed_items()? {
        let id = catalog.add_item(draft);
        if let Some(item) = catalog.item(id) {
            println!("  {} {item}", "+".if_supports_color(Stdout, |t| t.green()));
            println!(
                "    {}",
                item.details()
                    .summary()
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    println!();

    // One loan running on time, one back-dated so it is already overdue.
    println!("{}", "Checking out".if_supports_color(Stdout, |t| t.bold()));
    catalog.borrow_item_on(1, "Alice", "2 weeks", today)?;
    println!("  item 1 to Alice for 2 weeks");
    let twelve_days_ago = today.checked_sub_days(Days::new(12)).unwrap_or(today);
    catalog.borrow_item_on(2, "Bob", "7 days", twelve_days_ago)?;
    println!("  item 2 to Bob for 7 days, twelve days ago");
    println!();

    println!("{}", "Queries".if_supports_color(Stdout, |t| t.bold()));
    print_items("Title search 'the'", &catalog.search_by_title("the"));
    print_items("Available", &catalog.available_items());
    print_items("Checked out", &catalog.borrowed_items());
    print_items("Overdue", &catalog.overdue_items_on(today));
    println!();

    println!("{}", "Returning".if_supports_color(Stdout, |t| t.bold()));
    let fine = catalog.return_item_on(1, today)?;
    print_return("item 1 from Alice", fine);
    let fine = catalog.return_item_on(2, today)?;
    print_return("item 2 from Bob", fine);
    println!(
        "  Bob owes {:.2} in total",
        catalog.borrower_fine("Bob"),
    );
    println!();

    println!("{}", "Borrower history".if_supports_color(Stdout, |t| t.bold()));
    for name in ["Alice", "Bob"] {
        for record in catalog.borrower_history(name) {
            println!(
                "  {name}: '{}' ({}) borrowed {}, due {}",
                record.title, record.kind, record.borrowed_on, record.due_on,
            );
        }
    }
    println!();

    let stats = catalog.statistics_on(today);
    println!("{}", "Statistics".if_supports_color(Stdout, |t| t.bold()));
    println!("  items:     {} total, {} available", stats.total_items, stats.available_items);
    println!(
        "  kinds:     {} books, {} audiobooks, {} e-magazines",
        stats.books, stats.audiobooks, stats.e_magazines,
    );
    println!("  borrowers: {}", stats.total_borrowers);
    println!("  fines:     {:.2} outstanding", stats.total_outstanding_fines);

    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("could not serialize statistics: {e}"),
        }
    }

    Ok(())
}

fn print_return(label: &str, fine: f64) {
    if fine > 0.0 {
        println!(
            "  {label}: {}",
            format!("fine {fine:.2}").if_supports_color(Stdout, |t| t.red()),
        );
    } else {
        println!(
            "  {label}: {}",
            "no fine".if_supports_color(Stdout, |t| t.green()),
        );
    }
}

fn print_items(label: &str, items: &[libranet_core::CatalogItem]) {
    println!("  {}", label.if_supports_color(Stdout, |t| t.cyan()));
    if items.is_empty() {
        println!("    {}", "(none)".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for item in items {
        println!("    {item}");
    }
}

/// Run the kinds command.
fn run_kinds() {
    println!("Supported item kinds:");
    println!();
    for kind in ItemKind::all() {
        println!(
            "  {}",
            kind.as_str().if_supports_color(Stdout, |t| t.bold()),
        );
        println!("    Aliases: {}", kind.aliases().join(", "));
    }
}
