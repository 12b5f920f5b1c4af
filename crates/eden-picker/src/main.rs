//! Eden picker demo - scripted interaction against an in-memory catalog.
//!
//! Runs the picker through a typical session: open, type with
//! mid-flight retyping, load more pages, navigate, select. Useful for
//! eyeballing debounce coalescing and stale-response handling under
//! `RUST_LOG=debug`.

use std::sync::Arc;
use std::time::Duration;

use eden_core::PickerConfig;
use eden_picker::{Key, Picker, PickerOptions, PickerSnapshot};
use eden_source::StaticCatalog;

fn demo_catalog() -> StaticCatalog {
    let items = vec![
        ("1", "Rose bush", "Shrub, flowering", 12, 12.50),
        ("2", "Rosemary", "Herb, drought tolerant", 30, 4.75),
        ("3", "Primrose", "Perennial, shade", 18, 3.20),
        ("4", "Fern", "Perennial, shade", 0, 6.00),
        ("5", "Olive tree", "Tree, full sun", 4, 89.00),
        ("6", "Lavender", "Shrub, full sun", 25, 5.10),
        ("7", "Garden hose 20m", "Irrigation", 9, 24.99),
        ("8", "Drip irrigation kit", "Irrigation", 7, 54.00),
        ("9", "Pruning shears", "Tool", 15, 18.30),
        ("10", "Compost 50L", "Soil amendment", 40, 11.00),
        ("11", "Rose fertilizer", "Soil amendment", 22, 9.80),
        ("12", "Boxwood", "Shrub, hedging", 16, 14.40),
    ];

    StaticCatalog::new(
        items
            .into_iter()
            .map(|(id, label, detail, qty, price)| {
                eden_core::Candidate::new(id, label)
                    .with_detail(detail)
                    .with_quantity(qty)
                    .with_price(price)
            })
            .collect(),
    )
    .with_latency(Duration::from_millis(40))
}

fn print_snapshot(snapshot: &PickerSnapshot) {
    if !snapshot.is_open {
        println!("  [closed] input: {:?}", snapshot.display_text);
        return;
    }
    println!(
        "  [open] query: {:?}  loading: {}  page: {}  more: {}",
        snapshot.query, snapshot.loading, snapshot.page, snapshot.has_more
    );
    for (i, c) in snapshot.candidates.iter().enumerate() {
        let marker = if snapshot.cursor == Some(i) { ">" } else { " " };
        let stock = c
            .quantity_available
            .map(|q| format!(" ({q} in stock)"))
            .unwrap_or_default();
        println!("   {marker} {} - {}{stock}", c.id, c.label);
    }
}

async fn wait_for(
    picker: &Picker<StaticCatalog>,
    pred: impl Fn(&PickerSnapshot) -> bool,
) -> PickerSnapshot {
    let mut rx = picker.subscribe();
    loop {
        let snapshot = rx.borrow_and_update().clone();
        if pred(&snapshot) {
            return snapshot;
        }
        if rx.changed().await.is_err() {
            return snapshot;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = PickerConfig::load().unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {}", e);
        PickerConfig::default()
    });

    let source = Arc::new(demo_catalog());
    let picker = Picker::new(
        source.clone(),
        PickerOptions::from_config(&config)
            .with_placeholder("Search products...")
            .with_page_size(4)
            .with_debounce(Duration::from_millis(120)),
    );

    println!("opening the picker (browse, page size 4):");
    picker.open();
    print_snapshot(&wait_for(&picker, |s| s.page == 1 && !s.loading).await);

    println!("\nloading one more page:");
    picker.load_more();
    tokio::time::sleep(Duration::from_millis(80)).await;
    print_snapshot(&picker.snapshot());

    println!("\ntyping \"r\", \"ro\", \"rose\" in quick succession:");
    picker.input("r");
    tokio::time::sleep(Duration::from_millis(30)).await;
    picker.input("ro");
    tokio::time::sleep(Duration::from_millis(30)).await;
    picker.input("rose");
    print_snapshot(&wait_for(&picker, |s| s.query == "rose" && s.page == 1 && !s.loading).await);
    println!(
        "  ({} page request(s) hit the source for 3 keystrokes)",
        source
            .page_requests()
            .iter()
            .filter(|r| r.query.is_some())
            .count()
    );

    println!("\nnavigating down twice and selecting:");
    picker.key(Key::Down);
    picker.key(Key::Down);
    match picker.key(Key::Enter) {
        Some(candidate) => println!("  selected: {} ({})", candidate.label, candidate.id),
        None => println!("  nothing selected"),
    }
    print_snapshot(&picker.snapshot());
}
