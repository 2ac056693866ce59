//! Dashboard example: documents and users behind list controllers and HTTP
//!
//! This example demonstrates:
//! - Loading collection settings from YAML (or the built-in defaults)
//! - In-memory stores with simulated latency and change events
//! - Driving a list controller with search, filter and sort intents
//! - Serving both collections over HTTP
//!
//! ```text
//! RUST_LOG=listview=debug cargo run --example dashboard [config.yaml]
//! curl 'http://127.0.0.1:3000/documents?search=doe&sort_by=size&order=desc'
//! ```

use anyhow::Result;
use listview::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("listview=info")),
        )
        .init();

    println!("📋 listview dashboard example");
    println!("==============================\n");

    let config = match std::env::args().nth(1) {
        Some(path) => ListConfig::from_yaml_file(&path)?,
        None => ListConfig::default_config(),
    };
    let documents_config = config.collection("documents")?;
    let users_config = config.collection("users")?;

    let events = EventBus::default();
    let mut changes = events.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = changes.recv().await {
            tracing::info!(
                collection = envelope.event.collection(),
                id = envelope.event.record_id(),
                action = envelope.event.action(),
                "change event"
            );
        }
    });

    let documents = Arc::new(
        InMemoryRecordStore::with_records(mock_documents(50))
            .with_pipeline(documents_config.pipeline())
            .with_latency(documents_config.latency())
            .with_event_bus(events.clone()),
    );
    let users = Arc::new(
        InMemoryRecordStore::with_records(mock_users(30))
            .with_pipeline(users_config.pipeline())
            .with_latency(users_config.latency())
            .with_event_bus(events),
    );

    // === A list view over the shared documents store ===
    let controller: ListController<Document, _> =
        ListController::with_state(documents.clone(), documents_config.initial_state());
    let builder = documents_config.filter_builder();

    let draft = builder.clause("status", Operator::Eq, "Draft")?;
    println!("🔎 Filter: {}", builder.describe(&draft));
    controller.set_filters(vec![draft]).await?;
    controller.toggle_sort("size").await?;
    controller.toggle_sort("size").await?;
    print_view(&controller.view());

    println!("\n🔎 Search: \"doe\"");
    controller.set_search("doe").await?;
    print_view(&controller.view());

    let mut report = mock_documents(1).remove(0);
    report.title = "Quarterly report".to_string();
    report.created_by = "Jane Smith".to_string();
    let created = controller.create(report).await?;
    println!("\n➕ Created document {} ({})", created.id, created.title);

    controller.reset_filters().await?;
    print_view(&controller.view());

    // === HTTP ===
    println!("\n🌐 Serving on http://127.0.0.1:3000");
    println!("   GET  /documents?page&per_page&search&sort_by&order&filters");
    println!("   POST /documents/query   (clauses as JSON body)");
    println!("   GET  /documents/{{id}}");
    println!("   ... and the same for /users\n");

    ServerBuilder::new()
        .with_collection::<Document, _>(documents)
        .with_collection::<User, _>(users)
        .serve("127.0.0.1:3000")
        .await
}

fn print_view(view: &ListView<Document>) {
    let p = &view.pagination;
    println!(
        "   page {}/{} · {} records · sorted by {}",
        p.current_page, p.total_pages, p.total_records, view.sort
    );
    for doc in &view.list {
        println!(
            "   #{:<3} {:<14} {:<8} {:>6} B  {}",
            doc.id, doc.title, doc.status, doc.size, doc.created_by
        );
    }
}
