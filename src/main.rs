use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Instrument};

use catalog_client::view::TextSurface;
use catalog_client::{setup_tracing, CatalogApp, ClientConfig, HttpBackend, ProductDraft, ProductId};

#[derive(Parser)]
#[command(name = "catalog_client")]
#[command(about = "Product catalog and billing client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides CATALOG_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the product table
    List,
    /// Add a product
    Add {
        name: String,
        price: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Replace the name, price and description of a product
    Edit {
        id: i64,
        name: String,
        price: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Delete a product
    Delete { id: i64 },
    /// Print a bill for ID=QUANTITY selections
    Bill {
        #[arg(value_parser = parse_selection, required = true)]
        selections: Vec<(i64, String)>,
    },
}

fn parse_selection(s: &str) -> Result<(i64, String), String> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QUANTITY, got '{s}'"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid product id '{id}': {e}"))?;
    Ok((id, quantity.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = Some(timeout);
    }

    setup_tracing(&config.log_filter);
    info!(base_url = %config.base_url, "Starting catalog client");

    let backend = Arc::new(HttpBackend::from_config(&config).context("Failed to build HTTP client")?);
    let mut app = CatalogApp::start(backend, TextSurface::new()).await?;

    match cli.command {
        Command::List => {}
        Command::Add { name, price, description } => {
            *app.add_form_mut() = ProductDraft::new(name, price, description);
            let span = tracing::info_span!("add_product");
            app.submit_product().instrument(span).await;
        }
        Command::Edit { id, name, price, description } => {
            let id = ProductId(id);
            if app.open_edit(id) {
                if let Some(form) = app.edit_form_mut() {
                    *form = ProductDraft::new(name, price, description);
                }
                let span = tracing::info_span!("edit_product", %id);
                app.confirm_edit().instrument(span).await;
            } else {
                warn!(%id, "Product is not listed, nothing to edit");
            }
        }
        Command::Delete { id } => {
            let id = ProductId(id);
            if app.open_delete(id) {
                if let Some(prompt) = app.delete_modal().content() {
                    println!("{}", prompt.message());
                }
                let span = tracing::info_span!("delete_product", %id);
                app.confirm_delete().instrument(span).await;
            } else {
                warn!(%id, "Product is not listed, nothing to delete");
            }
        }
        Command::Bill { selections } => {
            for (id, quantity) in &selections {
                let id = ProductId(*id);
                app.toggle_quantity(id);
                app.set_quantity(id, quantity);
            }
            app.generate_bill();
            if let Some(text) = app.bill_popup().text() {
                println!("{text}\n");
            }
            app.close_bill();
        }
    }

    print!("{}", app.surface());

    app.shutdown().await?;
    Ok(())
}
