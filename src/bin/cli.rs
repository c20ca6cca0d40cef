//! estore CLI Client
//!
//! Command-line interface for the inventory HTTP API.

use std::fmt;

use clap::{Parser, Subcommand};
use estore::{Product, ProductId};
use reqwest::{Client, RequestBuilder, StatusCode};

/// estore CLI
#[derive(Parser, Debug)]
#[command(name = "estore-cli")]
#[command(about = "CLI for the estore inventory API")]
#[command(version)]
struct Args {
    /// Server base URL
    #[arg(short, long, env = "ESTORE_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all products
    List,

    /// Search products whose name contains the text (case-sensitive)
    Search {
        /// Text to look for
        text: String,
    },

    /// Get a product by id
    Get {
        id: ProductId,
    },

    /// Create a product (the server assigns the id)
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: f64,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Replace an existing product
    Update {
        id: ProductId,

        #[arg(long)]
        name: String,

        #[arg(long)]
        price: f64,

        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Delete a product by id
    Delete {
        id: ProductId,
    },
}

impl Commands {
    fn request(self, client: &Client, base: &str) -> RequestBuilder {
        let inventory = format!("{}/inventory", base);
        match self {
            Commands::List => client.get(inventory),
            Commands::Search { text } => client
                .get(format!("{}/", inventory))
                .query(&[("name", text)]),
            Commands::Get { id } => client.get(format!("{}/{}", inventory, id)),
            Commands::Create {
                name,
                price,
                quantity,
            } => client
                .post(inventory)
                .json(&Product::draft(name, price, quantity)),
            Commands::Update {
                id,
                name,
                price,
                quantity,
            } => client
                .put(inventory)
                .json(&Product::new(id, name, price, quantity)),
            Commands::Delete { id } => client.delete(format!("{}/{}", inventory, id)),
        }
    }
}

/// Turn a response into the text to print, or the message for stderr
///
/// A body that could not be read is a failure even on a success status.
fn render_response<E: fmt::Display>(
    status: StatusCode,
    body: std::result::Result<String, E>,
) -> std::result::Result<String, String> {
    if !status.is_success() {
        return Err(match status {
            StatusCode::NOT_FOUND => "Not found".to_string(),
            StatusCode::CONFLICT => "Conflict: product already exists".to_string(),
            _ => format!("Server returned {}", status),
        });
    }

    let body = body.map_err(|e| format!("Failed to read response body: {}", e))?;

    // Pretty-print JSON bodies, pass anything else through
    Ok(serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or(body))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let base = args.server.trim_end_matches('/').to_string();
    let client = Client::new();

    let response = match args.command.request(&client, &base).send().await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Request to {} failed: {}", base, e);
            std::process::exit(1);
        }
    };

    let status = response.status();
    match render_response(status, response.text().await) {
        Ok(output) => println!("{}", output),
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}
