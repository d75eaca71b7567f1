//! Command-line transport shell.
//!
//! # Usage
//!
//! ```bash
//! restaurant create < body.json
//! restaurant read <restaurantId>
//! restaurant update <restaurantId> < body.json
//! restaurant delete <restaurantId>
//! ```
//!
//! Loads `ServiceConfig` from the environment, serves one request, and prints
//! the JSON-encoded response to stdout. Create and update read the request
//! body from stdin.

use clap::{Parser, Subcommand};
use log::error;
use restaurant_core::db::open_db;
use restaurant_core::{
    init_logging, HttpPlaceSearcher, LocationService, Operation, Request, RestaurantHandler,
    RestaurantService, ServiceConfig, SqliteRestaurantStore,
};
use std::io::{Read, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "restaurant")]
#[command(version, about = "Serve one restaurant CRUD request")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a restaurant from the JSON body on stdin
    Create,
    /// Load one restaurant
    Read {
        /// Path identifier; an empty or missing value is rejected by the service
        restaurant_id: Option<String>,
    },
    /// Replace an existing restaurant with the JSON body on stdin
    Update {
        /// Must equal the `id` in the body
        restaurant_id: Option<String>,
    },
    /// Delete a restaurant; deleting a missing one succeeds
    Delete { restaurant_id: Option<String> },
}

impl Command {
    fn operation(&self) -> Operation {
        match self {
            Self::Create => Operation::Create,
            Self::Read { .. } => Operation::Read,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
        }
    }

    fn restaurant_id(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Read { restaurant_id }
            | Self::Update { restaurant_id }
            | Self::Delete { restaurant_id } => restaurant_id.as_deref(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_exit module=cli status=error error={message}");
            let _ = writeln!(std::io::stderr(), "{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<(), String> {
    let config = ServiceConfig::from_env().map_err(|err| err.to_string())?;
    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let operation = command.operation();
    let mut request = Request::default();
    if let Some(restaurant_id) = command.restaurant_id() {
        request = request.with_restaurant_id(restaurant_id);
    }
    if matches!(operation, Operation::Create | Operation::Update) {
        std::io::stdin()
            .read_to_string(&mut request.body)
            .map_err(|err| format!("failed to read request body: {err}"))?;
    }

    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let searcher =
        HttpPlaceSearcher::new(config.location.clone()).map_err(|err| err.to_string())?;
    let service = RestaurantService::new(
        SqliteRestaurantStore::new(&conn),
        LocationService::new(searcher, config.place_index.clone()),
    );
    let handler = RestaurantHandler::new(service, config.cors.clone());

    let response = handler.handle(operation, &request);
    let encoded = serde_json::to_string(&response).map_err(|err| err.to_string())?;
    writeln!(std::io::stdout(), "{encoded}").map_err(|err| err.to_string())
}
