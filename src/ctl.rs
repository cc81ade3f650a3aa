use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use crate::ipc;

#[derive(Parser, Debug)]
#[command(name = "ctl", about = "Control a running zonewatch instance")]
pub struct CtlArgs {
    /// Override socket path
    #[arg(long)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a favorite city bound to a catalog zone
    Add {
        /// Display name (e.g. "Mumbai")
        name: String,
        /// Catalog zone id (see `zones`)
        zone: String,
    },
    /// Remove a favorite city by id
    Remove {
        /// Favorite id (see `list`)
        id: String,
    },
    /// List favorite cities in display order
    List,
    /// List the available catalog zones
    Zones,
    /// Reload configuration file
    Reload,
    /// Print current state as JSON
    State,
    /// Shut down zonewatch
    Quit,
    /// Generate shell completions for the ctl subcommand
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn send_command(socket: &PathBuf, cmd: serde_json::Value) -> Result<serde_json::Value> {
    let mut stream = UnixStream::connect(socket)
        .with_context(|| format!("Failed to connect to zonewatch at {}", socket.display()))?;

    let msg = serde_json::to_string(&cmd)? + "\n";
    stream.write_all(msg.as_bytes())?;
    stream.flush()?;

    let mut reader = BufReader::new(&stream);
    let mut response = String::new();
    reader.read_line(&mut response)?;

    let resp: serde_json::Value = serde_json::from_str(&response)
        .context("Failed to parse response from zonewatch")?;
    Ok(resp)
}

pub fn run(args: CtlArgs) -> Result<()> {
    // Handle completions before connecting to socket
    if let Commands::Completions { shell } = &args.command {
        let mut cmd = crate::Cli::command();
        clap_complete::generate(*shell, &mut cmd, "zonewatch", &mut std::io::stdout());
        return Ok(());
    }

    let sock = ipc::socket_path(args.socket.as_ref());

    let cmd = match &args.command {
        Commands::Add { name, zone } => json!({"cmd": "add-city", "name": name, "zone": zone}),
        Commands::Remove { id } => json!({"cmd": "remove-city", "id": id}),
        Commands::List => json!({"cmd": "list-cities"}),
        Commands::Zones => json!({"cmd": "list-zones"}),
        Commands::Reload => json!({"cmd": "reload-config"}),
        Commands::State => json!({"cmd": "get-state"}),
        Commands::Quit => json!({"cmd": "quit"}),
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    let resp = send_command(&sock, cmd)?;

    if let Some(true) = resp.get("ok").and_then(|v| v.as_bool()) {
        match &args.command {
            Commands::State => println!("{}", serde_json::to_string_pretty(&resp)?),
            Commands::Add { .. } => {
                if let Some(city) = resp.get("city") {
                    let id = city.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                    println!("Added ({})", id);
                }
            }
            Commands::List => print_cities(&resp),
            Commands::Zones => print_zones(&resp),
            _ => {}
        }
    } else {
        let err = resp.get("error").and_then(|v| v.as_str()).unwrap_or("Unknown error");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn print_cities(resp: &serde_json::Value) {
    let Some(cities) = resp.get("cities").and_then(|v| v.as_array()) else { return };
    if cities.is_empty() {
        println!("No favorite cities. Add one with: zonewatch ctl add <name> <zone>");
        return;
    }
    for city in cities {
        let id = city.get("id").and_then(|v| v.as_str()).unwrap_or("?");
        let name = city.get("name").and_then(|v| v.as_str()).unwrap_or("?");
        let zone = city.get("timeZoneId").and_then(|v| v.as_str()).unwrap_or("?");
        println!("{:<16} {:<20} {}", id, name, zone);
    }
}

fn print_zones(resp: &serde_json::Value) {
    let Some(zones) = resp.get("zones").and_then(|v| v.as_array()) else { return };
    for zone in zones {
        let id = zone.get("id").and_then(|v| v.as_str()).unwrap_or("?");
        let name = zone.get("name").and_then(|v| v.as_str()).unwrap_or("?");
        let offset = zone.get("offset").and_then(|v| v.as_str()).unwrap_or("?");
        let dst = if zone.get("has_dst").and_then(|v| v.as_bool()).unwrap_or(false) {
            " (DST)"
        } else {
            ""
        };
        println!("{:<14} {:<14} UTC{}{}", id, name, offset, dst);
    }
}
