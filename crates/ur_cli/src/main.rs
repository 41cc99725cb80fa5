//! Race Runner CLI
//!
//! Batch front end for the ur_core engine: run race request JSON files
//! and generate seeded sample fields for quick testing.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;

#[derive(Parser)]
#[command(name = "ur_cli")]
#[command(about = "Run uma race simulations from JSON race requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a race request JSON file
    Simulate {
        /// Input race request JSON path
        #[arg(long)]
        r#in: PathBuf,

        /// Output path for the full response JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the request seed
        #[arg(long)]
        seed: Option<u64>,

        /// Only print the standings table, no event feed
        #[arg(long, default_value = "false")]
        quiet: bool,
    },

    /// Generate a sample race request JSON
    Gen {
        /// Number of competitors
        #[arg(long, default_value = "8")]
        count: usize,

        /// Race distance in meters
        #[arg(long, default_value = "1600")]
        distance: f64,

        /// Seed for both field generation and the embedded request seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output JSON path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { r#in, out, seed, quiet } => simulate(&r#in, out.as_deref(), seed, quiet),
        Commands::Gen { count, distance, seed, out } => gen(count, distance, seed, out.as_deref()),
    }
}

fn simulate(
    input: &std::path::Path,
    out: Option<&std::path::Path>,
    seed_override: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading race request {}", input.display()))?;

    let request = match seed_override {
        None => raw,
        Some(seed) => {
            let mut value: serde_json::Value =
                serde_json::from_str(&raw).context("parsing race request")?;
            value["seed"] = json!(seed);
            value.to_string()
        }
    };

    println!("🏁 Simulating race...");
    println!("   Input: {}", input.display());

    let response = ur_core::simulate_race_json(&request)
        .map_err(|e| anyhow::anyhow!("simulation failed: {e}"))?;
    let parsed: serde_json::Value = serde_json::from_str(&response)?;

    print_report(&parsed, quiet);

    if let Some(path) = out {
        fs::write(path, &response)
            .with_context(|| format!("writing response {}", path.display()))?;
        println!("   Response written to {}", path.display());
    }
    Ok(())
}

fn print_report(response: &serde_json::Value, quiet: bool) {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!();
    println!(
        "== Race report ({stamp}) — {} m, seed {} ==",
        response["distance_m"], response["seed"]
    );

    if let Some(standings) = response["standings"].as_array() {
        for entry in standings {
            println!(
                "   {:>2}. {:<16} {:>8.2}s",
                entry["position"].as_u64().unwrap_or(0),
                entry["name"].as_str().unwrap_or("?"),
                entry["finish_time"].as_f64().unwrap_or(0.0)
            );
        }
    }
    if let Some(dnfs) = response["dnfs"].as_array() {
        for entry in dnfs {
            println!(
                "   --  {:<16} DNF at {:>6.0} m ({})",
                entry["name"].as_str().unwrap_or("?"),
                entry["distance_at_dnf"].as_f64().unwrap_or(0.0),
                entry["reason"].as_str().unwrap_or("unknown")
            );
        }
    }
    if let Some(warnings) = response["warnings"].as_array() {
        for warning in warnings {
            println!("   ⚠ {}", warning.as_str().unwrap_or(""));
        }
    }

    if !quiet {
        if let Some(events) = response["events"].as_array() {
            println!("   {} events, digest {}", events.len(), response["event_digest"]);
        }
    }
}

const SAMPLE_NAMES: &[&str] = &[
    "Aster", "Briar", "Cress", "Dahlia", "Elm", "Fern", "Garnet", "Hazel", "Iris", "Juniper",
    "Kestrel", "Laurel", "Maple", "Nettle", "Oriole", "Poppy", "Quince", "Rowan",
];

fn gen(count: usize, distance: f64, seed: u64, out: Option<&std::path::Path>) -> Result<()> {
    if count == 0 {
        bail!("field must have at least one competitor");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let styles = ["front_runner", "pace_chaser", "late_surger", "end_closer"];
    let grades = ["S", "A", "B", "B", "C", "D"];

    let competitors: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let name = SAMPLE_NAMES
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Uma {}", i + 1));
            json!({
                "name": name,
                "speed": rng.gen_range(380..=800),
                "stamina": rng.gen_range(380..=800),
                "power": rng.gen_range(380..=800),
                "guts": rng.gen_range(300..=800),
                "wit": rng.gen_range(300..=800),
                "style": styles[rng.gen_range(0..styles.len())],
                "distance_aptitude": {
                    "sprint": grades[rng.gen_range(0..grades.len())],
                    "mile": grades[rng.gen_range(0..grades.len())],
                    "medium": grades[rng.gen_range(0..grades.len())],
                    "long": grades[rng.gen_range(0..grades.len())],
                },
                "surface_aptitude": {
                    "turf": grades[rng.gen_range(0..grades.len())],
                    "dirt": grades[rng.gen_range(0..grades.len())],
                }
            })
        })
        .collect();

    let request = json!({
        "schema_version": 1,
        "seed": seed,
        "race": { "distance_m": distance, "surface": "turf", "condition": "good" },
        "competitors": competitors
    });
    let pretty = serde_json::to_string_pretty(&request)?;

    match out {
        Some(path) => {
            fs::write(path, &pretty)
                .with_context(|| format!("writing race request {}", path.display()))?;
            println!("🎲 Sample field of {count} written to {}", path.display());
        }
        None => println!("{pretty}"),
    }
    Ok(())
}
