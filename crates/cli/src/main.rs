use clap::{Parser, Subcommand};
use anyhow::{Context, Result};

use pedigree_inference_core as core;
use core::{CarrierStatus, Pedigree};

#[derive(Parser)]
#[command(name = "pedigree")]
#[command(version)]
#[command(about = "Infer the Mendelian mode of inheritance of a trait from a pedigree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Narrow down the mode of inheritance consistent with the pedigree
    Infer {
        /// Path to pedigree file (CSV with columns id, sex, affected,
        /// mother, father; or a .json array of the same records)
        #[arg(short, long)]
        pedigree: String,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Report the carrier heuristic for every individual
    Carriers {
        /// Path to pedigree file
        #[arg(short, long)]
        pedigree: String,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Emit per-individual chart data (generation, parents) for a renderer
    Chart {
        /// Path to pedigree file
        #[arg(short, long)]
        pedigree: String,
    },

    /// List the ancestors of one individual
    Ancestors {
        /// Path to pedigree file
        #[arg(short, long)]
        pedigree: String,

        /// Individual ID
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Infer { pedigree, format } => cmd_infer(&pedigree, &format),
        Commands::Carriers { pedigree, format } => cmd_carriers(&pedigree, &format),
        Commands::Chart { pedigree } => cmd_chart(&pedigree),
        Commands::Ancestors { pedigree, id } => cmd_ancestors(&pedigree, &id),
    }
}

fn load(pedigree_path: &str) -> Result<Pedigree> {
    let ped = Pedigree::from_path(pedigree_path)
        .with_context(|| format!("Failed to load pedigree from '{}'", pedigree_path))?;
    ped.validate().context("Pedigree failed validation")?;

    eprintln!(
        "Loaded pedigree with {} individuals ({} affected) from '{}'",
        ped.n_individuals(),
        ped.find_affected().len(),
        pedigree_path
    );
    Ok(ped)
}

fn cmd_infer(pedigree_path: &str, output_format: &str) -> Result<()> {
    let ped = load(pedigree_path)?;
    let verdict = ped.find_mode_of_inheritance();

    match output_format.to_lowercase().as_str() {
        "json" => {
            let json = serde_json::json!({
                "individuals": ped.n_individuals(),
                "affected": ped.find_affected().len(),
                "result": verdict,
                "candidates": verdict.candidates(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "text" => {
            if verdict.single().is_some() {
                println!("Mode of inheritance: {}", verdict);
            } else if verdict.candidates().is_empty() {
                println!("No classical mode of inheritance is consistent with this pedigree");
            } else {
                println!("Possible modes of inheritance:");
                for mode in verdict.candidates() {
                    println!("  {}", mode);
                }
            }
        }
        other => anyhow::bail!("Unknown format '{}'. Use 'text' (default) or 'json'.", other),
    }

    Ok(())
}

fn cmd_carriers(pedigree_path: &str, output_format: &str) -> Result<()> {
    let ped = load(pedigree_path)?;
    let statuses: Vec<(&str, CarrierStatus)> = (0..ped.n_individuals())
        .map(|i| (ped.individual(i).id(), ped.carrier_status(i)))
        .collect();

    match output_format.to_lowercase().as_str() {
        "json" => {
            let rows: Vec<serde_json::Value> = statuses
                .iter()
                .map(|(id, status)| serde_json::json!({ "id": id, "status": status }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        "text" => {
            for (id, status) in &statuses {
                println!("{:<12} {}", id, status);
            }
        }
        other => anyhow::bail!("Unknown format '{}'. Use 'text' (default) or 'json'.", other),
    }

    Ok(())
}

fn cmd_chart(pedigree_path: &str) -> Result<()> {
    let ped = load(pedigree_path)?;
    let chart = ped.chart().context("Failed to compute generations")?;
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

fn cmd_ancestors(pedigree_path: &str, id: &str) -> Result<()> {
    let ped = load(pedigree_path)?;
    let index = ped
        .individual_index(id)
        .with_context(|| format!("Individual '{}' not found", id))?;

    let ancestors = ped
        .ancestors(index)
        .with_context(|| format!("Failed to walk ancestors of '{}'", id))?;
    log::debug!("'{}' has {} ancestor paths", id, ancestors.len());

    println!(
        "{} (generation {}): {} ancestors",
        id,
        ped.generation(index)?,
        ancestors.len()
    );
    for a in ancestors {
        let ind = ped.individual(a);
        println!(
            "  {} ({}, {})",
            ind.id(),
            ind.sex(),
            if ind.is_affected() { "affected" } else { "unaffected" }
        );
    }

    Ok(())
}
