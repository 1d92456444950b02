use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use employee_etl::config::EtlConfig;
use employee_etl::pipeline;
use employee_etl::reader;
use employee_etl::store;

#[derive(Parser)]
#[command(name = "employee_etl")]
#[command(about = "Employee record cleaning and publishing pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform the export and publish the cleaned records
    Run {
        /// Path to the source CSV export
        #[arg(long)]
        input: Option<PathBuf>,
        /// Collection to publish into
        #[arg(long)]
        collection: Option<String>,
        /// Path to a file holding the store connection target
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
    /// Transform only and print the run report
    Transform {
        /// Path to the source CSV export
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn print_report(report: &pipeline::TransformReport) {
    println!("\n📊 Transform results:");
    println!("   Rows in: {}", report.rows_in);
    println!("   Rows out: {}", report.rows_out);
    println!("   Header echoes removed: {}", report.header_echoes_removed);
    println!("   Shift repair applied: {}", report.shift_repair_applied);
    println!("   Birthdate defaults: {}", report.birthdate_defaults);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    employee_etl::logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            collection,
            credentials,
        } => {
            let config = EtlConfig::resolve(input, collection, credentials)?;

            println!("📥 Reading {}...", config.input_path.display());
            let mut table = reader::read_csv(&config.input_path)?;

            println!("🔧 Transforming {} rows...", table.rows.len());
            let report = pipeline::transform(&mut table)?;
            print_report(&report);

            println!("💾 Publishing to collection {}...", config.collection);
            let store = store::connect(&config.store_target);
            match store::publish(store, &mut table, &config.collection).await {
                Ok(write_report) => {
                    println!("✅ Inserted {} document(s)", write_report.inserted);
                    if !write_report.failures.is_empty() {
                        println!(
                            "⚠️  {} document(s) failed to write:",
                            write_report.failures.len()
                        );
                        for failure in &write_report.failures {
                            println!("   - {}: {}", failure.id, failure.reason);
                        }
                    }
                }
                Err(e) => {
                    // At-most-once publish: report the failure, never retry
                    error!("Bulk write failed: {}", e);
                    println!("❌ Bulk write failed: {e}");
                }
            }
        }
        Commands::Transform { input } => {
            let config = EtlConfig::resolve(input, None, None)?;

            println!("📥 Reading {}...", config.input_path.display());
            let mut table = reader::read_csv(&config.input_path)?;

            println!("🔧 Transforming {} rows...", table.rows.len());
            let report = pipeline::transform(&mut table)?;
            info!("Transform finished");
            print_report(&report);
        }
    }
    Ok(())
}
