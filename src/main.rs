use clap::Parser;
use maritime_routes::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        // Dropping the command future stops any in-flight geocoding request
        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(maritime_routes::Error::processing_interrupted(
                    "Processing interrupted by user",
                )
                .into())
            }
        }
    });

    match result {
        Ok(stats) => {
            stats.print_summary();
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Maritime Routes - Kystverket voyage export to route dashboard");
    println!("=============================================================");
    println!();
    println!("Clean raw voyage exports, geocode port names and aggregate ship");
    println!("routes into data for an interactive map dashboard.");
    println!();
    println!("USAGE:");
    println!("    maritime-routes <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    clean       Repair and type the raw semicolon-delimited export");
    println!("    routes      Extract routes and the list of distinct ports");
    println!("    geocode     Look up port coordinates (needs API_KEY)");
    println!("    enrich      Attach port coordinates to every route");
    println!("    dashboard   Build dashboard JSON: summary, route table and map layers");
    println!("    run         Run every stage in order (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run the whole pipeline on ./seilas.csv, writing every output to ./data:");
    println!("    maritime-routes run --input seilas.csv --data-dir data");
    println!();
    println!("    # Same, with the export already in ./data/seilas.csv:");
    println!("    maritime-routes run --data-dir data");
    println!();
    println!("    # Re-run without calling the geocoding service:");
    println!("    maritime-routes run --data-dir data --skip-geocode");
    println!();
    println!("    # Dashboard for one port, newest arrivals first:");
    println!("    maritime-routes dashboard --port bergen --sort eta --direction desc");
    println!();
    println!("For detailed help on any command, use:");
    println!("    maritime-routes <COMMAND> --help");
}
