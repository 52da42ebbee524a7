//! Ethereum Vanity Address Search CLI
//!
//! Usage:
//!   vanity_search -s dead             # Address starting with "dead"
//!   vanity_search -s dead -e beef     # Starting with "dead", ending with "beef"
//!   vanity_search -s 00 -e 0a -c      # Checksum-exact match

use std::process;

use clap::Parser;

use vanity_search::output::{format_number, write_result};
use vanity_search::{Config, Coordinator, SearchOutcome, StopSignal, VanityResult};

const EXIT_CONFIG: i32 = 1;
const EXIT_EXHAUSTED: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(EXIT_CONFIG);
    }

    let search = config.search_config();

    println!("Ethereum Vanity Address Search");
    println!("==============================");
    println!("Prefix:     {:?}", search.pattern.prefix());
    println!("Suffix:     {:?}", search.pattern.suffix());
    println!("Checksum:   {}", search.pattern.is_checksum());
    println!("Difficulty: {}", search.pattern.difficulty_description());
    println!("Workers:    {}", search.workers);
    println!("Budget:     {} attempts", format_number(search.max_tries));
    println!();

    let mut coordinator = Coordinator::start(search);
    ctrlc_handler(coordinator.stop_signal());

    println!("Searching... (Press Ctrl+C to stop)\n");

    let outcome = coordinator.run();
    let elapsed = coordinator.elapsed();
    coordinator.join();

    let code = match outcome {
        SearchOutcome::Found(result) => {
            report_found(&config, &result);
            0
        }
        SearchOutcome::Exhausted { total_attempts } => {
            log::info!(
                "Reached {} attempts without a match",
                format_number(total_attempts)
            );
            EXIT_EXHAUSTED
        }
        SearchOutcome::Interrupted { total_attempts } => {
            log::warn!(
                "Stopped by user after {} attempts",
                format_number(total_attempts)
            );
            EXIT_INTERRUPTED
        }
    };

    log::info!("Time elapsed: {:.2}s", elapsed.as_secs_f64());
    process::exit(code);
}

fn report_found(config: &Config, result: &VanityResult) {
    println!("Address:     {}", result.address);
    println!("Private Key: {}", result.private_key);
    println!("Worker:      {}", result.worker_id);
    println!("Attempts:    {}", format_number(result.attempts));

    match write_result(&config.output, result) {
        Ok(()) => println!(
            "Address and private key saved to {}",
            config.output.display()
        ),
        Err(e) => log::error!("Failed to write {}: {}", config.output.display(), e),
    }
}

fn ctrlc_handler(stop: StopSignal) {
    ctrlc::set_handler(move || {
        if stop.trigger() {
            log::warn!("Caught interrupt signal, stopping workers ...");
        }
    })
    .expect("Error setting Ctrl-C handler");
}
