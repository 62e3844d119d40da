// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod classify;
mod cli;
mod columns;
mod config;
mod emit;
mod error;
mod markdown;
mod report;
mod runner;
mod source;
mod transform;
mod types;
mod ui;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Resolve configuration once; everything downstream borrows it
    let config = match config::build_config(&args) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    // Run the migration, streaming progress as each stage and row completes
    let table = config.table.clone();
    let summary = match runner::run(&config, |event| report::print_event(&table, &event)) {
        Ok(summary) => summary,
        Err(e) => {
            ui::print_error(&format!("Migration aborted: {}", e));
            std::process::exit(1);
        }
    };

    report::print_summary(&summary);
}
