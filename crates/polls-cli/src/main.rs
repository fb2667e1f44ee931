//! polls - question and choice voting CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a data directory in the current project
//! polls init
//!
//! # Publish a question five days ago, with two choices
//! polls question add "What's new?" --days -5 --choice "Not much" --choice "The sky"
//!
//! # Index of published questions, then vote
//! polls question list
//! polls vote 1 2
//! polls question results 1
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
