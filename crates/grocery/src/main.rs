//! `grocery`: manage grocery lists from the terminal and move them between
//! devices as share links.

/// CLI module - command-line interface for grocery lists
mod cli;

fn main() {
    cli::run_cli();
}
