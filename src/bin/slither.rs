extern crate slither;

use std::process;

fn main() {
    if slither::cli::run_cli().is_err() {
        process::exit(1);
    }
}
