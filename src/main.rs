//! pkgsync - export and import shared project folders

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = pkgsync::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
