use std::process::ExitCode;

fn main() -> ExitCode {
    match catalog_client::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
