use std::process::ExitCode;

fn main() -> ExitCode {
    flatten_imports::cli::run()
}
