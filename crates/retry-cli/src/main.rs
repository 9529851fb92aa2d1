use retry_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        eprintln!("retry: {:#}", err);
    }

    // Parse CLI and run; usage errors exit inside the parser.
    match cli::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("retry error: {:#}", err);
            std::process::exit(1);
        }
    }
}
