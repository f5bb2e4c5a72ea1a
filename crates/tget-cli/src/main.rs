use tget_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; an unwritable state dir must not stop a download.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("tget error: {:#}", err);
        std::process::exit(1);
    }
}
