// src/main.rs

use pwatch::errors::PwatchError;
use pwatch::types::exit_codes;
use pwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = match cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Help and version go to stdout and are not failures.
            let code = if err.use_stderr() {
                exit_codes::INVALID_ARGUMENTS
            } else {
                0
            };
            std::process::exit(code);
        }
    };

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("pwatch: failed to initialise logging: {err:?}");
    }

    let code = match run(args).await {
        Ok(termination) => termination.exit_code(),
        Err(err) => {
            eprintln!("pwatch: {err}");
            if matches!(err, PwatchError::NoCommand) {
                cli::print_usage();
            }
            err.exit_code()
        }
    };

    std::process::exit(code);
}
