use ghup_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse_from_env();

    // Carry on without logs rather than fail the upload.
    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("ghup warning: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
