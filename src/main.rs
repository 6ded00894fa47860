//! numkit - classical numerical methods from the command line
//!
//! # Usage
//!
//! ```bash
//! numkit solve --matrix "15 17 19; 0.3 0.4 0.55; 1 1.2 1.5" --rhs "3890 95 282" --production
//! numkit gauss-seidel --r1 20 --tolerance 1e-8 --history
//! numkit fit --file samples.txt --kind exponential
//! NUMKIT_LOG=debug numkit integrate --function "sin(x)" --from 0 --to 3.14159 -n 10
//! ```

use std::io::{self, Write};

use clap::Parser;
use log::LevelFilter;
use numkit_core::cli::{self, Cli};
use numkit_core::Result;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::default();
    builder
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("NUMKIT_LOG", "warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&args.command, &mut out)
        .and_then(|()| out.flush().map_err(Into::into))
        .map_err(|e| {
            log::error!("{}", e);
            e
        })
}
