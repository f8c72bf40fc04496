use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use ifstats::{
    options::{self, args},
    utils::cancellation_token::CancellationToken,
};

fn main() -> Result<ExitCode> {
    let args = args::get_args();

    #[cfg(feature = "logging")]
    {
        if let Some(path) = &args.other_args.debug_log {
            ifstats::utils::logging::init_logger(log::LevelFilter::Debug, path)
                .context("Unable to set up the debug log.")?;
        }
    }

    let options = options::init(&args)
        .context("Unable to properly parse or create the config file, or parse the arguments.")?;
    let reader = options
        .build_reader()
        .context("Found an issue while trying to set up the stats reader.")?;

    let cancellation_token = Arc::new(CancellationToken::default());
    {
        let cancellation_token = cancellation_token.clone();
        ctrlc::set_handler(move || {
            cancellation_token.cancel();
        })
        .context("Unable to set up the interrupt handler.")?;
    }

    let interface = options.interface.as_str();
    let mut polls: u64 = 0;

    loop {
        let succeeded = match reader.read(interface) {
            Ok(stats) => {
                println!("{interface} {stats}");
                true
            }
            Err(failure) => {
                eprintln!("{interface}: {failure}");
                false
            }
        };

        polls += 1;

        let done = options.count.is_some_and(|count| polls >= count)
            || cancellation_token.sleep_with_cancellation(options.rate);

        if done {
            return Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }
    }
}
