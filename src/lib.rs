//! EPG WIB
//! Converts an XMLTV guide from UTC to Western Indonesian Time (+0700),
//! with an optional sports-only variant.

pub mod config;
pub mod epg;
pub mod error;
pub mod fetch;
pub mod pipeline;

pub use config::ConverterConfig;
pub use error::{EpgError, Result};
pub use fetch::{FetchBytes, FetchConfig, HttpFetcher};
pub use pipeline::{run, Converter, RunReport, Variant};

/// Shared entry point for both binaries
pub fn run_cli(variant: Variant) -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config = ConverterConfig::load();
    let fetcher = HttpFetcher::new(FetchConfig::from(&config));
    let converter = Converter::new(variant);

    match run(&config, &converter, &fetcher) {
        Ok(report) => {
            let stats = &report.stats;
            log::info!(
                "{} bytes fetched{}, {} channels / {} programmes in, {} / {} out, {} times shifted",
                report.bytes_fetched,
                if stats.gzip { " (gzip)" } else { "" },
                stats.channels_in,
                stats.programmes_in,
                stats.channels_out,
                stats.programmes_out,
                stats.shift.shifted
            );
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
