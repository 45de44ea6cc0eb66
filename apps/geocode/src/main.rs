use std::process::ExitCode;

use clap::Parser;
use mimapa_geocoding::{GeocoderConfig, GeocodingEngine, ResolutionOutcome};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Resolve a postal address to latitude and longitude.
#[derive(Parser, Debug)]
#[command(name = "mimapa-geocode", version, about)]
struct Args {
    /// Print the resolved location as JSON
    #[arg(long)]
    json: bool,

    /// Address to resolve; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    address: Vec<String>,
}

fn init_tracing() {
    let log_format = std::env::var("GEOCODER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the result, logs go to stderr
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(args: Args) -> anyhow::Result<ExitCode> {
    init_tracing();
    let config = GeocoderConfig::from_env()?;

    let engine = GeocodingEngine::from_config(&config)?;
    tracing::debug!(
        providers = engine.providers().len(),
        max_attempts = engine.retry_policy().max_attempts(),
        "Geocoding engine ready"
    );

    let address = args.address.join(" ");
    match engine.resolve(&address).await {
        ResolutionOutcome::Found(location) => {
            if args.json {
                println!("{}", serde_json::to_string(&location)?);
            } else {
                match &location.display_name {
                    Some(name) => println!("{}  {}", location.coordinate, name),
                    None => println!("{}", location.coordinate),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        ResolutionOutcome::NotFound => {
            eprintln!("No provider could resolve '{address}'");
            Ok(ExitCode::from(1))
        }
        ResolutionOutcome::Failed(reason) => {
            eprintln!("Geocoding failed: {reason}");
            Ok(ExitCode::from(2))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    run(Args::parse()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_words_are_collected() {
        let args = Args::try_parse_from(["mimapa-geocode", "--json", "Calle", "Granada", "46"])
            .unwrap();
        assert!(args.json);
        assert_eq!(args.address.join(" "), "Calle Granada 46");
    }

    #[test]
    fn test_address_is_required() {
        assert!(Args::try_parse_from(["mimapa-geocode"]).is_err());
    }
}
