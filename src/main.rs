use clap::Parser;
use skiff::cli::{self, Args};
use skiff::error::{CliError, ScanError};
use skiff::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = cli::run(args).await {
        match e {
            CliError::Scan(ScanError::Interrupted) => {
                output::print_warning("scan interrupted by user");
                std::process::exit(130);
            }
            other => {
                output::print_error(&other.to_string());
                std::process::exit(1);
            }
        }
    }
}
