use std::process::ExitCode;

use campaign_tracker::cli::{self, Cli};
use campaign_tracker::Error;
use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> Result<ExitCode, Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_span_events(FmtSpan::NEW)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    cli::run(cli).await
}
