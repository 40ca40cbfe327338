use anyhow::Context;
use clap::Parser;
use product_api::cli::{Cli, dry_run};
use product_api::logger;
use product_api::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let environment = cli.environment()?;
    let settings = cli.load_settings(environment)?;

    if cli.is_dry_run() {
        for line in dry_run::report(&settings, environment) {
            println!("{line}");
        }
        return Ok(());
    }

    logger::init(&settings.logger).context("Failed to initialize logging")?;
    Server::new(settings, environment).run().await
}
