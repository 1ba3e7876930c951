use clap::Parser;
use dotenvy::dotenv;

use blogmesh::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    blogmesh::server::run(cli.command).await
}
