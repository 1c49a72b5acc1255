use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use castellan_cli::Session;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    info!("castellan starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Session::new().run(stdin.lock(), &mut stdout)?;
    Ok(())
}
