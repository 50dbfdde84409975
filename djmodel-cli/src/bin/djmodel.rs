//! djmodel
//!
//! Prints the Django model declaration inferred from a data file.

use std::fs;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use djmodel::logging::setup::init_logging;
use djmodel_cli::{run, Args};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging_config()).map_err(|e| anyhow!("initialising logging: {e}"))?;

    let declaration = run(&args).await?;

    match &args.output {
        Some(path) => {
            fs::write(path, &declaration)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote model declaration");
        }
        None => print!("{declaration}"),
    }

    Ok(())
}
