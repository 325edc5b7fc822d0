use crate::cli::ProfileArgs;
use crate::config::ProfileConfig;
use crate::error::Result;
use molatlas::workflows::profile;
use std::path::Path;
use tracing::info;

pub fn run(data_dir: &Path, args: &ProfileArgs) -> Result<()> {
    let config = ProfileConfig::from_file(&args.config)?;
    let request = config.to_request()?;

    if config.visualize {
        info!("Figure generation is not part of this build; reporting numeric results only.");
    }

    info!(
        "Ranking {} propert(ies) against DB{} (charge {}).",
        request.properties.len(),
        request.database,
        request.charge
    );
    let ranks = profile::run(data_dir, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranks)?);
    } else {
        println!(
            "Per-property percentiles (DB{}, charge {}):",
            request.database, request.charge
        );
        for rank in &ranks {
            println!(
                "  {}: {} ({:.2}th percentile)",
                rank.property, rank.value, rank.percentile
            );
        }
    }

    Ok(())
}
