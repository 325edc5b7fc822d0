use crate::cli::DensityArgs;
use crate::config::DensityConfig;
use crate::error::Result;
use molatlas::workflows::density;
use std::path::Path;
use tracing::info;

pub fn run(data_dir: &Path, args: &DensityArgs) -> Result<()> {
    let config = DensityConfig::from_file(&args.config)?;
    let request = config.to_request()?;

    if config.visualize {
        info!("Figure generation is not part of this build; reporting numeric results only.");
    }

    info!(
        "Evaluating ({}, {}) = ({}, {}) against DB{} (charge {}).",
        request.prop_x, request.prop_y, request.x, request.y, request.database, request.charge
    );
    let result = density::run(data_dir, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Percentile of density: {:.2}% (density {:.6e})",
            result.percentile_of_density, result.density
        );
    }

    Ok(())
}
