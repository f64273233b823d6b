use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, bail};
use cotask_core::BlockConfig;
use cotask_experiment::{SessionConfig, TrialRecord, generate_block_trials};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::cli::{GenerateArgs, ValidateArgs};

#[derive(Debug, Serialize)]
pub struct BlockOutput {
    pub block_id: String,
    pub trials: Vec<TrialRecord>,
}

/// Generates every block of the session in order from one rng stream.
pub fn generate_session(config: &SessionConfig, rng: &mut StdRng) -> Result<Vec<BlockOutput>> {
    config
        .blocks
        .iter()
        .map(|block| {
            let trials = generate_block_trials(block, config.trials_per_block, rng)
                .with_context(|| format!("generating block '{}'", block.block_id))?;
            Ok(BlockOutput {
                block_id: block.block_id.clone(),
                trials,
            })
        })
        .collect()
}

pub fn generate(args: &GenerateArgs) -> Result<()> {
    let config = SessionConfig::load(&args.config, args.trials)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    tracing::info!(
        blocks = config.blocks.len(),
        trials_per_block = config.trials_per_block,
        seed = ?args.seed,
        "generating session"
    );

    let output = generate_session(&config, &mut rng)?;
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_json(BufWriter::new(file), &output, args.pretty)?;
            tracing::info!(path = %path.display(), "trials written");
        }
        None => write_json(io::stdout().lock(), &output, args.pretty)?,
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn validate(args: &ValidateArgs) -> Result<()> {
    let blocks = BlockConfig::load_all(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let mut failures = 0;
    for block in &blocks {
        match block.validate() {
            Ok(()) => println!("ok     {}", block.block_id),
            Err(e) => {
                failures += 1;
                println!("error  {}: {e}", block.block_id);
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} block(s) failed validation", blocks.len());
    }
    Ok(())
}
