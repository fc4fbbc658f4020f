use crate::cli::BuildArgs;
use crate::config::resolve_build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use idpgen::core::io::pdb::write_pdb;
use idpgen::engine::builder::BuildStatus;
use idpgen::engine::progress::ProgressReporter;
use idpgen::fragments::pool::FragmentPool;
use idpgen::workflows;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    let config = resolve_build_config(&args)?;

    info!("Loading fragment database from {:?}", &args.database);
    let pool = FragmentPool::load_dir(&args.database)?;
    println!(
        "Loaded {} fragments from {}",
        pool.len(),
        args.database.display()
    );

    std::fs::create_dir_all(&args.output_dir)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Building {} conformer(s) for a {}-residue sequence...",
        config.num_conformers,
        config.sequence.chars().count()
    );

    let report = workflows::build::run(&config, &pool, &reporter)?;

    for failure in &report.failures {
        warn!(index = failure.index, error = %failure.error, "Conformer failed.");
        eprintln!("  conformer {}: {}", failure.index + 1, failure.error);
    }

    if report.conformers.is_empty() {
        return Err(CliError::NoConformers(format!(
            "all {} build attempts failed",
            config.num_conformers
        )));
    }

    for conformer in &report.conformers {
        let output_path = conformer_path(&args.output_dir, conformer.index);
        let mut writer = BufWriter::new(File::create(&output_path)?);
        write_pdb(&mut writer, &conformer.chain, &config.sequence)?;

        match conformer.status {
            BuildStatus::Completed => {
                println!("✓ Conformer written to: {}", output_path.display());
            }
            BuildStatus::Exhausted { placed_residues } => {
                println!(
                    "⚠ Partial conformer ({} of {} residues) written to: {}",
                    placed_residues,
                    config.sequence.chars().count(),
                    output_path.display()
                );
            }
        }
    }

    println!(
        "Done: {} built, {} failed.",
        report.conformers.len(),
        report.failures.len()
    );
    Ok(())
}

fn conformer_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("conformer_{}.pdb", index + 1))
}
