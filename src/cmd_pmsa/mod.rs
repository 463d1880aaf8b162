//! Subcommand modules for the `pmsa` binary.

pub mod dist;
pub mod guide;
pub mod submat;

/// Build the rayon pool shared by the `--parallel` subcommands.
pub fn build_pool(parallel: usize) -> anyhow::Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build()?;
    Ok(pool)
}
