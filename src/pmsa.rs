extern crate clap;
use clap::*;

mod cmd_pmsa;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let app = Command::new("pmsa")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`pmsa` - Progressive Multiple Sequence Alignment guide trees")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_pmsa::submat::make_subcommand())
        .subcommand(cmd_pmsa::dist::make_subcommand())
        .subcommand(cmd_pmsa::guide::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Scoring:
    * submat - The BLOSUM62 lookup table

* Clustering:
    * dist  - All-against-all distance matrix
    * guide - UPGMA guide tree from a protein FASTA file

Logging goes to stderr; set RUST_LOG=info for phase timings.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("submat", sub_matches)) => cmd_pmsa::submat::execute(sub_matches),
        Some(("dist", sub_matches)) => cmd_pmsa::dist::execute(sub_matches),
        Some(("guide", sub_matches)) => cmd_pmsa::guide::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
