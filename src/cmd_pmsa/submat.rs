use clap::*;
use itertools::Itertools;
use pmsa::libs::score::{SubTable, ORDER};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("submat")
        .about("Print the BLOSUM62 substitution lookup table")
        .after_help(
            r###"
Builds the dense substitution lookup used by the aligner and prints the
20 standard amino acids as a square grid read back from it.

Examples:
1. Show the table:
   pmsa submat

"###,
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = pmsa::writer(args.get_one::<String>("outfile").unwrap())?;

    let table = SubTable::build();

    writer.write_fmt(format_args!(
        " \t{}\n",
        ORDER.iter().map(|&b| b as char).join("\t")
    ))?;
    for &a in ORDER.iter() {
        let row = ORDER.iter().map(|&b| table.get_score(a, b)).join("\t");
        writer.write_fmt(format_args!("{}\t{}\n", a as char, row))?;
    }

    Ok(())
}
