use clap::*;
use log::info;
use pmsa::libs::align::GlobalAligner;
use pmsa::libs::dist::{pairwise_distances, write_phylip};
use pmsa::libs::score::SubTable;
use pmsa::libs::seq::read_sequences;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("dist")
        .about("All-against-all distances of protein sequences")
        .after_help(
            r###"
Globally aligns every pair of sequences with BLOSUM62 and a linear gap
penalty, and reports 1 - identity as a relaxed PHYLIP matrix.

Notes:
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'
* The output can be fed back with `pmsa guide --matrix`

Examples:
1. Distance matrix of a FASTA file:
   pmsa dist input.fa -o matrix.phy

2. Use 8 threads and a softer gap penalty:
   pmsa dist input.fa --parallel 8 --gap -2

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input protein FASTA file"),
        )
        .arg(
            Arg::new("gap")
                .long("gap")
                .num_args(1)
                .default_value("-4")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32))
                .help("Score of one gap column"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads"),
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
    let infile = args.get_one::<String>("infile").unwrap();
    let gap = *args.get_one::<i32>("gap").unwrap();
    let parallel = *args.get_one::<usize>("parallel").unwrap();
    let mut writer = pmsa::writer(args.get_one::<String>("outfile").unwrap())?;

    let seqs = read_sequences(infile)?;
    let table = SubTable::build();
    let aligner = GlobalAligner::new(gap);

    let start = std::time::Instant::now();
    let pool = super::build_pool(parallel)?;
    let matrix = pool.install(|| pairwise_distances(&seqs, &table, &aligner))?;
    info!(
        "Distance matrix of {} sequences: {:.6} s",
        seqs.len(),
        start.elapsed().as_secs_f64()
    );

    write_phylip(&mut writer, &matrix, &seqs)?;

    Ok(())
}
