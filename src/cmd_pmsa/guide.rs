use clap::*;
use log::info;
use pmsa::libs::align::GlobalAligner;
use pmsa::libs::dist::{load_phylip, pairwise_distances};
use pmsa::libs::score::SubTable;
use pmsa::libs::seq::read_sequences;
use pmsa::libs::upgma::{upgma, Clustering};
use std::time::Instant;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("guide")
        .about("Build a UPGMA guide tree for progressive alignment")
        .after_help(
            r###"
Clusters protein sequences bottom-up. Each sequence is embedded as its row
of the distance matrix; clusters are compared by the mean Euclidean distance
between the embeddings of their members, and the closest two are merged
until one cluster is left. At each merge the closest pair of member
sequences is aligned.

Output formats (--format):
* newick  - The guide tree
* cluster - The sequences in final cluster order, as FASTA
* merge   - One TSV line per merge:
            step, left members, right members, distance, representatives, score

Notes:
* Without --matrix, distances are 1 - identity of global alignments
* With --matrix, the relaxed PHYLIP file must name every input sequence
* Ties between equally close pairs go to the earliest pair

Examples:
1. Guide tree of a FASTA file:
   pmsa guide input.fa -o guide.nwk

2. Reuse a precomputed matrix and print branch lengths:
   pmsa guide input.fa --matrix matrix.phy --lengths

3. Sequences in merge order:
   pmsa guide input.fa --format cluster --parallel 4

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input protein FASTA file"),
        )
        .arg(
            Arg::new("matrix")
                .long("matrix")
                .short('m')
                .num_args(1)
                .help("Precomputed PHYLIP distance matrix"),
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
            Arg::new("format")
                .long("format")
                .num_args(1)
                .default_value("newick")
                .value_parser(["newick", "cluster", "merge"])
                .help("Output format"),
        )
        .arg(
            Arg::new("lengths")
                .long("lengths")
                .action(ArgAction::SetTrue)
                .help("Write branch lengths in the Newick tree"),
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
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let opt_matrix = args.get_one::<String>("matrix");
    let gap = *args.get_one::<i32>("gap").unwrap();
    let format = args.get_one::<String>("format").unwrap();
    let is_lengths = args.get_flag("lengths");
    let parallel = *args.get_one::<usize>("parallel").unwrap();
    let mut writer = pmsa::writer(args.get_one::<String>("outfile").unwrap())?;

    //----------------------------
    // Ops
    //----------------------------
    let start = Instant::now();
    let seqs = read_sequences(infile)?;
    let table = SubTable::build();
    let aligner = GlobalAligner::new(gap);
    info!(
        "Loaded {} sequences: {:.6} s",
        seqs.len(),
        start.elapsed().as_secs_f64()
    );

    let pool = super::build_pool(parallel)?;

    let matrix_start = Instant::now();
    let matrix = match opt_matrix {
        Some(path) => load_phylip(path, &seqs)?,
        None => pool.install(|| pairwise_distances(&seqs, &table, &aligner))?,
    };
    info!(
        "Distance matrix: {:.6} s",
        matrix_start.elapsed().as_secs_f64()
    );

    let upgma_start = Instant::now();
    let clustering = pool.install(|| upgma(&seqs, &matrix, &table, &aligner))?;
    info!("UPGMA: {:.6} s", upgma_start.elapsed().as_secs_f64());
    info!("Total: {:.6} s", start.elapsed().as_secs_f64());

    //----------------------------
    // Output
    //----------------------------
    match format.as_str() {
        "newick" => {
            writer.write_fmt(format_args!("{}\n", clustering.tree.to_newick(is_lengths)))?;
        }
        "cluster" => {
            for seq in &clustering.cluster.seqs {
                writer.write_fmt(format_args!(">{}\n{}\n", seq.id, seq.residues))?;
            }
        }
        "merge" => write_merges(&mut writer, &clustering)?,
        _ => unreachable!(),
    }

    Ok(())
}

fn write_merges(writer: &mut dyn std::io::Write, clustering: &Clustering) -> anyhow::Result<()> {
    let tree = &clustering.tree;
    let name_of = |idx: usize| {
        tree.get_node(idx)
            .and_then(|n| n.name.clone())
            .unwrap_or_default()
    };

    for (k, step) in clustering.steps.iter().enumerate() {
        writer.write_fmt(format_args!(
            "{}\t{}\t{}\t{:.6}\t{},{}\t{}\n",
            k + 1,
            tree.leaves(step.left).join(","),
            tree.leaves(step.right).join(","),
            step.distance,
            name_of(step.representatives.0),
            name_of(step.representatives.1),
            step.score,
        ))?;
    }
    Ok(())
}
