use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use setcover::io::certificate::CertificateFormat;
use setcover::io::format::InstanceFormat;

/// Which `--algorithm` value was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    #[value(name = "greedy")]
    Greedy,
    #[value(name = "greedy-lin")]
    GreedyLin,
    #[value(name = "greedy-reverse")]
    GreedyReverse,
    #[value(name = "greedy-dual")]
    GreedyDual,
    #[value(name = "greedy-or-greedy-reverse")]
    GreedyOrGreedyReverse,
    #[value(name = "milp-cbc")]
    MilpCbc,
    #[value(name = "milp-gurobi")]
    MilpGurobi,
    #[value(name = "milp-highs")]
    MilpHighs,
    #[value(name = "local-search-row-weighting-1")]
    LocalSearchRowWeighting1,
    #[value(name = "local-search-row-weighting-2")]
    LocalSearchRowWeighting2,
    #[value(name = "large-neighborhood-search")]
    LargeNeighborhoodSearch,
    #[value(name = "trivial-bound")]
    TrivialBound,
    #[value(name = "clique-cover-bound")]
    CliqueCoverBound,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.to_possible_value().expect("every variant has a value name").get_name().to_string();
        f.write_str(&name)
    }
}

/// Wraps `setcover::io::format::InstanceFormat` so clap can parse it
/// directly from the same aliases the library's `FromStr` impl accepts.
#[derive(Debug, Clone, Copy)]
pub struct InstanceFormatArg(pub InstanceFormat);

impl std::str::FromStr for InstanceFormatArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<InstanceFormat>().map(InstanceFormatArg).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CertificateFormatArg(pub CertificateFormat);

impl std::str::FromStr for CertificateFormatArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<CertificateFormat>().map(CertificateFormatArg).map_err(|e| e.to_string())
    }
}

/// Run a weighted set covering algorithm against an instance file (spec §6).
#[derive(Parser, Debug)]
#[command(
    name = "scvr",
    about = "Run a weighted set covering algorithm",
    version,
    after_help = "\
Examples:
  scvr -a greedy -i instance.txt -f gecco2020
  scvr -a local-search-row-weighting-2 -i instance.txt -f balas1980 -t 30 -c out.sol
  scvr -a milp-highs -i instance.txt -f pace2025 -o report.json

Enable tab completion:
  eval \"$(scvr --completions bash)\"     # add to ~/.bashrc or ~/.zshrc"
)]
pub struct Cli {
    /// Algorithm to run. Required unless `--completions` is given.
    #[arg(long, short = 'a', value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Instance file to read. Required unless `--completions` is given.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Instance file format.
    #[arg(long, short = 'f', default_value = "gecco2020")]
    pub format: InstanceFormatArg,

    /// Force every set's cost to 1, regardless of what the file encodes.
    #[arg(long, short = 'u')]
    pub unicost: bool,

    /// Write the JSON report here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write the solution certificate here.
    #[arg(long, short = 'c')]
    pub certificate: Option<PathBuf>,

    /// Certificate file format.
    #[arg(long, default_value = "gecco2020")]
    pub certificate_format: CertificateFormatArg,

    /// Read a starting solution certificate before running the algorithm
    /// (only meaningful for the local search and LNS algorithms).
    #[arg(long)]
    pub initial_solution: Option<PathBuf>,

    /// Stop as soon as the best solution reaches this cost.
    #[arg(long)]
    pub goal: Option<i64>,

    /// Random seed.
    #[arg(long, short = 's', default_value_t = 0)]
    pub seed: u64,

    /// Wall-clock time limit in seconds for the algorithm run.
    #[arg(long, short = 't')]
    pub time_limit: Option<f64>,

    /// 0 disables progress logging; higher values are more verbose.
    #[arg(long, short = 'v', default_value_t = 0)]
    pub verbosity_level: u8,

    /// Write the log to this file instead of discarding it.
    #[arg(long, short = 'l')]
    pub log: Option<PathBuf>,

    /// Write the log to stderr instead of (or in addition to) `--log`.
    #[arg(long)]
    pub log_to_stderr: bool,

    /// Only write the certificate/report once, at the very end, instead
    /// of after every improvement.
    #[arg(long, short = 'e')]
    pub only_write_at_the_end: bool,

    /// Run the reduction engine before the algorithm.
    #[arg(long, default_value_t = true)]
    pub reduce: bool,

    /// Enable the set-folding reduction rule.
    #[arg(long, default_value_t = true)]
    pub set_folding: bool,

    /// Enable the twin reduction rule.
    #[arg(long, default_value_t = true)]
    pub twin: bool,

    /// Enable the unconfined-sets reduction rule.
    #[arg(long, default_value_t = true)]
    pub unconfined_sets: bool,

    /// Enable the expensive sampled general set-domination check.
    #[arg(long)]
    pub dominated_sets_removal: bool,

    /// Enable the expensive sampled general element-domination check.
    #[arg(long)]
    pub dominated_elements_removal: bool,

    /// Enable the sampled "crown" domination check. Off by default: it
    /// approximates a rule the upstream solver does not guarantee safe
    /// in all cases (spec §9 Open Questions); this implementation is a
    /// sound but incomplete approximation, not the upstream behaviour.
    #[arg(long)]
    pub crown: bool,

    /// Time limit in seconds for the reduction engine alone.
    #[arg(long)]
    pub reduction_time_limit: Option<f64>,

    /// Cap on the number of search iterations.
    #[arg(long)]
    pub maximum_number_of_iterations: Option<i64>,

    /// Stop after this many iterations without improvement.
    #[arg(long)]
    pub maximum_number_of_iterations_without_improvement: Option<i64>,

    /// Number of sets removed per destroy step of large-neighborhood
    /// search. Has no effect on other algorithms.
    #[arg(long, default_value_t = 2)]
    pub destroy_size: usize,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum)]
    pub completions: Option<clap_complete::Shell>,
}
