//! Wires the CLI's flags onto the library's entry points: parse the
//! instance, optionally reduce it, run the requested algorithm, lift the
//! result back through the [`setcover::reduction::UnreductionMap`], and
//! write the certificate/JSON report.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use setcover::algorithms::formatter::{AlgorithmFormatter, AlgorithmOutput, AlgorithmParameters, NewSolutionCallback};
use setcover::algorithms::{bounds, greedy, lns, milp, row_weighting};
use setcover::io::{certificate, format, report::Report};
use setcover::reduction::{Reduction, ReductionParameters};
use setcover::solution::Solution;
use setcover::timer::Timer;
use setcover::Instance;

use crate::cli::{Algorithm, Cli};
use crate::log::Log;
use crate::output::{fmt_dim, fmt_good, fmt_section};

/// Parameters echoed verbatim into the JSON report's `Parameters` object.
#[derive(Serialize)]
struct EchoedParameters {
    algorithm: String,
    input: PathBuf,
    seed: u64,
    goal: Option<i64>,
    time_limit: Option<f64>,
    reduce: bool,
}

/// Run a pure constructor (no formatter of its own) through the usual
/// [`AlgorithmFormatter`] plumbing, overlaying `trivial_bound` as its dual
/// certificate (spec §4.6: bounds exist to pair with a heuristic's upper
/// bound).
fn wrap_constructor(instance: &Arc<Instance>, solution: Solution, parameters: &AlgorithmParameters) -> AlgorithmOutput {
    let bound = bounds::trivial_bound(instance);
    let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(instance)), parameters);
    formatter.update(&solution, bound);
    formatter.finish(bound)
}

fn run_algorithm(
    algorithm: Algorithm,
    instance: Arc<Instance>,
    initial: Solution,
    parameters: AlgorithmParameters,
    destroy_size: usize,
    log: &mut Log,
) -> AlgorithmOutput {
    match algorithm {
        Algorithm::Greedy => wrap_constructor(&instance, greedy::greedy(&instance), &parameters),
        Algorithm::GreedyLin => wrap_constructor(&instance, greedy::greedy_lin(&instance), &parameters),
        Algorithm::GreedyReverse => wrap_constructor(&instance, greedy::greedy_reverse(&instance), &parameters),
        Algorithm::GreedyDual => wrap_constructor(&instance, greedy::greedy_dual(&instance), &parameters),
        Algorithm::GreedyOrGreedyReverse => {
            wrap_constructor(&instance, greedy::greedy_or_greedy_reverse(&instance), &parameters)
        }
        Algorithm::LocalSearchRowWeighting1 => {
            let mut output = row_weighting::local_search_row_weighting(Arc::clone(&instance), initial, false, parameters);
            output.bound = output.bound.max(bounds::trivial_bound(&instance));
            output
        }
        Algorithm::LocalSearchRowWeighting2 => {
            let mut output = row_weighting::local_search_row_weighting(Arc::clone(&instance), initial, true, parameters);
            output.bound = output.bound.max(bounds::trivial_bound(&instance));
            output
        }
        Algorithm::LargeNeighborhoodSearch => {
            lns::large_neighborhood_search(Arc::clone(&instance), initial, parameters, destroy_size)
        }
        Algorithm::TrivialBound => {
            let bound = bounds::trivial_bound(&instance);
            let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(&instance)), &parameters);
            formatter.finish(bound)
        }
        Algorithm::CliqueCoverBound => {
            let bound = bounds::clique_cover_bound(&instance);
            let formatter = AlgorithmFormatter::new(Solution::new(Arc::clone(&instance)), &parameters);
            formatter.finish(bound)
        }
        Algorithm::MilpCbc | Algorithm::MilpGurobi | Algorithm::MilpHighs => {
            let backend = match algorithm {
                Algorithm::MilpCbc => milp::MilpBackend::CoinCbc,
                Algorithm::MilpGurobi => milp::MilpBackend::Gurobi,
                Algorithm::MilpHighs => milp::MilpBackend::Highs,
                _ => unreachable!(),
            };
            let result = milp::solve(Arc::clone(&instance), backend, parameters);
            if result.status != milp::MilpStatus::Optimal {
                log.line(0, &format!("c warning: MILP backend reported {:?}", result.status));
            }
            result.output
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "scvr", &mut std::io::stdout());
        return Ok(());
    }

    let algorithm = cli.algorithm.ok_or_else(|| anyhow::anyhow!("--algorithm/-a is required"))?;
    let input = cli.input.clone().ok_or_else(|| anyhow::anyhow!("--input/-i is required"))?;

    let mut log = Log::open(cli.log.as_deref(), cli.log_to_stderr, cli.verbosity_level)?;

    let original = format::read_instance(&input, cli.format.0, cli.unicost)
        .with_context(|| format!("failed to read instance {}", input.display()))?;
    let original = Arc::new(original);
    log.line(
        1,
        &format!(
            "c {} {} sets, {} elements",
            fmt_dim("instance:"),
            original.number_of_sets(),
            original.number_of_elements()
        ),
    );

    let reduction_timer = match cli.reduction_time_limit {
        Some(seconds) => Timer::with_limit(Duration::from_secs_f64(seconds)),
        None => Timer::unbounded(),
    };
    let reduction_parameters = ReductionParameters {
        reduce: cli.reduce,
        enable_set_folding: cli.set_folding,
        enable_twin: cli.twin,
        enable_unconfined_sets: cli.unconfined_sets,
        enable_dominated_sets: cli.dominated_sets_removal,
        enable_dominated_elements: cli.dominated_elements_removal,
        enable_crown: cli.crown,
        seed: cli.seed,
        ..Default::default()
    };
    let reduction = Reduction::new(Arc::clone(&original), &reduction_parameters, &reduction_timer);
    log.line(
        1,
        &format!(
            "c {} {} sets, {} elements",
            fmt_dim("reduced:"),
            reduction.instance().number_of_sets(),
            reduction.instance().number_of_elements()
        ),
    );

    let working: Arc<Instance> = Arc::new(reduction.instance().clone());
    let unreduction = Arc::new(reduction.unreduction().clone());

    // Certificate IDs of `--initial-solution` are interpreted against
    // whichever instance the algorithm actually runs on. When reduction
    // is enabled there is no original-to-reduced ID mapping available
    // (only the reverse), so the flag is accepted but ignored with a
    // warning rather than silently misapplied (see DESIGN.md).
    let initial = match &cli.initial_solution {
        Some(path) if !cli.reduce => certificate::read_certificate(path, Arc::clone(&working), cli.certificate_format.0)
            .with_context(|| format!("failed to read initial solution {}", path.display()))?,
        Some(_) => {
            log.line(0, "c warning: --initial-solution is ignored while --reduce is enabled");
            Solution::new(Arc::clone(&working))
        }
        None => Solution::new(Arc::clone(&working)),
    };

    let timer = match cli.time_limit {
        Some(seconds) => Timer::with_limit(Duration::from_secs_f64(seconds)),
        None => Timer::unbounded(),
    };

    let new_solution_callback: Option<NewSolutionCallback> = if cli.only_write_at_the_end {
        None
    } else if let Some(certificate_path) = cli.certificate.clone() {
        let unreduction = Arc::clone(&unreduction);
        let original = Arc::clone(&original);
        let certificate_format = cli.certificate_format.0;
        Some(Arc::new(move |solution: &Solution, _cost, _time| {
            let lifted = unreduction.lift(Arc::clone(&original), solution);
            let _ = certificate::write_certificate(&lifted, &certificate_path, certificate_format);
        }))
    } else {
        None
    };

    let parameters = AlgorithmParameters {
        timer,
        seed: cli.seed,
        goal: cli.goal,
        verbosity_level: cli.verbosity_level,
        maximum_number_of_iterations: cli.maximum_number_of_iterations,
        maximum_number_of_iterations_without_improvement: cli.maximum_number_of_iterations_without_improvement,
        best_solution_update_frequency: 1,
        new_solution_callback,
    };

    let algorithm_name = algorithm.to_string();
    let output = run_algorithm(algorithm, Arc::clone(&working), initial, parameters, cli.destroy_size, &mut log);

    let lifted_solution = unreduction.lift(Arc::clone(&original), &output.solution);
    let lifted_bound = unreduction.lift_bound(output.bound);
    log.line(
        0,
        &format!("c {} cost {}", fmt_good("final solution:"), lifted_solution.cost()),
    );

    if let Some(path) = &cli.certificate {
        certificate::write_certificate(&lifted_solution, path, cli.certificate_format.0)
            .with_context(|| format!("failed to write certificate {}", path.display()))?;
    }

    let lifted_output = AlgorithmOutput {
        solution: lifted_solution,
        bound: lifted_bound,
        time: output.time,
        intermediary_outputs: output.intermediary_outputs,
    };

    let parameters_json = serde_json::to_value(EchoedParameters {
        algorithm: algorithm_name.clone(),
        input: input.clone(),
        seed: cli.seed,
        goal: cli.goal,
        time_limit: cli.time_limit,
        reduce: cli.reduce,
    })?;
    let report = Report::new(parameters_json).with_algorithm(&algorithm_name, &lifted_output);

    match &cli.output {
        Some(path) => {
            std::fs::write(path, report.to_json_string_pretty()?)
                .with_context(|| format!("failed to write report {}", path.display()))?;
        }
        None => {
            println!("{}", fmt_section("report:"));
            println!("{}", report.to_json_string_pretty()?);
        }
    }

    Ok(())
}
