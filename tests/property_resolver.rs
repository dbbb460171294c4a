// tests/property_resolver.rs

mod common;

use std::collections::{BTreeSet, HashMap};

use common::{ExecutionLog, TestSeed};
use proptest::prelude::*;
use seedrun::engine::PlannedAction;
use seedrun::SeedRunner;

#[derive(Debug, Clone)]
struct SeedSpec {
    name: String,
    deps: Vec<String>,
    skipped: bool,
}

// Acyclic by construction: seed N may only depend on seeds 0..N-1.
// Registration order is shuffled so it does not trivially match the
// dependency order.
fn dag_strategy(max_seeds: usize) -> impl Strategy<Value = Vec<SeedSpec>> {
    (1..=max_seeds).prop_flat_map(|count| {
        (
            proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), count),
            proptest::collection::vec(proptest::bool::weighted(0.2), count),
        )
            .prop_map(move |(raw_deps, skipped)| {
                (0..count)
                    .map(|i| {
                        let deps: BTreeSet<usize> = if i == 0 {
                            BTreeSet::new()
                        } else {
                            raw_deps[i].iter().map(|d| d % i).collect()
                        };
                        SeedSpec {
                            name: format!("seed_{i}"),
                            deps: deps.into_iter().map(|d| format!("seed_{d}")).collect(),
                            skipped: skipped[i],
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    })
}

fn runner_for(specs: &[SeedSpec], log: &ExecutionLog) -> SeedRunner {
    let mut runner = SeedRunner::new(false, None);
    for spec in specs {
        let mut seed = TestSeed::new(&spec.name, log);
        for dep in &spec.deps {
            seed = seed.after(dep);
        }
        if spec.skipped {
            seed = seed.skipped();
        }
        runner.register_seed(seed.boxed());
    }
    runner
}

proptest! {
    #[test]
    fn dependencies_run_before_dependents(specs in dag_strategy(12)) {
        let log = ExecutionLog::new();
        let mut runner = runner_for(&specs, &log);

        runner.run_all().unwrap();

        let executed = runner.executed_seeds().to_vec();
        let position: HashMap<&str, usize> = executed
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        prop_assert_eq!(executed.len(), specs.len());
        for spec in specs.iter().filter(|s| !s.skipped) {
            for dep in &spec.deps {
                prop_assert!(position[dep.as_str()] < position[spec.name.as_str()]);
            }
        }

        // Every non-skipped body ran exactly once; skipped bodies never.
        for spec in &specs {
            let expected = if spec.skipped { 0 } else { 1 };
            prop_assert_eq!(log.count(&spec.name), expected);
        }
        prop_assert_eq!(runner.executing_count(), 0);
    }

    #[test]
    fn plan_matches_execution_order(specs in dag_strategy(12)) {
        let log = ExecutionLog::new();
        let mut runner = runner_for(&specs, &log);

        runner.validate().unwrap();
        let plan = runner.plan().unwrap();
        prop_assert!(log.entries().is_empty());

        runner.run_all().unwrap();

        let planned: Vec<&str> = plan.iter().map(|s| s.seed.as_str()).collect();
        prop_assert_eq!(planned, runner.executed_seeds().iter().map(String::as_str).collect::<Vec<_>>());

        let planned_runs: Vec<String> = plan
            .iter()
            .filter(|s| s.action == PlannedAction::Run)
            .map(|s| s.seed.clone())
            .collect();
        prop_assert_eq!(planned_runs, log.entries());
    }
}
