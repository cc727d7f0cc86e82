//! Bounded BFS acceptance properties over explicit rewrite graphs.

use xferdepth_search::error::SearchError;
use xferdepth_search::graph_oracle::ExplicitGraphOracle;
use xferdepth_search::policy::SearchPolicy;
use xferdepth_search::search::{find_min_improving_depth, search, NotFoundReason, SearchOutcome};

const R1: u32 = 1;
const R2: u32 = 2;

/// Cost-10 start with `r1` (cost-preserving, to itself) and optionally
/// `r2` (to a cost-8 state).
fn two_rule_scenario(with_r2: bool) -> (ExplicitGraphOracle, usize) {
    let mut g = ExplicitGraphOracle::new();
    let start = g.add_state(10);
    g.add_rewrite(start, 0, R1, start);
    if with_r2 {
        let cheaper = g.add_state(8);
        g.add_rewrite(start, 0, R2, cheaper);
    }
    (g, start)
}

/// `start -> s1 -> ... -> s(n-1)` at equal cost, then a cheaper state.
fn chain(n: u32) -> (ExplicitGraphOracle, usize) {
    let mut g = ExplicitGraphOracle::new();
    let start = g.add_state(5);
    let mut prev = start;
    for _ in 1..n {
        let next = g.add_state(5);
        g.add_rewrite(prev, 0, 0, next);
        prev = next;
    }
    let goal = g.add_state(4);
    g.add_rewrite(prev, 0, 0, goal);
    (g, start)
}

#[test]
fn two_rule_scenario_finds_depth_one() {
    let (g, start) = two_rule_scenario(true);
    assert_eq!(find_min_improving_depth(&g, start, 5).unwrap(), Some(1));
}

#[test]
fn two_rule_scenario_without_improving_rule_never_finds() {
    let (g, start) = two_rule_scenario(false);
    for bound in [1, 5, 64, u32::MAX] {
        assert_eq!(
            find_min_improving_depth(&g, start, bound).unwrap(),
            None,
            "bound {bound}"
        );
    }
}

#[test]
fn every_single_step_improvement_is_depth_one() {
    let mut g = ExplicitGraphOracle::new();
    let start = g.add_state(7);
    for point in 0..4 {
        let child = g.add_state(6 - u64::from(point));
        g.add_rewrite(start, point, 0, child);
    }
    assert_eq!(find_min_improving_depth(&g, start, 1).unwrap(), Some(1));
}

#[test]
fn minimality_over_chain_lengths() {
    for n in 1..=6 {
        let (g, start) = chain(n);
        assert_eq!(
            find_min_improving_depth(&g, start, 8).unwrap(),
            Some(n),
            "chain of {n}"
        );
    }
}

#[test]
fn improvement_one_past_bound_is_still_reported() {
    // Improvement is checked before the bound, so a cheaper child of a
    // state at depth max_depth is found at max_depth + 1.
    let (g, start) = chain(4);
    assert_eq!(find_min_improving_depth(&g, start, 3).unwrap(), Some(4));
}

#[test]
fn bound_stops_deeper_chains() {
    let (g, start) = chain(6);
    let report = search(&g, start, &SearchPolicy::with_max_depth(3)).unwrap();
    assert_eq!(
        report.outcome,
        SearchOutcome::NotFound(NotFoundReason::DepthBoundExceeded { depth: 4 })
    );
}

#[test]
fn diamond_records_shortest_depth_once() {
    // start -> a -> c and start -> b -> x -> c; c is recorded once, at 2.
    let mut g = ExplicitGraphOracle::new();
    let start = g.add_state(3);
    let a = g.add_state(3);
    let b = g.add_state(3);
    let x = g.add_state(3);
    let c = g.add_state(3);
    g.add_rewrite(start, 0, 0, a);
    g.add_rewrite(start, 1, 0, b);
    g.add_rewrite(a, 0, 0, c);
    g.add_rewrite(b, 0, 0, x);
    g.add_rewrite(x, 0, 0, c);

    let report = search(&g, start, &SearchPolicy::with_max_depth(10)).unwrap();
    assert_eq!(
        report.outcome,
        SearchOutcome::NotFound(NotFoundReason::FrontierExhausted)
    );
    assert_eq!(report.stats.states_discovered, 5);
    assert_eq!(report.stats.duplicates_suppressed, 1);
    assert_eq!(report.stats.deepest_recorded, 2);
}

#[test]
fn identical_inputs_identical_reports() {
    let (g, start) = chain(5);
    let policy = SearchPolicy {
        record_expansion_order: true,
        ..SearchPolicy::default()
    };
    let first = search(&g, start, &policy).unwrap();
    for _ in 0..5 {
        let again = search(&g, start, &policy).unwrap();
        assert_eq!(again.outcome, first.outcome);
        assert_eq!(again.stats, first.stats);
        assert_eq!(again.expansion_order, first.expansion_order);
    }
}

#[test]
fn oracle_failure_surfaces_unchanged() {
    let (mut g, start) = chain(3);
    g.poison(1);
    let err = search(&g, start, &SearchPolicy::default()).unwrap_err();
    match err {
        SearchError::Oracle { source, .. } => {
            assert_eq!(source.detail, "state 1 is poisoned");
        }
        other => panic!("expected Oracle error, got {other:?}"),
    }
}
