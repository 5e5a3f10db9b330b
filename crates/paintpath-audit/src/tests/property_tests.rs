//! Property-based tests for the selector, counterfactual builder and
//! savings calculator.
//!
//! Pages are random DAGs rooted at a document request. Node `i` depends on
//! one to three earlier nodes, so every node is reachable from the root and
//! has its own URL.

use paintpath_config::{AuditOptions, InliningPolicy};
use paintpath_graph::{NodeId, ResourceGraph, ResourceType};
use proptest::prelude::*;
use rustc_hash::FxHashSet as HashSet;

use super::{CSS_URL, cpu, network, page_with_stylesheet, simulator};
use crate::artifacts::{BlockingTag, WastedBytesMap};
use crate::counterfactual::CounterfactualPlan;
use crate::savings::estimate_savings_from_inlining;
use crate::selector::BlockingResourceSelector;
use crate::simulator::{SimulationOptions, Simulator};
use crate::test_utils::TestSimulator;

#[derive(Debug, Clone)]
enum NodeSpec {
    Network(ResourceType, u64),
    Cpu(u64, u64),
}

fn node_spec() -> impl Strategy<Value = NodeSpec> {
    prop_oneof![
        (
            prop_oneof![
                Just(ResourceType::Stylesheet),
                Just(ResourceType::Script),
                Just(ResourceType::Image),
                Just(ResourceType::Font),
            ],
            0u64..60_000,
        )
            .prop_map(|(ty, bytes)| NodeSpec::Network(ty, bytes)),
        (0u64..5_000_000, 0u64..120_000).prop_map(|(ts, dur)| NodeSpec::Cpu(ts, dur)),
    ]
}

fn url(i: usize) -> String {
    format!("https://example.com/r{i}")
}

fn page_strategy() -> impl Strategy<Value = ResourceGraph> {
    (2usize..=12)
        .prop_flat_map(|size| {
            let parents = (1..size)
                .map(|i| prop::collection::vec(0..i, 1..=i.min(3)))
                .collect::<Vec<_>>();
            (parents, prop::collection::vec(node_spec(), size - 1))
        })
        .prop_map(|(parents, specs)| {
            let root = network("n0", &url(0), ResourceType::Document, 10_000);
            let nodes = specs.iter().enumerate().map(|(offset, spec)| {
                let i = offset + 1;
                match spec {
                    NodeSpec::Network(ty, bytes) => network(&format!("n{i}"), &url(i), *ty, *bytes),
                    NodeSpec::Cpu(ts, dur) => cpu(&format!("n{i}"), *ts, *dur),
                }
            });
            let mut edges = Vec::new();
            for (offset, deps) in parents.into_iter().enumerate() {
                let child = offset + 1;
                for parent in deps {
                    edges.push((
                        NodeId::new(format!("n{parent}")),
                        NodeId::new(format!("n{child}")),
                    ));
                }
            }
            ResourceGraph::from_parts(root, nodes, edges).expect("generated page is valid")
        })
}

fn policy_strategy() -> impl Strategy<Value = InliningPolicy> {
    prop_oneof![Just(InliningPolicy::ByteAware), Just(InliningPolicy::SimpleMerge)]
}

fn subset(graph: &ResourceGraph, mask: &[bool]) -> HashSet<NodeId> {
    graph
        .nodes()
        .zip(mask.iter().copied().chain(std::iter::repeat(false)))
        .filter(|(_, keep)| *keep)
        .map(|(node, _)| node.id.clone())
        .collect()
}

fn wasted_css(graph: &ResourceGraph, fraction: f64) -> WastedBytesMap {
    graph
        .nodes()
        .filter(|node| node.is_stylesheet())
        .filter_map(|node| node.as_network())
        .map(|record| {
            (
                record.url.clone(),
                (record.transfer_size as f64 * fraction) as u64,
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// Downloads simulated under the threshold are never flagged.
    #[test]
    fn prop_short_simulated_downloads_are_never_flagged(
        css_bytes in 0u64..10_000,
        tag_bytes in 0.0f64..1e7,
        end in 0.0f64..1.8,
    ) {
        let graph = page_with_stylesheet(css_bytes);
        let timing = TestSimulator::new(0.0, 200.0)
            .simulate(&graph, &SimulationOptions::new())
            .unwrap()
            .node_timing;
        let options = AuditOptions::default();
        let tags = [BlockingTag::new(CSS_URL, 0.0, end, tag_bytes)];

        let selection = BlockingResourceSelector::new(&graph, &timing, &options).select(&tags, 1_800.0);
        prop_assert!(selection.is_empty());
        prop_assert!(selection.deferred.is_empty());
    }

    /// Observed downloads under the threshold are never flagged by simple merge.
    #[test]
    fn prop_short_observed_downloads_are_never_flagged(
        start in 0.0f64..1.0,
        observed_ms in 0.0f64..49.0,
    ) {
        let graph = page_with_stylesheet(20_000);
        let timing = simulator()
            .simulate(&graph, &SimulationOptions::new())
            .unwrap()
            .node_timing;
        let options = AuditOptions::with_policy(InliningPolicy::SimpleMerge);
        let tags = [BlockingTag::new(CSS_URL, start, start + observed_ms / 1000.0, 20_000.0)];

        let selection = BlockingResourceSelector::new(&graph, &timing, &options).select(&tags, 1_800.0);
        prop_assert!(selection.is_empty());
    }

    /// Tags that end after first contentful paint are never flagged.
    #[test]
    fn prop_tags_after_fcp_are_never_flagged(
        fcp_ms in 0.0f64..5_000.0,
        late_ms in 0.001f64..5_000.0,
        policy in policy_strategy(),
    ) {
        let graph = page_with_stylesheet(20_000);
        let timing = simulator()
            .simulate(&graph, &SimulationOptions::new())
            .unwrap()
            .node_timing;
        let options = AuditOptions::with_policy(policy);
        let end = (fcp_ms + late_ms) / 1000.0;
        let tags = [BlockingTag::new(CSS_URL, 0.0, end, 20_000.0)];

        let selection = BlockingResourceSelector::new(&graph, &timing, &options).select(&tags, fcp_ms);
        prop_assert!(selection.is_empty());
    }

    /// Savings are never negative, whatever gets deferred.
    #[test]
    fn prop_savings_are_non_negative(
        graph in page_strategy(),
        mask in prop::collection::vec(any::<bool>(), 12),
        policy in policy_strategy(),
        fraction in 0.0f64..1.5,
    ) {
        let deferred = subset(&graph, &mask);
        let savings = estimate_savings_from_inlining(
            &simulator(),
            &graph,
            &deferred,
            policy,
            &wasted_css(&graph, fraction),
        )
        .unwrap();
        prop_assert!(savings.wasted_ms >= 0.0);
        prop_assert!(savings.wasted_ms.is_finite());
    }

    /// The source graph is identical before and after an estimate.
    #[test]
    fn prop_estimate_leaves_graph_untouched(
        graph in page_strategy(),
        mask in prop::collection::vec(any::<bool>(), 12),
        policy in policy_strategy(),
    ) {
        let before = graph.to_snapshot();
        let deferred = subset(&graph, &mask);

        let plan = CounterfactualPlan::for_policy(policy, &graph, &deferred, &WastedBytesMap::default());
        let counterfactual = plan.build(&graph).unwrap();
        let _ = estimate_savings_from_inlining(
            &simulator(),
            &graph,
            &deferred,
            policy,
            &WastedBytesMap::default(),
        )
        .unwrap();

        prop_assert_eq!(graph.to_snapshot(), before);
        for node in counterfactual.graph.nodes() {
            if let Some(original) = graph.node(&node.id) {
                prop_assert_eq!(node, original);
            }
        }
    }

    /// Byte-aware selection defers every transitive dependent of a flagged
    /// node, and the counterfactual drops all of them.
    #[test]
    fn prop_byte_aware_deferral_is_transitive(
        graph in page_strategy(),
        mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let timing = simulator()
            .simulate(&graph, &SimulationOptions::new())
            .unwrap()
            .node_timing;
        let tags: Vec<BlockingTag> = graph
            .nodes()
            .zip(mask.iter().copied().chain(std::iter::repeat(false)))
            .filter(|(node, tagged)| *tagged && node.id != *graph.root_id())
            .filter_map(|(node, _)| node.url())
            .map(|url| BlockingTag::new(url, 0.0, 0.1, 1_000.0))
            .collect();
        let options = AuditOptions::default();

        let selection = BlockingResourceSelector::new(&graph, &timing, &options).select(&tags, 60_000.0);
        for entry in &selection.results {
            let id = graph
                .nodes()
                .find(|node| node.url() == Some(entry.url.as_str()))
                .map(|node| node.id.clone())
                .unwrap();
            prop_assert!(graph.reachable_ids(&id).is_subset(&selection.deferred));
        }

        let plan = CounterfactualPlan::byte_aware(&graph, &selection.deferred, &WastedBytesMap::default());
        let counterfactual = plan.build(&graph).unwrap();
        for id in &selection.deferred {
            prop_assert!(!counterfactual.graph.contains(id));
        }
    }
}
