//! End-to-end tests: decode a `graph.json` snapshot, build the graph, and
//! run the hover queries against it.

use ecm_core::EcmGraphSnapshot;
use ecm_graph::{EcmGraph, GraphBuilder, GraphEdge, HighlightMode, NodeKind};

const GRAPH_JSON: &str = r#"{
    "components": [
        {
            "nodeId": "component.12.org.example.Log",
            "name": "log-service",
            "state": "ACTIVE",
            "properties": {"service.pid": "org.example.Log"},
            "requirements": []
        },
        {
            "nodeId": "component.12.org.example.Alpha",
            "name": "alpha-service",
            "description": "Serves alpha requests",
            "state": "ACTIVE",
            "configurationPolicy": "OPTIONAL",
            "properties": {"service.pid": "org.example.Alpha", "threads": 4},
            "requirements": [
                {
                    "requirementId": "log",
                    "capabilityNodeId": "service.40",
                    "acceptedCapabilityType": "SERVICE",
                    "satisfactionState": "SATISFIED"
                }
            ]
        },
        {
            "nodeId": "component.12.org.example.Web",
            "name": "web-console",
            "state": "UNSATISFIED",
            "properties": {},
            "requirements": [
                {
                    "requirementId": "alpha",
                    "capabilityNodeId": "guessedService.component.12.org.example.Alpha",
                    "acceptedCapabilityType": "SERVICE",
                    "satisfactionState": "GUESSED"
                },
                {
                    "requirementId": "http",
                    "acceptedCapabilityType": "BUNDLE_CAPABILITY",
                    "satisfactionState": "UNSATISFIED"
                }
            ]
        }
    ],
    "capabilities": [
        {
            "nodeId": "service.40",
            "capabilityType": "SERVICE",
            "namespace": "osgi.service",
            "componentNodeId": "component.12.org.example.Log",
            "attributes": {"service.id": "40", "objectClass": ["org.example.Log"]}
        },
        {
            "nodeId": "guessedService.component.12.org.example.Alpha",
            "capabilityType": "SERVICE",
            "namespace": "osgi.service",
            "componentNodeId": "component.12.org.example.Alpha",
            "componentState": "UNSATISFIED",
            "guessed": true,
            "attributes": {"objectClass": ["org.example.Alpha"]}
        }
    ]
}"#;

const LOG: &str = "component.12.org.example.Log";
const ALPHA: &str = "component.12.org.example.Alpha";
const WEB: &str = "component.12.org.example.Web";
const LOG_SERVICE: &str = "service.40";
const ALPHA_SERVICE: &str = "guessedService.component.12.org.example.Alpha";
const MISSING_HTTP: &str = "missing.component.12.org.example.Web.1";

fn graph() -> EcmGraph {
    let snapshot = EcmGraphSnapshot::from_json(GRAPH_JSON).unwrap();
    GraphBuilder::from_snapshot(&snapshot)
}

#[test]
fn test_snapshot_shape() {
    let graph = graph();
    let stats = graph.stats();

    assert_eq!(stats.components, 3);
    assert_eq!(stats.capabilities, 2);
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.node_count, 6);
    // alpha→log service, web→alpha service, web→missing, 2 provider edges
    assert_eq!(stats.edge_count, 5);
    assert_eq!(NodeKind::of(graph.get(MISSING_HTTP).unwrap()), Some(NodeKind::Missing));
}

#[test]
fn test_hover_on_component() {
    let graph = graph();
    let highlight = graph.highlight(ALPHA, HighlightMode::BloodRelation).unwrap();

    // Alpha depends on the log service (and through it the log component),
    // and the web console depends on Alpha through the guessed service.
    for id in [LOG_SERVICE, LOG, ALPHA_SERVICE, WEB] {
        assert!(highlight.contains_node(id), "{} should be highlighted", id);
    }
    assert!(!highlight.contains_node(MISSING_HTTP));

    assert_eq!(
        highlight.edges,
        vec![
            GraphEdge::new(ALPHA, LOG_SERVICE),
            GraphEdge::new(LOG_SERVICE, LOG),
            GraphEdge::new(ALPHA_SERVICE, ALPHA),
            GraphEdge::new(WEB, ALPHA_SERVICE),
        ]
    );
}

#[test]
fn test_hover_on_leaf_component() {
    let graph = graph();

    let ancestors = graph.parents_path(LOG).unwrap();
    let order: Vec<&str> = ancestors.iter().map(|s| s.as_str()).collect();
    assert_eq!(order, vec![LOG_SERVICE, ALPHA, ALPHA_SERVICE, WEB]);
    assert!(graph.children_path(LOG).unwrap().is_empty());
}

#[test]
fn test_neighbours_of_guessed_service() {
    let graph = graph();
    let near = graph.closest_neighbours(ALPHA_SERVICE).unwrap();

    let nodes: Vec<&str> = near.near_nodes.iter().map(|s| s.as_str()).collect();
    assert_eq!(nodes, vec![ALPHA, WEB]);
}

#[test]
fn test_search_payloads() {
    let graph = graph();

    assert_eq!(graph.search("", "alpha"), vec![ALPHA]);
    assert_eq!(graph.search("", "org.example.Alpha"), vec![ALPHA, ALPHA_SERVICE]);
    assert_eq!(graph.search("state", "UNSATISFIED"), vec![WEB]);
    assert_eq!(graph.search("guessed", "true"), vec![ALPHA_SERVICE]);
    assert!(graph.search("", "zzz").is_empty());
}

#[test]
fn test_graph_serializes() {
    let graph = graph();
    let json = serde_json::to_value(&graph).unwrap();

    let nodes = json["nodes"].as_object().unwrap();
    assert_eq!(nodes.len(), 6);
    assert_eq!(nodes[WEB]["children"][0], serde_json::json!(ALPHA_SERVICE));
}
