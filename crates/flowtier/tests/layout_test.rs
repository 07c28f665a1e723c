//! End-to-end layout behaviour through the public render API.

use flowtier::{
    DiagramBuilder, Outcome,
    config::{AppConfig, LayoutConfig, StyleConfig},
    diagnostics::ErrorCode,
    diagram::{Diagram, EdgeStyle},
    render,
};

fn diagram_of(source: &str) -> Diagram {
    render(source)
        .diagram()
        .cloned()
        .expect("source declares nodes")
}

fn codes(source: &str) -> Vec<ErrorCode> {
    render(source)
        .diagnostics()
        .iter()
        .filter_map(|d| d.code())
        .collect()
}

#[test]
fn test_linear_flow_with_actor() {
    let source = r#"
        startEvent s "Start"
        task t "Do" [actor: Alice]
        endEvent e "End"
        s --> t
        t --> e
    "#;
    let diagram = diagram_of(source);
    let config = LayoutConfig::default();

    let levels: Vec<usize> = diagram.nodes().iter().map(|n| n.level()).collect();
    assert_eq!(levels, vec![0, 1, 2]);
    assert_eq!(diagram.node("t").unwrap().node().actor(), Some("Alice"));

    assert_eq!(diagram.edges().len(), 2);
    assert!(diagram.edges().iter().all(|e| e.edge().label().is_empty()));
    assert!(diagram.edges().iter().all(|e| e.label_position().is_none()));

    assert!(diagram.canvas_height() > 2.0 * config.level_spacing());
    assert!(render(source).diagnostics().is_empty());
}

#[test]
fn test_branching_flow_keeps_labels_and_spacing() {
    let source = r#"
        startEvent S "Start"
        gateway G "Check"
        task T1 "Left"
        task T2 "Right"
        endEvent E "End"
        S --> G
        G -->|yes| T1
        G -->|no| T2
        T1 --> E
        T2 --> E
    "#;
    let diagram = diagram_of(source);

    let t1 = diagram.node("T1").unwrap();
    let t2 = diagram.node("T2").unwrap();
    assert_eq!(t1.level(), 2);
    assert_eq!(t2.level(), 2);
    assert!((t1.x() - t2.x()).abs() >= LayoutConfig::default().min_spacing() - 1e-3);

    let out_of_gateway: Vec<&str> = diagram
        .edges()
        .iter()
        .filter(|e| e.edge().from() == "G")
        .map(|e| e.edge().label())
        .collect();
    assert_eq!(out_of_gateway, vec!["yes", "no"]);

    for edge in diagram.edges().iter().filter(|e| e.edge().has_label()) {
        assert!(edge.label_position().is_some());
    }
}

#[test]
fn test_dangling_edge_still_lays_out_declared_nodes() {
    let source = r#"
        startEvent s "Start"
        task t "Work"
        s --> t
        t --> nowhere
    "#;
    let rendered = render(source);
    let diagram = rendered.diagram().expect("declared nodes are laid out");

    assert_eq!(diagram.nodes().len(), 2);
    assert_eq!(diagram.edges().len(), 2);
    assert_eq!(diagram.edges()[1].edge().to(), "nowhere");
    // Drawn as a stub leaving the known node.
    assert_eq!(diagram.edges()[1].path().len(), 2);

    assert_eq!(codes(source), vec![ErrorCode::E201]);
}

#[test]
fn test_whitespace_only_is_no_nodes() {
    let rendered = render(" \n\t\n   ");
    assert_eq!(rendered.outcome(), &Outcome::NoNodes);
    assert!(rendered.diagram().is_none());
}

#[test]
fn test_garbage_only_is_no_nodes() {
    let source = "this is not\na flow -- at all\n\"dangling";
    let rendered = render(source);

    assert_eq!(rendered.outcome(), &Outcome::NoNodes);
    let codes: Vec<_> = rendered.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E100, ErrorCode::E100, ErrorCode::E101, ErrorCode::E102]
    );
}

#[test]
fn test_disconnected_node_lands_on_trailing_level() {
    let source = r#"
        startEvent s "Start"
        endEvent e "End"
        task lonely "Forgotten"
        s --> e
    "#;
    let diagram = diagram_of(source);

    assert_eq!(diagram.node("lonely").unwrap().level(), 2);
    assert_eq!(codes(source), vec![ErrorCode::E301]);
}

#[test]
fn test_disconnected_nodes_ignore_declaration_order() {
    let forward = diagram_of("startEvent s \"S\"\ntask x \"X\"\ntask y \"Y\"\n");
    let swapped = diagram_of("startEvent s \"S\"\ntask y \"Y\"\ntask x \"X\"\n");

    for id in ["s", "x", "y"] {
        let a = forward.node(id).unwrap();
        let b = swapped.node(id).unwrap();
        assert_eq!(a.position(), b.position(), "{id} moved");
        assert_eq!(a.level(), b.level());
    }
    assert!(forward.node("x").unwrap().x() < forward.node("y").unwrap().x());
}

#[test]
fn test_missing_start_event_falls_back_to_first_node() {
    let source = "task a \"A\"\ntask b \"B\"\na --> b\n";
    let diagram = diagram_of(source);

    assert_eq!(diagram.node("a").unwrap().level(), 0);
    assert_eq!(diagram.node("b").unwrap().level(), 1);
    assert_eq!(codes(source), vec![ErrorCode::E300]);
}

#[test]
fn test_cycle_is_broken_by_first_discovery() {
    let source = r#"
        startEvent s "Start"
        task a "A"
        task b "B"
        s --> a
        a --> b
        b --> a
    "#;
    let diagram = diagram_of(source);

    assert_eq!(diagram.node("a").unwrap().level(), 1);
    assert_eq!(diagram.node("b").unwrap().level(), 2);
    assert_eq!(diagram.edges().len(), 3);
}

#[test]
fn test_duplicate_id_last_declaration_wins() {
    let source = r#"
        startEvent s "Start"
        task t "First"
        s --> t
        task t "Second" [actor: Bob]
    "#;
    let diagram = diagram_of(source);

    assert_eq!(diagram.nodes().len(), 2);
    let t = &diagram.nodes()[1];
    assert_eq!(t.node().label(), "Second");
    assert_eq!(t.node().actor(), Some("Bob"));
    assert_eq!(codes(source), vec![ErrorCode::E200]);
}

#[test]
fn test_diagnostics_are_ordered_by_stage() {
    let source = r#"
        task a "A"
        ???
        a --> ghost
        task orphan "O"
    "#;
    assert_eq!(
        codes(source),
        vec![
            ErrorCode::E100,
            ErrorCode::E201,
            ErrorCode::E300,
            ErrorCode::E301
        ]
    );
}

#[test]
fn test_curved_style_uses_three_point_paths() {
    let builder = DiagramBuilder::new(AppConfig::new(
        LayoutConfig::default().with_edge_style(EdgeStyle::Curved),
        StyleConfig::default(),
    ));
    let rendered = builder.layout("startEvent s \"S\"\ntask t \"T\"\ns -->|go| t\n");
    let edge = &rendered.diagram().unwrap().edges()[0];

    assert_eq!(edge.style(), EdgeStyle::Curved);
    assert_eq!(edge.path().len(), 3);
    let [start, control, end] = [edge.path()[0], edge.path()[1], edge.path()[2]];
    assert!(control.y() < (start.y() + end.y()) / 2.0);
}

#[test]
fn test_custom_spacing_is_respected() {
    let config = LayoutConfig::default()
        .with_min_spacing(240.0)
        .with_level_spacing(200.0);
    let builder = DiagramBuilder::new(AppConfig::new(config, StyleConfig::default()));
    let source = "startEvent s \"S\"\ntask a \"A\"\ntask b \"B\"\ns --> a\ns --> b\n";
    let rendered = builder.layout(source);
    let diagram = rendered.diagram().unwrap();

    let a = diagram.node("a").unwrap();
    let b = diagram.node("b").unwrap();
    assert!((b.x() - a.x()).abs() >= 240.0 - 1e-3);
    assert!((a.y() - diagram.node("s").unwrap().y() - 200.0).abs() < 1e-3);
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// A flow over `n0..nN` where `n0` is the only start event and every
    /// node is reachable from it.
    #[derive(Debug, Clone)]
    struct Flow {
        node_lines: Vec<String>,
        edge_lines: Vec<String>,
    }

    impl Flow {
        fn source(&self) -> String {
            let mut lines = self.node_lines.clone();
            lines.extend(self.edge_lines.iter().cloned());
            lines.join("\n")
        }
    }

    fn connected_flow() -> impl Strategy<Value = Flow> {
        (1usize..9).prop_flat_map(|n| {
            let kinds = prop::collection::vec(
                prop::sample::select(vec!["task", "gateway", "endEvent"]),
                n - 1,
            );
            let tree = prop::collection::vec(any::<prop::sample::Index>(), n - 1);
            let extra = prop::collection::vec((0..n, 0..n, any::<bool>()), 0..6);
            (kinds, tree, extra)
        })
        .prop_map(|(kinds, tree, extra)| {
            let mut node_lines = vec!["startEvent n0 \"Start\"".to_string()];
            node_lines.extend(
                kinds
                    .iter()
                    .enumerate()
                    .map(|(i, kind)| format!("{kind} n{} \"Node {}\"", i + 1, i + 1)),
            );

            let mut edge_lines: Vec<String> = tree
                .iter()
                .enumerate()
                .map(|(i, parent)| format!("n{} --> n{}", parent.index(i + 1), i + 1))
                .collect();
            edge_lines.extend(extra.into_iter().map(|(from, to, labeled)| {
                if labeled {
                    format!("n{from} -->|x{to}| n{to}")
                } else {
                    format!("n{from} --> n{to}")
                }
            }));

            Flow {
                node_lines,
                edge_lines,
            }
        })
    }

    fn check_spacing(diagram: &Diagram, min_spacing: f32) -> Result<(), TestCaseError> {
        let nodes = diagram.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                if a.level() == b.level() {
                    prop_assert!(
                        (a.x() - b.x()).abs() >= min_spacing - 1e-3,
                        "{} and {} are too close",
                        a.id(),
                        b.id()
                    );
                }
            }
        }
        Ok(())
    }

    fn check_containment(diagram: &Diagram) -> Result<(), TestCaseError> {
        let canvas = diagram.canvas_bounds();
        let node_bounds = diagram.nodes().iter().map(|n| n.bounds());
        let label_bounds = diagram.edges().iter().filter_map(|e| e.label_bounds());

        for bounds in node_bounds.chain(label_bounds) {
            prop_assert!(canvas.contains(&bounds), "{bounds:?} outside {canvas:?}");
        }
        Ok(())
    }

    fn check_invariants(flow: &Flow, style: EdgeStyle) -> Result<(), TestCaseError> {
        let config = LayoutConfig::default().with_edge_style(style);
        let builder = DiagramBuilder::new(AppConfig::new(config.clone(), StyleConfig::default()));
        let rendered = builder.layout(&flow.source());
        let diagram = rendered.diagram().expect("flow has nodes");

        prop_assert_eq!(diagram.nodes().len(), flow.node_lines.len());
        prop_assert_eq!(diagram.edges().len(), flow.edge_lines.len());
        check_spacing(diagram, config.min_spacing())?;
        check_containment(diagram)?;
        Ok(())
    }

    fn check_idempotent(source: &str) -> Result<(), TestCaseError> {
        prop_assert_eq!(render(source), render(source));
        Ok(())
    }

    fn check_permutation_invariant(flow: &Flow, shuffled: &[String]) -> Result<(), TestCaseError> {
        let original = diagram_of(&flow.source());
        let permuted = diagram_of(
            &Flow {
                node_lines: shuffled.to_vec(),
                edge_lines: flow.edge_lines.clone(),
            }
            .source(),
        );

        for node in original.nodes() {
            let moved = permuted.node(node.id().as_str()).expect("same node set");
            prop_assert_eq!(node.position(), moved.position(), "{} moved", node.id());
            prop_assert_eq!(node.level(), moved.level());
        }
        prop_assert_eq!(original.canvas(), permuted.canvas());
        Ok(())
    }

    proptest! {
        #[test]
        fn layout_invariants_hold(flow in connected_flow()) {
            check_invariants(&flow, EdgeStyle::Orthogonal)?;
        }

        #[test]
        fn layout_invariants_hold_curved(flow in connected_flow()) {
            check_invariants(&flow, EdgeStyle::Curved)?;
        }

        #[test]
        fn render_is_idempotent(flow in connected_flow()) {
            check_idempotent(&flow.source())?;
        }

        #[test]
        fn node_order_does_not_move_nodes(
            (flow, shuffled) in connected_flow().prop_flat_map(|flow| {
                let lines = Just(flow.node_lines.clone()).prop_shuffle();
                (Just(flow), lines)
            })
        ) {
            check_permutation_invariant(&flow, &shuffled)?;
        }

        #[test]
        fn node_order_does_not_move_unreachable_nodes(
            (flow, shuffled) in (connected_flow(), 2usize..5).prop_flat_map(|(mut flow, islands)| {
                flow.node_lines
                    .extend((0..islands).map(|i| format!("task island{i} \"Island {i}\"")));
                let lines = Just(flow.node_lines.clone()).prop_shuffle();
                (Just(flow), lines)
            })
        ) {
            check_permutation_invariant(&flow, &shuffled)?;
        }

        #[test]
        fn arbitrary_text_never_panics(source in "\\PC{0,200}") {
            let rendered = render(&source);
            if let Some(diagram) = rendered.diagram() {
                check_containment(diagram)?;
            }
        }
    }
}
