//! Acceptance tests: seeding, drilling, compaction and connector scenarios.
//!
//! Each test drives the public API the way a host UI would: supply a root,
//! click cards, redraw against a measurement provider, inspect the output.

use drillchart::columns::{resolve_columns, Column};
use drillchart::geometry::{Bounds, ChildPoint, Point, Segment};
use drillchart::layout::GridLayout;
use drillchart::model::{Node, NodeId, NodeRef, RouteSkip};
use drillchart::navigation::{seed, NavigationController};
use drillchart::redraw::{MeasurementProvider, RedrawSynchronizer, RenderSink};
use drillchart::router::{route_connectors, ConnectorRoutes, ForkDirection};
use std::sync::Arc;

// ===== Test Helpers =====

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("valid node id")
}

fn person(raw: &str) -> Node {
    Node::new(id(raw), raw)
}

/// ceo ─┬─ cto ── dev
///      └─ cfo
fn org() -> NodeRef {
    Node::new(id("ceo"), "Carol")
        .with_children([
            person("cto").with_children([person("dev")]),
            person("cfo"),
        ])
        .into_ref()
}

fn path_ids(nav: &NavigationController) -> Vec<String> {
    nav.path()
        .map(|p| p.ids().map(|i| i.as_str().to_string()).collect())
        .unwrap_or_default()
}

#[derive(Default)]
struct Recorder {
    drawn: Vec<(usize, ConnectorRoutes)>,
}

impl RenderSink for Recorder {
    fn render_columns(&mut self, _columns: &[Column<'_>]) {}

    fn clear_connectors(&mut self) {
        self.drawn.clear();
    }

    fn draw_connectors(&mut self, boundary: usize, routes: &ConnectorRoutes) {
        self.drawn.push((boundary, routes.clone()));
    }
}

/// Wraps the grid layout but hides one node.
struct Hiding {
    inner: GridLayout,
    column: usize,
    node: NodeId,
}

impl MeasurementProvider for Hiding {
    fn settle(&mut self, columns: &[Column<'_>]) {
        self.inner.settle(columns);
    }

    fn measure(&self, column: usize, node: &NodeId) -> Option<Bounds> {
        if column == self.column && node == &self.node {
            return None;
        }
        self.inner.measure(column, node)
    }
}

// ===== Seeding =====

#[test]
fn ordinary_root_seeds_root_twice() {
    let root = org();
    let path = seed(Some(Arc::clone(&root))).expect("root yields a path");

    assert_eq!(path.len(), 2);
    assert!(Arc::ptr_eq(path.root(), &root));
    assert!(Arc::ptr_eq(path.last(), &root));

    let cols = resolve_columns(&path);
    assert_eq!(cols[0].nodes.len(), 1);
    assert_eq!(cols[0].nodes[0].id(), &id("ceo"));
    assert_eq!(cols[1].nodes.len(), 2);
    assert_eq!(cols[1].active, None);
}

#[test]
fn synthetic_root_seeds_first_expandable_child() {
    let root = Node::synthetic_root([
        person("board"),
        person("ceo")
            .with_total_children(1)
            .with_children([person("cto")]),
        person("coo").with_total_children(4),
    ])
    .into_ref();

    let nav = NavigationController::with_root(root);
    assert_eq!(path_ids(&nav), vec!["synthetic-root", "ceo"]);

    let cols = nav.columns();
    let column_zero: Vec<&str> = cols[0].nodes.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(column_zero, vec!["board", "ceo", "coo"]);
    assert_eq!(cols[0].active, Some(&id("ceo")));
}

#[test]
fn synthetic_root_without_expandable_children_seeds_alone() {
    let root = Node::synthetic_root([person("a"), person("b")]).into_ref();
    let nav = NavigationController::with_root(root);
    assert_eq!(path_ids(&nav), vec!["synthetic-root"]);
    assert_eq!(nav.columns().len(), 1);
}

#[test]
fn no_root_means_no_columns() {
    assert!(seed(None).is_none());
    assert!(NavigationController::new().columns().is_empty());
}

// ===== Drilling =====

#[test]
fn drill_truncates_and_appends() {
    let root = org();
    let cto = Arc::clone(&root.children()[0]);
    let cfo = Arc::clone(&root.children()[1]);
    let dev = Arc::clone(&cto.children()[0]);
    let mut nav = NavigationController::with_root(Arc::clone(&root));

    nav.drill(Arc::clone(&cto), 1).unwrap();
    nav.drill(dev, 2).unwrap();
    assert_eq!(path_ids(&nav), vec!["ceo", "ceo", "cto", "dev"]);

    // Clicking a sibling higher up discards everything below it.
    nav.drill(cfo, 1).unwrap();
    assert_eq!(path_ids(&nav), vec!["ceo", "ceo", "cfo"]);
}

#[test]
fn reclicking_active_node_is_idempotent() {
    let root = org();
    let cto = Arc::clone(&root.children()[0]);
    let mut nav = NavigationController::with_root(Arc::clone(&root));

    nav.drill(Arc::clone(&cto), 1).unwrap();
    let before = nav.path().cloned();
    nav.drill(cto, 1).unwrap();
    assert_eq!(nav.path().cloned(), before);
}

#[test]
fn drill_outside_rendered_columns_is_an_error() {
    let root = org();
    let mut nav = NavigationController::with_root(Arc::clone(&root));
    let err = nav.drill(root, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid column 2: anchor path has 2 columns"
    );
    assert_eq!(path_ids(&nav), vec!["ceo", "ceo"]);
}

// ===== Compaction =====

#[test]
fn branch_anchor_keeps_last_two_columns_wide() {
    let root = org();
    let mut nav = NavigationController::with_root(Arc::clone(&root));
    nav.drill(Arc::clone(&root.children()[0]), 1).unwrap();

    let flags: Vec<bool> = nav.columns().iter().map(|c| c.is_compact).collect();
    assert_eq!(flags, vec![true, false, false]);
}

#[test]
fn leaf_anchor_keeps_last_three_columns_wide() {
    let root = org();
    let cto = Arc::clone(&root.children()[0]);
    let mut nav = NavigationController::with_root(Arc::clone(&root));
    nav.drill(Arc::clone(&cto), 1).unwrap();
    nav.drill(Arc::clone(&cto.children()[0]), 2).unwrap();

    let flags: Vec<bool> = nav.columns().iter().map(|c| c.is_compact).collect();
    assert_eq!(flags, vec![true, false, false, false]);
}

#[test]
fn short_paths_have_no_compact_columns() {
    let nav = NavigationController::with_root(org());
    assert!(nav.columns().iter().all(|c| !c.is_compact));
}

// ===== Routing scenarios =====

#[test]
fn active_child_below_parent_gets_downward_fork() {
    let children = vec![
        ChildPoint::new(200.0, 20.0, id("a")),
        ChildPoint::new(200.0, 80.0, id("b")),
    ];
    let routes = route_connectors(Point::new(100.0, 50.0), &children, Some(&id("b")), 0.0)
        .expect("two children route");

    assert_eq!(routes.rail.x, 189.0);
    assert_eq!((routes.rail.top, routes.rail.bottom), (20.0, 80.0));

    let active = routes.active.expect("b is among the children");
    assert_eq!(active.direction, ForkDirection::Down);
    assert_eq!(active.route.end_point(), Some(Point::new(200.0, 80.0)));
    assert!(!active.route.has_arcs());
    assert!(!routes.passive.has_arcs());
}

#[test]
fn single_child_on_parent_row_is_one_straight_segment() {
    let children = vec![ChildPoint::new(200.0, 50.0, id("only"))];
    let routes = route_connectors(Point::new(100.0, 50.0), &children, None, 8.0).unwrap();

    assert_eq!(
        routes.passive.segments(),
        &[
            Segment::MoveTo(Point::new(100.0, 50.0)),
            Segment::LineTo(Point::new(200.0, 50.0)),
        ]
    );
}

#[test]
fn active_id_outside_children_draws_no_active_route() {
    let children = vec![ChildPoint::new(200.0, 20.0, id("a"))];
    let routes =
        route_connectors(Point::new(100.0, 50.0), &children, Some(&id("zzz")), 0.0).unwrap();
    assert!(routes.active.is_none());
}

#[test]
fn empty_children_route_nothing() {
    assert_eq!(
        route_connectors(Point::new(0.0, 0.0), &[], None, 0.0),
        Err(RouteSkip::EmptyChildSet)
    );
}

// ===== Redraw with missing measurements =====

#[test]
fn missing_parent_measurement_skips_only_its_boundary() {
    let root = org();
    let mut nav = NavigationController::with_root(Arc::clone(&root));
    nav.drill(Arc::clone(&root.children()[0]), 1).unwrap();

    let mut provider = Hiding {
        inner: GridLayout::new(600.0),
        column: 0,
        node: id("ceo"),
    };
    let mut sink = Recorder::default();
    let report = RedrawSynchronizer::new(0.0)
        .flush(&nav, &mut provider, &mut sink)
        .expect("first flush always runs");

    assert_eq!(report.drawn, vec![2]);
    assert_eq!(
        report.skipped,
        vec![(
            1,
            RouteSkip::MissingMeasurement {
                column: 0,
                node: id("ceo"),
            }
        )]
    );
    assert_eq!(sink.drawn.len(), 1);
    assert_eq!(sink.drawn[0].0, 2);
}

#[test]
fn redraw_after_drill_routes_against_new_path() {
    let root = org();
    let mut nav = NavigationController::with_root(Arc::clone(&root));
    let mut layout = GridLayout::new(600.0);
    let mut sink = Recorder::default();
    let mut sync = RedrawSynchronizer::new(0.0);
    sync.flush(&nav, &mut layout, &mut sink);
    assert!(sink.drawn[0].1.active.is_none());

    nav.drill(Arc::clone(&root.children()[1]), 1).unwrap();
    sync.invalidate(drillchart::redraw::Invalidation::PathChanged);
    sync.flush(&nav, &mut layout, &mut sink);

    let active = sink.drawn[0].1.active.as_ref().expect("cfo now active");
    assert_eq!(active.target, id("cfo"));
    assert_eq!(active.direction, ForkDirection::Down);
}
