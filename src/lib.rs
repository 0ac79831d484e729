//! Drill-down org-chart columns (drillchart)
//!
//! Renders a hierarchical org-chart as a row of columns. Clicking a card
//! drills one level deeper while the ancestors stay visible, and orthogonal
//! connectors tie every anchor to its children.
//!
//! Pure core: [`navigation`], [`columns`], [`router`], [`geometry`].
//! Impure shell: [`source`], [`render`], [`logging`], the binary.
//! [`redraw`] and [`chart`] sequence the two.

pub mod chart;
pub mod columns;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod redraw;
pub mod render;
pub mod router;
pub mod source;

// Re-export pipeline glue used by the binary
pub mod integration;
