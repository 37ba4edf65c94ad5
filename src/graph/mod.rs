//! Site graph module
//!
//! # Overview
//!
//! The crawl loop feeds pages and links into a [`GraphBuilder`]. Once the loop
//! exits, the builder is finalized into a read-only [`SiteGraph`], which is
//! classified and summarized exactly once.
//!
//! ```text
//! crawl loop
//!     ↓  GraphBuilder::add_page / add_edge
//! GraphBuilder (grows monotonically)
//!     ↓  GraphBuilder::finalize()
//! SiteGraph (frozen)
//!     ├─ classify()   → GraphLabel
//!     ├─ shape_tags() → Vec<ShapeTag>
//!     └─ stats()      → GraphStats
//! ```

mod builder;
mod classify;
mod model;
mod stats;

pub use builder::GraphBuilder;
pub use classify::{classify, classify_undirected, shape_tags, GraphLabel, ShapeTag};
pub use model::SiteGraph;
pub use stats::{stats, GraphStats};
