//! In-memory ResourceGraph implementation.
//!
//! Nodes live in an insertion-ordered map and edges in forward/reverse
//! adjacency sets, so the whole graph is a plain owned value that can be
//! cloned and handed to a simulator without shared state.

mod cloning;
mod construction;
mod graph;
mod mutations;
mod queries;
mod serialization;
mod traversal;

pub use graph::ResourceGraph;
pub use serialization::{EdgeSnapshot, GraphSnapshot};

// These modules only add impl blocks to ResourceGraph
#[allow(unused_imports)]
use cloning::*;
#[allow(unused_imports)]
use construction::*;
#[allow(unused_imports)]
use mutations::*;
#[allow(unused_imports)]
use queries::*;
#[allow(unused_imports)]
use traversal::*;
