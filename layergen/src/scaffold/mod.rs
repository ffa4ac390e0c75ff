//! Resource scaffold generator implementation
//!
//! Turns one resource name into a route, controller, service, repository and
//! integration test, and splices the route into the router aggregator.

pub mod generator;
pub mod naming;
pub mod plan;
pub mod splice;

pub use generator::{GeneratedFile, Layer, ScaffoldGenerator};
pub use naming::ResourceName;
pub use plan::{AggregatorEdit, OverwritePolicy, ScaffoldPlan, ScaffoldReport};
pub use splice::AggregatorSplice;
