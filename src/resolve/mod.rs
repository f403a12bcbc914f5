//! Relationship resolution over a [`Snapshot`](crate::snapshot::Snapshot)
//!
//! Every function here is pure over the snapshot: nothing touches the
//! cluster, and nothing mutates cached objects.

mod closure;
mod models;
mod rbac;
mod references;
mod routes;
mod selectors;

pub use closure::{WorkloadClosure, build_all_closures, build_closure, find_autoscaler};
pub use models::{Category, RbacResources, ReferencedResources};
pub use rbac::resolve_rbac;
pub use references::{extract_references, pod_spec};
pub use routes::match_routes;
pub use selectors::{match_network_policies, match_services, selector_matches};
