//! Per-workload closure construction
//!
//! A closure lists a workload followed by everything it needs, in
//! [`Category`] order. Each step only reads the snapshot, so closures for
//! different workloads are independent of each other.

use super::models::Category;
use super::rbac::resolve_rbac;
use super::references::extract_references;
use super::routes::match_routes;
use super::selectors::{match_network_policies, match_services};
use crate::models::object::str_at;
use crate::models::{ResourceKind, ResourceRef};
use crate::snapshot::Snapshot;
use serde_json::Value;

/// A workload and its resolved dependents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadClosure {
    members: Vec<ResourceRef>,
}

impl WorkloadClosure {
    fn new(workload: ResourceRef) -> Self {
        Self {
            members: vec![workload],
        }
    }

    /// Append a dependent unless it is outside the snapshot or already listed
    fn push(&mut self, snapshot: &Snapshot, resource: ResourceRef) {
        if !snapshot.contains_ref(&resource) {
            tracing::debug!("{} is not cached, leaving it out", resource);
            return;
        }
        if self.members.contains(&resource) {
            return;
        }
        self.members.push(resource);
    }

    /// The workload this closure was built for
    pub fn workload(&self) -> &ResourceRef {
        &self.members[0]
    }

    /// Workload first, then dependents in category order
    pub fn members(&self) -> &[ResourceRef] {
        &self.members
    }

    pub fn dependents(&self) -> &[ResourceRef] {
        &self.members[1..]
    }

    pub fn contains(&self, resource: &ResourceRef) -> bool {
        self.members.contains(resource)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members paired with their category
    pub fn categorized(&self) -> impl Iterator<Item = (Category, &ResourceRef)> {
        self.members.iter().map(|r| (Category::of(r.kind), r))
    }
}

/// HorizontalPodAutoscaler targeting the workload
///
/// Matches on `spec.scaleTargetRef.name` and a case-insensitive
/// `spec.scaleTargetRef.kind`. The first match in name order wins.
pub fn find_autoscaler(workload: &ResourceRef, snapshot: &Snapshot) -> Option<String> {
    snapshot
        .objects(ResourceKind::HorizontalPodAutoscaler)
        .find(|(_, hpa)| {
            str_at(hpa, "/spec/scaleTargetRef/name") == Some(workload.name.as_str())
                && str_at(hpa, "/spec/scaleTargetRef/kind")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case(workload.kind.as_str()))
        })
        .map(|(name, _)| name.to_string())
}

/// Resolve the closure of one workload
pub fn build_closure(snapshot: &Snapshot, workload: &ResourceRef, obj: &Value) -> WorkloadClosure {
    let mut closure = WorkloadClosure::new(workload.clone());

    let referenced = extract_references(obj, workload.kind, snapshot);
    for (kind, names) in referenced.in_category_order() {
        for name in names {
            closure.push(snapshot, ResourceRef::new(kind, name.as_str()));
        }
    }

    for service_account in &referenced.service_accounts {
        if !snapshot.contains(ResourceKind::ServiceAccount, service_account) {
            continue;
        }
        let rbac = resolve_rbac(service_account, snapshot);
        for (kind, names) in rbac.in_category_order() {
            for name in names {
                closure.push(snapshot, ResourceRef::new(kind, name.as_str()));
            }
        }
    }

    let services = match_services(obj, snapshot);
    for name in &services {
        closure.push(snapshot, ResourceRef::new(ResourceKind::Service, name.as_str()));
    }

    for route in match_routes(&services, snapshot) {
        closure.push(snapshot, route);
    }

    if let Some(hpa) = find_autoscaler(workload, snapshot) {
        closure.push(
            snapshot,
            ResourceRef::new(ResourceKind::HorizontalPodAutoscaler, hpa),
        );
    }

    for name in match_network_policies(obj, snapshot) {
        closure.push(snapshot, ResourceRef::new(ResourceKind::NetworkPolicy, name));
    }

    tracing::debug!(
        "Resolved {} with {} dependents",
        workload,
        closure.dependents().len()
    );
    closure
}

/// Closures for every workload in the snapshot, in processing order
pub fn build_all_closures(snapshot: &Snapshot) -> Vec<WorkloadClosure> {
    snapshot
        .workloads()
        .map(|(workload, obj)| build_closure(snapshot, &workload, obj))
        .collect()
}
