//! Ingresses and OpenShift Routes in front of Services

use crate::models::object::{array_at, str_at};
use crate::models::{ResourceKind, ResourceRef};
use crate::snapshot::Snapshot;
use std::collections::BTreeSet;

/// Ingresses and Routes whose backend is one of `service_names`
///
/// Ingresses are matched on `spec.rules[].http.paths[].backend.service.name`
/// and listed before Routes, which are matched on `spec.to.name`. The legacy
/// `backend.serviceName` field is not read.
pub fn match_routes(service_names: &[String], snapshot: &Snapshot) -> Vec<ResourceRef> {
    if service_names.is_empty() {
        return Vec::new();
    }
    let wanted: BTreeSet<&str> = service_names.iter().map(String::as_str).collect();
    let targets = |name: Option<&str>| name.is_some_and(|name| wanted.contains(name));

    let ingresses = snapshot
        .objects(ResourceKind::Ingress)
        .filter(|(_, ingress)| {
            array_at(ingress, "/spec/rules").iter().any(|rule| {
                array_at(rule, "/http/paths")
                    .iter()
                    .any(|path| targets(str_at(path, "/backend/service/name")))
            })
        })
        .map(|(name, _)| ResourceRef::new(ResourceKind::Ingress, name));

    let routes = snapshot
        .objects(ResourceKind::Route)
        .filter(|(_, route)| targets(str_at(route, "/spec/to/name")))
        .map(|(name, _)| ResourceRef::new(ResourceKind::Route, name));

    ingresses.chain(routes).collect()
}
