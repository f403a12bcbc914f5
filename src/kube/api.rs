use kube::core::{ApiResource, GroupVersionKind};

use crate::models::ResourceKind;

/// Build the dynamic `ApiResource` for a kind
pub fn api_resource(kind: ResourceKind) -> ApiResource {
    let gvk = GroupVersionKind::gvk(kind.api_group(), kind.api_version(), kind.as_str());
    ApiResource::from_gvk_with_plural(&gvk, kind.plural())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_group_api_version() {
        let ar = api_resource(ResourceKind::ConfigMap);
        assert_eq!(ar.api_version, "v1");
        assert_eq!(ar.plural, "configmaps");
        assert_eq!(ar.kind, "ConfigMap");
    }

    #[test]
    fn test_named_group_api_version() {
        let ar = api_resource(ResourceKind::HorizontalPodAutoscaler);
        assert_eq!(ar.group, "autoscaling");
        assert_eq!(ar.api_version, "autoscaling/v2");

        let route = api_resource(ResourceKind::Route);
        assert_eq!(route.api_version, "route.openshift.io/v1");
    }
}
