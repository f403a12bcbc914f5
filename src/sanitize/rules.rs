//! Fields stripped from exported manifests

/// Field names to remove, grouped by the section they live in
#[derive(Debug, Clone, Copy)]
pub struct CleanRuleSet {
    /// Keys removed from `metadata`
    pub metadata: &'static [&'static str],
    /// Keys removed from `metadata.annotations`
    pub annotations: &'static [&'static str],
    /// Keys removed from `spec`
    pub spec: &'static [&'static str],
    /// Keys removed from every entry of `spec.ports`
    pub port: &'static [&'static str],
}

/// Server-assigned and runtime fields
pub const DEFAULT_RULES: CleanRuleSet = CleanRuleSet {
    metadata: &[
        "creationTimestamp",
        "deletionGracePeriodSeconds",
        "deletionTimestamp",
        "generation",
        "managedFields",
        "resourceVersion",
        "selfLink",
        "uid",
        "finalizers",
        "ownerReferences",
    ],
    annotations: &[
        "kubectl.kubernetes.io/last-applied-configuration",
        "olm.operatorNamespace",
        "olm.operatorGroup",
        "volume.kubernetes.io/selected-node",
        "pv.kubernetes.io/bind-completed",
        "pv.kubernetes.io/bound-by-controller",
        "volume.beta.kubernetes.io/storage-provisioner",
        "volume.kubernetes.io/storage-provisioner",
    ],
    spec: &[
        "clusterIP",
        "clusterIPs",
        "ipFamilies",
        "ipFamilyPolicy",
        "sessionAffinityConfig",
        "externalIPs",
        "externalTrafficPolicy",
        "healthCheckNodePort",
        "loadBalancerIP",
        "loadBalancerSourceRanges",
        "publishNotReadyAddresses",
        "volumeName",
    ],
    port: &["nodePort"],
};

impl Default for CleanRuleSet {
    fn default() -> Self {
        DEFAULT_RULES
    }
}
