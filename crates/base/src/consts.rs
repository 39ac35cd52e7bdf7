pub mod k8s {
    /// Group and version under which the duck types themselves are filed.
    pub mod duck {
        pub const GROUP: &str = "duck.podspecable.dev";
        pub const VERSION: &str = "v1alpha1";

        pub const WITH_POD_KIND: &str = "WithPod";
        pub const WITH_POD_LIST_KIND: &str = "WithPodList";
    }

    /// Workload kinds whose `spec.template` is a pod template.
    pub mod workloads {
        pub const APPS_GROUP: &str = "apps";
        pub const APPS_VERSION: &str = "v1";
        pub const BATCH_GROUP: &str = "batch";
        pub const BATCH_VERSION: &str = "v1";

        pub const DEPLOYMENT: &str = "Deployment";
        pub const REPLICA_SET: &str = "ReplicaSet";
        pub const DAEMON_SET: &str = "DaemonSet";
        pub const STATEFUL_SET: &str = "StatefulSet";
        pub const JOB: &str = "Job";
    }

    /// Suffix appended to a kind to name its list kind.
    pub const LIST_KIND_SUFFIX: &str = "List";
}

pub mod fixture {
    pub const LABEL_KEY: &str = "foo";
    pub const LABEL_VALUE: &str = "bar";
    pub const CONTAINER_NAME: &str = "container-name";
    pub const CONTAINER_IMAGE: &str = "container-image:latest";
}
