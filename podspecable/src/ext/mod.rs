//! Extensions to `kube` types for working with duck-typed workloads.

mod api_with_pod;

pub use self::api_with_pod::{ApiWithPodExt, workload_api};
