//! Duck-typed access to the pod template shared by Kubernetes workload kinds.
//!
//! Every resource that owns pods (`Deployment`, `ReplicaSet`, `DaemonSet`,
//! `StatefulSet`, `Job`, and custom resources built the same way) carries a
//! pod template under `spec.template`. [`WithPod`] decodes any of them and
//! exposes that template, keeping every other field so that the resource can
//! be written back unchanged.

pub mod codec;
pub mod config;
pub mod duck;
mod error;
pub mod ext;
pub mod podspec;

pub use self::{
    codec::Document,
    error::Error,
    podspec::{Container, PodSpec, PodSpecable, WithPod, WithPodList, WithPodSpec},
};
