use std::collections::HashSet;

use kube::{Api, Client, api::ListParams};
use snafu::ResultExt;

use crate::{
    config::WorkloadKind,
    error::{self, Error},
    podspec::{WithPod, WithPodList},
};

/// Builds an API handle that reads `kind` resources as [`WithPod`], in
/// `namespace` or across all namespaces.
#[must_use]
pub fn workload_api(
    client: Client,
    kind: &WorkloadKind,
    namespace: Option<&str>,
) -> Api<WithPod> {
    let resource = kind.api_resource();
    match namespace {
        Some(namespace) => Api::namespaced_with(client, namespace, &resource),
        None => Api::all_with(client, &resource),
    }
}

pub trait ApiWithPodExt {
    /// Lists one page of resources, keeping the list metadata.
    async fn list_with_pods(&self, params: &ListParams) -> Result<WithPodList, Error>;

    /// Lists every resource, following continuation tokens until the server
    /// returns the last page.
    ///
    /// Stops with [`Error::RepeatedContinueToken`] if the server hands out a
    /// token it already returned.
    async fn list_all_with_pods(&self, params: &ListParams) -> Result<WithPodList, Error>;
}

impl ApiWithPodExt for Api<WithPod> {
    async fn list_with_pods(&self, params: &ListParams) -> Result<WithPodList, Error> {
        let resource_url = self.resource_url();
        let list = self.list(params).await.context(error::ListWorkloadsSnafu { resource_url })?;
        tracing::debug!("Listed {} resources from {resource_url}", list.items.len());
        Ok(WithPodList::from(list))
    }

    async fn list_all_with_pods(&self, params: &ListParams) -> Result<WithPodList, Error> {
        let mut list = self.list_with_pods(params).await?;
        let mut seen = HashSet::new();
        while let Some(token) = list.continue_token().map(ToString::to_string) {
            if !seen.insert(token.clone()) {
                let resource_url = self.resource_url();
                return error::RepeatedContinueTokenSnafu { resource_url, token }.fail();
            }
            let page = self.list_with_pods(&params.clone().continue_token(&token)).await?;
            list.append_page(page);
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use http::{Request, Response};
    use kube::client::Body;
    use serde_json::{Value, json};
    use tower_test::mock::{self, Handle};

    use super::*;

    type MockHandle = Handle<Request<Body>, Response<Body>>;

    const DEPLOYMENTS_PATH: &str = "/apis/apps/v1/namespaces/default/deployments";

    fn deployments() -> (Api<WithPod>, MockHandle) {
        let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(service, "default");
        let kind = WorkloadKind::new("apps", "v1", "Deployment");
        (workload_api(client, &kind, Some("default")), handle)
    }

    fn page(names: &[&str], continue_token: Option<&str>) -> Value {
        let items = names
            .iter()
            .map(|name| {
                json!({
                    "metadata": { "name": name },
                    "spec": {
                        "template": {
                            "spec": {
                                "containers": [{ "name": name, "image": format!("{name}:1") }],
                            },
                        },
                    },
                })
            })
            .collect::<Vec<_>>();
        let mut metadata = json!({ "resourceVersion": "42" });
        if let Some(token) = continue_token {
            metadata["continue"] = json!(token);
        }
        json!({
            "apiVersion": "apps/v1",
            "kind": "DeploymentList",
            "metadata": metadata,
            "items": items,
        })
    }

    /// Answers the next request with `body` and returns the request's path
    /// and query.
    async fn respond(handle: &mut MockHandle, body: &Value) -> String {
        let (request, send) = handle.next_request().await.expect("Should receive a request");
        let bytes = serde_json::to_vec(body).expect("Should encode the page");
        send.send_response(
            Response::builder().body(Body::from(bytes)).expect("Should build the response"),
        );
        request.uri().to_string()
    }

    fn names(list: &WithPodList) -> Vec<&str> {
        list.items.iter().filter_map(|item| item.metadata.name.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_workload_api_scope() {
        let (service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(service, "default");
        let kind = WorkloadKind::new("batch", "v1", "Job");

        let api = workload_api(client.clone(), &kind, Some("jobs"));
        assert_eq!(api.resource_url(), "/apis/batch/v1/namespaces/jobs/jobs");
        let api = workload_api(client, &kind, None);
        assert_eq!(api.resource_url(), "/apis/batch/v1/jobs");
    }

    #[tokio::test]
    async fn test_list_with_pods_keeps_list_metadata() {
        let (api, mut handle) = deployments();
        let server = tokio::spawn(async move {
            respond(&mut handle, &page(&["web", "db"], Some("page-2"))).await
        });

        let list = api.list_with_pods(&ListParams::default()).await.expect("Should list a page");

        let uri = server.await.expect("Server should finish");
        assert!(uri.starts_with(DEPLOYMENTS_PATH));
        assert_eq!(names(&list), vec!["web", "db"]);
        assert_eq!(list.items[1].template().images().collect::<Vec<_>>(), vec!["db:1"]);
        assert_eq!(list.continue_token(), Some("page-2"));
        assert_eq!(list.resource_version(), Some("42"));
    }

    #[tokio::test]
    async fn test_list_all_with_pods_follows_continue_tokens() {
        let (api, mut handle) = deployments();
        let server = tokio::spawn(async move {
            let first = respond(&mut handle, &page(&["a", "b"], Some("page-2"))).await;
            let second = respond(&mut handle, &page(&["c"], None)).await;
            (first, second)
        });

        let list =
            api.list_all_with_pods(&ListParams::default()).await.expect("Should list every page");

        let (first, second) = server.await.expect("Server should finish");
        assert!(!first.contains("continue="));
        assert!(second.contains("continue=page-2"));
        assert_eq!(names(&list), vec!["a", "b", "c"]);
        assert_eq!(list.continue_token(), None);
    }

    #[tokio::test]
    async fn test_list_all_with_pods_fails_on_a_broken_page() {
        let (api, mut handle) = deployments();
        let server = tokio::spawn(async move {
            drop(respond(&mut handle, &page(&["a"], Some("page-2"))).await);
            drop(respond(&mut handle, &page(&["b"], Some("page-3"))).await);
            let (request, send) = handle.next_request().await.expect("Should receive a request");
            send.send_error(std::io::Error::other("connection reset"));
            request.uri().to_string()
        });

        let err = api.list_all_with_pods(&ListParams::default()).await.unwrap_err();

        let third = server.await.expect("Server should finish");
        assert!(third.contains("continue=page-3"));
        assert!(matches!(
            err,
            Error::ListWorkloads { resource_url, .. } if resource_url == DEPLOYMENTS_PATH
        ));
    }

    #[tokio::test]
    async fn test_list_all_with_pods_stops_on_a_repeated_token() {
        let (api, mut handle) = deployments();
        let server = tokio::spawn(async move {
            drop(respond(&mut handle, &page(&["a"], Some("again"))).await);
            drop(respond(&mut handle, &page(&["b"], Some("again"))).await);
        });

        let err = api.list_all_with_pods(&ListParams::default()).await.unwrap_err();

        server.await.expect("Server should finish");
        assert!(matches!(
            err,
            Error::RepeatedContinueToken { resource_url, token }
                if resource_url == DEPLOYMENTS_PATH && token == "again"
        ));
    }
}
