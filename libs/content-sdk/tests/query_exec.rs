//! Execution contract of bound content queries against a fake repository.

use async_trait::async_trait;
use content_query::{ContentEntity, Error};
use content_sdk::prelude::*;
use content_sdk::{CollectionResponse, FetchRequest, ReferenceSearch};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fake repository failure: {0}")]
struct FakeError(String);

#[derive(Default)]
struct FakeRepository {
    requests: Mutex<Vec<FetchRequest>>,
    response: Option<CollectionResponse>,
}

impl FakeRepository {
    fn returning(response: CollectionResponse) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Some(response),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Repository for FakeRepository {
    type Error = FakeError;

    async fn fetch(&self, request: FetchRequest) -> Result<CollectionResponse, Self::Error> {
        self.requests.lock().unwrap().push(request);
        self.response
            .clone()
            .ok_or_else(|| FakeError("query syntax error".to_owned()))
    }
}

struct Workspace {
    path: Option<String>,
}

impl ContentEntity for Workspace {
    fn id(&self) -> Option<u64> {
        Some(3)
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

fn tasks() -> CollectionResponse {
    CollectionResponse {
        total_count: 42,
        items: vec![
            json!({ "Id": 2, "DisplayName": "Zebra" }),
            json!({ "Id": 1, "DisplayName": "Alpaca" }),
        ],
    }
}

#[tokio::test]
async fn test_exec_issues_one_request_per_call() {
    let repository = FakeRepository::returning(tasks());
    let query = Query::new(
        |q| q.type_is("Task").top(5),
        Arc::clone(&repository),
        "/Root/Sites",
        Some(ODataParams::new().with_top(5)),
    )
    .unwrap();

    let first = query.exec().await.unwrap();
    let second = query.exec().await.unwrap();

    assert_eq!(first, second);
    let requests = repository.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0],
        FetchRequest {
            path: "/Root/Sites".to_owned(),
            query: "TypeIs:Task .TOP:5".to_owned(),
            params: Some(ODataParams::new().with_top(5)),
        }
    );
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_results_keep_server_order_and_count() {
    let repository = FakeRepository::returning(tasks());
    let query = Query::new(|q| q.type_is("Task"), repository, "/Root", None)
        .unwrap()
        .map_results(|raw| raw["DisplayName"].as_str().unwrap_or_default().to_owned());

    let result = query.exec().await.unwrap();

    assert_eq!(result.count, 42);
    assert_eq!(result.results, ["Zebra", "Alpaca"]);
}

#[tokio::test]
async fn test_transport_error_is_returned_unchanged() {
    let repository = FakeRepository::failing();
    let query = Query::new(|q| q.term("broken ("), Arc::clone(&repository), "/Root", None).unwrap();

    let err = query.exec().await.unwrap_err();

    assert_eq!(err, FakeError("query syntax error".to_owned()));
    assert_eq!(repository.requests().len(), 1);
}

#[tokio::test]
async fn test_concurrent_execs_are_independent() {
    let repository = FakeRepository::returning(tasks());
    let query = Query::new(|q| q.type_is("Task"), Arc::clone(&repository), "/Root", None).unwrap();

    let (a, b) = tokio::join!(query.exec(), query.exec());

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(repository.requests().len(), 2);
}

#[test]
fn test_building_and_rendering_never_fetch() {
    let repository = FakeRepository::returning(tasks());
    let query = Query::new(
        |q| q.type_is("Task").and().equals("DisplayName", "Unicorn"),
        Arc::clone(&repository),
        "/Root",
        None,
    )
    .unwrap();

    assert_eq!(query.to_string(), "TypeIs:Task AND DisplayName:'Unicorn'");
    assert_eq!(query.to_string(), query.request().query);
    assert!(repository.requests().is_empty());
}

#[test]
fn test_empty_path_fails_before_building() {
    let repository = FakeRepository::returning(tasks());
    let mut built = false;

    let result = Query::new(
        |q| {
            built = true;
            q.type_is("Task")
        },
        Arc::clone(&repository),
        "",
        None,
    );

    assert_eq!(result.unwrap_err(), Error::EmptyPath);
    assert!(!built);
    assert!(repository.requests().is_empty());
}

#[test]
fn test_empty_folder_fails_construction() {
    let repository = FakeRepository::returning(tasks());
    let result = Query::new(|q| q.in_folder(""), Arc::clone(&repository), "/Root", None);

    assert_eq!(result.unwrap_err(), Error::EmptyPath);
    assert!(repository.requests().is_empty());
}

#[test]
fn test_query_from_content() {
    let repository = FakeRepository::returning(tasks());
    let workspace = Workspace {
        path: Some("/Root/Sites/Default_Site/Workspace".to_owned()),
    };

    let query = Query::from_content(&workspace, |q| q.type_is("Task"), repository, None).unwrap();

    assert_eq!(query.path(), "/Root/Sites/Default_Site/Workspace");
}

#[test]
fn test_query_from_unsaved_content_fails() {
    let repository = FakeRepository::returning(tasks());
    let unsaved = Workspace { path: None };

    let result = Query::from_content(&unsaved, |q| q.type_is("Task"), repository, None);

    assert_eq!(result.unwrap_err(), Error::EmptyPath);
}

#[tokio::test]
async fn test_reference_search_query() {
    let repository = FakeRepository::returning(tasks());
    let query = ReferenceSearch::new("uni")
        .with_allowed_types(["Task"])
        .into_query(Arc::clone(&repository), &SdkConfig::default())
        .unwrap();

    query.exec().await.unwrap();

    let requests = repository.requests();
    assert_eq!(requests[0].path, "/Root");
    assert_eq!(
        requests[0].query,
        "_Text:'*uni*' AND (TypeIs:Task) .TOP:10 .SKIP:0"
    );
    assert_eq!(requests[0].params, Some(ODataParams::select_all()));
}
