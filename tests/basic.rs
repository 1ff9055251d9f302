use std::fs;

use anyhow::Result;
use restcli::collection::CollectionStore;
use restcli::env::{substitute, EnvMap, EnvironmentStore};
use restcli::executor::{execute, ExecutionResult};
use restcli::history::{HistoryEntry, HistoryLog, ResponseSummary, HISTORY_LIMIT};
use restcli::request::{Auth, BodySource, Method, Request, RequestInput};
use restcli::store::LoadMode;
use tempfile::tempdir;

#[test]
fn substitute_replaces_known_tokens_only() {
    let env = EnvMap::from([
        ("HOST".to_string(), "api.example.com".to_string()),
        ("ID".to_string(), "42".to_string()),
    ]);

    assert_eq!(
        substitute("https://{{HOST}}/users/{{ID}}?q={{MISSING}}", &env),
        "https://api.example.com/users/42?q={{MISSING}}"
    );
}

#[test]
fn environment_persists_across_store_instances() -> Result<()> {
    let temp = tempdir()?;
    EnvironmentStore::new(temp.path(), LoadMode::Lenient).set("TOKEN", "abc")?;

    let reopened = EnvironmentStore::new(temp.path(), LoadMode::Lenient);
    assert_eq!(reopened.get("TOKEN")?, Some("abc".to_string()));
    Ok(())
}

#[test]
fn resolved_request_uses_stored_environment() -> Result<()> {
    let temp = tempdir()?;
    let body_path = temp.path().join("body.json");
    fs::write(&body_path, r#"{"name": "{{NAME}}"}"#)?;

    let env = EnvMap::from([
        ("NAME".to_string(), "John".to_string()),
        ("TOKEN".to_string(), "secret".to_string()),
    ]);
    let mut input = RequestInput::new(Method::Post, "https://example.com/users");
    input.body = Some(BodySource::File(body_path));
    input.auth = Some(Auth::Bearer("{{TOKEN}}".to_string()));

    let request = input.resolve(&env)?;
    assert_eq!(request.body.as_deref(), Some(r#"{"name": "John"}"#));
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some("Bearer secret")
    );
    Ok(())
}

#[test]
fn history_keeps_only_the_most_recent_entries() -> Result<()> {
    let temp = tempdir()?;
    let log = HistoryLog::new(temp.path(), LoadMode::Lenient);

    for i in 0..HISTORY_LIMIT + 20 {
        let request = Request::new(Method::Get, format!("https://example.com/{i}"));
        log.append(HistoryEntry::new(&request, ResponseSummary::default()))?;
    }

    let entries = log.entries()?;
    assert_eq!(entries.len(), HISTORY_LIMIT);
    assert_eq!(entries[0].url, "https://example.com/20");
    assert_eq!(
        log.get_by_recency(1)?.url,
        format!("https://example.com/{}", HISTORY_LIMIT + 19)
    );
    Ok(())
}

#[test]
fn collection_round_trips_last_history_entry() -> Result<()> {
    let temp = tempdir()?;
    let log = HistoryLog::new(temp.path(), LoadMode::Lenient);
    let collections = CollectionStore::new(temp.path(), LoadMode::Lenient);

    let mut request = Request::new(Method::Patch, "https://example.com/items/7");
    request
        .headers
        .insert("Content-Type".to_string(), "application/json".to_string());
    request.body = Some(r#"{"done":true}"#.to_string());
    log.append(HistoryEntry::new(&request, ResponseSummary::default()))?;

    collections.save_last("finish-item", &log)?;
    let loaded = collections.load("finish-item")?;
    let loaded = loaded.map(|collection| collection.to_request(request.timeout_secs));
    assert_eq!(loaded, Some(request));

    let summaries = collections.list()?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "finish-item");
    assert_eq!(summaries[0].method, "PATCH");
    Ok(())
}

#[tokio::test]
async fn executor_reports_error_statuses_as_completed() -> Result<()> {
    let server = httpmock::MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/missing");
            then.status(404).body("not here");
        })
        .await;

    let result = execute(&Request::new(Method::Get, server.url("/missing"))).await;
    match result {
        ExecutionResult::Completed(response) => {
            assert_eq!(response.status, 404);
            assert_eq!(response.body, "not here");
            assert_eq!(response.size_bytes, 8);
        }
        other => panic!("expected completed response, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn executor_reports_unreachable_hosts_as_transport_failures() -> Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let result = execute(&Request::new(Method::Get, format!("http://127.0.0.1:{port}/"))).await;
    assert!(result.is_transport_failure());
    assert!(ResponseSummary::from(&result).status.is_none());
    Ok(())
}
