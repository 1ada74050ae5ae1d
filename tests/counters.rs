//! Counter increments over HTTP, serial and concurrent.

use futures_util::future::join_all;
use serde_json::Value;

mod common;

async fn fetch(server: &common::TestServer, id: i64) -> Value {
    server
        .client
        .get(server.url(&format!("/api/matches/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_each_counter_increments_by_one() {
    let server = common::spawn_server().await;
    let id = server.create("Sevilla", "Betis", "2025-04-01").await["id"]
        .as_i64()
        .unwrap();

    let cases = [
        ("goals", "goals", "Goal registered"),
        ("yellowcards", "yellowCards", "Yellow card registered"),
        ("redcards", "redCards", "Red card registered"),
    ];
    for (route, field, message) in cases {
        for n in 1..=3 {
            let res = server.patch(&format!("/api/matches/{id}/{route}")).await;
            assert_eq!(res.status(), 200);
            let body: Value = res.json().await.unwrap();
            assert_eq!(body["message"], message);
            assert_eq!(fetch(&server, id).await[field], n);
        }
    }

    // Counters are independent.
    let row = fetch(&server, id).await;
    assert_eq!(row["goals"], 3);
    assert_eq!(row["yellowCards"], 3);
    assert_eq!(row["redCards"], 3);
    assert_eq!(row["extraTime"], 0);
}

#[tokio::test]
async fn test_concurrent_goals_are_not_lost() {
    let server = common::spawn_server().await;
    let id = server.create("Milan", "Inter", "2025-02-01").await["id"]
        .as_i64()
        .unwrap();

    let path = format!("/api/matches/{id}/goals");
    let results = join_all((0..40).map(|_| server.patch(&path))).await;
    assert!(results.iter().all(|r| r.status() == 200));

    assert_eq!(fetch(&server, id).await["goals"], 40);
}

#[tokio::test]
async fn test_extra_time_stops_at_thirty() {
    let server = common::spawn_server().await;
    let created = server.create("Sevilla", "Betis", "2025-04-01").await;
    let id = created["id"].as_i64().unwrap();
    let path = format!("/api/matches/{id}/extratime");

    let mut last = Value::Null;
    for n in 1..=31 {
        let res = server.patch(&path).await;
        assert_eq!(res.status(), 200);
        last = res.json().await.unwrap();
        if n < 30 {
            assert_eq!(last["extraTime"], n);
            assert_eq!(last["message"], format!("Extra time increased to {n} minutes"));
        }
    }

    assert_eq!(last["extraTime"], 30);
    assert_eq!(last["message"], "Extra time reached the maximum of 30 minutes");
    assert_eq!(fetch(&server, id).await["extraTime"], 30);
}

#[tokio::test]
async fn test_concurrent_extra_time_respects_cap() {
    let server = common::spawn_server().await;
    let id = server.create("Porto", "Benfica", "2025-03-01").await["id"]
        .as_i64()
        .unwrap();

    let path = format!("/api/matches/{id}/extratime");
    let results = join_all((0..45).map(|_| server.patch(&path))).await;
    assert!(results.iter().all(|r| r.status() == 200));

    assert_eq!(fetch(&server, id).await["extraTime"], 30);
}
