//! Concurrent traffic through the gate.

use std::time::{Duration, Instant};

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_concurrent_mixed_traffic() {
    let backend = common::start_mock_backend("200 OK").await;
    let proxy = common::start_proxy(&backend.url(), "bubbles", "bubbles").await;

    let concurrency: usize = 20;
    let requests_per_task: usize = 10;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let start = Instant::now();

    let mut handles = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let url = proxy.url(&format!("/task/{}", task));
        handles.push(tokio::spawn(async move {
            let mut ok: usize = 0;
            let mut rejected: usize = 0;
            for i in 0..requests_per_task {
                let password = if i % 2 == 0 { "bubbles" } else { "wrong" };
                let res = client
                    .get(&url)
                    .basic_auth("bubbles", Some(password))
                    .send()
                    .await
                    .unwrap();
                match res.status() {
                    StatusCode::OK => ok += 1,
                    StatusCode::UNAUTHORIZED => rejected += 1,
                    other => panic!("unexpected status {}", other),
                }
            }
            (ok, rejected)
        }));
    }

    let mut total_ok = 0;
    let mut total_rejected = 0;
    for handle in handles {
        let (ok, rejected) = handle.await.unwrap();
        total_ok += ok;
        total_rejected += rejected;
    }

    let elapsed = start.elapsed();
    println!(
        "{} requests in {:?} ({:.0} req/s)",
        concurrency * requests_per_task,
        elapsed,
        (concurrency * requests_per_task) as f64 / elapsed.as_secs_f64()
    );

    assert_eq!(total_ok, concurrency * requests_per_task / 2);
    assert_eq!(total_rejected, concurrency * requests_per_task / 2);

    let seen = backend.requests();
    assert_eq!(seen.len(), total_ok);
    assert!(seen
        .iter()
        .all(|r| r.header_values("x-http-user") == vec!["bubbles"]));
    assert!(elapsed < Duration::from_secs(30));
}
