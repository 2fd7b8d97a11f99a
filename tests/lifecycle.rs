//! Server lifecycle, timeout and concurrency tests.

use std::time::Duration;

use httpbin_worker::ServiceConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = common::start_server(ServiceConfig::default()).await;

    let res = common::client().get(server.url("/json")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = server.url(&format!("/get?n={i}"));
        tasks.push(tokio::spawn(async move {
            let json: serde_json::Value = client.get(url).send().await.unwrap().json().await.unwrap();
            (i, json)
        }));
    }

    for task in tasks {
        let (i, json) = task.await.unwrap();
        assert_eq!(json["args"]["n"], i.to_string());
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;
    let server = common::start_server(config).await;

    // Announce 100 bytes of body but send only a few, then stall.
    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(
            b"POST /post HTTP/1.1\r\n\
              Host: localhost\r\n\
              Content-Type: text/plain\r\n\
              Content-Length: 100\r\n\r\n\
              partial",
        )
        .await
        .unwrap();

    let mut received = Vec::new();
    let mut buf = [0u8; 1024];
    tokio::time::timeout(Duration::from_secs(5), async {
        while !received.windows(2).any(|w| w == b"\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
    })
    .await
    .expect("no response before the client gave up");

    let status_line = String::from_utf8_lossy(&received);
    assert!(
        status_line.starts_with("HTTP/1.1 408"),
        "unexpected response: {status_line}"
    );

    server.shutdown.trigger();
}
