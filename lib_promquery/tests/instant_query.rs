//! # Instant Query Integration Tests
//!
//! Drives the public API end to end against a one-shot HTTP server bound to
//! `127.0.0.1:0`, so no real backend is needed.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use serde_json::json;

use lib_promquery::{MetricLabels, PromError, PromJob, QueryExecutor, TransportConfig};

/// Accepts one connection, answers with `payload`, and returns the raw request.
fn mock_backend(status_line: &'static str, payload: String) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let raw = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{}",
            status_line,
            payload.len(),
            payload
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        raw
    });

    (format!("http://127.0.0.1:{}", port), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

#[test]
fn matrix_result_is_normalized() {
    let payload = json!({
        "status": "success",
        "data": {
            "resultType": "matrix",
            "result": [
                {"metric": {"__name__": "up", "job": "j", "instance": "i"}, "values": [[1, "0"], [2, "1"]]},
                {"metric": {"__name__": "up"}, "values": "broken"}
            ]
        }
    })
    .to_string();
    let (endpoint, server) = mock_backend("200 OK", payload);

    let executor = QueryExecutor::new(TransportConfig::default()).unwrap();
    let job = PromJob::new(&endpoint, "up[1m]", "POST").unwrap();
    let records = executor.execute(job).unwrap();
    server.join().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].metric,
        MetricLabels {
            name: "up".into(),
            job: "j".into(),
            instance: "i".into(),
        }
    );
    assert_eq!(records[0].data, vec![json!([1, "0"]), json!([2, "1"])]);

    let samples = records[0].samples();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].timestamp, 2.0);
    assert_eq!(samples[1].value, 1.0);
}

#[test]
fn query_then_data_set_matches_execute() {
    let payload = json!({
        "status": "success",
        "data": {"resultType": "string", "result": [1435781451.781, "hello"]}
    })
    .to_string();
    let (endpoint, server) = mock_backend("200 OK", payload);

    let executor = QueryExecutor::new(TransportConfig::default()).unwrap();
    let job = PromJob::new(&endpoint, "\"hello\"", "POST").unwrap();
    let envelope = executor.query(job).unwrap();
    server.join().unwrap();

    assert!(envelope.is_success());
    let records = envelope.data_set();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].data, vec![json!(1435781451.781)]);
    assert_eq!(records[1].data, vec![json!("hello")]);
    assert!(records.iter().all(|r| r.metric.is_empty()));
}

#[test]
fn upstream_error_message_is_verbatim() {
    let payload = json!({"status": "error", "errorType": "bad_data", "error": "invalid query"}).to_string();
    let (endpoint, server) = mock_backend("400 Bad Request", payload);

    let executor = QueryExecutor::new(TransportConfig::default()).unwrap();
    let job = PromJob::new(&endpoint, "up{", "POST").unwrap();
    let err = executor.execute(job).unwrap_err();
    server.join().unwrap();

    match &err {
        PromError::Upstream { error_type, error } => {
            assert_eq!(error_type, "bad_data");
            assert_eq!(error, "invalid query");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
    assert_eq!(err.to_string(), "bad_data: invalid query");
}

#[test]
fn disallowed_method_never_reaches_the_network() {
    // Nothing listens here; a network attempt would surface as a transport error.
    let err = PromJob::new("http://127.0.0.1:1", "up", "HEAD").unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, PromError::MethodNotAllowed(ref m) if m == "HEAD"));
}

#[test]
fn executor_is_shared_across_threads() {
    let executor = Arc::new(QueryExecutor::new(TransportConfig::default()).unwrap());

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let payload = json!({
                "status": "success",
                "data": {"resultType": "vector", "result": [
                    {"metric": {"job": format!("job-{i}")}, "value": [i, i.to_string()]}
                ]}
            })
            .to_string();
            let (endpoint, server) = mock_backend("200 OK", payload);
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                let job = PromJob::new(&endpoint, "up", "GET").unwrap();
                let records = executor.execute(job).unwrap();
                server.join().unwrap();
                (i, records)
            })
        })
        .collect();

    for worker in workers {
        let (i, records) = worker.join().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric.job, format!("job-{i}"));
        assert_eq!(records[0].data, vec![json!([i, i.to_string()])]);
    }
}
