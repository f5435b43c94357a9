use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use faultbench_service::{build_router, AppState, EventLog, FaultProfile, RecordingSink};
use faultbench_traffic::{
    AuthProvider, EndpointSpec, EndpointTable, GcloudAuthProvider, GeneratorConfig,
    StaticTokenProvider, TrafficError, TrafficGenerator,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_service(profile: FaultProfile) -> (String, AppState) {
    let state = AppState::new(
        profile,
        EventLog::new(Arc::new(RecordingSink::new())),
        "traffic-test",
        Some(21),
    );
    let url = serve(build_router(state.clone())).await;
    (url, state)
}

fn token() -> Arc<dyn AuthProvider> {
    Arc::new(StaticTokenProvider::new("test-token").unwrap())
}

fn fast_config(duration: Duration, endpoints: Vec<EndpointSpec>) -> GeneratorConfig {
    GeneratorConfig {
        duration,
        min_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        request_timeout: Duration::from_secs(2),
        probe_timeout: Duration::from_secs(1),
        endpoints: EndpointTable::new(endpoints).unwrap(),
        seed: Some(5),
        ..Default::default()
    }
}

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl Seen {
    fn record(&self, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.0.lock().unwrap().push((path.to_string(), auth));
    }

    fn all(&self) -> Vec<(String, Option<String>)> {
        self.0.lock().unwrap().clone()
    }
}

fn recording_stub(seen: Seen, health_status: StatusCode) -> Router {
    Router::new()
        .route(
            "/health",
            get(move |State(seen): State<Seen>, headers: HeaderMap| async move {
                seen.record("/health", &headers);
                health_status
            }),
        )
        .route(
            "/api/ok",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                seen.record("/api/ok", &headers);
                StatusCode::OK
            }),
        )
        .route(
            "/api/hold",
            get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                tokio::time::sleep(Duration::from_millis(500)).await;
                seen.record("/api/hold", &headers);
                StatusCode::OK
            }),
        )
        .with_state(seen)
}

#[tokio::test]
async fn zero_duration_session_sends_nothing() {
    let (url, state) = spawn_service(FaultProfile::default()).await;

    let generator = TrafficGenerator::new(url, token(), GeneratorConfig::with_duration_minutes(0));
    let report = generator.run().await.unwrap();

    assert_eq!(report.requests, 0);
    assert_eq!(report.errors, 0);
    assert_eq!(report.error_rate, 0.0);
    assert_eq!(state.process.request_count(), 0);
}

#[tokio::test]
async fn auth_failure_aborts_before_any_request() {
    let seen = Seen::default();
    let url = serve(recording_stub(seen.clone(), StatusCode::OK)).await;

    let auth = Arc::new(GcloudAuthProvider::with_program("faultbench-no-such-binary"));
    let generator = TrafficGenerator::new(
        url,
        auth,
        fast_config(
            Duration::from_millis(200),
            vec![EndpointSpec::new("/api/ok", "ok", 1)],
        ),
    );

    let result = generator.run().await;
    assert!(matches!(result, Err(TrafficError::Auth(_))));
    assert!(seen.all().is_empty());
}

#[tokio::test]
async fn every_request_carries_the_bearer_token() {
    let seen = Seen::default();
    let url = serve(recording_stub(seen.clone(), StatusCode::OK)).await;

    let generator = TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(300),
            vec![EndpointSpec::new("/api/ok", "ok", 1)],
        ),
    );
    let report = generator.run().await.unwrap();

    let requests = seen.all();
    assert_eq!(requests[0].0, "/health");
    assert!(requests
        .iter()
        .all(|(_, auth)| auth.as_deref() == Some("Bearer test-token")));

    // The probe is not part of the session counts
    assert_eq!(report.requests as usize, requests.len() - 1);
    assert_eq!(report.errors, 0);
}

#[tokio::test]
async fn failed_probe_does_not_abort_the_session() {
    let seen = Seen::default();
    let url = serve(recording_stub(seen.clone(), StatusCode::SERVICE_UNAVAILABLE)).await;

    let generator = TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(200),
            vec![EndpointSpec::new("/api/ok", "ok", 1)],
        ),
    );
    let report = generator.run().await.unwrap();

    assert!(report.requests > 0);
    assert_eq!(report.errors, 0);
}

#[tokio::test]
async fn successful_requests_match_service_counter() {
    let profile = FaultProfile {
        process_error_rate: 0.0,
        ..Default::default()
    };
    let (url, state) = spawn_service(profile).await;

    let generator = TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(400),
            vec![EndpointSpec::new("/api/process", "process", 3)],
        ),
    );
    let report = generator.run().await.unwrap();

    assert!(report.requests > 0);
    assert_eq!(report.errors, 0);
    assert_eq!(report.requests, state.process.request_count());
}

#[tokio::test]
async fn error_statuses_are_counted_as_errors() {
    let (url, _) = spawn_service(FaultProfile::default()).await;

    let generator = TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(300),
            vec![
                EndpointSpec::new("/api/permission", "permission", 1),
                EndpointSpec::new("/api/network", "network", 1),
            ],
        ),
    );
    let report = generator.run().await.unwrap();

    assert!(report.requests > 0);
    assert_eq!(report.errors, report.requests);
    assert_eq!(report.error_rate, 1.0);
}

#[tokio::test]
async fn transport_failures_are_counted_as_errors() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let generator = TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(200),
            vec![EndpointSpec::new("/api/process", "process", 1)],
        ),
    );
    let report = generator.run().await.unwrap();

    assert!(report.requests > 0);
    assert_eq!(report.errors, report.requests);
}

#[tokio::test]
async fn in_flight_requests_finish_past_the_deadline() {
    let seen = Seen::default();
    let url = serve(recording_stub(seen.clone(), StatusCode::OK)).await;

    let config = GeneratorConfig {
        min_delay: Duration::from_millis(100),
        max_delay: Duration::from_millis(100),
        ..fast_config(
            Duration::from_millis(50),
            vec![EndpointSpec::new("/api/hold", "hold", 1)],
        )
    };
    let generator = TrafficGenerator::new(url, token(), config);
    let report = generator.run().await.unwrap();

    assert_eq!(report.requests, 1);
    assert!(report.elapsed >= Duration::from_millis(500));
    assert_eq!(seen.all().last().map(|(p, _)| p.as_str()), Some("/api/hold"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn counters_never_show_more_errors_than_requests() {
    let (url, _) = spawn_service(FaultProfile::default()).await;

    let generator = Arc::new(TrafficGenerator::new(
        url,
        token(),
        fast_config(
            Duration::from_millis(600),
            vec![
                EndpointSpec::new("/api/process", "process", 3),
                EndpointSpec::new("/api/database", "database", 1),
                EndpointSpec::new("/api/permission", "permission", 1),
            ],
        ),
    ));
    let counters = generator.counters();

    let session = {
        let generator = generator.clone();
        tokio::spawn(async move { generator.run().await })
    };

    while !session.is_finished() {
        let tally = counters.snapshot();
        assert!(tally.requests >= tally.errors);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let report = session.await.unwrap().unwrap();
    assert!(report.requests >= report.errors);
    assert_eq!(counters.snapshot().requests, report.requests);
}

#[tokio::test]
async fn no_request_starts_after_waiting_past_the_deadline() {
    let seen = Seen::default();
    let url = serve(recording_stub(seen.clone(), StatusCode::OK)).await;

    let config = GeneratorConfig {
        concurrency: 1,
        min_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        ..fast_config(
            Duration::from_millis(100),
            vec![EndpointSpec::new("/api/hold", "hold", 1)],
        )
    };
    let generator = TrafficGenerator::new(url, token(), config);
    let report = generator.run().await.unwrap();

    // The slot frees up at ~500ms, long after the deadline
    assert_eq!(report.requests, 1);
    assert!(report.elapsed < Duration::from_millis(900));
    let holds = seen.all().iter().filter(|(p, _)| p == "/api/hold").count();
    assert_eq!(holds, 1);
}

#[derive(Clone, Default)]
struct InFlight {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

fn in_flight_stub(tracker: InFlight) -> Router {
    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route(
            "/api/busy",
            get(|State(tracker): State<InFlight>| async move {
                let now = tracker.current.fetch_add(1, Ordering::SeqCst) + 1;
                tracker.peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(300)).await;
                tracker.current.fetch_sub(1, Ordering::SeqCst);
                tracker.completed.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }),
        )
        .with_state(tracker)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn worker_pool_caps_requests_in_flight() {
    let tracker = InFlight::default();
    let url = serve(in_flight_stub(tracker.clone())).await;

    let config = GeneratorConfig {
        min_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        ..fast_config(
            Duration::from_millis(700),
            vec![EndpointSpec::new("/api/busy", "busy", 1)],
        )
    };
    assert_eq!(config.concurrency, 3);

    let generator = TrafficGenerator::new(url, token(), config);
    let report = generator.run().await.unwrap();

    assert_eq!(tracker.peak.load(Ordering::SeqCst), 3);
    assert!(report.requests > 3);
    assert_eq!(report.errors, 0);
    assert_eq!(
        tracker.completed.load(Ordering::SeqCst) as u64,
        report.requests
    );
}
