use hashforge_minion::{build_router, AppState, CancellationRegistry, MinionConfig};
use hashforge_protocol::{CancelRequest, ChunkStatus, CrackRequest, CrackResponse, HealthResponse};
use hashforge_scheme::SchemeRegistry;
use std::sync::Arc;
use uuid::Uuid;

async fn spawn_minion() -> String {
    let state = AppState {
        schemes: Arc::new(SchemeRegistry::with_builtins()),
        cancellation: Arc::new(CancellationRegistry::new()),
        config: Arc::new(MinionConfig {
            worker_threads: 2,
            subrange_min_size: 1,
            cancellation_check_every: 5,
            bind_addr: "127.0.0.1:0".to_string(),
        }),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_minion().await;
    let resp: HealthResponse = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp.status, "ok");
}

#[tokio::test]
async fn crack_finds_known_candidate() {
    let base = spawn_minion().await;
    let client = reqwest::Client::new();
    let hash = {
        use md5::Digest;
        let digest = md5::Md5::digest(b"000-0000042");
        digest.iter().map(|b| format!("{b:02x}")).collect::<String>()
    };

    let req = CrackRequest {
        job_id: Uuid::new_v4(),
        hash,
        scheme_name: "prefix-numeric".to_string(),
        lo: 0,
        hi: 99,
    };
    let resp: CrackResponse = client
        .post(format!("{base}/crack"))
        .json(&req)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp.status, ChunkStatus::Found);
    assert_eq!(resp.password.as_deref(), Some("000-0000042"));
}

#[tokio::test]
async fn unknown_scheme_is_invalid_input() {
    let base = spawn_minion().await;
    let client = reqwest::Client::new();
    let req = CrackRequest {
        job_id: Uuid::new_v4(),
        hash: "0".repeat(32),
        scheme_name: "no-such-scheme".to_string(),
        lo: 0,
        hi: 10,
    };
    let resp: CrackResponse = client
        .post(format!("{base}/crack"))
        .json(&req)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp.status, ChunkStatus::InvalidInput);
}

#[tokio::test]
async fn cancel_is_idempotent_and_visible_in_status() {
    let base = spawn_minion().await;
    let client = reqwest::Client::new();
    let job_id = Uuid::new_v4();

    let resp = client
        .post(format!("{base}/cancel"))
        .json(&CancelRequest { job_id })
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let status: hashforge_protocol::StatusResponse = client
        .get(format!("{base}/status/{job_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(status.cancelled);
}
