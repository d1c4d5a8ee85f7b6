use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Stand-in for the journey API, served from its own thread so it outlives
/// each test's runtime.
struct Upstream {
    base_url: String,
    recorded: Arc<StdMutex<Vec<Value>>>,
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static UPSTREAM: Lazy<Upstream> = Lazy::new(start_upstream);

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn demo_journey() -> Value {
    json!({
        "client": {
            "name": "Jordan Reyes",
            "sport": "Soccer",
            "terminalGoal": "Return to competitive play",
            "pathology": "ACL Reconstruction",
            "researchSource": "MOON Cohort",
            "researchDoi": "10.1000/acl",
            "startDate": "2025-11-03 09:15:00",
            "nextSession": "2026-02-14",
            "currentPhaseIndex": 1
        },
        "phases": [
            {
                "name": "Protection",
                "status": "completed",
                "description": "Protect the graft",
                "typicalDuration": "0-2 weeks",
                "criteria": [{ "label": "pain_score <= 2 /10", "current": "1 /10", "met": true }],
                "programming": []
            },
            {
                "name": "Strength",
                "status": "active",
                "description": "Rebuild quadriceps strength",
                "typicalDuration": "2-12 weeks",
                "criteria": [
                    { "label": "knee_flexion >= 120 degrees", "current": "125 degrees", "met": true },
                    { "label": "quad_lsi >= 80 %", "current": "72 %", "met": false },
                    { "label": "effusion = 0 grade", "current": "0 grade", "met": true },
                    { "label": "rejected_metric >= 1 unit", "current": null, "met": false }
                ],
                "programming": [
                    {
                        "type": "A1",
                        "exercise": "Split squat",
                        "hd": "Tempo 3-1-1",
                        "intent": "Eccentric control",
                        "rationale": null,
                        "detail": "3x8 @ RPE 7"
                    }
                ]
            },
            {
                "name": "Return to Sport",
                "status": "locked",
                "description": "Sport-specific loading",
                "typicalDuration": "6+ months",
                "criteria": [
                    { "label": "hop_lsi >= 90 %", "current": "SECRET_93 %", "met": true },
                    { "label": "acl_rsi >= 65 points", "current": "SECRET_40 points", "met": false }
                ],
                "programming": [{ "type": "B1", "exercise": "SECRET_cutting drills", "detail": "n/a" }]
            }
        ]
    })
}

fn finished_journey() -> Value {
    json!({
        "client": { "name": "Sam Okafor", "pathology": "Achilles Repair", "sport": "Running" },
        "phases": [{ "name": "Rehab", "status": "completed", "criteria": [] }]
    })
}

async fn stub_journey(Path(client_id): Path<String>) -> Result<Json<Value>, StatusCode> {
    match client_id.as_str() {
        "CLT_DEMO_01" => Ok(Json(demo_journey())),
        "CLT_NO_ACTIVE" => Ok(Json(finished_journey())),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn stub_record(
    State(recorded): State<Arc<StdMutex<Vec<Value>>>>,
    Json(body): Json<Value>,
) -> StatusCode {
    if body["metric_name"] == "rejected_metric" {
        return StatusCode::UNPROCESSABLE_ENTITY;
    }
    recorded.lock().unwrap().push(body);
    StatusCode::OK
}

async fn stub_protocol(Path(protocol_id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if protocol_id == "PAT_ACL_R_01" {
        Ok(Json(json!({ "content": "# ACL Protocol\n\n* quad sets\n* heel slides" })))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn start_upstream() -> Upstream {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind upstream port");
    listener.set_nonblocking(true).expect("nonblocking upstream");
    let port = listener.local_addr().unwrap().port();
    let recorded = Arc::new(StdMutex::new(Vec::new()));

    let app = Router::new()
        .route("/api/client/:client_id/journey", get(stub_journey))
        .route("/api/metric/record", post(stub_record))
        .route("/api/protocol/:protocol_id", get(stub_protocol))
        .with_state(Arc::clone(&recorded));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("upstream runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("upstream listener");
            axum::serve(listener, app).await.expect("upstream serve");
        });
    });

    Upstream {
        base_url: format!("http://127.0.0.1:{port}"),
        recorded,
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/icons")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_vector_dashboard"))
        .env("PORT", port.to_string())
        .env("VECTOR_API_BASE_URL", &UPSTREAM.base_url)
        .env("VECTOR_ICON_THEME", "geometric")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_dashboard_shows_latest_phase_first_and_hides_locked_values() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/?client=CLT_DEMO_01", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();

    assert!(html.contains("Jordan Reyes"));
    assert!(html.contains(">2/4</span>"));
    assert!(html.contains(">Complete</span>"));
    assert!(html.contains(">Locked</span>"));
    assert!(html.contains("Started: Nov 3, 2025"));
    assert!(html.contains("Next Session: Feb 14, 2026"));
    assert!(!html.contains("SECRET"));

    let terminal = html.find("Return to Sport").unwrap();
    let active = html.find("Strength").unwrap();
    let first = html.find("Protection").unwrap();
    assert!(terminal < active && active < first);
}

#[tokio::test]
async fn http_view_json_matches_model() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let view: Value = client
        .get(format!("{}/api/view/CLT_DEMO_01", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let phases = view["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 3);
    assert_eq!(phases[0]["index"], 2);
    assert_eq!(phases[0]["badge"]["kind"], "locked");
    assert!(phases[0]["criteria"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["display_value"] == "--" && row["status"] == "locked"));
    assert!(phases[0]["programming"].is_null());
    assert_eq!(phases[1]["badge"]["text"], "2/4");
    assert_eq!(phases[1]["programming"][0]["exercise"], "Split squat");
    assert_eq!(phases[2]["badge"]["text"], "Complete");

    let current: Value = client
        .get(format!("{}/api/view/current", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["client"]["name"], "Jordan Reyes");
}

#[tokio::test]
async fn http_unknown_client_shows_offline_state() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/?client=CLT_MISSING", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("System Offline. Check Connection."));
}

#[tokio::test]
async fn http_clinician_form_lists_active_criteria() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/clinician?client=CLT_DEMO_01", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"name="metric-knee_flexion""#));
    assert!(html.contains(r#"name="metric-quad_lsi""#));
    assert!(html.contains("Target: &gt;= 120 degrees"));
    assert!(html.contains("ACL Reconstruction — Strength"));

    let response = client
        .get(format!("{}/clinician?client=CLT_NO_ACTIVE", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text().await.unwrap();
    assert!(html.contains("No active phase found for this client"));
    assert!(!html.contains("criteriaForm"));

    let response = client
        .get(format!("{}/clinician?client=CLT_MISSING", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.text().await.unwrap().contains("Client not found or no active journey"));
}

#[tokio::test]
async fn http_record_metrics_reports_aggregate_counts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .post(format!("{}/clinician/record", server.base_url))
        .form(&[
            ("client_id", "CLT_DEMO_01"),
            ("metric-knee_flexion", "118.5"),
            ("metric-quad_lsi", "   "),
            ("metric-rejected_metric", "3"),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Successfully recorded 1 metrics. 1 failed."));

    let recorded = UPSTREAM.recorded.lock().unwrap().clone();
    assert!(recorded.iter().any(|body| body
        == &json!({ "client_id": "CLT_DEMO_01", "metric_name": "knee_flexion", "value": "118.5" })));
    assert!(recorded.iter().all(|body| body["metric_name"] != "quad_lsi"));
}

#[tokio::test]
async fn http_protocol_renders_markdown() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/protocol/PAT_ACL_R_01", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("<h1>ACL Protocol</h1>"));
    assert!(html.contains("<ul><li>quad sets</li><li>heel slides</li></ul>"));

    let response = client
        .get(format!("{}/protocol/PAT_UNKNOWN", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Error Loading Document"));

    let response = client
        .post(format!("{}/protocol/PAT_ACL_R_01/flag", server.base_url))
        .form(&[("reason", "Broken link")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("Issue reported"));
}
