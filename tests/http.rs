use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Badge {
    visible: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ModalView {
    open: bool,
    activity: String,
    submit_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct View {
    screen: String,
    greeting: String,
    login_enabled: bool,
    badge: Badge,
    streak: u32,
    modal: ModalView,
    durations: Vec<serde_json::Value>,
}

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

impl TestServer {
    async fn try_view(&self, client: &Client) -> Option<View> {
        let response = client
            .get(format!("{}/api/view", self.base_url))
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            return None;
        }
        response.json().await.ok()
    }

    async fn view(&self, client: &Client) -> View {
        self.try_view(client).await.expect("view")
    }

    async fn wait_until_ready(&self) {
        let client = Client::new();
        let deadline = Instant::now() + Duration::from_secs(3);
        while self.try_view(&client).await.is_none() {
            if Instant::now() > deadline {
                panic!("server did not become ready");
            }
            sleep(Duration::from_millis(100)).await;
        }
    }

    async fn send(&self, client: &Client, intent: serde_json::Value) -> View {
        let response = client
            .post(format!("{}/api/intent", self.base_url))
            .json(&intent)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        response.json().await.unwrap()
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habitfire_http_{}_{}.json", std::process::id(), nanos));
    path
}

async fn spawn_server(data_path: &Path) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_habitfire"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{port}"),
        child,
    };
    server.wait_until_ready().await;
    server
}

#[tokio::test]
async fn http_fresh_start_shows_login() {
    let data_path = unique_data_path();
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    let view = server.view(&client).await;
    assert_eq!(view.screen, "login");
    assert!(!view.login_enabled);
    assert!(!view.badge.visible);
    assert_eq!(view.streak, 0);
    assert_eq!(view.durations.len(), 30);

    let view = server.send(&client, json!({ "type": "edit_username", "value": "  " })).await;
    assert!(!view.login_enabled);
    let view = server.send(&client, json!({ "type": "login", "name": "  " })).await;
    assert_eq!(view.screen, "login");
    assert!(!data_path.exists());

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Habitfire"));
}

#[tokio::test]
async fn http_login_and_log_activity() {
    let data_path = unique_data_path();
    let server = spawn_server(&data_path).await;
    let client = Client::new();

    let view = server.send(&client, json!({ "type": "login", "name": " Ada " })).await;
    assert_eq!(view.screen, "main");
    assert_eq!(view.greeting, "Hi, Ada!");

    let view = server.send(&client, json!({ "type": "open_entry_modal" })).await;
    assert!(view.modal.open);
    assert!(!view.modal.submit_enabled);

    let view = server.send(&client, json!({ "type": "edit_activity", "text": "Run" })).await;
    assert_eq!(view.modal.activity, "Run");
    assert!(!view.modal.submit_enabled);

    let view = server.send(&client, json!({ "type": "select_duration", "value": "30" })).await;
    assert!(view.modal.submit_enabled);

    let view = server.send(&client, json!({ "type": "submit_pending" })).await;
    assert!(!view.modal.open);
    assert!(view.badge.visible);
    assert_eq!(view.badge.text, "1");
    assert_eq!(view.streak, 1);

    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&data_path).unwrap()).unwrap();
    assert_eq!(stored["username"], "Ada");
    assert_eq!(stored["logs"][0]["text"], "Run");
    assert_eq!(stored["logs"][0]["minutes"], 30);
    assert!(stored["logs"][0]["ts"].is_i64());

    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_state_survives_restart() {
    let data_path = unique_data_path();
    let client = Client::new();

    {
        let server = spawn_server(&data_path).await;
        server.send(&client, json!({ "type": "login", "name": "Ada" })).await;
        server
            .send(&client, json!({ "type": "submit_log", "text": "Read", "minutes": "60" }))
            .await;
    }

    let server = spawn_server(&data_path).await;
    let view = server.view(&client).await;
    assert_eq!(view.screen, "main");
    assert_eq!(view.greeting, "Hi, Ada!");
    assert_eq!(view.badge.text, "1");
    assert_eq!(view.streak, 1);

    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_corrupt_state_starts_fresh() {
    let data_path = unique_data_path();
    std::fs::write(&data_path, b"{ definitely not json").unwrap();

    let server = spawn_server(&data_path).await;
    let view = server.view(&Client::new()).await;
    assert_eq!(view.screen, "login");
    assert!(!view.badge.visible);

    let _ = std::fs::remove_file(&data_path);
}
