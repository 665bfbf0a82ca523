use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    stop: Option<oneshot::Sender<()>>,
    server: tokio::task::JoinHandle<anyhow::Result<()>>,
    data_dir: std::path::PathBuf,
}

impl TestApp {
    async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.server.await??;
        let _ = tokio::fs::remove_dir_all(&self.data_dir).await;
        Ok(())
    }
}

fn isolated_config() -> (AppConfig, std::path::PathBuf) {
    // Use an isolated data file per test run; the directory does not exist yet
    let data_dir = std::env::temp_dir().join(format!("employees_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = data_dir.join("employees.json");
    (cfg, data_dir)
}

async fn start_server() -> anyhow::Result<TestApp> {
    let (cfg, data_dir) = isolated_config();
    start_server_with(cfg, data_dir).await
}

async fn start_server_with(cfg: AppConfig, data_dir: std::path::PathBuf) -> anyhow::Result<TestApp> {

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        server::serve_on(listener, cfg, async move {
            let _ = rx.await;
        })
        .await
    });

    Ok(TestApp { base_url, stop: Some(tx), server, data_dir })
}

async fn wait_ready(c: &reqwest::Client, base_url: &str) -> anyhow::Result<()> {
    for _ in 0..50 {
        if let Ok(res) = c.get(format!("{base_url}/health")).send().await {
            if res.status() == HttpStatusCode::OK {
                return Ok(());
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    Err(anyhow::anyhow!("server at {base_url} never became ready"))
}

#[tokio::test]
async fn e2e_employee_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    wait_ready(&c, &app.base_url).await?;

    let res = c.get(format!("{}/employees", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let ana = json!({"id": 1, "firstName": "Ana", "lastName": "Ruiz"});
    let res = c.post(format!("{}/employees", app.base_url)).json(&ana).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/employees/1")
    );
    assert_eq!(res.json::<Value>().await?, ana);

    let res = c.get(format!("{}/employees/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, ana);

    let res = c
        .put(format!("{}/employees/1", app.base_url))
        .json(&json!({"lastName": "Gomez"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": 1, "firstName": "Ana", "lastName": "Gomez"}));

    let res = c.delete(format!("{}/employees/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "Employee 1 deleted.");

    let res = c.get(format!("{}/employees/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    app.shutdown().await
}

#[tokio::test]
async fn e2e_concurrent_creates_are_all_kept() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    wait_ready(&c, &app.base_url).await?;

    let mut tasks = Vec::new();
    for id in 1..=10 {
        let c = c.clone();
        let url = format!("{}/employees", app.base_url);
        tasks.push(tokio::spawn(async move {
            c.post(url)
                .json(&json!({"id": id, "firstName": format!("F{id}"), "lastName": format!("L{id}")}))
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    for t in tasks {
        assert_eq!(t.await??, HttpStatusCode::CREATED);
    }

    let list = c.get(format!("{}/employees", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert_eq!(list.len(), 10);

    app.shutdown().await
}

#[tokio::test]
async fn e2e_exact_key_matching_ignores_miscased_file() -> anyhow::Result<()> {
    let legacy = r#"{"Employees":[{"id":1,"firstName":"A","lastName":"B"}]}"#;
    let c = reqwest::Client::new();

    let (mut cfg, data_dir) = isolated_config();
    cfg.storage.case_insensitive_keys = false;
    tokio::fs::create_dir_all(&data_dir).await?;
    tokio::fs::write(&cfg.storage.data_file, legacy).await?;
    let app = start_server_with(cfg, data_dir).await?;
    wait_ready(&c, &app.base_url).await?;
    let list = c.get(format!("{}/employees", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([]));
    app.shutdown().await?;

    let (cfg, data_dir) = isolated_config();
    tokio::fs::create_dir_all(&data_dir).await?;
    tokio::fs::write(&cfg.storage.data_file, legacy).await?;
    let app = start_server_with(cfg, data_dir).await?;
    wait_ready(&c, &app.base_url).await?;
    let list = c.get(format!("{}/employees", app.base_url)).send().await?.json::<Value>().await?;
    assert_eq!(list, json!([{"id": 1, "firstName": "A", "lastName": "B"}]));
    app.shutdown().await
}
