use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Stdio;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOME9_PATH: &str = "/v1/blacklist/Items/";
const CLOUDFLARE_PATH: &str = "/client/v4/user/firewall/access_rules/rules";

const ENV_VARS: [&str; 6] = [
    "BLACKLISTER_CONFIG",
    "BLACKLISTER_DOME9_USER",
    "BLACKLISTER_DOME9_API_KEY",
    "BLACKLISTER_CLOUDFLARE_EMAIL",
    "BLACKLISTER_CLOUDFLARE_API_KEY",
    "RUST_LOG",
];

struct TestEnv {
    tmp: TempDir,
    config: PathBuf,
}

impl TestEnv {
    fn new(config: &str) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, config).expect("write config");
        Self { tmp, config: path }
    }

    /// Process with an isolated home and no credential overrides
    fn bare_process(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("blacklister"));
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.tmp.path())
            .env("XDG_CONFIG_HOME", self.tmp.path().join("xdg"))
            .args(["--no-banner", "--no-color"]);
        cmd
    }

    fn bare_cmd(&self) -> Command {
        Command::from_std(self.bare_process())
    }

    fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    output.assert()
}

fn closed_port_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

fn both_backends(dome9_base: &str, cloudflare_base: &str, ttl: u64) -> String {
    format!(
        r#"
[dome9]
enabled = true
username = "soc@example.com"
api_key = "dome9-key"
ttl = {ttl}
endpoint = "{dome9_base}{DOME9_PATH}"

[cloudflare]
enabled = true
email = "soc@example.com"
api_key = "cf-key"
endpoint = "{cloudflare_base}{CLOUDFLARE_PATH}"
"#
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn both_backends_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .and(query_param("IP", "203.0.113.5"))
        .and(query_param("Comment", "brute force"))
        .and(query_param("TTL", "3600"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .and(header("X-Auth-Email", "soc@example.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 3600));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5", "-n", "brute force"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("Blacklisted 203.0.113.5 with Dome9 (TTL: 3600)"))
        .stdout(contains("Blacklisted 203.0.113.5 with Cloudflare."));
}

#[tokio::test(flavor = "multi_thread")]
async fn dome9_reported_before_cloudflare() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 0));
    let mut cmd = env.cmd();
    cmd.args(["--ip", "203.0.113.5"]);

    let output = run(cmd).await.success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let dome9 = stdout.find("with Dome9 (TTL: Permanent)").unwrap();
    let cloudflare = stdout.find("with Cloudflare.").unwrap();
    assert!(dome9 < cloudflare);
}

#[tokio::test(flavor = "multi_thread")]
async fn auth_failure_still_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&format!(
        r#"
[dome9]
enabled = false

[cloudflare]
email = "soc@example.com"
api_key = "wrong-key"
endpoint = "{}{CLOUDFLARE_PATH}"
"#,
        server.uri()
    ));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("HTTP response code 403"))
        .stdout(contains("check the Cloudflare email and API key"))
        .stdout(contains("Dome9").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn no_backend_enabled_exits_two_without_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnv::new(&format!(
        r#"
[dome9]
enabled = false
endpoint = "{uri}{DOME9_PATH}"

[cloudflare]
enabled = false
endpoint = "{uri}{CLOUDFLARE_PATH}"
"#,
        uri = server.uri()
    ));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5"]);

    run(cmd)
        .await
        .code(2)
        .stderr(contains("no backend selected"))
        .stderr(contains("enabled = true"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_credentials_block_every_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Dome9 is fine, Cloudflare has no key: Dome9 must not be contacted either.
    let env = TestEnv::new(&format!(
        r#"
[dome9]
username = "soc@example.com"
api_key = "dome9-key"
endpoint = "{uri}{DOME9_PATH}"

[cloudflare]
email = "soc@example.com"
endpoint = "{uri}{CLOUDFLARE_PATH}"
"#,
        uri = server.uri()
    ));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5"]);

    run(cmd)
        .await
        .code(2)
        .stderr(contains("Cloudflare email or API key is not set"));
}

#[tokio::test(flavor = "multi_thread")]
async fn env_credentials_complete_the_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .and(header("X-Auth-Key", "env-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&format!(
        r#"
[dome9]
enabled = false

[cloudflare]
email = "soc@example.com"
endpoint = "{}{CLOUDFLARE_PATH}"
"#,
        server.uri()
    ));
    let mut cmd = env.cmd();
    cmd.env("BLACKLISTER_CLOUDFLARE_API_KEY", "env-key")
        .args(["-i", "203.0.113.5"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("Blacklisted 203.0.113.5 with Cloudflare."));
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_fault_does_not_stop_second_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&closed_port_uri(), &server.uri(), 3600));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("Failed to blacklist 203.0.113.5 with Dome9. Request failed:"))
        .stdout(contains("Blacklisted 203.0.113.5 with Cloudflare."));
}

#[tokio::test(flavor = "multi_thread")]
async fn debug_echoes_response_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("dome9 exploded"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 3600));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5", "-d"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("dome9 exploded"))
        .stdout(contains("HTTP response code 500."))
        .stdout(contains(r#"{"success":true}"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn debug_with_csv_echoes_bodies_to_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad dome9 credentials"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 3600));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5", "-d", "-o", "csv"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("Dome9,203.0.113.5,auth_failure,403"))
        .stdout(contains("bad dome9 credentials").not())
        .stderr(contains("bad dome9 credentials"))
        .stderr(contains(r#"{"success":true}"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_stdout_does_not_stop_second_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 3600));
    let mut process = env.bare_process();
    process
        .arg("--config")
        .arg(&env.config)
        .args(["-i", "203.0.113.5"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    // Close the read end before anything is written, like `| true`.
    let status = tokio::task::spawn_blocking(move || {
        let mut child = process.spawn().unwrap();
        drop(child.stdout.take());
        child.wait().unwrap()
    })
    .await
    .unwrap();

    assert!(status.success());
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn ttl_flag_overrides_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .and(query_param("TTL", "600"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&format!(
        r#"
[dome9]
username = "soc@example.com"
api_key = "dome9-key"
endpoint = "{}{DOME9_PATH}"

[cloudflare]
enabled = false
"#,
        server.uri()
    ));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5", "--ttl", "600"]);

    run(cmd)
        .await
        .success()
        .stdout(contains("with Dome9 (TTL: 600)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn json_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOME9_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CLOUDFLARE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let env = TestEnv::new(&both_backends(&server.uri(), &server.uri(), 3600));
    let mut cmd = env.cmd();
    cmd.args(["-i", "203.0.113.5", "-o", "json"]);

    let output = run(cmd).await.success().get_output().stdout.clone();
    let results: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(results[0]["backend"], "dome9");
    assert_eq!(results[0]["outcome"], "success");
    assert_eq!(results[1]["backend"], "cloudflare");
    assert_eq!(results[1]["outcome"], "other_failure");
    assert_eq!(results[1]["http_status"], 429);
}

#[test]
fn no_arguments_prints_usage_and_config_check() {
    let env = TestEnv::new("");
    env.bare_cmd()
        .assert()
        .code(2)
        .stdout(contains("Usage"))
        .stdout(contains("Configuration:"))
        .stdout(contains("missing credentials"));
}

#[test]
fn check_passes_with_credentials() {
    let env = TestEnv::new(
        r#"
[dome9]
enabled = false

[cloudflare]
email = "soc@example.com"
api_key = "0123456789abcdef"
"#,
    );
    env.cmd()
        .arg("--check")
        .assert()
        .success()
        .stdout(contains("Ready to blacklist."))
        .stdout(contains("0123...cdef"))
        .stdout(contains("0123456789abcdef").not());
}

#[test]
fn print_config_outputs_example() {
    let env = TestEnv::new("");
    env.bare_cmd()
        .arg("--print-config")
        .assert()
        .success()
        .stdout(contains("[dome9]"))
        .stdout(contains("[cloudflare]"));
}

#[test]
fn unknown_flag_is_usage_error() {
    let env = TestEnv::new("");
    env.bare_cmd().arg("--bogus").assert().code(2);
}

#[test]
fn missing_explicit_config_fails() {
    let env = TestEnv::new("");
    env.bare_cmd()
        .args(["--config", "/nonexistent/blacklister.toml", "-i", "203.0.113.5"])
        .assert()
        .failure()
        .stderr(contains("Config file not found"));
}
