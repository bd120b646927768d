#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use url::Url;

/// `file://` URL of a content directory.
pub fn content_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Write one document under `<root>/<subdir>/<type>/<name>.json`.
pub fn write_document(root: &Path, subdir: &str, name: &str, value: &Value) {
    let document_type = value["type"].as_str().expect("document type");
    let path = root
        .join(subdir)
        .join(document_type)
        .join(format!("{}.json", name));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn post(id: &str, uid: &str, date: &str, title: &str) -> Value {
    json!({
        "id": id,
        "uid": uid,
        "type": "posts",
        "first_publication_date": date,
        "last_publication_date": date,
        "data": {
            "title": title,
            "subtitle": "Pensando em sincronização em vez de ciclos de vida",
            "author": "Joseph Oliveira",
            "banner": { "url": "https://images.example/banner.png" },
            "content": [
                {
                    "heading": "Proin et varius",
                    "body": [
                        { "type": "paragraph", "text": "Lorem ipsum dolor sit amet", "spans": [] }
                    ]
                }
            ]
        }
    })
}

/// Three published posts, oldest to newest: a, b, c.
pub fn seed_posts(root: &Path) {
    write_document(
        root,
        "documents",
        "a",
        &post("A", "criando-um-app", "2021-03-15T19:25:28+0000", "Criando um app CRA do zero"),
    );
    write_document(
        root,
        "documents",
        "b",
        &post("B", "como-utilizar-hooks", "2021-03-20T19:25:28+0000", "Como utilizar Hooks"),
    );
    write_document(
        root,
        "documents",
        "c",
        &post("C", "mapas-com-react", "2021-03-25T19:25:28+0000", "Mapas com React"),
    );
}

/// Run the CLI against `content` with an isolated data directory.
pub fn run_cli(args: &[&str], content: &Path, data: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_spacetravelling"));
    cmd.args(args);
    cmd.env("SPACETRAVEL_API", content_url(content));
    cmd.env("SPACETRAVEL_DATA_DIR", data);
    cmd.env_remove("SPACETRAVEL_ACCESS_TOKEN");
    cmd.env_remove("SPACETRAVEL_LOCALE");
    cmd.env_remove("SPACETRAVEL_DOCUMENT_TYPE");
    cmd.env_remove("SPACETRAVEL_COMMENTS_REPO");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], content: &Path, data: &Path) -> String {
    let output = run_cli(args, content, data);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], content: &Path, data: &Path) -> String {
    let output = run_cli(args, content, data);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
