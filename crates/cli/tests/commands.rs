use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const SERVER_PAGE: &str = r#"<html><body>
<h1>server</h1>
<pre><code>func main() {
	srv := &amp;Server{}
	srv.Handle(os.Stdout)
}

func (s *Server) Handle(w Writer) error {
	return s.routes[w.Path()]
}</code></pre>
</body></html>"#;

const TRACE: &str = "panic: assignment to entry in nil map\n\
\n\
goroutine 1 [running]:\n\
main.(*Server).Handle(0xc000010000)\n\
\t/home/dev/app/server/handle.go:7 +0x1d\n\
main.main()\n\
\t/home/dev/app/server/main.go:3 +0x45\n";

fn setup_site() -> TempDir {
    let temp = tempdir().unwrap();
    let site = temp.path().join("site");
    fs::create_dir_all(site.join("server")).unwrap();
    fs::write(site.join("server/index.html"), SERVER_PAGE).unwrap();
    fs::write(temp.path().join("trace.txt"), TRACE).unwrap();
    temp
}

#[allow(deprecated)]
fn doctrace(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("doctrace").expect("binary");
    cmd.current_dir(workdir).arg("--quiet");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn catalog_lists_site_functions() {
    let temp = setup_site();
    let body = run_json(doctrace(temp.path()).args(["catalog", "--site", "site"]));

    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["route"], "/server/");
    let names: Vec<&str> = pages[0]["functions"]["buckets"]["go"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["main", "Handle"]);
}

#[test]
fn resolve_replays_steps() {
    let temp = setup_site();
    let body = run_json(doctrace(temp.path()).args([
        "resolve",
        "--site",
        "site",
        "--trace",
        "trace.txt",
        "--steps",
        "next,next,previous",
    ]));

    assert_eq!(body["language"], "go");
    assert_eq!(body["search_query"], "Go: panic: assignment to entry in nil map");

    let steps = body["steps"].as_array().unwrap();
    let summary: Vec<(&str, bool, &str)> = steps
        .iter()
        .map(|s| {
            (
                s["signal"].as_str().unwrap(),
                s["moved"].as_bool().unwrap(),
                s["locator"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("open", true, "/server/?iframe=true&index=0#maingo"),
            ("next", true, "/server/?iframe=true&index=1#handlego"),
            ("next", false, "/server/?iframe=true&index=1#handlego"),
            ("previous", true, "/server/?iframe=true&index=0#maingo"),
        ]
    );
    assert_eq!(steps[1]["summary"]["parameters"][0]["type"], "*Server");
    assert_eq!(steps[1]["summary"]["parameters"][1]["type"], "Writer");
    assert_eq!(steps[1]["summary"]["return_type"], "error");
    assert_eq!(steps[0]["fault"]["line"], 3);
    assert_eq!(steps[1]["fault"]["line"], 7);
}

#[test]
fn resolve_reads_trace_from_stdin() {
    let temp = setup_site();
    let body = run_json(
        doctrace(temp.path())
            .args(["resolve", "--site", "site"])
            .write_stdin(TRACE),
    );
    assert_eq!(body["frames"].as_array().unwrap().len(), 2);
    assert_eq!(body["steps"].as_array().unwrap().len(), 1);
}

#[test]
fn config_file_drives_view_mode_and_fault_color() {
    let temp = setup_site();
    fs::write(
        temp.path().join("doctrace.toml"),
        "[overlay]\nsingle_function_view = false\nfault_highlight_color = \"crimson\"\n",
    )
    .unwrap();

    let body = run_json(doctrace(temp.path()).args([
        "resolve", "--site", "site", "--trace", "trace.txt",
    ]));
    assert_eq!(body["steps"][0]["locator"], "/server/?index=0#maingo");
    assert_eq!(
        body["steps"][0]["fault"],
        serde_json::json!({ "line": 3, "color": "crimson" })
    );
}

#[test]
fn invalid_config_fails() {
    let temp = setup_site();
    fs::write(temp.path().join("bad.toml"), "[catalog]\nmax_region_bytes = 0\n").unwrap();

    doctrace(temp.path())
        .args(["--config", "bad.toml", "catalog", "--site", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn align_reports_ranges() {
    let temp = setup_site();
    fs::write(
        temp.path().join("lexer.go"),
        "package lexer\n\nfunc Next() {\n\tpos++\n\treturn\n}\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("notes.txt"),
        "pos++\nreturn\n\nnot in any listing\n",
    )
    .unwrap();

    let body = run_json(doctrace(temp.path()).args([
        "align",
        "--source",
        "lexer.go",
        "--excerpts",
        "notes.txt",
    ]));
    assert_eq!(body["excerpts"][0]["range"]["start"], 4);
    assert_eq!(body["excerpts"][0]["range"]["end"], 5);
    assert_eq!(body["unmatched"], serde_json::json!([1]));
}

#[test]
fn missing_site_fails() {
    let temp = tempdir().unwrap();
    doctrace(temp.path())
        .args(["catalog", "--site", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Site directory not found"));
}
