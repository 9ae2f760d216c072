use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_supadmind");
    let mut child = Command::new(exe)
        .env_remove("SUPADMIN_API_BASE_URL")
        .env_remove("SUPADMIN_API_TOKEN")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn supadmind");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "request {} failed: {}",
        method,
        value
    );
    value.get("result").cloned().expect("result")
}

fn row_first_names(result: &serde_json::Value) -> Vec<String> {
    result
        .pointer("/table/rows")
        .and_then(|v| v.as_array())
        .expect("rows")
        .iter()
        .map(|s| {
            s.get("firstName")
                .and_then(|v| v.as_str())
                .expect("firstName")
                .to_string()
        })
        .collect()
}

#[test]
fn filters_apply_as_a_strict_conjunction() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let opened = request_ok(&mut stdin, &mut reader, "1", "students.open", json!({}));
    assert_eq!(
        opened
            .get("students")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(5)
    );

    // Case-insensitive substring over first name, last name, email.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.filter.set",
        json!({ "search": "MAR" }),
    );
    assert_eq!(row_first_names(&view), vec!["Marie".to_string()]);

    // "ma" also hits Thomas via his first name.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.filter.set",
        json!({ "search": "ma" }),
    );
    assert_eq!(
        row_first_names(&view),
        vec!["Marie".to_string(), "Thomas".to_string()]
    );

    // Adding a level narrows further; the search stays in force.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.filter.set",
        json!({ "levelId": "2" }),
    );
    assert_eq!(row_first_names(&view), vec!["Marie".to_string()]);

    // A program that matches no remaining row empties the result.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.filter.set",
        json!({ "programId": "3" }),
    );
    assert_eq!(
        view.pointer("/table/noRecords").and_then(|v| v.as_bool()),
        Some(true)
    );

    // Clearing one filter re-admits rows matching the remaining two.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "students.filter.set",
        json!({ "programId": "", "levelId": "" }),
    );
    assert_eq!(
        row_first_names(&view),
        vec!["Marie".to_string(), "Thomas".to_string()]
    );

    // Reset restores the full fixture list.
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "students.filter.reset",
        json!({}),
    );
    assert_eq!(row_first_names(&view).len(), 5);
    assert_eq!(
        view.pointer("/filters/search").and_then(|v| v.as_str()),
        Some("")
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn program_filter_alone_matches_by_exact_id() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(&mut stdin, &mut reader, "1", "students.open", json!({}));
    let view = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.filter.set",
        json!({ "programId": "2" }),
    );
    assert_eq!(
        row_first_names(&view),
        vec!["Marie".to_string(), "Thomas".to_string()]
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn export_emits_a_toast_for_the_filtered_rows() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(&mut stdin, &mut reader, "1", "students.open", json!({}));
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.filter.set",
        json!({ "search": "ma" }),
    );
    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.export",
        json!({ "format": "pdf" }),
    );
    assert_eq!(exported.get("format").and_then(|v| v.as_str()), Some("PDF"));
    assert_eq!(exported.get("rows").and_then(|v| v.as_u64()), Some(2));

    let drained = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "notifications.drain",
        json!({}),
    );
    let notices = drained
        .get("notices")
        .and_then(|v| v.as_array())
        .expect("notices");
    assert_eq!(notices.len(), 1);
    assert_eq!(
        notices[0].get("severity").and_then(|v| v.as_str()),
        Some("info")
    );
    assert_eq!(
        notices[0].get("title").and_then(|v| v.as_str()),
        Some("PDF export")
    );

    drop(stdin);
    let _ = child.wait();
}
