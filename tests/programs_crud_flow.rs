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

fn program_names(result: &serde_json::Value, key: &str) -> Vec<String> {
    result
        .get(key)
        .and_then(|v| v.as_array())
        .expect("program array")
        .iter()
        .map(|p| {
            p.get("name")
                .and_then(|v| v.as_str())
                .expect("name")
                .to_string()
        })
        .collect()
}

#[test]
fn create_edit_and_delete_round_trip() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let opened = request_ok(&mut stdin, &mut reader, "1", "programs.open", json!({}));
    let seeded = opened
        .get("programs")
        .and_then(|v| v.as_array())
        .expect("programs")
        .len();
    assert_eq!(seeded, 3);
    assert_eq!(
        opened
            .get("programTypes")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(3)
    );

    // Create: defaults in, fields patched, submit appends the server's echo.
    let dialog = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "programs.dialog.openCreate",
        json!({}),
    );
    assert_eq!(dialog.pointer("/mode").and_then(|v| v.as_str()), Some("create"));
    assert_eq!(dialog.pointer("/draft/name").and_then(|v| v.as_str()), Some(""));

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "programs.dialog.patch",
        json!({ "name": "Droit", "acronym": "DRT", "programTypeId": "1" }),
    );
    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "programs.dialog.submit",
        json!({}),
    );
    assert_eq!(submitted.get("saved").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        submitted.pointer("/dialog/open").and_then(|v| v.as_bool()),
        Some(false)
    );
    let programs = submitted
        .get("programs")
        .and_then(|v| v.as_array())
        .expect("programs");
    assert_eq!(programs.len(), 4);
    let created = programs.last().expect("created entry");
    assert_eq!(created.get("name").and_then(|v| v.as_str()), Some("Droit"));
    let created_id = created
        .get("id")
        .and_then(|v| v.as_str())
        .expect("created id")
        .to_string();
    assert!(!["1", "2", "3"].contains(&created_id.as_str()));

    // Edit: the list keeps its length, only the target entry changes.
    let dialog = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "programs.dialog.openEdit",
        json!({ "id": "2" }),
    );
    assert_eq!(
        dialog.pointer("/draft/name").and_then(|v| v.as_str()),
        Some("Gestion")
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "programs.dialog.patch",
        json!({ "name": "Gestion des Entreprises" }),
    );
    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "7",
        "programs.dialog.submit",
        json!({}),
    );
    let names = program_names(&submitted, "programs");
    assert_eq!(names.len(), 4);
    assert!(names.contains(&"Gestion des Entreprises".to_string()));
    assert!(names.contains(&"Informatique".to_string()));
    assert!(!names.contains(&"Gestion".to_string()));

    // Cancelled delete is a no-op.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "programs.delete.stage",
        json!({ "id": "3" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "programs.delete.cancel",
        json!({}),
    );
    let confirmed = request_ok(
        &mut stdin,
        &mut reader,
        "10",
        "programs.delete.confirm",
        json!({}),
    );
    assert!(confirmed.get("deletedId").map(|v| v.is_null()).unwrap_or(false));
    assert_eq!(
        confirmed
            .get("programs")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(4)
    );

    // Confirmed delete removes exactly the staged id.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "11",
        "programs.delete.stage",
        json!({ "id": "3" }),
    );
    let confirmed = request_ok(
        &mut stdin,
        &mut reader,
        "12",
        "programs.delete.confirm",
        json!({}),
    );
    assert_eq!(
        confirmed.get("deletedId").and_then(|v| v.as_str()),
        Some("3")
    );
    let remaining = confirmed
        .get("programs")
        .and_then(|v| v.as_array())
        .expect("programs");
    assert_eq!(remaining.len(), 3);
    assert!(remaining
        .iter()
        .all(|p| p.get("id").and_then(|v| v.as_str()) != Some("3")));

    // The flow above queued success toasts in order.
    let drained = request_ok(
        &mut stdin,
        &mut reader,
        "13",
        "notifications.drain",
        json!({}),
    );
    let severities: Vec<String> = drained
        .get("notices")
        .and_then(|v| v.as_array())
        .expect("notices")
        .iter()
        .map(|n| {
            n.get("severity")
                .and_then(|v| v.as_str())
                .expect("severity")
                .to_string()
        })
        .collect();
    assert_eq!(severities, vec!["success", "success", "success"]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn empty_draft_is_rejected_and_dialog_stays_open() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(&mut stdin, &mut reader, "1", "programs.open", json!({}));
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "programs.dialog.openCreate",
        json!({}),
    );
    let submitted = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "programs.dialog.submit",
        json!({}),
    );
    assert_eq!(submitted.get("saved").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        submitted.pointer("/dialog/open").and_then(|v| v.as_bool()),
        Some(true)
    );
    assert_eq!(
        submitted
            .get("programs")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(3)
    );

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
        Some("error")
    );

    drop(stdin);
    let _ = child.wait();
}
