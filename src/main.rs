use std::io::{self, BufRead, Write};

use supadmind::config::Config;
use supadmind::export::StubExporter;
use supadmind::ipc;

fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("supadmind: bad configuration: {e}");
            std::process::exit(2);
        }
    };
    let backend = match config.build_backend() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("supadmind: failed to build backend: {e}");
            std::process::exit(2);
        }
    };

    // Single-threaded, event-driven: one request at a time, suspending only
    // on the backend calls inside a request.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("supadmind: failed to start runtime: {e}");
            std::process::exit(2);
        }
    };

    let mut state = ipc::AppState::new(backend, Box::new(StubExporter), config.backend_name());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply with the request id; report and move on.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = runtime.block_on(ipc::handle_request(&mut state, req));
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
