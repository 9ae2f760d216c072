use serde_json::json;

use crate::export::ExportFormat;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::pages::students::sort_value;
use crate::pages::StudentsPage;

fn view_value(page: &StudentsPage) -> serde_json::Value {
    let rows = page.filtered();
    let view = page.table.view(&rows, page.loading, sort_value);
    json!({
        "table": view,
        "filters": {
            "search": page.search,
            "levelId": page.level_id,
            "programId": page.program_id,
        },
        "total": page.students.len(),
    })
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        students,
        ..
    } = state;
    students.open(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({
            "students": &students.students,
            "levels": &students.levels,
            "programs": &students.programs,
            "loading": students.loading,
        }),
    )
}

fn handle_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, view_value(&state.students))
}

fn handle_filter_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let page = &mut state.students;
    if let Some(search) = opt_str(req, "search") {
        page.search = search;
    }
    if let Some(level_id) = opt_str(req, "levelId") {
        page.level_id = level_id;
    }
    if let Some(program_id) = opt_str(req, "programId") {
        page.program_id = program_id;
    }
    page.table.page = 0;
    ok(&req.id, view_value(&state.students))
}

fn handle_filter_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.students.reset_filters();
    ok(&req.id, view_value(&state.students))
}

fn handle_table_sort(state: &mut AppState, req: &Request) -> serde_json::Value {
    let column = match required_str(req, "column") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    state.students.table.toggle_sort(&column);
    ok(&req.id, view_value(&state.students))
}

fn handle_table_page(state: &mut AppState, req: &Request) -> serde_json::Value {
    let direction = match required_str(req, "direction") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let row_count = state.students.filtered().len();
    match direction.as_str() {
        "next" => state.students.table.page_next(row_count),
        "prev" => state.students.table.page_prev(),
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("unknown direction: {other}"),
                None,
            )
        }
    }
    ok(&req.id, view_value(&state.students))
}

fn handle_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match required_str(req, "format") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(format) = ExportFormat::parse(&raw) else {
        return err(
            &req.id,
            "bad_params",
            format!("unknown export format: {raw}"),
            None,
        );
    };
    let AppState {
        exporter,
        notifier,
        students,
        ..
    } = state;
    students.export(exporter.as_ref(), format, notifier);
    ok(
        &req.id,
        json!({ "format": format.label(), "rows": students.filtered().len() }),
    )
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    Some(match req.method.as_str() {
        "students.open" => handle_open(state, req).await,
        "students.view" => handle_view(state, req),
        "students.filter.set" => handle_filter_set(state, req),
        "students.filter.reset" => handle_filter_reset(state, req),
        "students.table.sort" => handle_table_sort(state, req),
        "students.table.page" => handle_table_page(state, req),
        "students.export" => handle_export(state, req),
        _ => return None,
    })
}
