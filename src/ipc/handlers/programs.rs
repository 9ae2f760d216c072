use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::pages::programs::sort_value;
use crate::pages::ProgramsPage;

fn dialog_value(page: &ProgramsPage) -> serde_json::Value {
    json!({
        "open": page.dialog_open,
        "mode": if page.current.is_some() { "edit" } else { "create" },
        "currentId": page.current.as_ref().map(|p| p.id.clone()),
        "draft": &page.draft,
    })
}

fn table_value(page: &ProgramsPage) -> serde_json::Value {
    let view = page.table.view(&page.items, page.loading, sort_value);
    json!({ "table": view })
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        programs,
        ..
    } = state;
    programs.open(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({
            "programs": &programs.items,
            "programTypes": &programs.program_types,
            "loading": programs.loading,
        }),
    )
}

fn handle_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, table_value(&state.programs))
}

fn handle_table_sort(state: &mut AppState, req: &Request) -> serde_json::Value {
    let column = match required_str(req, "column") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    state.programs.table.toggle_sort(&column);
    ok(&req.id, table_value(&state.programs))
}

fn handle_table_page(state: &mut AppState, req: &Request) -> serde_json::Value {
    let direction = match required_str(req, "direction") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let row_count = state.programs.items.len();
    match direction.as_str() {
        "next" => state.programs.table.page_next(row_count),
        "prev" => state.programs.table.page_prev(),
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("unknown direction: {other}"),
                None,
            )
        }
    }
    ok(&req.id, table_value(&state.programs))
}

fn handle_dialog_open_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.programs.begin_create();
    ok(&req.id, dialog_value(&state.programs))
}

fn handle_dialog_open_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.programs.begin_edit(&id) {
        return err(&req.id, "not_found", "program not found", None);
    }
    ok(&req.id, dialog_value(&state.programs))
}

fn handle_dialog_patch(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft = &mut state.programs.draft;
    if let Some(name) = opt_str(req, "name") {
        draft.name = name;
    }
    if let Some(acronym) = opt_str(req, "acronym") {
        draft.acronym = acronym;
    }
    if let Some(type_id) = opt_str(req, "programTypeId") {
        draft.program_type_id = type_id;
    }
    ok(&req.id, dialog_value(&state.programs))
}

async fn handle_dialog_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        programs,
        ..
    } = state;
    let saved = programs.submit(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({
            "saved": saved,
            "dialog": dialog_value(programs),
            "programs": &programs.items,
        }),
    )
}

fn handle_dialog_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.programs.close_dialog();
    ok(&req.id, dialog_value(&state.programs))
}

fn handle_delete_stage(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.programs.items.iter().any(|p| p.id == id) {
        return err(&req.id, "not_found", "program not found", None);
    }
    state.programs.table.stage_delete(&id);
    ok(&req.id, json!({ "stagedId": id }))
}

fn handle_delete_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.programs.table.cancel_delete();
    ok(&req.id, json!({ "stagedId": serde_json::Value::Null }))
}

async fn handle_delete_confirm(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        programs,
        ..
    } = state;
    let deleted = programs.confirm_delete(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({ "deletedId": deleted, "programs": &programs.items }),
    )
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    Some(match req.method.as_str() {
        "programs.open" => handle_open(state, req).await,
        "programs.view" => handle_view(state, req),
        "programs.table.sort" => handle_table_sort(state, req),
        "programs.table.page" => handle_table_page(state, req),
        "programs.dialog.openCreate" => handle_dialog_open_create(state, req),
        "programs.dialog.openEdit" => handle_dialog_open_edit(state, req),
        "programs.dialog.patch" => handle_dialog_patch(state, req),
        "programs.dialog.submit" => handle_dialog_submit(state, req).await,
        "programs.dialog.close" => handle_dialog_close(state, req),
        "programs.delete.stage" => handle_delete_stage(state, req),
        "programs.delete.cancel" => handle_delete_cancel(state, req),
        "programs.delete.confirm" => handle_delete_confirm(state, req).await,
        _ => return None,
    })
}
