use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_i64, opt_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::pages::levels::sort_value;
use crate::pages::LevelsPage;

fn dialog_value(page: &LevelsPage) -> serde_json::Value {
    json!({
        "open": page.dialog_open,
        "mode": if page.current.is_some() { "edit" } else { "create" },
        "currentId": page.current.as_ref().map(|l| l.id.clone()),
        "draft": &page.draft,
    })
}

fn table_value(page: &LevelsPage) -> serde_json::Value {
    let view = page.table.view(&page.items, page.loading, sort_value);
    json!({ "table": view })
}

async fn handle_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        levels,
        ..
    } = state;
    levels.open(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({
            "levels": &levels.items,
            "programs": &levels.programs,
            "loading": levels.loading,
        }),
    )
}

fn handle_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, table_value(&state.levels))
}

fn handle_table_sort(state: &mut AppState, req: &Request) -> serde_json::Value {
    let column = match required_str(req, "column") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    state.levels.table.toggle_sort(&column);
    ok(&req.id, table_value(&state.levels))
}

fn handle_table_page(state: &mut AppState, req: &Request) -> serde_json::Value {
    let direction = match required_str(req, "direction") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let row_count = state.levels.items.len();
    match direction.as_str() {
        "next" => state.levels.table.page_next(row_count),
        "prev" => state.levels.table.page_prev(),
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("unknown direction: {other}"),
                None,
            )
        }
    }
    ok(&req.id, table_value(&state.levels))
}

fn handle_dialog_open_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.levels.begin_create();
    ok(&req.id, dialog_value(&state.levels))
}

fn handle_dialog_open_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.levels.begin_edit(&id) {
        return err(&req.id, "not_found", "level not found", None);
    }
    ok(&req.id, dialog_value(&state.levels))
}

fn handle_dialog_patch(state: &mut AppState, req: &Request) -> serde_json::Value {
    let draft = &mut state.levels.draft;
    if let Some(name) = opt_str(req, "name") {
        draft.name = name;
    }
    if let Some(acronym) = opt_str(req, "acronym") {
        draft.acronym = acronym;
    }
    if let Some(index) = opt_i64(req, "index") {
        draft.index = index;
    }
    ok(&req.id, dialog_value(&state.levels))
}

fn handle_dialog_toggle_program(state: &mut AppState, req: &Request) -> serde_json::Value {
    let program_id = match required_str(req, "programId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.levels.toggle_program(&program_id) {
        return err(&req.id, "not_found", "program not found", None);
    }
    ok(&req.id, dialog_value(&state.levels))
}

async fn handle_dialog_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        levels,
        ..
    } = state;
    let saved = levels.submit(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({
            "saved": saved,
            "dialog": dialog_value(levels),
            "levels": &levels.items,
        }),
    )
}

fn handle_dialog_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.levels.close_dialog();
    ok(&req.id, dialog_value(&state.levels))
}

fn handle_delete_stage(state: &mut AppState, req: &Request) -> serde_json::Value {
    let id = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.levels.items.iter().any(|l| l.id == id) {
        return err(&req.id, "not_found", "level not found", None);
    }
    state.levels.table.stage_delete(&id);
    ok(&req.id, json!({ "stagedId": id }))
}

fn handle_delete_cancel(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.levels.table.cancel_delete();
    ok(&req.id, json!({ "stagedId": serde_json::Value::Null }))
}

async fn handle_delete_confirm(state: &mut AppState, req: &Request) -> serde_json::Value {
    let AppState {
        backend,
        notifier,
        levels,
        ..
    } = state;
    let deleted = levels.confirm_delete(backend.as_ref(), notifier).await;
    ok(
        &req.id,
        json!({ "deletedId": deleted, "levels": &levels.items }),
    )
}

pub async fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    Some(match req.method.as_str() {
        "levels.open" => handle_open(state, req).await,
        "levels.view" => handle_view(state, req),
        "levels.table.sort" => handle_table_sort(state, req),
        "levels.table.page" => handle_table_page(state, req),
        "levels.dialog.openCreate" => handle_dialog_open_create(state, req),
        "levels.dialog.openEdit" => handle_dialog_open_edit(state, req),
        "levels.dialog.patch" => handle_dialog_patch(state, req),
        "levels.dialog.toggleProgram" => handle_dialog_toggle_program(state, req),
        "levels.dialog.submit" => handle_dialog_submit(state, req).await,
        "levels.dialog.close" => handle_dialog_close(state, req),
        "levels.delete.stage" => handle_delete_stage(state, req),
        "levels.delete.cancel" => handle_delete_cancel(state, req),
        "levels.delete.confirm" => handle_delete_confirm(state, req).await,
        _ => return None,
    })
}
