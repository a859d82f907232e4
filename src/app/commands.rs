//! Command handlers - business logic for processing UI events

use crate::app::modal::{LinkAction, Modal, MuseumLookup};
use crate::app::state::Notice;
use crate::app::AppState;
use crate::form::{FormMode, FormState, ValidationError};
use crate::messages::{NetworkCommand, NetworkResponse, Operation};
use crate::models::{RecordId, ResourceKind, CURATOR_LINK_FIELDS};
use crate::network::ApiError;
use crate::routes::Route;
use crate::store::Change;

impl AppState {
    // ========================
    // Navigation shell
    // ========================

    /// Mount `route`: close any popup and (re)load its collection
    pub fn mount(&mut self, route: Route) -> NetworkCommand {
        self.route = route;
        self.modal = Modal::Closed;
        self.reload()
    }

    pub fn switch_route(&mut self, route: Route) -> Option<NetworkCommand> {
        if route == self.route {
            return None;
        }
        Some(self.mount(route))
    }

    pub fn next_route(&mut self) -> Option<NetworkCommand> {
        self.switch_route(self.route.next())
    }

    pub fn reload(&mut self) -> NetworkCommand {
        let id = self.next_id();
        let kind = self.route.resource();
        self.view_mut(kind).begin_load(id);
        NetworkCommand::FetchAll { id, kind }
    }

    // ========================
    // List view
    // ========================

    pub fn select_next(&mut self) {
        self.active_view_mut().select_next();
    }

    pub fn select_prev(&mut self) {
        self.active_view_mut().select_prev();
    }

    pub fn view_selected(&mut self) {
        let view = self.active_view();
        if let Some(record) = view.selected_record() {
            self.modal = Modal::Viewing {
                kind: view.kind,
                record: record.clone(),
            };
        }
    }

    pub fn add_record(&mut self) {
        let kind = self.route.resource();
        self.modal = Modal::Adding {
            kind,
            form: FormState::new(kind.schema(), None),
        };
    }

    pub fn edit_selected(&mut self) {
        let view = self.active_view();
        if let Some(record) = view.selected_record() {
            self.modal = Modal::Editing {
                kind: view.kind,
                form: FormState::new(view.kind.schema(), Some(record)),
                record: record.clone(),
            };
        }
    }

    pub fn delete_selected(&mut self) {
        let view = self.active_view();
        if let Some(record) = view.selected_record() {
            self.modal = Modal::ConfirmDelete {
                kind: view.kind,
                record: record.clone(),
            };
        }
    }

    /// The confirmation dialog closes as soon as the call is issued
    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        if !matches!(self.modal, Modal::ConfirmDelete { .. }) {
            return None;
        }
        let Modal::ConfirmDelete { kind, record } = std::mem::take(&mut self.modal) else {
            return None;
        };
        let id = self.next_id();
        Some(NetworkCommand::Remove {
            id,
            kind,
            record_id: record.id,
        })
    }

    pub fn show_curator_museums(&mut self) -> Option<NetworkCommand> {
        if self.route != Route::Curators {
            return None;
        }
        let curator = self.curators.selected_record()?.clone();
        let id = self.next_id();
        let curator_id = curator.id;
        self.modal = Modal::CuratorMuseums {
            curator,
            request_id: id,
            result: MuseumLookup::Loading,
        };
        Some(NetworkCommand::FetchCuratorMuseums { id, curator_id })
    }

    pub fn open_link(&mut self, action: LinkAction) {
        if self.route != Route::Museums {
            return;
        }
        if let Some(museum) = self.museums.selected_record() {
            self.modal = Modal::Linking {
                museum: museum.clone(),
                action,
                form: FormState::new(CURATOR_LINK_FIELDS, None),
            };
        }
    }

    /// Cancel discards all edits
    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    // ========================
    // Form editing
    // ========================

    pub fn with_form(&mut self, edit: impl FnOnce(&mut FormState)) {
        if let Some(form) = self.modal.form_mut() {
            edit(form);
        }
    }

    /// Validate the open form and issue its call; `None` when blocked
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.modal.form().map_or(true, FormState::is_pending) {
            return None;
        }
        let id = self.next_id();

        match &mut self.modal {
            Modal::Adding { kind, form } => {
                let values = form.submit().ok()?;
                form.mark_pending(id);
                Some(NetworkCommand::Create { id, kind: *kind, values })
            }
            Modal::Editing { kind, form, .. } => {
                let FormMode::Edit(record_id) = form.mode() else {
                    return None;
                };
                let values = form.submit().ok()?;
                form.mark_pending(id);
                Some(NetworkCommand::Update {
                    id,
                    kind: *kind,
                    record_id,
                    values,
                })
            }
            Modal::Linking { museum, action, form } => {
                let values = form.submit().ok()?;
                let curator_id = match values.get("curadorId").unwrap_or_default().parse::<RecordId>() {
                    Ok(curator_id) => curator_id,
                    Err(_) => {
                        form.reject(ValidationError {
                            field: "curadorId",
                            label: CURATOR_LINK_FIELDS[0].label,
                            message: "El ID del curador debe ser numérico".to_string(),
                        });
                        return None;
                    }
                };
                form.mark_pending(id);
                let museum_id = museum.id;
                Some(match action {
                    LinkAction::Assign => NetworkCommand::AssignCurator { id, museum_id, curator_id },
                    LinkAction::Unassign => NetworkCommand::UnassignCurator { id, museum_id, curator_id },
                })
            }
            _ => None,
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();

        match response {
            NetworkResponse::Fetched { id, kind, records } => {
                let count = records.len();
                if self.view_mut(kind).finish_load(id, records) {
                    tracing::info!(id, resource = %kind, count, "Collection loaded");
                    self.notice = None;
                } else {
                    tracing::debug!(id, resource = %kind, "Ignoring superseded load");
                }
            }
            NetworkResponse::Created { kind, record, .. } => {
                let label = record.values.first().cloned().unwrap_or_default();
                self.view_mut(kind).apply(Change::Created(record));
                self.close_form_for(response_id);
                self.notice = Some(Notice::info(format!("{} agregado: {}", kind.singular(), label)));
            }
            NetworkResponse::Updated { kind, record, .. } => {
                let record_id = record.id;
                self.view_mut(kind).apply(Change::Updated(record));
                self.close_form_for(response_id);
                self.notice = Some(Notice::info(format!("{} {} actualizado", kind.singular(), record_id)));
            }
            NetworkResponse::Removed { kind, record_id, .. } => {
                self.view_mut(kind).apply(Change::Removed(record_id));
                self.notice = Some(Notice::info(format!("{} {} eliminado", kind.singular(), record_id)));
            }
            NetworkResponse::CuratorMuseums { id, museums } => {
                if let Modal::CuratorMuseums { request_id, result, .. } = &mut self.modal {
                    if *request_id == id {
                        *result = MuseumLookup::Loaded(museums);
                    }
                }
            }
            NetworkResponse::CuratorAssigned { museum_id, curator_id, .. } => {
                self.close_form_for(response_id);
                self.notice = Some(Notice::info(format!(
                    "Curador {curator_id} asignado al museo {museum_id}"
                )));
            }
            NetworkResponse::CuratorUnassigned { museum_id, curator_id, .. } => {
                self.close_form_for(response_id);
                self.notice = Some(Notice::info(format!(
                    "Curador {curator_id} desasignado del museo {museum_id}"
                )));
            }
            NetworkResponse::Failed { id, kind, operation, error } => {
                self.handle_failure(id, kind, operation, error);
            }
        }
    }

    fn handle_failure(&mut self, id: u64, kind: ResourceKind, operation: Operation, error: ApiError) {
        let message = error.user_message();
        let text = format!("{}: {}", operation.failure_text(kind), message);

        match operation {
            Operation::Fetch => {
                if !self.view_mut(kind).fail_load(id) {
                    return;
                }
            }
            Operation::CuratorMuseums => {
                if let Modal::CuratorMuseums { request_id, result, .. } = &mut self.modal {
                    if *request_id == id {
                        // The museums service answers 404 for a curator with no museums
                        *result = if error.is_not_found() {
                            MuseumLookup::Loaded(Vec::new())
                        } else {
                            MuseumLookup::Failed(message)
                        };
                    }
                }
                return;
            }
            Operation::Create | Operation::Update | Operation::AssignCurator | Operation::UnassignCurator => {
                // Keep the form open so the user can retry
                if self.modal.is_waiting_on(id) {
                    self.with_form(FormState::clear_pending);
                }
            }
            Operation::Remove => {}
        }

        self.notice = Some(Notice::error(text));
    }

    fn close_form_for(&mut self, id: u64) {
        if self.modal.is_waiting_on(id) {
            self.modal = Modal::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeLevel;
    use crate::app::view::ViewPhase;
    use crate::models::Record;

    fn louvre(ubicacion: &str) -> Record {
        Record::new(RecordId(1), vec!["Louvre".into(), ubicacion.into()])
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.with_form(|f| f.enter_char(c));
        }
    }

    fn mounted() -> (AppState, u64) {
        let mut state = AppState::new();
        let NetworkCommand::FetchAll { id, kind } = state.mount(Route::Museums) else {
            panic!("mount must fetch");
        };
        assert_eq!(kind, ResourceKind::Museum);
        (state, id)
    }

    fn ready_with(records: Vec<Record>) -> AppState {
        let (mut state, id) = mounted();
        state.handle_response(NetworkResponse::Fetched {
            id,
            kind: ResourceKind::Museum,
            records,
        });
        state
    }

    #[test]
    fn mount_enters_loading_until_fetch_returns() {
        let (mut state, id) = mounted();
        assert!(state.museums.is_loading());

        state.handle_response(NetworkResponse::Fetched {
            id,
            kind: ResourceKind::Museum,
            records: vec![louvre("Paris")],
        });
        assert_eq!(state.museums.phase, ViewPhase::Ready);
        assert_eq!(state.museums.records(), &[louvre("Paris")]);
    }

    #[test]
    fn superseded_load_is_ignored() {
        let (mut state, first) = mounted();
        let NetworkCommand::FetchAll { id: second, .. } = state.reload() else {
            panic!("reload must fetch");
        };

        state.handle_response(NetworkResponse::Fetched {
            id: first,
            kind: ResourceKind::Museum,
            records: vec![louvre("Paris")],
        });
        assert!(state.museums.is_loading());
        assert!(state.museums.records().is_empty());

        state.handle_response(NetworkResponse::Failed {
            id: first,
            kind: ResourceKind::Museum,
            operation: Operation::Fetch,
            error: ApiError::Transport("refused".into()),
        });
        assert!(state.notice.is_none());

        state.handle_response(NetworkResponse::Fetched {
            id: second,
            kind: ResourceKind::Museum,
            records: vec![louvre("Lyon")],
        });
        assert_eq!(state.museums.records(), &[louvre("Lyon")]);
    }

    #[test]
    fn empty_form_issues_no_call() {
        let mut state = ready_with(vec![]);
        state.add_record();
        type_text(&mut state, "Louvre");

        assert!(state.submit().is_none());
        let form = state.modal.form().unwrap();
        assert_eq!(form.error().unwrap().field, "ubicacion");
        assert!(!form.is_pending());
    }

    #[test]
    fn louvre_create_scenario() {
        let mut state = ready_with(vec![]);
        state.add_record();
        type_text(&mut state, "Louvre");
        state.with_form(FormState::next_field);
        type_text(&mut state, "Paris");

        let Some(NetworkCommand::Create { id, kind, values }) = state.submit() else {
            panic!("expected a create call");
        };
        assert_eq!(kind, ResourceKind::Museum);
        assert_eq!(values.get("nombre"), Some("Louvre"));
        assert!(state.submit().is_none(), "pending form must not resubmit");

        state.handle_response(NetworkResponse::Created {
            id,
            kind,
            record: louvre("Paris"),
        });
        assert!(matches!(state.modal, Modal::Closed));
        assert_eq!(state.museums.records(), &[louvre("Paris")]);
    }

    #[test]
    fn update_scenario_keeps_other_fields() {
        let prado = Record::new(RecordId(2), vec!["Prado".into(), "Madrid".into()]);
        let mut state = ready_with(vec![louvre("Paris"), prado.clone()]);
        state.edit_selected();
        state.with_form(FormState::next_field);
        type_text(&mut state, ", France");

        let Some(NetworkCommand::Update { id, record_id, values, kind }) = state.submit() else {
            panic!("expected an update call");
        };
        assert_eq!(record_id, RecordId(1));
        assert_eq!(values.get("nombre"), Some("Louvre"));
        assert_eq!(values.get("ubicacion"), Some("Paris, France"));

        state.handle_response(NetworkResponse::Updated {
            id,
            kind,
            record: louvre("Paris, France"),
        });
        assert_eq!(state.museums.records(), &[louvre("Paris, France"), prado]);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = ready_with(vec![louvre("Paris")]);
        state.delete_selected();
        assert!(matches!(state.modal, Modal::ConfirmDelete { .. }));

        state.close_modal();
        assert!(state.confirm_delete().is_none());

        state.delete_selected();
        let Some(NetworkCommand::Remove { id, kind, record_id }) = state.confirm_delete() else {
            panic!("expected a remove call");
        };
        assert!(matches!(state.modal, Modal::Closed));

        state.handle_response(NetworkResponse::Removed { id, kind, record_id });
        assert!(state.museums.records().is_empty());
    }

    #[test]
    fn failed_delete_keeps_row_and_shows_notice() {
        let mut state = ready_with(vec![louvre("Paris")]);
        state.delete_selected();
        let cmd = state.confirm_delete().unwrap();

        state.handle_response(NetworkResponse::Failed {
            id: match cmd {
                NetworkCommand::Remove { id, .. } => id,
                _ => unreachable!(),
            },
            kind: ResourceKind::Museum,
            operation: Operation::Remove,
            error: ApiError::Status {
                status: 404,
                message: Some("Museo no encontrado".into()),
            },
        });

        assert_eq!(state.museums.records(), &[louvre("Paris")]);
        let notice = state.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, "Error al eliminar museo: Museo no encontrado");
    }

    #[test]
    fn failed_fetch_yields_empty_ready_view_with_notice() {
        let (mut state, id) = mounted();
        state.handle_response(NetworkResponse::Failed {
            id,
            kind: ResourceKind::Museum,
            operation: Operation::Fetch,
            error: ApiError::Transport("connection refused".into()),
        });

        assert_eq!(state.museums.phase, ViewPhase::Ready);
        assert!(state.museums.records().is_empty());
        assert_eq!(state.notice.unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn failed_create_keeps_form_open_for_retry() {
        let mut state = ready_with(vec![]);
        state.add_record();
        type_text(&mut state, "Louvre");
        state.with_form(FormState::next_field);
        type_text(&mut state, "Paris");
        let id = state.submit().map(|cmd| match cmd {
            NetworkCommand::Create { id, .. } => id,
            _ => unreachable!(),
        });

        state.handle_response(NetworkResponse::Failed {
            id: id.unwrap(),
            kind: ResourceKind::Museum,
            operation: Operation::Create,
            error: ApiError::Status { status: 500, message: None },
        });

        let form = state.modal.form().expect("form stays open");
        assert!(!form.is_pending());
        assert_eq!(form.inputs()[0], "Louvre");
        assert!(state.submit().is_some());
    }

    #[test]
    fn switching_route_remounts_the_target_view() {
        let (mut state, _) = mounted();
        assert!(state.switch_route(Route::Museums).is_none());

        let Some(NetworkCommand::FetchAll { kind, .. }) = state.next_route() else {
            panic!("expected a fetch");
        };
        assert_eq!(kind, ResourceKind::Curator);
        assert_eq!(state.route, Route::Curators);
        assert!(state.curators.is_loading());
    }

    #[test]
    fn curator_museums_lookup_fills_dialog() {
        let mut state = AppState::new();
        let NetworkCommand::FetchAll { id, .. } = state.mount(Route::Curators) else {
            unreachable!()
        };
        let ana = Record::new(RecordId(1), vec!["Ana".into(), "Arte Moderno".into(), "1980-04-02".into()]);
        state.handle_response(NetworkResponse::Fetched {
            id,
            kind: ResourceKind::Curator,
            records: vec![ana],
        });

        let Some(NetworkCommand::FetchCuratorMuseums { id, curator_id }) = state.show_curator_museums() else {
            panic!("expected a lookup");
        };
        assert_eq!(curator_id, RecordId(1));

        state.handle_response(NetworkResponse::CuratorMuseums {
            id,
            museums: vec![louvre("Paris")],
        });
        let Modal::CuratorMuseums { result, .. } = &state.modal else {
            panic!("dialog closed");
        };
        assert_eq!(result, &MuseumLookup::Loaded(vec![louvre("Paris")]));
    }

    #[test]
    fn link_form_rejects_non_numeric_curator_id() {
        let mut state = ready_with(vec![louvre("Paris")]);
        state.open_link(LinkAction::Assign);
        type_text(&mut state, "abc");
        assert!(state.submit().is_none());
        assert_eq!(
            state.modal.form().unwrap().error().unwrap().message,
            "El ID del curador debe ser numérico"
        );

        state.with_form(|f| {
            for _ in 0..3 {
                f.delete_char();
            }
        });
        type_text(&mut state, "4");
        let Some(NetworkCommand::AssignCurator { museum_id, curator_id, .. }) = state.submit() else {
            panic!("expected an assign call");
        };
        assert_eq!((museum_id, curator_id), (RecordId(1), RecordId(4)));
    }

    #[test]
    fn successful_reload_clears_fetch_error_notice() {
        let (mut state, id) = mounted();
        state.handle_response(NetworkResponse::Failed {
            id,
            kind: ResourceKind::Museum,
            operation: Operation::Fetch,
            error: ApiError::Transport("refused".into()),
        });
        assert!(state.notice.is_some());

        let NetworkCommand::FetchAll { id, kind } = state.reload() else {
            panic!("reload must fetch");
        };
        state.handle_response(NetworkResponse::Fetched {
            id,
            kind,
            records: vec![louvre("Paris")],
        });

        assert_eq!(state.museums.records().len(), 1);
        assert!(state.notice.is_none());
    }

    #[test]
    fn failed_update_keeps_snapshot_and_editing_form() {
        let mut state = ready_with(vec![louvre("Paris")]);
        state.edit_selected();
        state.with_form(FormState::next_field);
        type_text(&mut state, ", France");
        let Some(NetworkCommand::Update { id, .. }) = state.submit() else {
            panic!("expected an update call");
        };

        state.handle_response(NetworkResponse::Failed {
            id,
            kind: ResourceKind::Museum,
            operation: Operation::Update,
            error: ApiError::Status {
                status: 404,
                message: Some("Museo no encontrado".into()),
            },
        });

        assert_eq!(state.museums.records(), &[louvre("Paris")]);
        let Modal::Editing { form, .. } = &state.modal else {
            panic!("editing form closed");
        };
        assert!(!form.is_pending());
        assert_eq!(form.inputs()[1], "Paris, France");
        assert_eq!(
            state.notice.as_ref().unwrap().text,
            "Error al actualizar museo: Museo no encontrado"
        );
    }

    #[test]
    fn curator_without_museums_shows_empty_list() {
        let mut state = AppState::new();
        let NetworkCommand::FetchAll { id, .. } = state.mount(Route::Curators) else {
            unreachable!()
        };
        let ana = Record::new(RecordId(1), vec!["Ana".into(), "Arte Moderno".into(), String::new()]);
        state.handle_response(NetworkResponse::Fetched {
            id,
            kind: ResourceKind::Curator,
            records: vec![ana],
        });
        let Some(NetworkCommand::FetchCuratorMuseums { id, .. }) = state.show_curator_museums() else {
            panic!("expected a lookup");
        };

        state.handle_response(NetworkResponse::Failed {
            id,
            kind: ResourceKind::Curator,
            operation: Operation::CuratorMuseums,
            error: ApiError::Status {
                status: 404,
                message: Some("El curador no trabaja en ningún museo".into()),
            },
        });

        let Modal::CuratorMuseums { result, .. } = &state.modal else {
            panic!("dialog closed");
        };
        assert_eq!(result, &MuseumLookup::Loaded(Vec::new()));
        assert!(state.notice.is_none());
    }
}
