//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::modal::LinkAction;
use crate::app::state::AppState;
use crate::form::FormState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::routes::Route;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    initial_route: Route,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        initial_route: Route,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            initial_route,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let cmd = self.state.mount(self.initial_route);
        self.send(Some(cmd));
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation shell
            UiEvent::SwitchRoute(route) => {
                let cmd = self.state.switch_route(route);
                self.send(cmd);
            }
            UiEvent::NextRoute => {
                let cmd = self.state.next_route();
                self.send(cmd);
            }

            // List view
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::Reload => {
                let cmd = self.state.reload();
                self.send(Some(cmd));
            }
            UiEvent::ViewSelected => self.state.view_selected(),
            UiEvent::AddRecord => self.state.add_record(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::DeleteSelected => self.state.delete_selected(),
            UiEvent::ShowCuratorMuseums => {
                let cmd = self.state.show_curator_museums();
                self.send(cmd);
            }
            UiEvent::AssignCurator => self.state.open_link(LinkAction::Assign),
            UiEvent::UnassignCurator => self.state.open_link(LinkAction::Unassign),

            // Form editing
            UiEvent::NextField => self.state.with_form(FormState::next_field),
            UiEvent::PrevField => self.state.with_form(FormState::prev_field),
            UiEvent::CharInput(c) => self.state.with_form(|f| f.enter_char(c)),
            UiEvent::Backspace => self.state.with_form(FormState::delete_char),
            UiEvent::CursorLeft => self.state.with_form(FormState::move_cursor_left),
            UiEvent::CursorRight => self.state.with_form(FormState::move_cursor_right),
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.send(cmd);
            }

            // Dialogs
            UiEvent::ConfirmDelete => {
                let cmd = self.state.confirm_delete();
                self.send(cmd);
            }
            UiEvent::CloseModal => self.state.close_modal(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
