use ratatui::{prelude::*, widgets::*};

use crate::app::modal::{Modal, MuseumLookup};
use crate::app::state::NoticeLevel;
use crate::app::view::ListView;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::form::FormState;
use crate::messages::RenderState;
use crate::models::{Record, ResourceKind};
use crate::routes::Route;

// ============================================================================
// Shell
// ============================================================================

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Route tabs
            Constraint::Min(0),    // List view
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state.route, chunks[0]);
    draw_list_view(f, &state.view, chunks[1]);
    draw_status_bar(f, state, chunks[2]);

    draw_modal(f, &state.modal, area);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider("|")
}

fn draw_tab_bar(f: &mut Frame, route: Route, area: Rect) {
    let titles: Vec<String> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| format!(" {}:{} ", i + 1, r.title()))
        .collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

    f.render_widget(render_tabs(&titles, route.index()), area);
}

// ============================================================================
// List view
// ============================================================================

fn draw_list_view(f: &mut Frame, view: &ListView, area: Rect) {
    let title = format!(" Lista de {} ({}) ", view.kind.plural(), view.records().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    if view.is_loading() {
        let loading = Paragraph::new("Cargando...")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if view.records().is_empty() {
        let empty = Paragraph::new("Sin registros. Pulsa 'a' para agregar, 'r' para recargar.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let table = records_table(view.kind, view.records()).block(block);
    let mut table_state = TableState::default().with_selected(Some(view.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

/// Table widget with one column per table field of `kind`
pub fn records_table<'a>(kind: ResourceKind, records: &[Record]) -> Table<'a> {
    let columns = kind.table_columns();
    let header = Row::new(columns.iter().map(|c| Cell::from(*c)))
        .style(Style::default().fg(Color::Yellow).bold());

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(6))
        .chain((1..columns.len()).map(|_| Constraint::Fill(1)))
        .collect();

    let rows: Vec<Row> = records
        .iter()
        .map(|record| Row::new(record.table_cells(kind)))
        .collect();

    Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .highlight_symbol("> ")
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = match state.latest_notice() {
        Some(notice) => {
            let color = notice_color(notice.level);
            Paragraph::new(format!(" [{}] {} ", notice.timestamp.format("%H:%M:%S"), notice.text))
                .style(Style::default().fg(color))
        }
        None => {
            let extra = match state.route {
                Route::Museums => " | c/u:curador",
                Route::Curators => " | m:museos",
            };
            Paragraph::new(format!(
                " ↑↓:mover | Enter:ver | a:agregar | e:editar | d:eliminar | r:recargar{extra} | ?:ayuda | q:salir "
            ))
            .style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(bar, area);
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Error => Color::Red,
    }
}

// ============================================================================
// Popups
// ============================================================================

fn draw_modal(f: &mut Frame, modal: &Modal, area: Rect) {
    let title = format!(" {} ", modal.title());

    match modal {
        Modal::Closed => {}
        Modal::Adding { form, .. } => draw_form_popup(f, &title, None, form, area),
        Modal::Editing { record, form, .. } => {
            let subtitle = format!("ID: {}", record.id);
            draw_form_popup(f, &title, Some(subtitle), form, area)
        }
        Modal::Linking { museum, form, .. } => {
            let subtitle = format!(
                "Museo {}: {}",
                museum.id,
                museum.value(ResourceKind::Museum, "nombre").unwrap_or_default()
            );
            draw_form_popup(f, &title, Some(subtitle), form, area)
        }
        Modal::Viewing { kind, record } => draw_detail_popup(f, &title, *kind, record, area),
        Modal::ConfirmDelete { kind, record } => draw_confirm_popup(f, &title, *kind, record, area),
        Modal::CuratorMuseums { curator, result, .. } => {
            draw_curator_museums_popup(f, &title, curator, result, area)
        }
    }
}

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(Color::Black))
}

fn draw_form_popup(f: &mut Frame, title: &str, subtitle: Option<String>, form: &FormState, area: Rect) {
    let schema = form.schema();
    let height = (schema.len() as u16) * 3 + 5;
    let popup_area = centered_fixed(60, height, area);

    let title = if form.is_pending() {
        format!("{}(Guardando...) ", title)
    } else {
        title.to_string()
    };
    let block = popup_block(&title).title_bottom(
        Line::from(" Enter:guardar | Tab:siguiente | Esc:cancelar ").right_aligned(),
    );
    let inner = block.inner(popup_area);

    f.render_widget(Clear, popup_area);
    f.render_widget(block, popup_area);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(schema.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    if let Some(subtitle) = subtitle {
        f.render_widget(
            Paragraph::new(subtitle).style(Style::default().fg(Color::DarkGray)),
            rows[0],
        );
    }

    let error = form.error();
    for (i, (spec, input)) in schema.iter().zip(form.inputs()).enumerate() {
        let is_focused = i == form.focused();
        let has_error = error.map(|e| e.field) == Some(spec.name);
        let border_style = if has_error {
            Style::default().fg(Color::Red)
        } else if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let label = if spec.required {
            format!(" * {} ", spec.label)
        } else {
            format!(" {} ", spec.label)
        };

        let field_area = rows[i + 1];
        let field = Paragraph::new(input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(label),
        );
        f.render_widget(field, field_area);

        if is_focused && !form.is_pending() {
            let column = input[..form.cursor().min(input.len())].chars().count() as u16;
            let max_x = field_area.x + field_area.width.saturating_sub(2);
            let cursor_x = (field_area.x + column + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, field_area.y + 1));
        }
    }

    if let Some(err) = error {
        let message = Paragraph::new(err.message.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        f.render_widget(message, rows[schema.len() + 1]);
    }
}

fn draw_detail_popup(f: &mut Frame, title: &str, kind: ResourceKind, record: &Record, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled("ID: ", Style::default().bold()),
        Span::raw(record.id.to_string()),
    ])];
    for (spec, value) in kind.schema().iter().zip(&record.values) {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", spec.label), Style::default().bold()),
            Span::raw(value.clone()),
        ]));
    }

    let height = lines.len() as u16 + 4;
    let popup_area = centered_fixed(60, height, area);
    let detail = Paragraph::new(lines)
        .block(popup_block(title).title_bottom(Line::from(" Esc:cerrar ").right_aligned()))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(detail, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, title: &str, kind: ResourceKind, record: &Record, area: Rect) {
    let name = record.values.first().cloned().unwrap_or_default();
    let text = vec![
        Line::from(format!(
            "¿Seguro que deseas eliminar este {}?",
            kind.singular().to_lowercase()
        )),
        Line::from(""),
        Line::from(Span::styled(format!("{} ({})", name, record.id), Style::default().bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Red).bold()),
            Span::raw(": Sí   "),
            Span::styled("n", Style::default().bold()),
            Span::raw(": No"),
        ]),
    ];

    let popup_area = centered_fixed(50, 9, area);
    let confirm = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(popup_block(title).border_style(Style::default().fg(Color::Red)));

    f.render_widget(Clear, popup_area);
    f.render_widget(confirm, popup_area);
}

fn draw_curator_museums_popup(
    f: &mut Frame,
    title: &str,
    curator: &Record,
    result: &MuseumLookup,
    area: Rect,
) {
    let name = curator.value(ResourceKind::Curator, "nombre").unwrap_or_default();
    let mut lines = vec![
        Line::from(Span::styled(format!("{} ({})", name, curator.id), Style::default().bold())),
        Line::from(""),
    ];

    match result {
        MuseumLookup::Loading => {
            lines.push(Line::from(Span::styled("Cargando...", Style::default().fg(Color::Yellow))));
        }
        MuseumLookup::Loaded(museums) if museums.is_empty() => {
            lines.push(Line::from("El curador no trabaja en ningún museo"));
        }
        MuseumLookup::Loaded(museums) => {
            for museum in museums {
                let cells = museum.table_cells(ResourceKind::Museum);
                lines.push(Line::from(cells.join(" | ")));
            }
        }
        MuseumLookup::Failed(message) => {
            lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))));
        }
    }

    let height = (lines.len() as u16 + 4).min(area.height);
    let popup_area = centered_fixed(60, height, area);
    let list = Paragraph::new(lines)
        .block(popup_block(title).title_bottom(Line::from(" Esc:cerrar ").right_aligned()))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 Atajos de teclado

 NAVEGACIÓN
   1 / 2 / Tab        Museos / Curadores
   ↑ / ↓  (k / j)     Seleccionar fila
   r / F5             Recargar lista

 REGISTROS
   Enter / v          Ver detalles
   a                  Agregar
   e                  Editar
   d                  Eliminar (pide confirmación)
   m                  Museos del curador (Curadores)
   c / u              Asignar / desasignar curador (Museos)

 FORMULARIOS
   Tab / ↓            Siguiente campo
   Shift+Tab / ↑      Campo anterior
   Enter              Guardar
   Esc                Cancelar

 GENERAL
   ?                  Mostrar esta ayuda
   q / Ctrl+C         Salir

 Pulsa cualquier tecla para cerrar...
"#;

    let title = format!(" {} v{} - Ayuda ", APP_NAME, APP_VERSION);
    let help = Paragraph::new(help_text)
        .block(popup_block(&title))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

// ============================================================================
// Layout helpers
// ============================================================================

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered popup `percent_x` wide and `height` rows tall
fn centered_fixed(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    centered_rect(percent_x, 100, vertical[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use crate::store::Change;
    use ratatui::backend::TestBackend;

    fn render(state: &RenderState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn curators_state() -> RenderState {
        let mut view = ListView::new(ResourceKind::Curator);
        view.apply(Change::Fetched(vec![Record::new(
            RecordId(1),
            vec!["Ana".into(), "Arte Moderno".into(), "1980-04-02".into()],
        )]));
        RenderState {
            route: Route::Curators,
            view,
            ..RenderState::default()
        }
    }

    #[test]
    fn curator_table_renders_three_columns() {
        let lines = render(&curators_state());

        let header = lines.iter().find(|l| l.contains("Especialidad")).expect("header row");
        let labels: Vec<&str> = header
            .split(|c: char| c == '│' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(labels, vec!["ID", "Nombre", "Especialidad"]);

        let row = lines.iter().find(|l| l.contains("Arte Moderno")).expect("data row");
        assert!(row.contains("Ana"));
        assert!(!lines.iter().any(|l| l.contains("1980-04-02")));
    }

    #[test]
    fn form_popup_shows_validation_message() {
        let mut form = FormState::new(ResourceKind::Museum.schema(), None);
        form.submit().unwrap_err();
        let state = RenderState {
            modal: Modal::Adding {
                kind: ResourceKind::Museum,
                form,
            },
            ..RenderState::default()
        };

        let lines = render(&state);
        assert!(lines.iter().any(|l| l.contains("Agregar Museo")));
        assert!(lines.iter().any(|l| l.contains("El nombre es obligatorio")));
    }
}
