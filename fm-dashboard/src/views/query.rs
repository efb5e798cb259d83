use fm_webui::{Container, QueryMap, View};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Shows the query in `q` together with every parameter the view received.
#[derive(Default)]
pub struct QueryView;

impl View for QueryView {
    fn render(&mut self, container: &mut Container, query: &QueryMap) {
        container.clear();
        container.set_title("Query");

        match query.get("q").filter(|q| !q.trim().is_empty()) {
            Some(q) => {
                container.push_line(Line::styled(" Query:", Style::default().fg(Color::DarkGray)));
                for line in q.lines() {
                    container.push_line(Line::styled(
                        format!("   {line}"),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ));
                }
            }
            None => container.push_line(Line::styled(
                " No query given. Try #path=query&q=SELECT * FROM cpu.load",
                Style::default().fg(Color::DarkGray),
            )),
        }

        container.push_line("");
        container.push_line(Line::styled(" Parameters:", Style::default().fg(Color::DarkGray)));
        for (key, value) in query.iter() {
            container.push_line(Line::from(vec![
                Span::styled(format!("   {key}"), Style::default().fg(Color::Cyan)),
                Span::raw(format!(" = {value}")),
            ]));
        }
    }
}
