use crate::model;
use fm_webui::{Container, QueryMap, View};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Detail page for the metric named by `name`.
#[derive(Default)]
pub struct MetricView;

fn stat(label: &str, value: Option<f64>, unit: &str) -> Line<'static> {
    let value = value.map_or_else(|| "-".to_string(), |v| format!("{v:.2} {unit}"));
    Line::from(vec![
        Span::styled(format!(" {label:<8}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value.trim_end().to_string()),
    ])
}

impl View for MetricView {
    fn render(&mut self, container: &mut Container, query: &QueryMap) {
        container.clear();

        let Some(name) = query.get("name") else {
            container.set_title("Metric");
            container.push_line(Line::styled(
                " Missing 'name' parameter",
                Style::default().fg(Color::Yellow),
            ));
            return;
        };

        container.set_title(format!("Metric {name}"));
        let Some(metric) = model::find(name) else {
            container.push_line(Line::styled(
                format!(" Unknown metric: {name}"),
                Style::default().fg(Color::Red),
            ));
            return;
        };

        container.push_line(Line::styled(
            format!(" {}", metric.description),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
        container.push_line("");
        container.push_line(stat("latest", metric.latest(), metric.unit));
        container.push_line(stat("mean", metric.mean(), metric.unit));
        container.push_line(stat("max", metric.max(), metric.unit));
        container.push_line("");
        container.push_line(Line::styled(
            format!(" {}", metric.sparkline()),
            Style::default().fg(Color::Green),
        ));
    }
}
