use crate::model::{self, Metric};
use fm_webui::{Container, QueryMap, View};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const DEFAULT_RANGE: &str = "1h";

/// Overview of every metric with its latest value and trend.
#[derive(Default)]
pub struct DashboardView;

impl DashboardView {
    fn row(metric: &Metric) -> Line<'static> {
        let latest = metric
            .latest()
            .map(|v| format!("{v:>10.2} {}", metric.unit))
            .unwrap_or_else(|| "         - ".to_string());
        Line::from(vec![
            Span::styled(format!(" {:<16}", metric.key), Style::default().fg(Color::Cyan)),
            Span::raw(latest),
            Span::raw("  "),
            Span::styled(metric.sparkline(), Style::default().fg(Color::Green)),
        ])
    }
}

impl View for DashboardView {
    fn render(&mut self, container: &mut Container, query: &QueryMap) {
        let range = query.get("range").unwrap_or(DEFAULT_RANGE);

        container.clear();
        container.set_title("Dashboard");
        container.push_line(Line::from(vec![
            Span::styled(" Time range: ", Style::default().fg(Color::DarkGray)),
            Span::styled(range.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        container.push_line("");
        for metric in model::METRICS {
            container.push_line(Self::row(metric));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_all_metrics() {
        let mut container = Container::viewport();
        DashboardView.render(&mut container, &QueryMap::parse("path=dashboard"));

        assert_eq!(container.title(), Some("Dashboard"));
        let text = container.text();
        assert!(text.starts_with(" Time range: 1h"));
        for metric in model::METRICS {
            assert!(text.contains(metric.key));
        }
    }

    #[test]
    fn test_render_honors_range() {
        let mut container = Container::viewport();
        DashboardView.render(&mut container, &QueryMap::parse("path=dashboard&range=24h"));
        assert!(container.text().starts_with(" Time range: 24h"));
    }
}
