//! Sample metric catalog shown by the dashboard views.

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub key: &'static str,
    pub description: &'static str,
    pub unit: &'static str,
    pub samples: &'static [f64],
}

impl Metric {
    pub fn latest(&self) -> Option<f64> {
        self.samples.last().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// One block character per sample, scaled to the series maximum.
    pub fn sparkline(&self) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let Some(max) = self.max().filter(|m| *m > 0.0) else {
            return String::new();
        };
        self.samples
            .iter()
            .map(|v| {
                let idx = ((v / max) * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            })
            .collect()
    }
}

pub static METRICS: &[Metric] = &[
    Metric {
        key: "cpu.load",
        description: "Load average over one minute",
        unit: "",
        samples: &[0.42, 0.51, 0.47, 0.88, 1.20, 0.95, 0.61, 0.58],
    },
    Metric {
        key: "mem.used",
        description: "Resident memory in use",
        unit: "MB",
        samples: &[512.0, 530.0, 548.0, 560.0, 555.0, 570.0, 590.0, 601.0],
    },
    Metric {
        key: "http.requests",
        description: "Requests served per second",
        unit: "req/s",
        samples: &[120.0, 180.0, 240.0, 210.0, 260.0, 300.0, 280.0, 310.0],
    },
    Metric {
        key: "http.errors",
        description: "5xx responses per second",
        unit: "req/s",
        samples: &[0.0, 1.0, 0.0, 3.0, 2.0, 0.0, 0.0, 1.0],
    },
    Metric {
        key: "disk.io",
        description: "Disk throughput",
        unit: "MB/s",
        samples: &[12.0, 14.5, 9.0, 22.0, 18.0, 16.5, 11.0, 13.0],
    },
];

pub fn find(key: &str) -> Option<&'static Metric> {
    METRICS.iter().find(|m| m.key == key)
}

/// Metrics whose key contains `filter`. An empty filter matches everything.
pub fn filtered(filter: &str) -> impl Iterator<Item = &'static Metric> + '_ {
    METRICS.iter().filter(move |m| m.key.contains(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_filter() {
        assert_eq!(find("cpu.load").map(|m| m.unit), Some(""));
        assert!(find("nope").is_none());
        assert_eq!(filtered("http").count(), 2);
        assert_eq!(filtered("").count(), METRICS.len());
    }

    #[test]
    fn test_stats() {
        let metric = find("http.errors").expect("metric exists");
        assert_eq!(metric.latest(), Some(1.0));
        assert_eq!(metric.max(), Some(3.0));
        assert_eq!(metric.mean(), Some(7.0 / 8.0));
        assert_eq!(metric.sparkline(), "▁▃▁█▆▁▁▃");
    }
}
