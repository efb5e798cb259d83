use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("no route found for: {}", path.as_deref().unwrap_or("undefined")))]
    RouteNotFound { path: Option<String> },

    #[snafu(display("Invalid history state: {source}"))]
    HistoryState { source: serde_json::Error },

    #[snafu(display("Terminal error: {source}"))]
    Terminal { source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
