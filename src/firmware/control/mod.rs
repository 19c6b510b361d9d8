//! Tiny HTTP control surface: status page plus the EQ gain endpoint.

mod query;
mod routes;
mod sink;
#[cfg(test)]
mod tests;

pub use query::parse_gain_query;
pub use routes::{
    find_header_end, parse_request_line, render_status, resolve_route, target_path, Route,
    StatusBody,
};
pub use sink::{apply_gain_update, FilterSink, LoggingFilterSink};
