mod counters;
#[cfg(test)]
mod tests;

pub use counters::{LinkCounters, LinkCountersSnapshot};
