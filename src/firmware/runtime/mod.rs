mod bootstrap;
mod filter_task;
mod http;
mod link_task;
mod radio;
mod reset;

pub use bootstrap::run;
