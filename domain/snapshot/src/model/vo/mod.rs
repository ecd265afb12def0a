mod monitoring;
mod report;
mod retention;
mod status;

#[rustfmt::skip]
pub use {
    monitoring::*,
    report::*,
    retention::*,
    status::*,
};
