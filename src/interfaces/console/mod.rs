mod report;

pub use report::{render_failure, render_report};
