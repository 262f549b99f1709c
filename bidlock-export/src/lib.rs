pub mod report;

pub use report::{ReportError, exportable, render_html, write_csv};
