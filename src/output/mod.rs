//! Rendering, reports and exports

pub mod export;
pub mod formatter;
pub mod pdf;
pub mod report;

pub use export::{copy_as_text, suggest_filename, write_export};
pub use formatter::{to_html, to_json, to_plain_text, OutputFormatter, ReportGenerator, StyleOptions};
pub use pdf::{export_pdf, PdfExport, PdfRasterizer, PrintPdfRasterizer};
pub use report::{AtsReport, ConsoleFormatter};
