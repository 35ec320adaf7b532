//! ReportRoute Structuring Engine
//!
//! Schema-driven report extraction and configurable summarization

mod extract;
mod prompts;
mod schema;
mod summarize;

pub use extract::{repair, salvage_object, Extractor};
pub use prompts::{
    focus_directive, language_directive, length_directive, REPORT_SYSTEM_PROMPT,
    SUMMARY_SYSTEM_PROMPT,
};
pub use schema::{FieldDescriptor, FieldKind, ReportData, ReportTemplate};
pub use summarize::{report_template, Summarizer, SummaryOptions, SummaryResult};
