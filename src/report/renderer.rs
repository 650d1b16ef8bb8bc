use crate::error::MergeError;
use crate::merge::aggregate::AggregateResult;
use crate::merge::options::ReportFormat;
use crate::report::html::HtmlRenderer;
use crate::report::junit::JunitRenderer;

/// Turns a finished aggregate into a document.
pub trait ReportRenderer {
    /// File name of the rendered document inside the report directory.
    fn file_name(&self) -> &str;

    fn render(&self, result: &AggregateResult) -> Result<String, MergeError>;
}

/// Build the renderer for an output format.
pub fn build_renderer(format: ReportFormat) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Html => Box::new(HtmlRenderer),
        ReportFormat::Junit => Box::new(JunitRenderer),
    }
}
