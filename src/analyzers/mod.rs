pub mod javascript;
pub mod python;

use crate::core::errors::Result;
use crate::core::syntax::SourceModel;
use crate::core::Language;

/// Capability-polymorphic syntax adapter: one implementation per
/// supported grammar, selected by the request's language tag.
///
/// The native-grammar path yields a full structural tree with line
/// positions preserved; grammars without a full parser yield the raw
/// text for the extractors' line/token scans instead.
pub trait SyntaxAdapter {
    /// Validate the fragment against the declared grammar and lower it
    /// into the model the metric extractors consume. Fails with
    /// [`crate::core::errors::AnalyzeError::Syntax`] when the text does
    /// not parse; callers reject the request before any metric runs.
    fn parse(&self, source: &str) -> Result<SourceModel>;

    fn language(&self) -> Language;
}

/// Select the adapter for a language tag.
pub fn adapter_for(language: Language) -> Box<dyn SyntaxAdapter + Send + Sync> {
    match language {
        Language::Python => Box::new(python::PythonAdapter::new()),
        Language::JavaScript => Box::new(javascript::JavaScriptAdapter::new()),
    }
}
