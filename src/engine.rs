//! End-to-end analysis pipeline: validate, parse, extract, assemble.
//!
//! Each call owns its request, tree, and results; nothing is shared
//! between concurrent calls, so the engine can be invoked from any
//! number of workers without synchronization.

use crate::analyzers::adapter_for;
use crate::core::errors::Result;
use crate::core::{AnalysisReport, AnalysisRequest, Language};
use crate::{complexity, report};

/// Analyze one request. Fails only on unparseable input; extractor
/// failures are recovered internally and the report is still produced.
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisReport> {
    let adapter = adapter_for(request.language);
    let model = adapter.parse(&request.code)?;
    let metrics = complexity::extract_all(&model, &request.code, request.language);
    Ok(report::assemble(request.language, metrics, None))
}

/// Convenience wrapper: build the request and analyze it.
pub fn analyze_source(code: &str, language: Language) -> Result<AnalysisReport> {
    let request = AnalysisRequest::new(code, language)?;
    analyze(&request)
}
