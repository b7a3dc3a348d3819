// Executive summary generation: instruction document, prompt assembly,
// the per-row batch driver and the HTTP handlers that expose it.
// All model calls go through llm_client::SummaryGenerator.

pub mod assembler;
pub mod batch;
pub mod handlers;
pub mod prompts;
