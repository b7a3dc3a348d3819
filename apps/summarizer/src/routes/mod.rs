pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::summary::handlers;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Summary API
        .route("/api/v1/template", get(handlers::handle_template))
        .route(
            "/api/v1/summaries",
            post(handlers::handle_generate_summaries),
        )
        .route(
            "/api/v1/summaries/analyze",
            post(handlers::handle_analyze),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{LlmError, SummaryGenerator};
    use crate::spreadsheet::reader::{read_candidate_table, required_columns};
    use crate::spreadsheet::writer::{
        template_workbook, write_sheet, SUMMARY_COLUMN, TRUNCATION_MARKER,
    };
    use crate::spreadsheet::CellValue;
    use crate::summary::assembler::PromptAssembler;
    use crate::summary::batch::BatchDriver;

    const BOUNDARY: &str = "summarizer-test-boundary";

    /// Fails any prompt for the candidate named "Broken"; rambles for "Verbose".
    #[derive(Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SummaryGenerator for CountingGenerator {
        async fn generate(&self, prompt: &str, _credential: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.contains("\"name\": \"Verbose\"") {
                return Ok("x".repeat(40_000));
            }
            if prompt.contains("\"name\": \"Broken\"") {
                return Err(LlmError::Api {
                    status: 400,
                    message: "API key not valid".to_string(),
                });
            }
            Ok("Generated executive summary.".to_string())
        }
    }

    fn test_config(default_api_key: Option<&str>) -> Config {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            default_api_key: default_api_key.map(str::to_owned),
            llm_request_timeout: Duration::from_secs(5),
            row_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
        }
    }

    fn app(generator: Arc<CountingGenerator>, default_api_key: Option<&str>) -> Router {
        let driver = BatchDriver::new(PromptAssembler::new(), generator, Duration::from_secs(5));
        build_router(AppState {
            driver,
            config: test_config(default_api_key),
        })
    }

    fn multipart_body(file: Option<&[u8]>, api_key: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(key) = api_key {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"api_key\"\r\n\r\n{key}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"candidates.xlsx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(uri: &str, body: Vec<u8>, header_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(key) = header_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn candidate_row(name: &str, kind: &str, scores: [f64; 8]) -> Vec<CellValue> {
        let mut row = vec![
            CellValue::Text(name.to_string()),
            CellValue::Text("F".to_string()),
            CellValue::Text(kind.to_string()),
        ];
        row.extend(scores.into_iter().map(CellValue::Number));
        row
    }

    fn three_row_workbook() -> Vec<u8> {
        let headers: Vec<String> = required_columns().into_iter().map(String::from).collect();
        write_sheet(
            "Candidates",
            &headers,
            &[
                candidate_row("Sub 1", "Apply", [4.0, 4.0, 4.0, 3.0, 4.0, 4.0, 5.0, 4.0]),
                candidate_row("Broken", "Shape", [3.0; 8]),
                candidate_row("Sub 3", "Shape", [2.0; 8]),
            ],
        )
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default(), None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "summarizer");
    }

    #[tokio::test]
    async fn test_template_download() {
        let response = app(Arc::default(), None)
            .oneshot(Request::get("/api/v1/template").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("candidate_template.xlsx"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let table = read_candidate_table(&bytes).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert!(table.missing_columns().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_processing() {
        let generator = Arc::new(CountingGenerator::default());
        let body = multipart_body(Some(&template_workbook().unwrap()), None);

        let response = app(generator.clone(), None)
            .oneshot(upload_request("/api/v1/summaries", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "MISSING_CREDENTIAL");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let response = app(Arc::default(), Some("default-key"))
            .oneshot(upload_request(
                "/api/v1/summaries",
                multipart_body(None, Some("k")),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_columns_rejected_before_any_call() {
        let generator = Arc::new(CountingGenerator::default());
        let workbook = write_sheet(
            "Candidates",
            &["Name".to_string(), "Gender".to_string()],
            &[vec![CellValue::Text("A".into()), CellValue::Text("M".into())]],
        )
        .unwrap();

        let response = app(generator.clone(), None)
            .oneshot(upload_request(
                "/api/v1/summaries",
                multipart_body(Some(&workbook), None),
                Some("key"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("Type"));
        assert!(message.contains("Change Potential"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreadable_upload_is_spreadsheet_error() {
        let response = app(Arc::default(), None)
            .oneshot(upload_request(
                "/api/v1/summaries",
                multipart_body(Some(b"not a workbook"), Some("key")),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_summaries_xlsx_keeps_every_row() {
        let generator = Arc::new(CountingGenerator::default());
        let body = multipart_body(Some(&three_row_workbook()), Some("form-key"));

        let response = app(generator.clone(), None)
            .oneshot(upload_request("/api/v1/summaries", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-batch-rows"], "3");
        assert_eq!(response.headers()["x-batch-failed-rows"], "1");
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("executive_summary_results.xlsx"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let results = read_candidate_table(&bytes).unwrap();
        assert_eq!(results.headers.last().unwrap(), SUMMARY_COLUMN);
        assert_eq!(results.rows.len(), 3);

        let summary = |i: usize| results.rows[i].last().unwrap().as_text();
        assert_eq!(summary(0), "Generated executive summary.");
        assert_eq!(
            summary(1),
            "Error: Could not generate summary. Details: API error (status 400): API key not valid"
        );
        assert_eq!(summary(2), "Generated executive summary.");
        assert_eq!(results.rows[1][0], CellValue::Text("Broken".to_string()));
    }

    #[tokio::test]
    async fn test_oversized_summary_does_not_lose_batch() {
        let headers: Vec<String> = required_columns().into_iter().map(String::from).collect();
        let workbook = write_sheet(
            "Candidates",
            &headers,
            &[
                candidate_row("Verbose", "Apply", [3.0; 8]),
                candidate_row("Sub 2", "Apply", [3.0; 8]),
            ],
        )
        .unwrap();

        let response = app(Arc::default(), None)
            .oneshot(upload_request(
                "/api/v1/summaries",
                multipart_body(Some(&workbook), None),
                Some("key"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let results = read_candidate_table(&bytes).unwrap();
        assert_eq!(results.rows.len(), 2);
        assert!(results.rows[0]
            .last()
            .unwrap()
            .as_text()
            .ends_with(TRUNCATION_MARKER));
        assert_eq!(
            results.rows[1].last().unwrap().as_text(),
            "Generated executive summary."
        );
    }

    #[tokio::test]
    async fn test_summaries_json_format() {
        let body = multipart_body(Some(&three_row_workbook()), None);

        let response = app(Arc::default(), Some("configured-key"))
            .oneshot(upload_request("/api/v1/summaries?format=json", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let batch_id = response.headers()["x-batch-id"].to_str().unwrap().to_string();
        let json = body_json(response).await;
        assert_eq!(json["batch_id"], batch_id.as_str());

        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "Sub 1");
        assert_eq!(rows[0]["status"], "generated");
        assert_eq!(rows[1]["status"], "service_error");
        assert_eq!(rows[2]["index"], 2);
    }

    #[tokio::test]
    async fn test_analyze_needs_no_credential() {
        let generator = Arc::new(CountingGenerator::default());
        let body = multipart_body(Some(&three_row_workbook()), None);

        let response = app(generator.clone(), None)
            .oneshot(upload_request("/api/v1/summaries/analyze", body, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        let json = body_json(response).await;
        let first = &json["rows"][0];
        assert_eq!(first["status"], "analyzed");
        assert_eq!(
            first["analysis"]["selection"]["strengths"],
            serde_json::json!(["Execution Potential", "Drive Potential"])
        );
        assert_eq!(
            first["analysis"]["selection"]["development_areas"],
            serde_json::json!(["Learning Potential", "People Potential"])
        );
        let flags = first["analysis"]["flags"].as_array().unwrap();
        assert_eq!(flags.len(), 6);
        let unflagged: Vec<&str> = flags
            .iter()
            .filter(|f| f["flag"] == "unflagged")
            .map(|f| f["competency"].as_str().unwrap())
            .collect();
        assert_eq!(unflagged, vec!["Strategic Potential", "Change Potential"]);
        assert_eq!(flags[4]["flag"], "strength");
        assert_eq!(
            first["analysis"]["classification"]["classifications"][0]["tier"],
            "High"
        );
    }
}
