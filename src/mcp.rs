use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::commands::split::{split_pdf, splitter};
use crate::commands::to_json::export;
use crate::ocr::RecognizerConfig;
use crate::pdf::RasterConfig;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SplitRequest {
    #[schemars(description = "Path to the scanned PDF file")]
    pub path: String,
    #[schemars(description = "Output directory (default: output)")]
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[schemars(description = "Tesseract language (default: eng)")]
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DetectRequest {
    #[schemars(description = "Path to the scanned PDF file")]
    pub path: String,
    #[schemars(description = "Tesseract language (default: eng)")]
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToJsonRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Output directory (default: output)")]
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn recognizer_config(language: Option<String>) -> RecognizerConfig {
    let mut config = RecognizerConfig::default();
    if let Some(language) = language {
        config.language = language;
    }
    config
}

#[derive(Debug, Clone)]
pub struct PageSplitServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PageSplitServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PageSplitServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PageSplitServer {
    #[tool(description = "OCR the page number in the bottom-right corner of every page of a scanned PDF and write one PDF per page number (page_<N>.pdf), with unreadable pages in unlabeled/unlabeled.pdf")]
    fn split_by_page_number(&self, Parameters(req): Parameters<SplitRequest>) -> String {
        let recognizer = recognizer_config(req.language);
        match split_pdf(&req.path, &req.output_dir, &RasterConfig::default(), &recognizer) {
            Ok(report) => {
                serde_json::to_string_pretty(&report).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", e),
        }
    }

    #[tool(description = "Report the page number detected on each page of a scanned PDF without writing any files")]
    fn detect_page_numbers(&self, Parameters(req): Parameters<DetectRequest>) -> String {
        let recognizer = recognizer_config(req.language);
        match splitter(&RasterConfig::default(), &recognizer).classify(req.path.as_ref()) {
            Ok((_, groups)) => {
                let result: Vec<DetectedPageResult> = groups
                    .labels_by_page()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, label)| DetectedPageResult {
                        page: idx + 1,
                        label: label.to_string(),
                    })
                    .collect();
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", anyhow::Error::from(e)),
        }
    }

    #[tool(description = "Extract the text layer of a PDF and save it as <output_dir>/<name>.json with filename, content and num_characters fields")]
    fn pdf_to_json(&self, Parameters(req): Parameters<ToJsonRequest>) -> String {
        match export(&req.path, &req.output_dir) {
            Ok((json_path, page_count)) => {
                let result = ToJsonResult {
                    output_path: json_path.display().to_string(),
                    page_count,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {:#}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DetectedPageResult {
    pub page: usize,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ToJsonResult {
    pub output_path: String,
    pub page_count: usize,
}

impl ServerHandler for PageSplitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tools for splitting scanned PDFs by printed page number. Use detect_page_numbers \
                 to preview the page number OCR'd from each page, split_by_page_number to write \
                 one PDF per page number, and pdf_to_json to dump a PDF's text layer to JSON."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PageSplitServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
