mod request;
mod response;

pub use request::{
    CreateMessageRequest, CreateThreadRequest, EvaluateAnswerRequest, WebSearchRequest,
};
pub use response::{
    DeleteResponse, EvaluationFailure, HealthResponse, PdfMetadata, ProcessPdfResponse,
    ReportResponse, SearchResponse,
};
