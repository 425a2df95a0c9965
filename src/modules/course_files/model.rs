use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Bookkeeping record for a stored course file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseFile {
    pub id: i64,
    pub course_id: i64,
    /// Original filename as uploaded
    pub file_name: String,
    /// Display title; falls back to the filename
    pub file_title: String,
    pub file_description: Option<String>,
    /// Playback length for video content
    pub duration_seconds: Option<i32>,
    /// One of `PDF`, `VIDEO`, `DOCUMENT` (see [`FileType`])
    pub file_type: String,
    pub file_size: i64,
    pub mime_type: String,
    pub file_url: String,
    pub is_published: bool,
    pub download_allowed: bool,
    pub created_at: DateTime<Utc>,
}

/// Coarse content classification derived from the upload's MIME type.
/// Stored as its uppercase name in the `file_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Video,
    Document,
}

impl FileType {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type == "application/pdf" {
            Self::Pdf
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Document
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Video => "VIDEO",
            Self::Document => "DOCUMENT",
        }
    }
}

/// Parsed multipart upload, handed from controller to service.
#[derive(Debug)]
pub struct CourseFileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub file_title: Option<String>,
    pub file_description: Option<String>,
    pub duration_seconds: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_mime() {
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_mime("video/mp4"), FileType::Video);
        assert_eq!(FileType::from_mime("video/webm"), FileType::Video);
        assert_eq!(FileType::from_mime("image/png"), FileType::Document);
        assert_eq!(
            FileType::from_mime("application/octet-stream"),
            FileType::Document
        );
    }

    #[test]
    fn test_file_type_column_values() {
        assert_eq!(FileType::Pdf.as_str(), "PDF");
        assert_eq!(FileType::Video.as_str(), "VIDEO");
        assert_eq!(FileType::Document.as_str(), "DOCUMENT");
    }
}
