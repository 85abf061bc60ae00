//! QR codes issued for an attendance session.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_opt_id;
use crate::error::ApiError;

/// A QR code a teacher shows to the class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrIssuance {
    /// Base64-encoded raster image, without any `data:` URL prefix.
    pub qr_image_payload: String,
    pub attendance_session_id: String,
    pub expires_at: DateTime<Utc>,
}

impl QrIssuance {
    /// Raw image bytes (PNG as served).
    pub fn decode_image(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.qr_image_payload.trim())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Body of `POST /attendance/generate-qr`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQrRequest {
    #[serde(rename = "classId")]
    pub class_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QrResponseDto {
    #[serde(rename = "qrCodeImage", alias = "qrCode", default)]
    pub qr_code_image: Option<String>,
    #[serde(
        rename = "attendanceId",
        alias = "attendanceSessionId",
        alias = "sessionId",
        default,
        deserialize_with = "deserialize_opt_id"
    )]
    pub attendance_id: Option<String>,
    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<String>,
}

/// Strip a `data:image/png;base64,` style prefix.
fn strip_data_url(payload: &str) -> &str {
    match payload.split_once("base64,") {
        Some((_, data)) => data,
        None => payload,
    }
}

impl TryFrom<QrResponseDto> for QrIssuance {
    type Error = ApiError;

    fn try_from(dto: QrResponseDto) -> Result<Self, Self::Error> {
        let image = dto
            .qr_code_image
            .as_deref()
            .map(strip_data_url)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::EmptyResponse)?
            .to_string();

        let expires_at = match dto.expires_at.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map_err(|e| ApiError::unknown(format!("invalid expiresAt {:?}: {}", raw, e)))?
                .with_timezone(&Utc),
            None => return Err(ApiError::unknown("missing expiresAt")),
        };

        Ok(QrIssuance {
            qr_image_payload: image,
            attendance_session_id: dto.attendance_id.unwrap_or_default(),
            expires_at,
        })
    }
}
