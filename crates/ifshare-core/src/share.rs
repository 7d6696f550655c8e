//! Shareable links and their QR codes

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppError;

const QR_MIN_DIMENSION: u32 = 256;

/// What a public id points at. Each kind has its own page on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    File,
    Code,
    Notes,
}

impl ShareKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ShareKind::File => "file",
            ShareKind::Code => "code",
            ShareKind::Notes => "notes",
        }
    }
}

impl FromStr for ShareKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(ShareKind::File),
            "code" => Ok(ShareKind::Code),
            "notes" => Ok(ShareKind::Notes),
            other => Err(AppError::BadRequest(format!(
                "Unknown share kind '{}', expected file, code or notes",
                other
            ))),
        }
    }
}

impl fmt::Display for ShareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShareLink {
    pub url: String,
    /// PNG QR code encoding `url`, as a `data:image/png;base64,...` URL
    pub qr_code: String,
}

/// Builds `<base>/<kind>/<id>` links and renders them as QR codes.
#[derive(Debug, Clone)]
pub struct ShareLinkComposer {
    base_url: String,
}

impl ShareLinkComposer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn url_for(&self, kind: ShareKind, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, kind.path_segment(), id)
    }

    pub fn qr_data_url(&self, url: &str) -> Result<String, AppError> {
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;
        let rendered = code
            .render::<Luma<u8>>()
            .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(rendered)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| AppError::Internal(format!("QR rendering failed: {}", e)))?;

        Ok(format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(png)
        ))
    }

    pub fn compose(&self, kind: ShareKind, id: &str) -> Result<ShareLink, AppError> {
        let url = self.url_for(kind, id);
        let qr_code = self.qr_data_url(&url)?;
        Ok(ShareLink { url, qr_code })
    }
}
