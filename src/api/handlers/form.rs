//! Field-name-insensitive view over a `multipart/form-data` body.

use crate::api::error::AppError;
use crate::models::UploadedImage;
use axum::extract::Multipart;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Default)]
pub struct FormData {
    text: HashMap<String, String>,
    files: HashMap<String, UploadedImage>,
}

impl FormData {
    /// Drain the multipart stream. Parts with a filename are kept as files.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("length limit exceeded") {
                AppError::PayloadTooLarge(
                    "Request body exceeds the maximum allowed limit".to_string(),
                )
            } else {
                AppError::BadRequest(format!("Malformed multipart body: {}", err_msg))
            }
        })? {
            let name = field.name().unwrap_or_default().to_ascii_lowercase();

            if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.files.insert(name, UploadedImage { file_name, data });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.text.insert(name, text);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn string_or(&self, name: &str, default: &str) -> String {
        self.text(name).unwrap_or(default).to_string()
    }

    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, AppError> {
        match self.text(name).map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid value for '{}': {}", name, raw))),
        }
    }

    pub fn decimal_or(&self, name: &str, default: Decimal) -> Result<Decimal, AppError> {
        self.parse_or(name, default)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, AppError> {
        match self.text(name).map(|v| v.trim().to_ascii_lowercase()) {
            None => Ok(default),
            Some(v) => match v.as_str() {
                "" => Ok(default),
                // HTML checkboxes post "true,false" when ticked
                "true" | "1" | "on" | "yes" | "true,false" => Ok(true),
                "false" | "0" | "off" | "no" => Ok(false),
                _ => Err(AppError::BadRequest(format!(
                    "Invalid value for '{}': {}",
                    name, v
                ))),
            },
        }
    }

    /// Take an uploaded file, ignoring empty parts
    pub fn take_file(&mut self, name: &str) -> Option<UploadedImage> {
        self.files
            .remove(&name.to_ascii_lowercase())
            .filter(|f| !f.is_empty())
    }
}
