use crate::backend::models::FileUpload;
use crate::web::AppError;
use axum::extract::Multipart;
use std::collections::HashMap;
use tracing::warn;

/// Text fields and picked files of a submitted multipart form.
#[derive(Debug, Default)]
pub struct MultipartFields {
    text: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl MultipartFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|err| {
            warn!(error = %err, "Malformed multipart body");
            AppError::StatusCode(err.status())
        })? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|err| AppError::StatusCode(err.status()))?;

                    // Browsers send an empty, nameless part for an untouched file input.
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }

                    let content_type = content_type.unwrap_or_else(|| {
                        mime_guess::from_path(&file_name)
                            .first_or_octet_stream()
                            .to_string()
                    });
                    fields.files.insert(
                        name,
                        FileUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|err| AppError::StatusCode(err.status()))?;
                    fields.text.insert(name, value);
                }
            }
        }

        Ok(fields)
    }

    pub fn text(&self, name: &str) -> String {
        self.text.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }
}
