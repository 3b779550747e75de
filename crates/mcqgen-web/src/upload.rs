use axum::extract::Multipart;

use mcqgen_core::QuestionCount;

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed form fields from the multipart upload.
pub struct FormFields {
    pub source_type: String,
    pub num: QuestionCount,
    pub difficulty: Option<String>,
    pub learning_objective: Option<String>,
    pub file: Option<UploadedFile>,
    pub url: Option<String>,
}

/// Parse a multipart form upload into structured form fields.
///
/// `num` is clamped into range; a missing or non-numeric value uses `default_num`.
pub async fn parse_multipart(
    mut multipart: Multipart,
    default_num: QuestionCount,
) -> Result<FormFields, String> {
    let mut source_type = String::new();
    let mut num = default_num;
    let mut difficulty: Option<String> = None;
    let mut learning_objective: Option<String> = None;
    let mut file: Option<UploadedFile> = None;
    let mut url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();
                // Browsers send an empty part when no file was chosen.
                if !(filename.is_empty() && data.is_empty()) {
                    file = Some(UploadedFile { filename, data });
                }
            }
            "source_type" | "num" | "difficulty" | "learning_objective" | "url" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read {}: {}", name, e))?;
                let val = val.trim().to_string();
                match name.as_str() {
                    "source_type" => source_type = val,
                    "num" => {
                        if let Ok(n) = val.parse::<i64>() {
                            num = QuestionCount::clamped(n);
                        }
                    }
                    "difficulty" if !val.is_empty() => difficulty = Some(val),
                    "learning_objective" if !val.is_empty() => learning_objective = Some(val),
                    "url" if !val.is_empty() => url = Some(val),
                    _ => {}
                }
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(FormFields {
        source_type,
        num,
        difficulty,
        learning_objective,
        file,
        url,
    })
}
