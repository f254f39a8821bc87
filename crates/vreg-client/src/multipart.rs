//! Rebuildable multipart forms
//!
//! `reqwest::multipart::Form` cannot be cloned, but a 401 retry has to
//! resend the same submission. Forms are therefore described as plain
//! data and a fresh `Form` is built for every attempt.

use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone)]
struct FilePart {
    field: String,
    file_name: String,
    bytes: Vec<u8>,
}

/// Description of a multipart submission
#[derive(Debug, Clone, Default)]
pub struct FormSpec {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl FormSpec {
    pub fn new() -> FormSpec {
        FormSpec::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> FormSpec {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a text field, skipping missing or blank values entirely
    pub fn maybe_text(self, name: impl Into<String>, value: Option<&str>) -> FormSpec {
        match value {
            Some(v) if !v.is_empty() => self.text(name, v),
            _ => self,
        }
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> FormSpec {
        self.files.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        });
        self
    }

    /// Names of every field, text and file alike
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.files.iter().map(|f| f.field.as_str()))
            .collect()
    }

    /// Build a sendable form; call once per attempt
    pub fn to_form(&self) -> Form {
        let mut form = Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &self.files {
            let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
            let part = match part.mime_str(mime_for(&file.file_name)) {
                Ok(with_mime) => with_mime,
                Err(_) => Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
            };
            form = form.part(file.field.clone(), part);
        }
        form
    }
}

/// Content type guessed from the file extension
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_expected_field_names() {
        let spec = FormSpec::new()
            .text("registration_number", "KA01AB1234")
            .text("make", "Toyota")
            .maybe_text("owner_name", Some("Ravi"))
            .maybe_text("owner_email", None)
            .maybe_text("owner_phone", Some(""))
            .file("front_photo", "front.jpg", vec![1, 2, 3]);

        let names = spec.field_names();
        assert_eq!(
            names,
            vec!["registration_number", "make", "owner_name", "front_photo"]
        );
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for("front.JPG"), "image/jpeg");
        assert_eq!(mime_for("logo.png"), "image/png");
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_to_form_is_repeatable() {
        let form = FormSpec::new()
            .text("name", "x")
            .file("photo", "p.png", vec![9, 9]);
        // Two attempts must both be buildable from the same description
        let _first = form.to_form();
        let _second = form.to_form();
    }
}
