//! Multipart form body for a service request.
//!
//! The body is first described as an ordered list of parts (easy to inspect
//! and test), then lowered into a libcurl form that streams file contents.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::action::Action;
use crate::selection::{PageRange, Selection};

/// One field of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    File {
        field: &'static str,
        path: PathBuf,
        filename: String,
        content_type: &'static str,
    },
    Text {
        field: &'static str,
        value: String,
    },
}

/// A validated selection plus the action's extra fields, ready to send.
#[derive(Debug, Clone)]
pub struct Submission {
    action: Action,
    parts: Vec<FormPart>,
}

impl Submission {
    /// Build the form for `selection`. `pages` is only used by split; when
    /// None the service default (first page) is sent explicitly.
    pub fn new(selection: &Selection, pages: Option<PageRange>) -> Self {
        let action = selection.action();
        let mut parts: Vec<FormPart> = selection
            .files()
            .iter()
            .map(|(file, format)| FormPart::File {
                field: action.file_field(),
                path: file.path.clone(),
                filename: file.name.clone(),
                content_type: format.content_type(),
            })
            .collect();

        if action == Action::Split {
            let range = pages.unwrap_or_default();
            for (field, value) in range.form_fields() {
                parts.push(FormPart::Text { field, value });
            }
        }

        Self { action, parts }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Lower into a libcurl multipart form.
    pub fn to_curl_form(&self) -> Result<curl::easy::Form> {
        let mut form = curl::easy::Form::new();
        for part in &self.parts {
            match part {
                FormPart::File {
                    field,
                    path,
                    filename,
                    content_type,
                } => {
                    form.part(field)
                        .file(path)
                        .filename(filename.as_str())
                        .content_type(content_type)
                        .add()
                        .with_context(|| format!("form file part {}", path.display()))?;
                }
                FormPart::Text { field, value } => {
                    form.part(field)
                        .contents(value.as_bytes())
                        .add()
                        .with_context(|| format!("form field {}", field))?;
                }
            }
        }
        Ok(form)
    }
}
