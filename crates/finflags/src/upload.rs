//! Sending a selected file to the analysis endpoint.
//!
//! The page posts exactly one multipart request per submit and parses
//! whatever comes back as JSON. The HTTP status is never inspected, so an
//! error response with a JSON body reads the same as a success.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Multipart field the file is sent under.
pub const FILE_FIELD: &str = "file";

/// Content type sent for the file part.
const FILE_MIME: &str = "application/octet-stream";

/// A file picked by the user: its name and contents.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a selected file from a name and its contents.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk. The file name becomes the upload name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadFile`] if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::read_file(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// File name sent with the upload.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the contents in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Something that can take a selected file and return the parsed response.
///
/// `file` is `None` when submit happens before any selection; implementors
/// pass that through rather than refusing it.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Send the file and parse the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the body is not JSON.
    async fn upload(&self, file: Option<&SelectedFile>) -> Result<Value>;
}

/// Uploads over HTTP with a multipart POST.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    client: Client,
    url: Url,
}

impl HttpUploader {
    /// Create an uploader for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let url = Url::parse(&config.endpoint.url).map_err(|e| Error::ConfigValidation {
            message: format!("invalid endpoint url '{}': {e}", config.endpoint.url),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    /// Endpoint this uploader posts to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn form(file: Option<&SelectedFile>) -> Result<Form> {
        let form = Form::new();
        match file {
            Some(file) => {
                let part = Part::bytes(file.bytes().to_vec())
                    .file_name(file.name().to_string())
                    .mime_str(FILE_MIME)?;
                Ok(form.part(FILE_FIELD, part))
            }
            None => Ok(form.text(FILE_FIELD, "")),
        }
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, file: Option<&SelectedFile>) -> Result<Value> {
        tracing::debug!(
            url = %self.url,
            file = file.map(SelectedFile::name),
            bytes = file.map_or(0, SelectedFile::len),
            "uploading file"
        );

        let response = self
            .client
            .post(self.url.clone())
            .multipart(Self::form(file)?)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, "received analysis response");

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
