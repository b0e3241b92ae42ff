//! HTTP repository over the vocgui REST API.
//!
//! The API serves Django-serialized rows (`[{"pk": …, "fields": {…}}]`)
//! from three endpoints: `/sets`, `/set/{id}/documents`, and
//! `/alternative_words/{id}`. Blank media fields are mapped to `None`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use lernwort_core::error::RepositoryError;
use lernwort_core::model::{Document, TrainingSetInfo};
use lernwort_core::traits::WordRepository;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// REST-backed word repository.
pub struct HttpRepository {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpRepository {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RepositoryError> {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Api-Key {key}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RepositoryError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                RepositoryError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(RepositoryError::ApiError { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| RepositoryError::InvalidData(format!("failed to parse response: {e}")))
    }
}

#[derive(Deserialize)]
struct SetRow {
    pk: u64,
    fields: SetFields,
}

#[derive(Deserialize)]
struct SetFields {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct DocumentRow {
    pk: u64,
    fields: DocumentFields,
}

#[derive(Deserialize)]
struct DocumentFields {
    word: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    audio: String,
}

#[derive(Deserialize)]
struct AlternativeRow {
    fields: AlternativeFields,
}

#[derive(Deserialize)]
struct AlternativeFields {
    alt_word: String,
}

fn none_if_blank(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.pk,
            word: row.fields.word,
            image: none_if_blank(row.fields.image),
            audio: none_if_blank(row.fields.audio),
        }
    }
}

#[async_trait]
impl WordRepository for HttpRepository {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn list_training_sets(&self) -> Result<Vec<TrainingSetInfo>, RepositoryError> {
        let rows: Vec<SetRow> = self.get_json("/sets").await?;
        Ok(rows
            .into_iter()
            .map(|row| TrainingSetInfo {
                id: row.pk,
                title: row.fields.title,
                description: row.fields.description,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_documents(&self, set_id: u64) -> Result<Vec<Document>, RepositoryError> {
        let result: Result<Vec<DocumentRow>, _> =
            self.get_json(&format!("/set/{set_id}/documents")).await;
        match result {
            Ok(rows) => Ok(rows.into_iter().map(Document::from).collect()),
            Err(RepositoryError::ApiError { status: 404, .. }) => {
                Err(RepositoryError::SetNotFound(set_id))
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn list_alternates(&self, document_id: u64) -> Result<Vec<String>, RepositoryError> {
        let result: Result<Vec<AlternativeRow>, _> = self
            .get_json(&format!("/alternative_words/{document_id}"))
            .await;
        match result {
            Ok(rows) => Ok(rows.into_iter().map(|row| row.fields.alt_word).collect()),
            Err(RepositoryError::ApiError { status: 404, .. }) => {
                Err(RepositoryError::DocumentNotFound(document_id))
            }
            Err(e) => Err(e),
        }
    }
}
