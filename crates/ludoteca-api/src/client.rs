//! HTTP client for the remote ludoteca backend.
//!
//! All routes are JSON over HTTP; the wire format (and the Portuguese route
//! names) are owned by the backend collaborator.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ludoteca_core::error::ApiError;
use ludoteca_core::model::{Activity, Child, Classroom, ProgressRecord};
use ludoteca_core::traits::{Backend, ProgressSink};

use crate::config::LudotecaConfig;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the ludoteca REST backend.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout_secs,
            client,
        }
    }

    pub fn from_config(config: &LudotecaConfig) -> Self {
        Self::new(
            &config.base_url,
            config.api_token.clone(),
            config.timeout_secs,
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Network(format!(
                "backend not reachable at {}: {e}",
                self.base_url
            ))
        } else {
            ApiError::Network(e.to_string())
        }
    }

    async fn check_status(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status().as_u16();
        if status == 404 {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend { status, message });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(self.client.get(format!("{}{}", self.base_url, path)))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = self.check_status(path, response).await?;
        response.json().await.map_err(|e| ApiError::Backend {
            status: 0,
            message: format!("failed to parse response from {path}: {e}"),
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(self.client.post(format!("{}{}", self.base_url, path)))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let response = self.check_status(path, response).await?;
        response.json().await.map_err(|e| ApiError::Backend {
            status: 0,
            message: format!("failed to parse response from {path}: {e}"),
        })
    }
}

#[derive(Serialize)]
struct ReportRequest<'a> {
    crianca_id: &'a str,
}

#[derive(Deserialize)]
struct ReportResponse {
    relatorio: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    // The backend replies with the stored record's id; we only need success.
    #[serde(default)]
    #[allow(dead_code)]
    id: Option<String>,
}

#[async_trait]
impl ProgressSink for ApiClient {
    #[instrument(skip(self, record), fields(child = %record.child_id, activity = %record.activity_id))]
    async fn submit(&self, record: &ProgressRecord) -> Result<(), ApiError> {
        let _: SubmitResponse = self.post_json("/progresso/registrar", record).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for ApiClient {
    #[instrument(skip(self))]
    async fn list_children(&self) -> Result<Vec<Child>, ApiError> {
        self.get_json("/criancas").await
    }

    #[instrument(skip(self))]
    async fn fetch_child(&self, id: &str) -> Result<Child, ApiError> {
        self.get_json(&format!("/criancas/{id}")).await
    }

    #[instrument(skip(self))]
    async fn list_classrooms(&self) -> Result<Vec<Classroom>, ApiError> {
        self.get_json("/turmas").await
    }

    #[instrument(skip(self))]
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        self.get_json("/atividades").await
    }

    #[instrument(skip(self))]
    async fn progress_for_child(
        &self,
        child_id: &str,
    ) -> Result<Vec<ProgressRecord>, ApiError> {
        self.get_json(&format!("/progresso/crianca/{child_id}")).await
    }

    #[instrument(skip(self))]
    async fn generate_report(&self, child_id: &str) -> Result<String, ApiError> {
        let response: ReportResponse = self
            .post_json(
                "/relatorios/gerar",
                &ReportRequest {
                    crianca_id: child_id,
                },
            )
            .await?;
        Ok(response.relatorio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), None, DEFAULT_TIMEOUT_SECS)
    }

    #[tokio::test]
    async fn lists_children_from_backend() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"id": "c1", "nome": "Ana", "idade": 6, "turma_id": "t1"},
            {"id": "c2", "nome": "Bruno", "idade": 7}
        ]);
        Mock::given(method("GET"))
            .and(path("/criancas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let children = client(&server).list_children().await.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Ana");
        assert!(children[1].classroom_id.is_none());
    }

    #[tokio::test]
    async fn missing_child_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/criancas/c9"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).fetch_child("c9").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn submit_posts_the_wire_format() {
        let server = MockServer::start().await;
        let expected = r#"{"crianca_id":"c1","atividade_id":"a1","pontuacao":9.5,"movimentos":12,"tempo_segundos":80,"observacoes":"focada hoje","concluida":true}"#;
        Mock::given(method("POST"))
            .and(path("/progresso/registrar"))
            .and(body_json_string(expected))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "p1"})))
            .expect(1)
            .mount(&server)
            .await;

        let record = ProgressRecord {
            child_id: "c1".into(),
            activity_id: "a1".into(),
            score: 9.5,
            moves: Some(12),
            elapsed_secs: Some(80),
            note: Some("focada hoje".into()),
            completed: true,
        };
        client(&server).submit(&record).await.unwrap();
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/progresso/registrar"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db offline"))
            .mount(&server)
            .await;

        let record = ProgressRecord {
            child_id: "c1".into(),
            activity_id: "a1".into(),
            score: 5.0,
            moves: None,
            elapsed_secs: None,
            note: None,
            completed: true,
        };
        let err = client(&server).submit(&record).await.unwrap_err();
        match &err {
            ApiError::Backend { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "db offline");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn generate_report_returns_narrative() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/relatorios/gerar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"relatorio": "Ana melhorou em memória."}),
            ))
            .mount(&server)
            .await;

        let narrative = client(&server).generate_report("c1").await.unwrap();
        assert_eq!(narrative, "Ana melhorou em memória.");
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        // Port 1 is never listening.
        let err = ApiClient::new("http://127.0.0.1:1", None, 1)
            .list_children()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout(_)));
        assert!(err.is_transient());
    }
}
