use crate::error::{Error, Result};
use crate::models::{SearchParams, SearchResult, WorklogPage};
use base64::Engine;
use reqwest::{Certificate, Client, header};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone)]
pub enum Auth {
    Basic { username: String, api_token: String },
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub auth: Auth,
    /// 自己署名証明書を使うサーバー向けのPEM証明書ファイル
    pub ssl_certificate: Option<PathBuf>,
}

impl JiraConfig {
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        let base_url = base_url.into();

        // Validate URL
        let _ = Url::parse(&base_url)
            .map_err(|_| Error::InvalidConfiguration("Invalid base URL".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            ssl_certificate: None,
        })
    }

    pub fn from_env() -> Result<Self> {
        use std::env;

        let base_url = env::var("JIRA_URL")
            .map_err(|_| Error::ConfigurationMissing("JIRA_URL not found in environment".to_string()))?;

        let username = env::var("JIRA_USER")
            .map_err(|_| Error::ConfigurationMissing("JIRA_USER not found in environment".to_string()))?;

        let api_token = env::var("JIRA_API_TOKEN")
            .map_err(|_| Error::ConfigurationMissing("JIRA_API_TOKEN not found in environment".to_string()))?;

        let auth = Auth::Basic { username, api_token };

        let config = Self::new(base_url, auth)?;
        Ok(match env::var("JIRA_SSL_CERTIFICATE") {
            Ok(path) if !path.is_empty() => config.ssl_certificate(path),
            _ => config,
        })
    }

    /// 追加で信頼する証明書ファイルを設定
    pub fn ssl_certificate(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssl_certificate = Some(path.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    pub(crate) client: Client,
    pub(crate) config: Arc<JiraConfig>,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        // 認証ヘッダーを追加
        match &config.auth {
            Auth::Basic { username, api_token } => {
                let auth_value = format!("{}:{}", username, api_token);
                let encoded = base64::engine::general_purpose::STANDARD.encode(auth_value.as_bytes());
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Basic {}", encoded))
                        .map_err(|_| Error::InvalidConfiguration("Invalid auth header".to_string()))?,
                );
            }
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(path) = &config.ssl_certificate {
            for certificate in load_certificates(path)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    pub(crate) async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, endpoint);

        let response = self.client
            .get(&url)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::ApiError { status, message });
        }

        // スキーマ不一致をJsonParsingとして区別するため本文を先に読む
        let body = response.text().await?;
        let data = serde_json::from_str::<T>(&body)?;
        Ok(data)
    }

    /// JQLで課題を検索（1ページ分）
    pub async fn search_issues(&self, params: &SearchParams) -> Result<SearchResult> {
        self.get("/rest/api/2/search", &params.to_query()).await
    }

    /// 課題の作業ログを取得（1ページ分）
    ///
    /// パスは末尾スラッシュ無しの `/rest/api/2/issue/{key}/worklog` を使う。
    /// Jiraは末尾スラッシュ付きでも同じ結果を返す。
    pub async fn get_worklogs(&self, issue_key: &str, start_at: u32) -> Result<WorklogPage> {
        let endpoint = format!("/rest/api/2/issue/{}/worklog", urlencoding::encode(issue_key));
        self.get(&endpoint, &[("startAt", start_at.to_string())]).await
    }
}

fn load_certificates(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path).map_err(|e| {
        Error::InvalidConfiguration(format!("Failed to read certificate {}: {}", path.display(), e))
    })?;

    let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
        Error::InvalidConfiguration(format!("Invalid certificate {}: {}", path.display(), e))
    })?;

    if certificates.is_empty() {
        return Err(Error::InvalidConfiguration(format!(
            "No certificate found in {}",
            path.display()
        )));
    }

    Ok(certificates)
}
