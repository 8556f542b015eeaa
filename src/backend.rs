pub mod error;
pub mod models;

use crate::config::Config;
use reqwest::{
    Client, Response, Url,
    multipart::{Form, Part},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub use error::{BackendError, Result};
use models::{
    AboutInfo, AboutUpload, Ack, ContactMessage, Credentials, FileUpload, LoginResponse, Project,
    ProjectPayload, Skill, SkillPayload, UploadResponse, User, extract_list,
};

/// Typed client for the portfolio REST backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns an image or file reference from the backend into something a
    /// browser can load. Backend-relative paths are served from the API host.
    pub fn resolve_asset_url(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty()
            || reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with("//")
            || reference.starts_with("data:")
        {
            return reference.to_string();
        }

        if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else {
            format!("{}/{}", self.base_url, reference)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn entity_url(&self, collection: &str, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(&format!("/api/{collection}")))
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_list("/api/projects", Some("projects")).await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<()> {
        debug!(title = %payload.title, "Creating project");
        let response = self
            .http
            .post(self.url("/api/projects"))
            .json(payload)
            .send()
            .await?;
        expect_success_flag(response).await
    }

    pub async fn update_project(&self, id: &str, payload: &ProjectPayload) -> Result<()> {
        debug!(id, "Updating project");
        let response = self
            .http
            .put(self.entity_url("projects", id)?)
            .json(payload)
            .send()
            .await?;
        expect_success_flag(response).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.delete_entity("projects", id).await
    }

    /// Uploads an image and returns the URL the backend stored it under.
    pub async fn upload_image(&self, image: FileUpload) -> Result<String> {
        debug!(file = %image.file_name, size = image.bytes.len(), "Uploading image");
        let form = Form::new().part("image", file_part(image)?);
        let response = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        match (body.success, body.image_url) {
            (true, Some(url)) => Ok(url),
            (true, None) => Err(BackendError::Decode(
                "upload succeeded without an imageUrl".to_string(),
            )),
            (false, _) => Err(BackendError::Rejected {
                message: Some("Image upload failed".to_string()),
            }),
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!(email = %credentials.email, "Logging in");
        let response = self
            .http
            .post(self.url("/api/users/login"))
            .json(credentials)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    pub async fn list_about(&self) -> Result<Vec<AboutInfo>> {
        self.get_list("/api/about", Some("about")).await
    }

    pub async fn save_about(&self, about: AboutUpload) -> Result<()> {
        debug!(name = %about.name, "Saving about info");
        let mut form = Form::new().text("name", about.name).text("bio", about.bio);
        if let Some(file) = about.profile_pic {
            form = form.part("profilePic", file_part(file)?);
        }
        if let Some(file) = about.resume {
            form = form.part("resume", file_part(file)?);
        }

        let response = self
            .http
            .post(self.url("/api/about"))
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let text = response.text().await?;
        let ack: Ack = serde_json::from_str(&text).unwrap_or_default();
        if ack.success == Some(false) {
            return Err(BackendError::Rejected {
                message: ack.message,
            });
        }
        Ok(())
    }

    pub async fn delete_about(&self, id: &str) -> Result<()> {
        self.delete_entity("about", id).await
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        self.get_list("/api/skills", Some("skills")).await
    }

    pub async fn create_skill(&self, payload: &SkillPayload) -> Result<()> {
        debug!(name = %payload.name, "Creating skill");
        self.post_json("/api/skills", payload).await?;
        Ok(())
    }

    pub async fn delete_skill(&self, id: &str) -> Result<()> {
        self.delete_entity("skills", id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_list("/api/users", None).await
    }

    pub async fn send_contact(&self, message: &ContactMessage) -> Result<()> {
        debug!(email = %message.email, "Sending contact message");
        let response = self
            .http
            .post(self.url("/api/contact"))
            .json(message)
            .send()
            .await?;
        expect_success_flag(response).await
    }

    async fn get_list<T>(&self, path: &str, key: Option<&str>) -> Result<Vec<T>>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let response = self.http.get(self.url(path)).send().await?;
        let response = ensure_success(response).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(extract_list(body, key))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        ensure_success(response).await
    }

    async fn delete_entity(&self, collection: &str, id: &str) -> Result<()> {
        debug!(collection, id, "Deleting entity");
        let response = self
            .http
            .delete(self.entity_url(collection, id)?)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn file_part(file: FileUpload) -> Result<Part> {
    Ok(Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)?)
}

/// Fails on a non-2xx status, keeping the backend's `message` if the body
/// carries one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Ack>(&text)
        .ok()
        .and_then(|ack| ack.message);
    Err(BackendError::Status { status, message })
}

/// Requires both a 2xx status and `"success": true` in the body.
async fn expect_success_flag(response: Response) -> Result<()> {
    let response = ensure_success(response).await?;
    let text = response.text().await?;
    let ack: Ack = serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;
    if ack.success == Some(true) {
        Ok(())
    } else {
        Err(BackendError::Rejected {
            message: ack.message,
        })
    }
}
