//! Admin dashboard: project, skill and about-info management plus the
//! registered users list.
//!
//! Every successful mutation answers with a 303 to `/admin?notice=...`, so the
//! browser reloads the dashboard and all lists are fetched fresh. A failed
//! mutation re-renders the dashboard in place with the submitted values kept.

use crate::backend::BackendClient;
use crate::backend::models::{FileUpload, Project, Skill, SkillPayload, User};
use crate::forms::{AboutForm, ProjectForm, SkillForm, Validate};
use crate::web::multipart::MultipartFields;
use crate::web::pages::{AboutView, ProjectCard};
use crate::web::{AppError, AppState, Notice, render};
use axum::{
    Form, Router,
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub const SKILL_FAILED: &str = "Something went wrong while adding skill";
pub const IMAGE_UPLOAD_FAILED: &str = "Image upload failed";
pub const PROJECT_SAVE_FAILED: &str = "Failed to save project";
pub const PROJECT_DELETE_FAILED: &str = "Failed to delete project";
pub const SKILL_DELETE_FAILED: &str = "Failed to delete skill";
pub const ABOUT_SAVE_FAILED: &str = "Failed to save about info";
pub const ABOUT_DELETE_FAILED: &str = "Failed to delete about info";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/projects", post(create_project))
        .route("/admin/projects/{id}", post(update_project))
        .route("/admin/projects/{id}/delete", post(delete_project))
        .route("/admin/skills", post(create_skill))
        .route("/admin/skills/{id}/delete", post(delete_skill))
        .route("/admin/about", post(save_about))
        .route("/admin/about/{id}/delete", post(delete_about))
}

#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    edit: Option<String>,
    notice: Option<String>,
}

/// Everything about a dashboard render that is not fetched from the backend.
#[derive(Debug, Default)]
struct DashboardState {
    notice: Option<Notice>,
    error: Option<String>,
    editing: Option<String>,
    project_form: Option<ProjectForm>,
    skill_form: SkillForm,
    about_form: AboutForm,
}

impl DashboardState {
    fn failed(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct ProjectEditor {
    editing: bool,
    heading: &'static str,
    submit_label: &'static str,
    action: String,
    preview_url: String,
    form: ProjectForm,
}

impl ProjectEditor {
    fn new(editing: Option<&str>, form: ProjectForm, backend: &BackendClient) -> Self {
        let preview_url = backend.resolve_asset_url(&form.existing_image);
        match editing {
            Some(id) => Self {
                editing: true,
                heading: "Edit Project",
                submit_label: "Update Project",
                action: format!("/admin/projects/{}", urlencoding::encode(id)),
                preview_url,
                form,
            },
            None => Self {
                editing: false,
                heading: "Add Project",
                submit_label: "Save Project",
                action: "/admin/projects".to_string(),
                preview_url,
                form,
            },
        }
    }
}

impl From<&Project> for ProjectForm {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tech_stack: project.tech_stack.clone(),
            live_link: project.live_link.clone(),
            github_link: project.github_link.clone(),
            existing_image: project.image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DashboardPage {
    // Not `notice`: tinytemplate reads a leading `not` in `{{ if ... }}` as negation.
    flash: Option<&'static str>,
    error: Option<String>,
    projects: Vec<ProjectCard>,
    users: Vec<User>,
    skills: Vec<Skill>,
    about: Vec<AboutView>,
    editor: ProjectEditor,
    skill_form: SkillForm,
    about_form: AboutForm,
}

fn or_empty<T>(entity: &str, result: crate::backend::Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "Error fetching {entity}");
        Vec::new()
    })
}

async fn render_dashboard(
    backend: &BackendClient,
    state: DashboardState,
) -> Result<Html<String>, AppError> {
    let (projects, users, skills, about) = tokio::join!(
        backend.list_projects(),
        backend.list_users(),
        backend.list_skills(),
        backend.list_about(),
    );
    let projects = or_empty("projects", projects);
    let users = or_empty("users", users);
    let skills = or_empty("skills", skills);
    let about = or_empty("about info", about);

    let editor = match (state.project_form, state.editing) {
        (Some(form), editing) => ProjectEditor::new(editing.as_deref(), form, backend),
        (None, Some(id)) => match projects.iter().find(|project| project.id == id) {
            Some(project) => {
                ProjectEditor::new(Some(id.as_str()), ProjectForm::from(project), backend)
            }
            None => {
                warn!(id = %id, "Project to edit not found, showing add form");
                ProjectEditor::new(None, ProjectForm::default(), backend)
            }
        },
        (None, None) => ProjectEditor::new(None, ProjectForm::default(), backend),
    };

    let page = DashboardPage {
        flash: state.notice.map(Notice::message),
        error: state.error,
        projects: projects
            .into_iter()
            .map(|project| ProjectCard::new(project, backend))
            .collect(),
        users,
        skills,
        about: about
            .into_iter()
            .map(|about| AboutView::new(about, backend))
            .collect(),
        editor,
        skill_form: state.skill_form,
        about_form: state.about_form,
    };

    render::page("admin", "Admin Dashboard", "/admin", &page)
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let notice = query.notice.as_deref().and_then(|key| key.parse().ok());
    render_dashboard(
        &state.backend,
        DashboardState {
            notice,
            editing: query.edit.filter(|id| !id.is_empty()),
            ..DashboardState::default()
        },
    )
    .await
}

fn redirect(notice: Notice) -> Response {
    Redirect::to(&notice.redirect_target()).into_response()
}

fn project_form(fields: &MultipartFields) -> ProjectForm {
    ProjectForm {
        title: fields.text("title"),
        description: fields.text("description"),
        tech_stack: fields.text("techStack"),
        live_link: fields.text("liveLink"),
        github_link: fields.text("githubLink"),
        existing_image: fields.text("existingImage"),
    }
}

/// Uploads the new image if one was picked, then creates or updates the
/// project. Returns the message to show on failure.
async fn save_project(
    backend: &BackendClient,
    id: Option<&str>,
    form: ProjectForm,
    image: Option<FileUpload>,
) -> Result<(), &'static str> {
    let image_url = match image {
        Some(image) => backend.upload_image(image).await.map_err(|err| {
            error!(error = %err, "Image upload error");
            IMAGE_UPLOAD_FAILED
        })?,
        None => form.existing_image.clone(),
    };

    let payload = form.into_payload(image_url);
    let result = match id {
        Some(id) => backend.update_project(id, &payload).await,
        None => backend.create_project(&payload).await,
    };
    result.map_err(|err| {
        error!(error = %err, "Error saving project");
        PROJECT_SAVE_FAILED
    })
}

async fn submit_project(
    state: &AppState,
    id: Option<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut fields = MultipartFields::read(multipart).await?;
    let form = project_form(&fields);
    let image = fields.take_file("image");

    let failure = match form.validate() {
        Err(err) => err.to_string(),
        Ok(()) => match save_project(&state.backend, id.as_deref(), form.clone(), image).await {
            Ok(()) => {
                info!(title = %form.title, "Project saved");
                let notice = if id.is_some() {
                    Notice::ProjectUpdated
                } else {
                    Notice::ProjectCreated
                };
                return Ok(redirect(notice));
            }
            Err(message) => message.to_string(),
        },
    };

    let page = render_dashboard(
        &state.backend,
        DashboardState {
            error: Some(failure),
            editing: id,
            project_form: Some(form),
            ..DashboardState::default()
        },
    )
    .await?;
    Ok(page.into_response())
}

async fn create_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    submit_project(&state, None, multipart).await
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    submit_project(&state, Some(id), multipart).await
}

async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.backend.delete_project(&id).await {
        Ok(()) => {
            info!(id = %id, "Project deleted");
            Ok(redirect(Notice::ProjectDeleted))
        }
        Err(err) => {
            error!(error = %err, id = %id, "Delete project error");
            let page =
                render_dashboard(&state.backend, DashboardState::failed(PROJECT_DELETE_FAILED))
                    .await?;
            Ok(page.into_response())
        }
    }
}

async fn create_skill(
    State(state): State<AppState>,
    Form(form): Form<SkillForm>,
) -> Result<Response, AppError> {
    let failure = match form.validate() {
        Err(err) => err.to_string(),
        Ok(()) => match state.backend.create_skill(&SkillPayload::from(&form)).await {
            Ok(()) => {
                info!(name = %form.name, "Skill added");
                return Ok(redirect(Notice::SkillAdded));
            }
            Err(err) => {
                error!(error = %err, "Error adding skill");
                SKILL_FAILED.to_string()
            }
        },
    };

    let page = render_dashboard(
        &state.backend,
        DashboardState {
            error: Some(failure),
            skill_form: form,
            ..DashboardState::default()
        },
    )
    .await?;
    Ok(page.into_response())
}

async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.backend.delete_skill(&id).await {
        Ok(()) => Ok(redirect(Notice::SkillDeleted)),
        Err(err) => {
            error!(error = %err, id = %id, "Delete skill error");
            let page =
                render_dashboard(&state.backend, DashboardState::failed(SKILL_DELETE_FAILED))
                    .await?;
            Ok(page.into_response())
        }
    }
}

async fn save_about(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let mut fields = MultipartFields::read(multipart).await?;
    let form = AboutForm {
        name: fields.text("name"),
        bio: fields.text("bio"),
    };
    let profile_pic = fields.take_file("profilePic");
    let resume = fields.take_file("resume");

    let failure = match form.validate() {
        Err(err) => err.to_string(),
        Ok(()) => {
            let upload = form.clone().into_upload(profile_pic, resume);
            match state.backend.save_about(upload).await {
                Ok(()) => {
                    info!(name = %form.name, "About info saved");
                    return Ok(redirect(Notice::AboutSaved));
                }
                Err(err) => {
                    error!(error = %err, "Error saving about info");
                    ABOUT_SAVE_FAILED.to_string()
                }
            }
        }
    };

    let page = render_dashboard(
        &state.backend,
        DashboardState {
            error: Some(failure),
            about_form: form,
            ..DashboardState::default()
        },
    )
    .await?;
    Ok(page.into_response())
}

async fn delete_about(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.backend.delete_about(&id).await {
        Ok(()) => Ok(redirect(Notice::AboutDeleted)),
        Err(err) => {
            error!(error = %err, id = %id, "Delete about error");
            let page =
                render_dashboard(&state.backend, DashboardState::failed(ABOUT_DELETE_FAILED))
                    .await?;
            Ok(page.into_response())
        }
    }
}
