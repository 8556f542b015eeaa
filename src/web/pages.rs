use crate::backend::BackendClient;
use crate::backend::models::{AboutInfo, Project, Skill};
use crate::web::{AppError, AppState, render};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{error, warn};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/about", get(about))
        .route("/skills", get(skills))
        .route("/projects", get(projects))
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub image_url: String,
    pub live_link: String,
    pub github_link: String,
}

impl ProjectCard {
    pub fn new(project: Project, backend: &BackendClient) -> Self {
        Self {
            image_url: backend.resolve_asset_url(&project.image),
            id: project.id,
            title: project.title,
            description: project.description,
            tech_stack: project.tech_stack,
            live_link: project.live_link,
            github_link: project.github_link,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub profile_pic_url: String,
    pub resume_url: String,
}

impl AboutView {
    pub fn new(about: AboutInfo, backend: &BackendClient) -> Self {
        Self {
            profile_pic_url: backend.resolve_asset_url(&about.profile_pic),
            resume_url: backend.resolve_asset_url(&about.resume),
            id: about.id,
            name: about.name,
            bio: about.bio,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct SkillGroup {
    category: String,
    skills: Vec<Skill>,
}

/// Groups skills by category, keeping categories in first-seen order.
fn group_skills(skills: Vec<Skill>) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        let category = match skill.category.trim() {
            "" => "Other".to_string(),
            category => category.to_string(),
        };
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.skills.push(skill),
            None => groups.push(SkillGroup {
                category,
                skills: vec![skill],
            }),
        }
    }
    groups
}

async fn home() -> Result<Html<String>, AppError> {
    render::page("home", "Home", "/home", &())
}

#[derive(Serialize)]
struct AboutPage {
    about: Option<AboutView>,
}

async fn about(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let about = match state.backend.list_about().await {
        Ok(entries) => entries
            .into_iter()
            .next()
            .map(|about| AboutView::new(about, &state.backend)),
        Err(err) => {
            warn!(error = %err, "Failed to fetch about info");
            None
        }
    };

    render::page("about", "About", "/about", &AboutPage { about })
}

#[derive(Serialize)]
struct SkillsPage {
    groups: Vec<SkillGroup>,
}

async fn skills(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let skills = state.backend.list_skills().await.unwrap_or_else(|err| {
        warn!(error = %err, "Failed to fetch skills");
        Vec::new()
    });

    render::page(
        "skills",
        "Skills",
        "/skills",
        &SkillsPage {
            groups: group_skills(skills),
        },
    )
}

#[derive(Serialize)]
struct ProjectsPage {
    projects: Vec<ProjectCard>,
}

async fn projects(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let projects = state.backend.list_projects().await.unwrap_or_else(|err| {
        error!(error = %err, "Error fetching projects");
        Vec::new()
    });

    let projects = projects
        .into_iter()
        .map(|project| ProjectCard::new(project, &state.backend))
        .collect();

    render::page("projects", "Projects", "/projects", &ProjectsPage { projects })
}

#[derive(Serialize)]
struct NotFoundPage {
    path: String,
}

pub async fn not_found(uri: Uri) -> Result<Response, AppError> {
    let page = render::page(
        "not_found",
        "Not Found",
        "",
        &NotFoundPage {
            path: uri.path().to_string(),
        },
    )?;
    Ok((StatusCode::NOT_FOUND, page).into_response())
}
