use crate::web::AppError;
use axum::response::Html;
use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::Value;
use tinytemplate::TinyTemplate;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.html")),
    ("project_card", include_str!("../../templates/project_card.html")),
    ("home", include_str!("../../templates/home.html")),
    ("about", include_str!("../../templates/about.html")),
    ("skills", include_str!("../../templates/skills.html")),
    ("projects", include_str!("../../templates/projects.html")),
    ("contact", include_str!("../../templates/contact.html")),
    ("login", include_str!("../../templates/login.html")),
    ("admin", include_str!("../../templates/admin.html")),
    ("not_found", include_str!("../../templates/not_found.html")),
];

const NAV: &[(&str, &str)] = &[
    ("/home", "Home"),
    ("/about", "About"),
    ("/skills", "Skills"),
    ("/projects", "Projects"),
    ("/contact", "Contact"),
    ("/login", "Login"),
    ("/admin", "Admin"),
];

#[derive(Serialize)]
struct NavLink {
    href: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct LayoutContext<'a> {
    title: &'a str,
    nav: Vec<NavLink>,
    year: i32,
    body: String,
}

/// `{id | url_segment}`: percent-encodes a value for use in a URL path
/// segment or query value.
fn url_segment(value: &Value, output: &mut String) -> tinytemplate::error::Result<()> {
    match value {
        Value::String(text) => {
            output.push_str(&urlencoding::encode(text));
            Ok(())
        }
        _ => tinytemplate::format_unescaped(value, output),
    }
}

fn engine() -> Result<TinyTemplate<'static>, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.add_formatter("url_segment", url_segment);
    for &(name, source) in TEMPLATES {
        tt.add_template(name, source)?;
    }
    Ok(tt)
}

/// Renders `template` with `context` and wraps it in the site layout.
/// `path` marks the matching navbar entry as active.
pub fn page<C: Serialize>(
    template: &str,
    title: &str,
    path: &str,
    context: &C,
) -> Result<Html<String>, AppError> {
    let tt = engine()?;
    let body = tt.render(template, context)?;

    let layout = LayoutContext {
        title,
        nav: NAV
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: href == path,
            })
            .collect(),
        year: Utc::now().year(),
        body,
    };
    Ok(Html(tt.render("layout", &layout)?))
}
