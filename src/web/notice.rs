use std::str::FromStr;

/// Success messages carried across the post/redirect/get cycle as
/// `?notice=<key>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoggedIn,
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    SkillAdded,
    SkillDeleted,
    AboutSaved,
    AboutDeleted,
}

impl Notice {
    pub fn key(self) -> &'static str {
        match self {
            Notice::LoggedIn => "logged_in",
            Notice::ProjectCreated => "project_created",
            Notice::ProjectUpdated => "project_updated",
            Notice::ProjectDeleted => "project_deleted",
            Notice::SkillAdded => "skill_added",
            Notice::SkillDeleted => "skill_deleted",
            Notice::AboutSaved => "about_saved",
            Notice::AboutDeleted => "about_deleted",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::LoggedIn => "Login Successful!",
            Notice::ProjectCreated => "Project saved",
            Notice::ProjectUpdated => "Project updated",
            Notice::ProjectDeleted => "Project deleted",
            Notice::SkillAdded => "Skill added successfully",
            Notice::SkillDeleted => "Skill deleted",
            Notice::AboutSaved => "About info saved",
            Notice::AboutDeleted => "About info deleted",
        }
    }

    pub fn redirect_target(self) -> String {
        format!("/admin?notice={}", self.key())
    }
}

impl FromStr for Notice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [Notice; 8] = [
            Notice::LoggedIn,
            Notice::ProjectCreated,
            Notice::ProjectUpdated,
            Notice::ProjectDeleted,
            Notice::SkillAdded,
            Notice::SkillDeleted,
            Notice::AboutSaved,
            Notice::AboutDeleted,
        ];
        ALL.into_iter().find(|notice| notice.key() == s).ok_or(())
    }
}
