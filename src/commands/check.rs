use crate::backend::{BackendClient, BackendError};
use crate::config::Config;
use anyhow::{Result, bail};

#[derive(Debug)]
pub struct Probe {
    pub entity: &'static str,
    pub result: Result<usize, BackendError>,
}

/// Hits every list endpoint the site depends on and reports how many
/// records each one returned.
pub async fn probe_backend(backend: &BackendClient) -> Vec<Probe> {
    let (projects, skills, about, users) = tokio::join!(
        backend.list_projects(),
        backend.list_skills(),
        backend.list_about(),
        backend.list_users(),
    );

    vec![
        Probe {
            entity: "projects",
            result: projects.map(|items| items.len()),
        },
        Probe {
            entity: "skills",
            result: skills.map(|items| items.len()),
        },
        Probe {
            entity: "about",
            result: about.map(|items| items.len()),
        },
        Probe {
            entity: "users",
            result: users.map(|items| items.len()),
        },
    ]
}

pub async fn execute_check(config: &Config) -> Result<()> {
    let backend = BackendClient::from_config(config)?;
    println!("Checking backend at {}", backend.base_url());

    let probes = probe_backend(&backend).await;
    let total = probes.len();
    let mut failed = 0;
    for probe in probes {
        match probe.result {
            Ok(count) => println!("✓ {}: {count} record(s)", probe.entity),
            Err(err) => {
                failed += 1;
                println!("✗ {}: {err}", probe.entity);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} backend checks failed");
    }

    println!("All backend checks passed");
    Ok(())
}
