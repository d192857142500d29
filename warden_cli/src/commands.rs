//! Subcommand implementations. Each returns the text to print so the
//! logic can be tested without capturing stdout.

use warden_core::Decision;

use crate::deployment::Deployment;
use crate::error::CliError;

/// Exit status of an allowed check and of every other successful command.
pub const EXIT_ALLOW: u8 = 0;

/// Exit status when the command could not run.
pub const EXIT_ERROR: u8 = 1;

/// Exit status of a denied check.
pub const EXIT_DENY: u8 = 2;

/// Run one authorization check.
pub fn check(
    deployment: &Deployment,
    actor: &str,
    ability: &str,
    entity: Option<&str>,
    scope: Option<&str>,
) -> Result<Decision, CliError> {
    let actor = deployment.actor(actor)?;
    let target = deployment.target(entity, scope)?;
    Ok(deployment.authorizer().check(actor, ability, target.as_ref()))
}

/// Exit status for the outcome of `warden check`.
pub fn check_status(result: &Result<Decision, CliError>) -> u8 {
    match result {
        Ok(decision) if decision.is_allowed() => EXIT_ALLOW,
        Ok(_) => EXIT_DENY,
        Err(_) => EXIT_ERROR,
    }
}

/// One line per loaded permission, sorted by name.
pub fn permissions(deployment: &Deployment, resource_kind: Option<&str>) -> Vec<String> {
    let registry = deployment.authorizer().registry();
    let mut records = match resource_kind {
        Some(kind) => registry.by_resource_kind(kind),
        None => registry
            .snapshot()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default(),
    };
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
        .into_iter()
        .map(|p| format!("{}\t{}\t{}", p.name, p.resource_kind, p.action))
        .collect()
}

/// Report printed by `warden validate`: a summary line, then one line per
/// warning.
pub fn validate(deployment: &Deployment) -> String {
    let authorizer = deployment.authorizer();
    let mut report = format!(
        "ok: {} permissions, {} policies (generation {})",
        authorizer.registry().len(),
        authorizer.policies().len(),
        authorizer.registry().generation()
    );
    for warning in deployment.warnings() {
        report.push_str("\nwarning: ");
        report.push_str(warning);
    }
    report
}
