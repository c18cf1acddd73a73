use crate::artifacts::status::divergence::{Divergence, DivergenceKind};

fn plural(count: usize) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Status line describing how a branch relates to its upstream
pub fn tracking_message(upstream: &str, divergence: &Divergence) -> String {
    let Divergence { ahead, behind } = *divergence;

    match divergence.kind() {
        DivergenceKind::Diverged => format!(
            "Your branch and '{upstream}' have diverged,\n\
             and have {ahead} and {behind} different commits each, respectively.\n  \
             (use \"rowbit pull\" to update your local branch)"
        ),
        DivergenceKind::Ahead => format!(
            "Your branch is ahead of '{upstream}' by {ahead} commit{}.\n  \
             (use \"rowbit push\" to publish your local commits)",
            plural(ahead)
        ),
        DivergenceKind::Behind => format!(
            "Your branch is behind '{upstream}' by {behind} commit{}, and can be fast-forwarded.\n  \
             (use \"rowbit pull\" to update your local branch)",
            plural(behind)
        ),
        DivergenceKind::UpToDate => format!("Your branch is up to date with '{upstream}'."),
    }
}
