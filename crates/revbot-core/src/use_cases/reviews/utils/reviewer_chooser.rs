use revbot_models::{PullRequest, MAX_REVIEWERS};

/// Reviewer selection policy.
///
/// Candidates are always taken in directory order, so the outcome only
/// depends on the directory content.
#[derive(Default)]
pub struct ReviewerChooser {
    _private: (),
}

impl ReviewerChooser {
    /// First active teammates of the author, up to [`MAX_REVIEWERS`].
    pub fn choose_initial(&self, author_id: &str, active_ids: &[String]) -> Vec<String> {
        active_ids
            .iter()
            .filter(|id| *id != author_id)
            .take(MAX_REVIEWERS)
            .cloned()
            .collect()
    }

    /// First active teammate of the departing reviewer who is neither the
    /// author nor already assigned.
    pub fn choose_replacement(
        &self,
        pull_request: &PullRequest,
        departing_id: &str,
        active_ids: &[String],
    ) -> Option<String> {
        active_ids
            .iter()
            .find(|id| {
                *id != departing_id
                    && **id != pull_request.author_id
                    && !pull_request.has_reviewer(id)
            })
            .cloned()
    }
}
