use crate::document::DocumentBuilder;
use sbreport_types::RepositoryStatus;

/// Caption of the repository status block.
pub const REPOSITORY_CAPTION: &str = "Repository Status";

const NO_URL: &str = "no URL found";

/// Render the repository status block.
///
/// An invalid repository yields a single notice. A valid one always gets
/// the remotes, status and head sub-sections.
pub fn render_repository_status(doc: &mut dyn DocumentBuilder, status: &RepositoryStatus) {
    doc.repository_open(REPOSITORY_CAPTION);
    match status {
        RepositoryStatus::Invalid => doc.repository_invalid(),
        RepositoryStatus::Valid {
            remotes,
            clean,
            head,
        } => {
            doc.repository_label("Remotes");
            for (i, remote) in remotes.iter().enumerate() {
                let url = remote.url.as_deref().unwrap_or(NO_URL);
                doc.repository_entry(i + 1, &format!("{}: {}", remote.name, url));
            }
            doc.repository_label("Status");
            doc.repository_state(*clean);
            doc.repository_label("Head");
            doc.repository_head(head);
        }
    }
    doc.repository_close();
}
