//!
//! Small helpers shared by batch jobs.
//!
use indicatif::ProgressStyle;

///
/// Progress bar style used by every parallel per-sentence job
/// (`align_all`, `tag_all`).
///
pub fn progress_common_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "[{elapsed_precise}/{eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("##-")
}
