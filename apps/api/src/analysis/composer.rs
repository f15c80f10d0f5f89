//! Renders the instruction text sent to the backend.
//!
//! Pure template substitution: identical inputs always produce identical output.

use crate::analysis::prompts::{
    AUTHOR_LINE, GENERAL_ATS_TEMPLATE, JOB_FIT_TEMPLATE, PAGE_COUNT_LINE, TITLE_LINE,
};
use crate::analysis::AnalysisMode;
use crate::document::Metrics;

/// Builds the prompt for `mode`.
///
/// `job_description` is only read for `JobFit`; a missing one renders as empty text.
pub fn compose(
    mode: AnalysisMode,
    text: &str,
    metrics: &Metrics,
    job_description: Option<&str>,
) -> String {
    let (template, job_description) = match mode {
        AnalysisMode::JobFit => (JOB_FIT_TEMPLATE, job_description.unwrap_or_default()),
        AnalysisMode::GeneralAts => (GENERAL_ATS_TEMPLATE, ""),
    };

    let word_count = metrics.word_count.to_string();
    let file_size_mb = format!("{:.2}", metrics.file_size_mb);
    let additional_info = additional_info(metrics);

    render(
        template,
        &[
            ("resume_text", text),
            ("job_description", job_description),
            ("word_count", &word_count),
            ("file_size_mb", &file_size_mb),
            ("additional_info", &additional_info),
        ],
    )
}

/// Page count, title and author lines. Each one is independent of the others.
fn additional_info(metrics: &Metrics) -> String {
    let mut info = String::new();

    if let Some(pages) = metrics.page_count {
        info.push_str(PAGE_COUNT_LINE);
        info.push_str(&pages.to_string());
    }

    if let Some(metadata) = &metrics.metadata {
        if let Some(title) = metadata.title() {
            info.push_str(TITLE_LINE);
            info.push_str(title);
        }
        if let Some(author) = metadata.author() {
            info.push_str(AUTHOR_LINE);
            info.push_str(author);
        }
    }

    info
}

/// Single-pass `{key}` substitution. Substituted values are never rescanned, so a
/// résumé that happens to contain `{job_description}` stays literal.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let capacity = template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substitution = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });

        match substitution {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
