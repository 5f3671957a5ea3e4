//! Deployment base path handling.
///
/// `PUBLIC_URL` is read at compile time (e.g. `/portfolio` for a project page).
/// Builds without it serve everything from the site root.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    join_base(option_env!("PUBLIC_URL").unwrap_or(""), relative)
}

/// Base path for the router, or `None` when served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    normalize_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Location of the hosted resume document.
#[must_use]
pub fn resume_url() -> String {
    asset_path("resume.json")
}

/// Location of the downloadable resume PDF.
#[must_use]
pub fn resume_pdf_url() -> String {
    asset_path("Dev_Patel_Resume.pdf")
}

fn join_base(base: &str, relative: &str) -> String {
    let rel = relative.trim_start_matches('/');
    match normalize_base(base) {
        Some(base) => format!("{base}/{rel}"),
        None => format!("/{rel}"),
    }
}

fn normalize_base(base: &str) -> Option<String> {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{trimmed}"))
    }
}
