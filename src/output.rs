//! CLI output formatting for `check` and `export`.
//!
//! Output is **information-first**: every entity leads with its positional
//! index and label, with filesystem paths shown as indented `Source:` context
//! lines underneath.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Config
//!     Source: ./config.toml (loaded)
//!
//! Menu
//! 001 🏠 Home → home
//! 002 📄 Documents → documents
//!
//! Documents (preview limit 10.0 MB)
//! 001 License 1: preview (0.2 MB)
//!     Source: ./documents/license1.pdf
//! 002 License 2: missing
//!     Source: ./documents/license2.pdf
//!
//! Gallery (2 photos)
//!     Source: ./photos
//!     001 a.png (800x600)
//!     002 b.jpg: cannot decode (...)
//! ```
//!
//! ## Export
//!
//! ```text
//! Pages
//! 001 Home → index.html
//! 002 Documents → documents/index.html
//!
//! Assets
//!     documents/tariff.pdf
//!     gallery/a.png
//!
//! Exported 4 pages, 1 document, 1 photo
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::check::{ConfigStatus, SiteReport};
use crate::documents::{DocumentStatus, size_mb};
use crate::export::ExportSummary;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn document_status_text(status: &DocumentStatus) -> String {
    match status {
        DocumentStatus::Missing => "missing".to_string(),
        DocumentStatus::Inline { bytes } => {
            format!("preview ({:.1} MB)", size_mb(*bytes as usize))
        }
        DocumentStatus::TooLarge { bytes } => {
            format!("too large to preview ({:.1} MB)", size_mb(*bytes as usize))
        }
        DocumentStatus::Unreadable(e) => format!("unreadable ({e})"),
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_report(report: &SiteReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Config".to_string());
    let source = report.config_path.display();
    match &report.config {
        ConfigStatus::Absent => lines.push(format!(
            "{}Source: {} (absent, using defaults)",
            indent(1),
            source
        )),
        ConfigStatus::Loaded => {
            lines.push(format!("{}Source: {} (loaded)", indent(1), source));
        }
        ConfigStatus::Invalid(e) => {
            lines.push(format!(
                "{}Source: {} (ignored, using defaults)",
                indent(1),
                source
            ));
            lines.push(format!("{}Error: {}", indent(1), e));
        }
    }

    lines.push(String::new());
    lines.push("Menu".to_string());
    for (i, entry) in report.menu.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            entry.caption(),
            entry.page.as_str()
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Documents (preview limit {:.1} MB)",
        report.max_pdf_size_mb
    ));
    for (i, doc) in report.documents.iter().enumerate() {
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            doc.title,
            document_status_text(&doc.status)
        ));
        lines.push(format!("{}Source: {}", indent(1), doc.path.display()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Gallery ({})",
        plural(report.photos.len(), "photo", "photos")
    ));
    lines.push(format!(
        "{}Source: {}",
        indent(1),
        report.gallery_folder.display()
    ));
    for (i, photo) in report.photos.iter().enumerate() {
        match &photo.dimensions {
            Ok((w, h)) => lines.push(format!(
                "{}{} {} ({}x{})",
                indent(1),
                format_index(i + 1),
                photo.name,
                w,
                h
            )),
            Err(e) => lines.push(format!(
                "{}{} {}: cannot decode ({})",
                indent(1),
                format_index(i + 1),
                photo.name,
                e
            )),
        }
    }

    lines
}

pub fn print_check_report(report: &SiteReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

pub fn format_export_summary(summary: &ExportSummary) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    for (i, (label, path)) in summary.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            label,
            path.display()
        ));
    }

    if !summary.documents.is_empty() || !summary.photos.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for path in summary.documents.iter().chain(&summary.photos) {
            lines.push(format!("{}{}", indent(1), path.display()));
        }
    }

    if !summary.missing_documents.is_empty() {
        lines.push(String::new());
        let keys: Vec<&str> = summary
            .missing_documents
            .iter()
            .map(|k| k.as_str())
            .collect();
        lines.push(format!("Missing documents: {}", keys.join(", ")));
    }

    lines.push(String::new());
    lines.push(format!(
        "Exported {}, {}, {}",
        plural(summary.pages.len(), "page", "pages"),
        plural(summary.documents.len(), "document", "documents"),
        plural(summary.photos.len(), "photo", "photos"),
    ));

    lines
}

pub fn print_export_summary(summary: &ExportSummary) {
    for line in format_export_summary(summary) {
        println!("{}", line);
    }
}
