use super::{extract_sections, load_sections, read_document, slugify, split_anchor};
use crate::formats::markdown::MarkdownFormat;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_bundled_portfolio_sections() {
    let source = read_document(None).unwrap();
    let sections = extract_sections(&source, &MarkdownFormat).unwrap();

    let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["intro", "work", "resume", "projects", "connect"]);

    let labels: Vec<_> = sections.iter().map(crate::section::Section::nav_label).collect();
    assert_eq!(
        labels,
        vec!["HOME", "EXPERIENCE", "RESUME", "PROJECTS", "CONNECT"]
    );
}

#[test]
fn test_nested_headings_stay_in_body() {
    let source = "# Experience {#work}\n\n## Intern\n\nDid things.\n\n# Resume\n\nSummary.\n";
    let sections = extract_sections(source, &MarkdownFormat).unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "work");
    assert_eq!(sections[0].title, "Experience");
    assert!(sections[0].body.contains("## Intern"));
    assert!(sections[0].body.contains("Did things."));
    assert!(!sections[0].body.contains("Summary."));
    assert_eq!(sections[1].id, "resume");
    assert_eq!(sections[1].body, "Summary.");
}

#[test]
fn test_byte_ranges_cover_section_bodies() {
    let source = "# One\n\nAlpha\n\n# Two\n\nBeta\n";
    let sections = extract_sections(source, &MarkdownFormat).unwrap();

    assert_eq!(
        source[sections[0].byte_end..sections[1].byte_start].trim(),
        "# Two"
    );
    assert_eq!(source[sections[0].byte_start..sections[0].byte_end].trim(), "Alpha");
    assert_eq!(sections[1].byte_end, source.len());
    assert!(sections[0].line_end <= sections[1].line_start);
}

#[test]
fn test_preamble_before_first_heading_is_ignored() {
    let source = "Some intro text.\n\n## Not a section\n\n# Real\n\nBody\n";
    let sections = extract_sections(source, &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].id, "real");
}

#[test]
fn test_document_without_headings_has_no_sections() {
    let sections = extract_sections("just prose\n", &MarkdownFormat).unwrap();
    assert!(sections.is_empty());
}

#[test]
fn test_duplicate_ids_are_made_unique() {
    let source = "# Notes\n\na\n\n# Notes\n\nb\n\n# Other {#notes}\n\nc\n";
    let sections = extract_sections(source, &MarkdownFormat).unwrap();
    let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["notes", "notes-2", "notes-3"]);
}

#[test]
fn test_load_sections_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# Let's Connect\n\nSay hello.").unwrap();

    let sections = load_sections(file.path(), &MarkdownFormat).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].id, "let-s-connect");
    assert_eq!(sections[0].body, "Say hello.");
}

#[test]
fn test_split_anchor() {
    assert_eq!(
        split_anchor("Experience {#work}"),
        ("Experience".to_string(), Some("work".to_string()))
    );
    assert_eq!(split_anchor("Plain"), ("Plain".to_string(), None));
    assert_eq!(
        split_anchor("Braces {not an id}"),
        ("Braces {not an id}".to_string(), None)
    );
    assert_eq!(split_anchor("Empty {#}"), ("Empty {#}".to_string(), None));
}

#[test]
fn test_slugify() {
    assert_eq!(slugify("Personal iOS Apps"), "personal-ios-apps");
    assert_eq!(slugify("  C++ & Rust!  "), "c-rust");
    assert_eq!(slugify("***"), "section");
}
