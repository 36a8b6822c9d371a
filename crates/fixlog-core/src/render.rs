// Copyright (c) 2026 - present fixlog contributors
// SPDX-License-Identifier: MIT

//! Release log serializer
//!
//! Renders the whole document from the model. Every section (header,
//! category, sub-category, release state) is followed by exactly one blank
//! line, so rendering a parsed document reproduces it.

use crate::document::ReleaseLog;
use crate::parser::{
    APPENDIX_RULE, IGNORE_END_LINE, IGNORE_START_LINE, TOTALS_PREFIX, UNSORTED_HEADING,
};

/// Backport policy disclaimer shown under the totals
pub const BACKPORT_NOTE: &str = "{{Note|Note|Before RC1 (i.e. during regular development of next \
version in main branch), only fixes of issues which already existed in previous official releases \
are listed here. Fixes for regressions introduced since last release, or for new features, are \
'''not''' listed here.<br/>For following RCs and final release, '''all''' backported fixes are \
listed.}}";

/// Render the release log document
#[must_use]
pub fn render(log: &ReleaseLog) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.extend(log.header().lines().iter().cloned());
    if !log.header().is_empty() {
        lines.push(String::new());
    }

    let counts = log.counts();
    lines.push(IGNORE_START_LINE.to_string());
    lines.push(format!(
        "{TOTALS_PREFIX} {} ({} from tracker, {} reported/found by other ways).",
        counts.total(),
        counts.reported,
        counts.unreported
    ));
    lines.push(String::new());
    lines.push(BACKPORT_NOTE.to_string());
    lines.push(IGNORE_END_LINE.to_string());
    lines.push(String::new());

    for aside in log.asides() {
        lines.push(IGNORE_START_LINE.to_string());
        lines.extend(aside.lines.iter().cloned());
        lines.push(IGNORE_END_LINE.to_string());
        lines.push(String::new());
    }

    render_categories(log, &mut lines);
    render_release_states(log, &mut lines);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_section(lines: &mut Vec<String>, heading: String, entries: Vec<&str>) {
    lines.push(heading);
    lines.extend(entries.into_iter().map(str::to_string));
    lines.push(String::new());
}

fn render_categories(log: &ReleaseLog, lines: &mut Vec<String>) {
    for main in log.tree().mains() {
        push_section(
            lines,
            format!("== {} ==", main.name),
            log.section(Some(main.name.as_str()), None),
        );
        for sub in &main.subcategories {
            let entries = log.section(Some(main.name.as_str()), Some(sub.as_str()));
            if !entries.is_empty() {
                push_section(lines, format!("=== {sub} ==="), entries);
            }
        }
    }

    if log.has_uncategorized() {
        push_section(
            lines,
            format!("== {UNSORTED_HEADING} =="),
            log.section(None, None),
        );
        for sub in log.orphaned_subs() {
            push_section(lines, format!("=== {sub} ==="), log.section(None, Some(sub)));
        }
    }
}

fn render_release_states(log: &ReleaseLog, lines: &mut Vec<String>) {
    lines.push(IGNORE_START_LINE.to_string());
    lines.push(String::new());
    lines.push(APPENDIX_RULE.to_string());
    lines.push(String::new());
    for state in log.release_states() {
        if state.entries.is_empty() {
            continue;
        }
        lines.push(format!("== {} ==", state.label));
        lines.push(format!(
            "For {}, {} bugs were fixed:",
            state.label,
            state.entries.len()
        ));
        lines.push(String::new());
        lines.extend(state.entries.iter().cloned());
        lines.push(String::new());
    }
    lines.push(IGNORE_END_LINE.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryTree;
    use crate::header::{Header, RevisionRange};
    use chrono::Utc;
    use fixlog_git::Commit;
    use similar_asserts::assert_eq;

    fn commit(sha_seed: char, message: &str) -> Commit {
        Commit {
            sha: sha_seed.to_string().repeat(40),
            message: message.to_string(),
            author: "Dev".to_string(),
            author_email: "dev@example.com".to_string(),
            timestamp: Utc::now(),
            parents: vec![],
            files: vec![],
        }
    }

    fn category_lines(text: &str) -> Vec<&str> {
        text.lines()
            .skip_while(|l| *l != IGNORE_END_LINE)
            .skip(1)
            .take_while(|l| *l != IGNORE_START_LINE)
            .collect()
    }

    #[test]
    fn test_empty_log_renders_skeleton() {
        let log = ReleaseLog::new(CategoryTree::default(), &["RC2"]);
        let text = render(&log);

        let headings: Vec<&str> = text.lines().filter(|l| l.starts_with("==")).collect();
        assert_eq!(
            headings,
            vec![
                "== Objects / Animation / GP ==",
                "== Data / Geometry ==",
                "== Physics / Simulations / Sculpt / Paint ==",
                "== Image / Video / Render ==",
                "== UI / Spaces / Transform ==",
                "== Game Engine ==",
                "== System / Misc ==",
            ]
        );
        assert!(!text.contains("==="));
        assert!(!text.contains(UNSORTED_HEADING));
        assert!(
            text.contains("Total fixed bugs: 0 (0 from tracker, 0 reported/found by other ways).")
        );
    }

    #[test]
    fn test_single_entry_under_sub_category() {
        let mut log = ReleaseLog::new(CategoryTree::default(), &[] as &[&str]);
        log.add_entry(&commit('a', "Fix T12345: crash on save"), 1, Some(2), None)
            .expect("add");
        let text = render(&log);
        let lines = category_lines(&text);

        let start = lines
            .iter()
            .position(|l| *l == "== Data / Geometry ==")
            .expect("main heading");
        assert_eq!(
            &lines[start..start + 5],
            [
                "== Data / Geometry ==",
                "",
                "=== Mesh Editing ===",
                "* Fix {{BugReport|12345}}: crash on save ({{GitCommit|rBaaaaaaaaaa}}).",
                "",
            ]
        );
        assert_eq!(lines[start + 5], "== Physics / Simulations / Sculpt / Paint ==");
        assert_eq!(text.matches("===").count(), 2);
    }

    #[test]
    fn test_full_document_layout() {
        let mut log = ReleaseLog::new(CategoryTree::default(), &["RC2"]);
        log.set_header(Header::fresh(
            "Blender",
            "2.79",
            &RevisionRange::new("1111111111", "2222222222").with_release_state(Some("RC2")),
        ));
        log.add_entry(&commit('a', "Cleanup: sequencer strip"), 3, Some(8), Some("RC2"))
            .expect("add");
        log.add_entry(&commit('b', "Fix T7: strip draw"), 3, Some(8), Some("RC2"))
            .expect("add");

        let expected = format!(
            "\
= Blender 2.79: Bug Fixes =

[RC2] Changes from revision {{{{GitCommit|rB1111111111}}}} to {{{{GitCommit|rB2222222222}}}}, inclusive.

<!-- IGNORE_START -->
Total fixed bugs: 2 (1 from tracker, 1 reported/found by other ways).

{BACKPORT_NOTE}
<!-- IGNORE_END -->

== Objects / Animation / GP ==

== Data / Geometry ==

== Physics / Simulations / Sculpt / Paint ==

== Image / Video / Render ==

=== Sequencer ===
* [RC2] Fix {{{{BugReport|7}}}}: strip draw ({{{{GitCommit|rBbbbbbbbbbb}}}}).
* [RC2] Fix unreported: Cleanup: sequencer strip ({{{{GitCommit|rBaaaaaaaaaa}}}}).

== UI / Spaces / Transform ==

== Game Engine ==

== System / Misc ==

<!-- IGNORE_START -->

<hr/>

== RC2 ==
For RC2, 2 bugs were fixed:

* Fix unreported: Cleanup: sequencer strip ({{{{GitCommit|rBaaaaaaaaaa}}}}).
* Fix {{{{BugReport|7}}}}: strip draw ({{{{GitCommit|rBbbbbbbbbbb}}}}).

<!-- IGNORE_END -->
"
        );
        assert_eq!(render(&log), expected);
    }

    #[test]
    fn test_unsorted_section_only_when_needed() {
        let doc = "\
== Gone ==
* Fix unreported: orphan ({{GitCommit|rBaaaaaaaaaa}}).
== UNSORTED ==
* Fix {{BugReport|3}}: loose ({{GitCommit|rBbbbbbbbbbb}}).
";
        let log = crate::parser::parse(doc, CategoryTree::default(), &[] as &[&str]);
        let text = render(&log);
        let lines = category_lines(&text);
        let start = lines
            .iter()
            .position(|l| *l == "== UNSORTED ==")
            .expect("unsorted heading");
        assert_eq!(
            &lines[start..],
            [
                "== UNSORTED ==",
                "* Fix {{BugReport|3}}: loose ({{GitCommit|rBbbbbbbbbbb}}).",
                "",
                "=== Gone ===",
                "* Fix unreported: orphan ({{GitCommit|rBaaaaaaaaaa}}).",
                "",
            ]
        );
    }

    #[test]
    fn test_asides_are_rendered_verbatim() {
        let doc = "\
= Title =
<!-- IGNORE_START -->
  indented note
<!-- IGNORE_END -->
";
        let log = crate::parser::parse(doc, CategoryTree::default(), &[] as &[&str]);
        let text = render(&log);
        assert!(text.contains("<!-- IGNORE_START -->\n  indented note\n<!-- IGNORE_END -->\n"));
    }

    #[test]
    fn test_render_is_stable_across_reparse() {
        let mut log = ReleaseLog::new(CategoryTree::default(), &["RC2", "RC3"]);
        log.set_header(Header::new(vec!["= Notes =".into()]));
        log.add_entry(&commit('a', "Fix T1: one"), 0, Some(1), Some("RC2"))
            .expect("add");
        log.add_entry(&commit('b', "Tweak"), 6, None, Some("RC3"))
            .expect("add");
        let first = render(&log);
        let reparsed = crate::parser::parse(&first, CategoryTree::default(), &["RC2", "RC3"]);
        assert_eq!(render(&reparsed), first);
    }
}
