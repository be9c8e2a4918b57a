//! core::render
//!
//! Formatting of the grouped tickets into the two textual outputs.
//!
//! Both functions are pure: the same group mapping and version always render
//! to byte-identical output.

use super::groups::TicketGroups;

/// Title line of the changelog file. The writer locates this line to insert
/// the new section directly after it.
pub const CHANGELOG_TITLE: &str = "# Poshi Runner Change Log\n";

/// Fixed link to the published changelog, shown in the post footer.
const PUBLISHED_CHANGELOG_URL: &str =
    "https://github.com/example/example-portal/blob/master/modules/test/poshi/CHANGELOG.markdown";

/// Render the user-facing announcement post.
///
/// Header naming the release ticket and version, one italicized section per
/// group with `* `-prefixed ticket lines, then a footer pointing at the
/// published changelog.
pub fn changelog_post(
    groups: &TicketGroups,
    release_version: &str,
    release_ticket_url: &str,
) -> String {
    let mut post = String::new();

    post.push_str(&format!(
        "\n# Release: **[POSHI {}]({})**\n\n",
        release_version, release_ticket_url
    ));

    for (name, lines) in groups.iter() {
        post.push_str(&format!("_{}_\n", name));

        for line in lines {
            post.push_str(&format!("* {}\n", line));
        }

        post.push('\n');
    }

    post.push_str("## Additional Notes:\n");
    post.push_str("For more release notes click here:\n");
    post.push_str(PUBLISHED_CHANGELOG_URL);

    post
}

/// Render the changelog-file fragment.
///
/// The fragment re-includes the title line so the writer can substitute it
/// for the old title, followed by a `##` version heading and one `###`
/// section per group.
pub fn changelog_fragment(groups: &TicketGroups, release_version: &str) -> String {
    let mut fragment = String::new();

    fragment.push_str(CHANGELOG_TITLE);
    fragment.push_str(&format!("\n## {}\n", release_version));

    for (name, lines) in groups.iter() {
        fragment.push_str(&format!("\n### {}\n", name));

        for line in lines {
            fragment.push_str(&format!("\n* {}", line));
        }

        fragment.push('\n');
    }

    fragment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_groups() -> TicketGroups {
        let mut groups = TicketGroups::new();
        groups.add("Api", "[LRQA-100](https://issues.example.org/browse/LRQA-100) - Fix waits");
        groups.add("Other", "[LPS-999](https://issues.example.org/browse/LPS-999) - Sync");
        groups
    }

    #[test]
    fn post_has_header_sections_and_footer() {
        let post = changelog_post(
            &sample_groups(),
            "1.0.300",
            "https://issues.example.org/browse/POSHI-187",
        );

        assert!(post.starts_with(
            "\n# Release: **[POSHI 1.0.300](https://issues.example.org/browse/POSHI-187)**\n\n"
        ));
        assert!(post.contains("_Api_\n* [LRQA-100]"));
        assert!(post.contains("_Other_\n* [LPS-999]"));
        assert!(post.ends_with(PUBLISHED_CHANGELOG_URL));
        // Groups appear in name order.
        assert!(post.find("_Api_").unwrap() < post.find("_Other_").unwrap());
    }

    #[test]
    fn fragment_shape_matches_changelog_layout() {
        let fragment = changelog_fragment(&sample_groups(), "1.0.300");

        assert_eq!(
            fragment,
            "# Poshi Runner Change Log\n\
             \n\
             ## 1.0.300\n\
             \n\
             ### Api\n\
             \n\
             * [LRQA-100](https://issues.example.org/browse/LRQA-100) - Fix waits\n\
             \n\
             ### Other\n\
             \n\
             * [LPS-999](https://issues.example.org/browse/LPS-999) - Sync\n"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let groups = sample_groups();
        let url = "https://issues.example.org/browse/POSHI-187";

        assert_eq!(
            changelog_post(&groups, "1.0.300", url),
            changelog_post(&groups, "1.0.300", url)
        );
        assert_eq!(
            changelog_fragment(&groups, "1.0.300"),
            changelog_fragment(&groups, "1.0.300")
        );
    }

    #[test]
    fn empty_groups_still_render_the_scaffolding() {
        let fragment = changelog_fragment(&TicketGroups::new(), "2.0.0");
        assert_eq!(fragment, "# Poshi Runner Change Log\n\n## 2.0.0\n");
    }
}
