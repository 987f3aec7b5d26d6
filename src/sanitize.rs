//! Neutralizes markup in user-supplied text before it leaves the API.
//!
//! Two passes:
//! 1. `<script ...>...</script>` blocks are removed, content included
//!    (tag names match case-insensitively).
//! 2. Every remaining `<` becomes `&lt;` and every `>` becomes `&gt;`.
//!
//! `&` is left alone, so the output never contains a raw angle bracket and
//! a second pass is a no-op: `sanitize(sanitize(x)) == sanitize(x)`.
//! All other characters are copied unchanged.

const SCRIPT_OPEN: &str = "<script";
const SCRIPT_CLOSE: &str = "</script";

/// Strip script blocks and escape angle brackets. Infallible and pure.
///
/// # Examples
///
/// ```
/// use thingful_api::sanitize::sanitize;
///
/// assert_eq!(sanitize("<script>alert('xss');</script>Plain text"), "Plain text");
/// assert_eq!(sanitize("a <b>bold</b> move"), "a &lt;b&gt;bold&lt;/b&gt; move");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(input: &str) -> String {
    if !input.contains(|c: char| c == '<' || c == '>') {
        return input.to_string();
    }
    escape_angle_brackets(&strip_script_blocks(input))
}

fn strip_script_blocks(input: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `input`
    let lower = input.to_ascii_lowercase();
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(rel) = lower[cursor..].find(SCRIPT_OPEN) {
        let start = cursor + rel;
        let after_name = start + SCRIPT_OPEN.len();

        // `<scripts>` or `<scripting` are not script tags
        let is_tag = lower[after_name..]
            .chars()
            .next()
            .map_or(true, |c| c == '>' || c == '/' || c.is_ascii_whitespace());
        if !is_tag {
            out.push_str(&input[cursor..after_name]);
            cursor = after_name;
            continue;
        }

        // Unterminated blocks are left for the escaping pass
        let Some(close_rel) = lower[after_name..].find(SCRIPT_CLOSE) else {
            break;
        };
        let close = after_name + close_rel;
        let end = lower[close..]
            .find('>')
            .map_or(input.len(), |i| close + i + 1);

        out.push_str(&input[cursor..start]);
        cursor = end;
    }

    out.push_str(&input[cursor..]);
    out
}

fn escape_angle_brackets(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn plain_text_is_untouched() {
        let text = "Tom & Jerry's \"best\" review: 5/5, café ☕";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn removes_script_block_and_keeps_remainder() {
        assert_eq!(
            sanitize(r#"<script>alert("xss");</script> Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#),
            r#" Bad image &lt;img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);"&gt;. But not &lt;strong&gt;all&lt;/strong&gt; bad."#
        );
    }

    #[test]
    fn script_tags_match_case_insensitively() {
        assert_eq!(sanitize("a<SCRIPT type=\"text/javascript\">x()</ScRiPt >b"), "ab");
    }

    #[test]
    fn multiple_script_blocks_are_all_removed() {
        assert_eq!(sanitize("<script>1</script>one<script>2</script>two"), "onetwo");
    }

    #[test]
    fn unterminated_script_is_escaped() {
        assert_eq!(sanitize("<script>alert(1)"), "&lt;script&gt;alert(1)");
    }

    #[test]
    fn lookalike_tag_names_are_escaped_not_removed() {
        assert_eq!(
            sanitize("<scripts>keep</scripts>"),
            "&lt;scripts&gt;keep&lt;/scripts&gt;"
        );
    }

    #[test]
    fn nested_fragments_cannot_reassemble_a_tag() {
        let out = sanitize("<scr<script>x</script>ipt>alert(1)</script>");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn existing_entities_are_preserved() {
        assert_eq!(sanitize("&lt;b&gt; &amp; more"), "&lt;b&gt; &amp; more");
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        let samples = [
            "",
            "plain",
            "<script>x</script>y",
            "<b onclick=\"go()\">hi</b>",
            "<script>never closed",
            "1 < 2 > 0",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
