/// Flatten free-text documentation to a single line: HTML tags dropped,
/// line breaks and whitespace runs collapsed. Blank input yields `None`.
pub fn clean_description(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let stripped = strip_tags(raw);
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Remove `<tag ...>` and `</tag>` markup. A `<` not followed by a letter or
/// `/` is ordinary text.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        let opens_tag = ch == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || *next == '/' || *next == '!');
        if !opens_tag {
            out.push(ch);
            continue;
        }
        for inner in chars.by_ref() {
            if inner == '>' {
                break;
            }
        }
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_newlines_and_html() {
        assert_eq!(
            clean_description(Some("Pet <b>name</b>\nshown<br/>in  lists")).as_deref(),
            Some("Pet name shown in lists")
        );
    }

    #[test]
    fn test_keeps_comparison_text() {
        assert_eq!(
            clean_description(Some("count < 10")).as_deref(),
            Some("count < 10")
        );
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(clean_description(Some(" \n <p></p> ")), None);
        assert_eq!(clean_description(None), None);
    }
}
