pub mod auth;
pub mod products;
pub mod profile;

/// Flatten validator output into one human-readable line for flash
/// messages.
pub(crate) fn validation_messages(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match error.message.as_ref() {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("Trường {field} không hợp lệ.")),
            }
        }
    }
    messages.join(" ")
}

/// Collapse whitespace runs to single spaces and drop control
/// characters. For single-line fields.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, trim blank lines at both ends and collapse inner
/// blank runs to one. For textarea fields.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  iPhone   15  Pro "), "iPhone 15 Pro");
    }

    #[test]
    fn inline_text_drops_control_characters() {
        assert_eq!(sanitize_inline_text("Galaxy\u{0000} S24"), "Galaxy S24");
    }

    #[test]
    fn multiline_text_trims_and_collapses_blank_lines() {
        let input = "\n\nFirst line.\n\n\nSecond line.\n\n";
        assert_eq!(
            sanitize_multiline_text(input),
            "First line.\n\nSecond line."
        );
    }
}
