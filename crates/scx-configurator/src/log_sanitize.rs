use std::str::Chars;

const MAX_LINE_CHARS: usize = 1024;

/// Strip escape sequences and control characters from a line of subprocess
/// output so it can be rendered in the UI. Tool diagnostics are shown
/// verbatim otherwise.
pub fn sanitize_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_LINE_CHARS));
    let mut chars = input.chars();
    let mut kept = 0usize;
    let mut truncated = false;

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            skip_escape(&mut chars);
            continue;
        }
        let c = match c {
            '\t' => ' ',
            '\n' | '\r' => continue,
            c if c.is_control() => continue,
            c => c,
        };
        out.push(c);
        kept += 1;
        if kept >= MAX_LINE_CHARS {
            truncated = true;
            break;
        }
    }

    if truncated {
        out.push_str(" ...[truncated]");
    }
    out
}

// Consume the remainder of an escape sequence whose introducer was already
// read. CSI ends at a final byte, OSC at BEL or ST, the string-style
// sequences (DCS/SOS/PM/APC) at ST.
fn skip_escape(chars: &mut Chars<'_>) {
    match chars.next() {
        Some('[') => {
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        }
        Some(']') => {
            let mut prev_esc = false;
            for c in chars.by_ref() {
                if c == '\x07' || (prev_esc && c == '\\') {
                    break;
                }
                prev_esc = c == '\x1b';
            }
        }
        Some('P' | 'X' | '^' | '_') => {
            let mut prev_esc = false;
            for c in chars.by_ref() {
                if prev_esc && c == '\\' {
                    break;
                }
                prev_esc = c == '\x1b';
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_line;

    #[test]
    fn strips_csi_and_osc_sequences() {
        let input = "ok \u{1b}[31mred\u{1b}[0m \u{1b}]0;title\u{7} done";
        assert_eq!(sanitize_line(input), "ok red  done");
    }

    #[test]
    fn strips_st_terminated_sequences() {
        let input = "a\u{1b}Ppayload\u{1b}\\b";
        assert_eq!(sanitize_line(input), "ab");
    }

    #[test]
    fn drops_newlines_and_keeps_tabs_as_spaces() {
        assert_eq!(sanitize_line("a\tb\nc\r"), "a bc");
    }

    #[test]
    fn bounds_very_long_lines() {
        let input = "x".repeat(5000);
        let got = sanitize_line(&input);
        assert!(got.ends_with(" ...[truncated]"));
        assert!(got.len() < input.len());
    }
}
