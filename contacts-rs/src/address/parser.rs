use regex::Regex;

use super::types::Mailbox;

/// Header address parser.
///
/// Patterns are tried in order for each comma-separated segment:
/// `"Name" <email>` / `Name <email>`, then a bare email, then the
/// local part of the email as a fallback display name.
pub struct AddressParser {
    angle_re: Regex,
    email_re: Regex,
}

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

impl AddressParser {
    pub fn new() -> Self {
        Self {
            angle_re: Regex::new(r#"^\s*"?([^"<]*)"?\s*<\s*([^<>@\s]+@[^<>@\s]+)\s*>\s*$"#)
                .expect("valid angle-bracket pattern"),
            email_re: Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")
                .expect("valid email pattern"),
        }
    }

    /// Parse a full header value, possibly a comma-separated list.
    ///
    /// Malformed segments yield an empty mailbox; callers filter with
    /// [`Mailbox::is_valid`]. This never fails.
    pub fn parse_list(&self, header: &str) -> Vec<Mailbox> {
        header.split(',').map(|segment| self.parse_segment(segment)).collect()
    }

    fn parse_segment(&self, segment: &str) -> Mailbox {
        let segment = segment.trim();
        if segment.is_empty() {
            return Mailbox::empty();
        }

        if let Some(caps) = self.angle_re.captures(segment) {
            let email = caps[2].trim().to_lowercase();
            let name = clean_name(&caps[1]);
            let name = if name.is_empty() { local_part(&email).to_string() } else { name };
            return Mailbox { name, email };
        }

        if let Some(found) = self.email_re.find(segment) {
            let email = found.as_str().trim().to_lowercase();
            let name = local_part(&email).to_string();
            return Mailbox { name, email };
        }

        Mailbox::empty()
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Strip quotes and zero-width characters from a display name.
fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .chars()
        .filter(|c| !ZERO_WIDTH.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
