use regex::Regex;
use std::sync::LazyLock;

const MAX_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;
const MAX_DOMAIN_LENGTH: usize = 255;
const MAX_LABEL_LENGTH: usize = 63;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$",
    )
    .unwrap_or_else(|err| panic!("email pattern failed to compile: {err}"))
});

///
/// is_valid_email_syntax
///
/// Pragmatic address check: one `@`, a dot-atom local part, and a dotted
/// domain whose last label starts with a letter. Length limits follow
/// RFC 5321. No DNS or mailbox verification.
///

#[must_use]
pub fn is_valid_email_syntax(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    if domain.contains('@')
        || local.len() > MAX_LOCAL_LENGTH
        || domain.len() > MAX_DOMAIN_LENGTH
        || domain.split('.').any(|label| label.len() > MAX_LABEL_LENGTH)
    {
        return false;
    }

    EMAIL.is_match(s)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for s in [
            "some.email@gmail.com",
            "a@b.co",
            "first+tag@sub.example.org",
            "o'neil@example.ie",
            "x_y-z@my-host.example",
        ] {
            assert!(is_valid_email_syntax(s), "{s}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for s in [
            "",
            "plain",
            "SOME.EMAIL.GMAIL.COM",
            "a@b",
            "a@@b.com",
            "a@b@c.com",
            ".a@b.com",
            "a.@b.com",
            "a..b@c.com",
            "a@-b.com",
            "a@b.c",
            "a@b.1com",
            "a b@c.com",
            "a@b.com ",
        ] {
            assert!(!is_valid_email_syntax(s), "{s}");
        }
    }

    #[test]
    fn enforces_length_limits() {
        let local = "a".repeat(65);
        assert!(!is_valid_email_syntax(&format!("{local}@example.com")));

        let label = "b".repeat(64);
        assert!(!is_valid_email_syntax(&format!("a@{label}.com")));

        let long = format!("a@{}.com", vec!["c".repeat(60); 5].join("."));
        assert!(long.len() > MAX_LENGTH);
        assert!(!is_valid_email_syntax(&long));

        assert!(is_valid_email_syntax(&format!("{}@example.com", "a".repeat(64))));
    }
}
