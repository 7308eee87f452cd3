// src/render/host.rs

/// Local hostname, or `None` if it cannot be determined.
pub fn hostname() -> Option<String> {
    let name = ::hostname::get().ok()?;
    non_empty(name.to_string_lossy().into_owned())
}

fn non_empty(name: String) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_treated_as_missing() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("box\n".to_string()).as_deref(), Some("box"));
    }

    #[test]
    fn lookup_matches_the_os_hostname() {
        let name = hostname().expect("host has a name");
        assert!(!name.is_empty());
        assert!(!name.contains('\0'));

        let raw = ::hostname::get().expect("hostname");
        assert_eq!(name, raw.to_string_lossy().trim());
    }
}
