use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use skw_gauth::Credential;

use crate::error::CliError;

pub type Sections = BTreeMap<String, BTreeMap<String, String>>;

/// Parse `[section]` headers and `key = value` lines. Keys that appear
/// before any header land in the `""` section.
pub fn parse_sections(text: &str) -> Sections {
    let mut sections = Sections::new();
    let mut section = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len() - 1].to_string();
            sections.insert(section.clone(), BTreeMap::new());
        } else if let Some((key, value)) = line.split_once('=') {
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    sections
}

/// Records sorted by section name. Sections without a `secret` are skipped.
pub fn credentials_from_sections(sections: &Sections) -> Vec<(String, Credential)> {
    sections
        .iter()
        .filter_map(|(name, fields)| {
            let Some(secret) = fields.get("secret") else {
                log::warn!("section [{}] has no secret, skipped", name);
                return None;
            };
            let field = |key: &str| fields.get(key).cloned().unwrap_or_default();

            Some((name.clone(), Credential {
                secret: secret.clone(),
                user: field("user"),
                domain: field("domain"),
            }))
        })
        .collect()
}

/// Replace the first `~` with the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.contains('~'), dirs::home_dir()) {
        (true, Some(home)) => PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1)),
        _ => PathBuf::from(path),
    }
}

pub fn load_credentials(path: &str) -> Result<Vec<(String, Credential)>, CliError> {
    let path = expand_home(path);
    let text = fs::read_to_string(&path).map_err(|e| {
        log::debug!("reading {} failed: {}", path.display(), e);
        CliError::CredentialFileUnreadable(path.display().to_string())
    })?;

    let credentials = credentials_from_sections(&parse_sections(&text));
    log::info!("loaded {} credentials from {}", credentials.len(), path.display());

    Ok(credentials)
}

#[cfg(test)]
mod test {
    use super::*;

    const FILE: &str = "
        [work]
        secret = GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ
        user = alice
        domain = example.com

        [home]
        secret=AAAA BBBB
        user=alice=admin
        not a pair

        [empty]
        user = nobody
    ";

    #[test]
    fn sections() {
        let sections = parse_sections(FILE);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections["work"]["domain"], "example.com");
        assert_eq!(sections["home"]["secret"], "AAAA BBBB");
        assert_eq!(sections["home"]["user"], "alice=admin");
        assert_eq!(sections["home"].len(), 2);
    }

    #[test]
    fn keys_before_any_section() {
        let sections = parse_sections("secret = AAAABBBB\n[x]\n");
        assert_eq!(sections[""]["secret"], "AAAABBBB");
        assert!(sections["x"].is_empty());
    }

    #[test]
    fn credentials_sorted_and_complete() {
        let credentials = credentials_from_sections(&parse_sections(FILE));
        let names: Vec<&str> = credentials.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["home", "work"]);
        assert_eq!(credentials[0].1, Credential::new("AAAA BBBB", "alice=admin", ""));
        assert_eq!(credentials[1].1.user, "alice");
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_credentials("/nonexistent/gauth/keys.ini"),
            Err(CliError::CredentialFileUnreadable(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let path = std::env::temp_dir().join(format!("gauth-credentials-{}.ini", std::process::id()));
        fs::write(&path, FILE).unwrap();

        let credentials = load_credentials(path.to_str().unwrap()).unwrap();
        assert_eq!(credentials.len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn home_expansion() {
        assert_eq!(expand_home("/etc/keys.ini"), PathBuf::from("/etc/keys.ini"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/keys.ini"), PathBuf::from(format!("{}/keys.ini", home.to_string_lossy())));
        }
    }
}
