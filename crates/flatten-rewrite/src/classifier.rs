//! Barrel import classification
//!
//! A specifier refers to a barrel when either
//! - it equals the alias prefix joined with a configured directory whose
//!   leading `src/` has been stripped (`src/components` + `@/` matches
//!   `@/components`), or
//! - its last path segment equals the last segment of a configured directory
//!   (`src/hooks` matches `../hooks` and `./shared/hooks`).
//!
//! The second rule matches by directory name only. No `.`/`..` normalization
//! is done.

use flatten_config::FlattenConfig;

/// Precomputed view of the configured barrel directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarrelClassifier {
    /// `alias_prefix + dir` with any leading `src/` removed
    canonical: Vec<String>,
    /// Last path segment of every directory
    names: Vec<String>,
}

impl BarrelClassifier {
    pub fn new(config: &FlattenConfig) -> Self {
        Self::from_parts(&config.barrel_directories, &config.alias_prefix)
    }

    pub fn from_parts<S: AsRef<str>>(directories: &[S], alias_prefix: &str) -> Self {
        let canonical = directories
            .iter()
            .map(|dir| {
                let dir = dir.as_ref();
                format!("{}{}", alias_prefix, dir.strip_prefix("src/").unwrap_or(dir))
            })
            .collect();
        let names = directories
            .iter()
            .map(|dir| last_segment(dir.as_ref()).to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Self { canonical, names }
    }

    /// Whether `specifier` points at one of the configured barrels
    pub fn is_barrel_import(&self, specifier: &str) -> bool {
        if self.canonical.iter().any(|c| c == specifier) {
            return true;
        }
        let name = last_segment(specifier);
        self.names.iter().any(|n| n == name)
    }
}

/// Stateless form of [`BarrelClassifier::is_barrel_import`]
pub fn is_barrel_import(specifier: &str, config: &FlattenConfig) -> bool {
    BarrelClassifier::new(config).is_barrel_import(specifier)
}

/// Text after the final `/`, or the whole string
fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(dirs: &[&str]) -> BarrelClassifier {
        BarrelClassifier::from_parts(dirs, "@/")
    }

    #[test]
    fn alias_match_strips_src() {
        let c = classifier(&["src/components"]);
        assert!(c.is_barrel_import("@/components"));
    }

    #[test]
    fn alias_match_without_src_prefix() {
        let c = BarrelClassifier::from_parts(&["lib/ui"], "~/");
        assert!(c.is_barrel_import("~/lib/ui"));
    }

    #[test]
    fn suffix_match_for_relative_specifiers() {
        let c = classifier(&["src/hooks"]);
        assert!(c.is_barrel_import("../hooks"));
        assert!(c.is_barrel_import("./shared/hooks"));
        assert!(c.is_barrel_import("@/features/auth/hooks"));
    }

    #[test]
    fn bare_specifier_compares_whole_string() {
        let c = classifier(&["src/hooks"]);
        assert!(c.is_barrel_import("hooks"));
        assert!(!c.is_barrel_import("react-hooks"));
    }

    #[test]
    fn direct_imports_do_not_match() {
        let c = classifier(&["src/components", "src/hooks"]);
        assert!(!c.is_barrel_import("@/components/Button"));
        assert!(!c.is_barrel_import("../hooks/useAuth"));
        assert!(!c.is_barrel_import("react"));
    }

    #[test]
    fn partial_segment_is_not_a_match() {
        let c = classifier(&["src/components"]);
        assert!(!c.is_barrel_import("@/my-components"));
        assert!(!c.is_barrel_import("./components-old"));
    }

    #[test]
    fn any_directory_can_match() {
        let c = classifier(&["src/components", "src/hooks"]);
        assert!(c.is_barrel_import("@/components"));
        assert!(c.is_barrel_import("../hooks"));
    }

    #[test]
    fn stateless_form_uses_config() {
        let config = FlattenConfig {
            barrel_directories: vec!["src/hooks".into()],
            alias_prefix: "~/".into(),
            ..Default::default()
        };
        assert!(is_barrel_import("~/hooks", &config));
        assert!(!is_barrel_import("~/components", &config));
    }
}
