use std::fmt;

use git_version::git_version;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Build metadata shown by the `info` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub commit: &'static str,
    pub release_build: bool,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: version_label(
                option_env!("RELEASE_VERSION").unwrap_or(""),
                option_env!("LATEST_TAG").unwrap_or(""),
                option_env!("COMMITS_AHEAD").unwrap_or(""),
            ),
            commit: COMMIT,
            release_build: !cfg!(debug_assertions),
        }
    }
}

/// Describes where this build sits relative to the release tags.
fn version_label(release: &str, latest: &str, ahead: &str) -> String {
    if !release.is_empty() {
        format!("release {release}")
    } else if latest.is_empty() {
        format!("development {}", env!("CARGO_PKG_VERSION"))
    } else if ahead.is_empty() {
        format!("development build after {latest}")
    } else {
        format!("development build {ahead} commits after {latest}")
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}\nCommit: {}\n{} build",
            env!("CARGO_PKG_NAME"),
            self.version,
            self.commit,
            if self.release_build { "Release" } else { "Dev" }
        )
    }
}

pub fn get_system_info() -> String {
    BuildInfo::current().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_label_variants() {
        assert_eq!(version_label("v1.2.0", "v1.2.0", "0"), "release v1.2.0");
        assert_eq!(
            version_label("", "v1.2.0", "4"),
            "development build 4 commits after v1.2.0"
        );
        assert_eq!(version_label("", "v1.2.0", ""), "development build after v1.2.0");
        assert_eq!(
            version_label("", "", ""),
            format!("development {}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn system_info_lists_commit_and_profile() {
        let info = get_system_info();
        assert!(info.starts_with("pricebot - "));
        assert!(info.contains(COMMIT));
        assert!(info.contains("Dev build") || info.contains("Release build"));
    }
}
