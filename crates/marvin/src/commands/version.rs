//! Version command

use crate::cli::VersionArgs;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.banner());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_current_is_valid_semver() {
        let info = VersionInfo::current();
        let parsed = semver::Version::parse(&info.version);
        assert!(
            parsed.is_ok(),
            "version should be valid semver, got: {}",
            info.version
        );
    }

    #[test]
    fn test_version_info_current_carries_target() {
        let info = VersionInfo::current();
        let target = info.target.as_deref().expect("build script should set TARGET");
        assert!(
            target.split('-').count() >= 3,
            "target should be a triple, got: {}",
            target
        );
        assert!(info.display().ends_with(target));

        let json = serde_json::to_value(&info).expect("should serialize to JSON");
        assert_eq!(json["target"], target);
    }

    #[test]
    fn test_version_info_display() {
        let info = VersionInfo {
            version: "1.2.3".to_string(),
            commit: Some("abc1234".to_string()),
            target: Some("x86_64-unknown-linux-gnu".to_string()),
        };
        assert_eq!(info.display(), "marvin 1.2.3 (abc1234) x86_64-unknown-linux-gnu");
        assert_eq!(format!("{}", info), info.display());
    }

    #[test]
    fn test_version_info_display_without_optional_fields() {
        let info = VersionInfo {
            version: "0.1.0".to_string(),
            commit: None,
            target: None,
        };
        assert_eq!(info.display(), "marvin 0.1.0");
    }

    #[test]
    fn test_banner_ends_with_version_line() {
        let info = VersionInfo::current();
        let banner = info.banner();
        assert!(banner.contains("|_|  |_/_/"));
        assert!(banner.ends_with(&info.display()));
    }

    #[test]
    fn test_version_info_json_serialization() {
        let info = VersionInfo::current();
        let json = serde_json::to_string(&info).expect("should serialize to JSON");

        let deserialized: VersionInfo =
            serde_json::from_str(&json).expect("should deserialize from JSON");
        assert_eq!(deserialized.version, info.version);
    }
}
