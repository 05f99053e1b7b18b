//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// Level 0 stays silent, level 1 reports copies, removals and the file
    /// list, level 2 adds skipped entries and filter decisions, level 3 and
    /// above enable per-entry traversal and per-pattern evaluation traces.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        if level >= 1 {
            config.info.copy = 1;
            config.info.del = 1;
            config.info.flist = 1;
            config.info.name = 1;
        }
        if level >= 2 {
            config.info.name = 2;
            config.info.skip = 1;
            config.debug.filter = 1;
            config.debug.flist = 1;
            config.debug.dup = 1;
        }
        if level >= 3 {
            config.info.skip = 2;
            config.debug.del = 1;
            config.debug.filter = 2;
            config.debug.flist = 3;
        }
        if level >= 4 {
            config.debug.filter = 3;
            config.debug.flist = 4;
            config.debug.del = 2;
        }

        config
    }

    /// Apply a single info flag token (e.g., "copy2", "skip", "all").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.info.set_all(level);
            return Ok(());
        }

        let flag = InfoFlag::from_name(name).ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "filter2", "flist", "all").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag =
            DebugFlag::from_name(name).ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "copy2" into ("copy", 2) or "del" into ("del", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in token: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_level_zero_is_silent() {
        assert_eq!(
            VerbosityConfig::from_verbose_level(0),
            VerbosityConfig::default()
        );
    }

    #[test]
    fn verbose_level_one_reports_operations() {
        let config = VerbosityConfig::from_verbose_level(1);

        assert_eq!(config.info.copy, 1);
        assert_eq!(config.info.del, 1);
        assert_eq!(config.info.flist, 1);
        assert_eq!(config.info.skip, 0);
        assert_eq!(config.debug.filter, 0);
    }

    #[test]
    fn verbose_level_two_enables_filter_debugging() {
        let config = VerbosityConfig::from_verbose_level(2);

        assert_eq!(config.info.name, 2);
        assert_eq!(config.info.skip, 1);
        assert_eq!(config.debug.filter, 1);
        assert_eq!(config.debug.flist, 1);
    }

    #[test]
    fn higher_levels_are_monotonic() {
        let three = VerbosityConfig::from_verbose_level(3);
        let four = VerbosityConfig::from_verbose_level(4);
        let many = VerbosityConfig::from_verbose_level(9);

        assert!(four.debug.filter > three.debug.filter);
        assert!(four.debug.flist > three.debug.flist);
        assert_eq!(four, many);
    }

    #[test]
    fn parse_flag_token_splits_level() {
        assert_eq!(parse_flag_token("copy").unwrap(), ("copy", 1));
        assert_eq!(parse_flag_token("copy2").unwrap(), ("copy", 2));
        assert_eq!(parse_flag_token("flist10").unwrap(), ("flist", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("3").is_err());
        assert!(parse_flag_token("copy999").is_err());
    }

    #[test]
    fn apply_info_flag_sets_single_flag() {
        let mut config = VerbosityConfig::default();

        config.apply_info_flag("skip").unwrap();
        assert_eq!(config.info.skip, 1);

        config.apply_info_flag("skip2").unwrap();
        assert_eq!(config.info.skip, 2);
        assert_eq!(config.info.copy, 0);

        assert!(config.apply_info_flag("invalid").is_err());
    }

    #[test]
    fn apply_debug_flag_all_sets_every_flag() {
        let mut config = VerbosityConfig::default();

        config.apply_debug_flag("all3").unwrap();
        assert_eq!(config.debug.filter, 3);
        assert_eq!(config.debug.flist, 3);
        assert_eq!(config.debug.del, 3);
        assert_eq!(config.debug.dup, 3);

        assert!(config.apply_debug_flag("copy").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_survives_json_round_trip() {
        let config = VerbosityConfig::from_verbose_level(3);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: VerbosityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
