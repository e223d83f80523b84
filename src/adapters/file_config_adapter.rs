//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[simulation]
initial_capital = 100000.0
base_unit = 3000
streak_threshold = 3

[data]
history = data/600519_history.csv
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "history"),
            Some("data/600519_history.csv".to_string())
        );
        assert_eq!(
            adapter.get_double("simulation", "initial_capital", 0.0),
            100_000.0
        );
        assert_eq!(adapter.get_int("simulation", "streak_threshold", 0), 3);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nbase_unit = 3000\n").unwrap();
        assert_eq!(adapter.get_string("simulation", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nlookback = abc\n").unwrap();
        assert_eq!(adapter.get_int("simulation", "lookback", 120), 120);
        assert_eq!(adapter.get_int("simulation", "missing", 42), 42);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nclip_low = 8.0\nclip_high = x\n")
                .unwrap();
        assert_eq!(adapter.get_double("simulation", "clip_low", 0.0), 8.0);
        assert_eq!(adapter.get_double("simulation", "clip_high", 20.0), 20.0);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[data]\nhistory = /tmp/history.csv\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "history"),
            Some("/tmp/history.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/valuesim.ini").is_err());
    }
}
