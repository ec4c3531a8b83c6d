use crate::error::CliError;
use clap::Args;
use connectors::file::csv::settings::CsvSettings;
use std::{collections::HashMap, path::PathBuf};

pub const ENV_DATA_DIR: &str = "CSVQL_DATA_DIR";
pub const ENV_DELIMITER: &str = "CSVQL_DELIMITER";
pub const ENV_NO_HEADERS: &str = "CSVQL_NO_HEADERS";
pub const ENV_NO_INFER: &str = "CSVQL_NO_INFER";

/// Flags describing where tables live and how to read them.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, help = "Directory holding <table>.csv files [env: CSVQL_DATA_DIR]")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Field delimiter [env: CSVQL_DELIMITER, default: ,]")]
    pub delimiter: Option<char>,

    #[arg(long, help = "Files have no header row; columns are named column_1..n")]
    pub no_headers: bool,

    #[arg(long, help = "Read every cell as a string instead of inferring types")]
    pub no_infer: bool,
}

/// Resolved source configuration. Flags win over the environment, which wins
/// over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: CsvSettings,
}

impl Config {
    pub fn from_env(args: &SourceArgs) -> Result<Self, CliError> {
        Self::resolve(args, &std::env::vars().collect())
    }

    pub fn resolve(args: &SourceArgs, env: &HashMap<String, String>) -> Result<Self, CliError> {
        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| env.get(ENV_DATA_DIR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let delimiter = match (args.delimiter, env.get(ENV_DELIMITER)) {
            (Some(delimiter), _) => delimiter,
            (None, Some(raw)) => parse_delimiter(raw)?,
            (None, None) => CsvSettings::default().delimiter,
        };

        let no_headers = args.no_headers || env_flag(env, ENV_NO_HEADERS);
        let no_infer = args.no_infer || env_flag(env, ENV_NO_INFER);

        Ok(Config {
            data_dir,
            settings: CsvSettings::new(delimiter, !no_headers).with_infer_types(!no_infer),
        })
    }
}

fn parse_delimiter(raw: &str) -> Result<char, CliError> {
    if raw == "\\t" {
        return Ok('\t');
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::InvalidConfig(format!(
            "{ENV_DELIMITER} must be a single character, got {raw:?}"
        ))),
    }
}

fn env_flag(env: &HashMap<String, String>, key: &str) -> bool {
    env.get(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(&SourceArgs::default(), &HashMap::new()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.settings, CsvSettings::default());
    }

    #[test]
    fn environment_fills_missing_flags() {
        let vars = env(&[
            (ENV_DATA_DIR, "/data"),
            (ENV_DELIMITER, ";"),
            (ENV_NO_HEADERS, "true"),
            (ENV_NO_INFER, "1"),
        ]);
        let config = Config::resolve(&SourceArgs::default(), &vars).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.settings.delimiter, ';');
        assert!(!config.settings.has_headers);
        assert!(!config.settings.infer_types);
    }

    #[test]
    fn flags_win_over_environment() {
        let args = SourceArgs {
            data_dir: Some("/flag".into()),
            delimiter: Some('|'),
            ..Default::default()
        };
        let vars = env(&[(ENV_DATA_DIR, "/env"), (ENV_DELIMITER, ";"), (ENV_NO_HEADERS, "no")]);
        let config = Config::resolve(&args, &vars).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/flag"));
        assert_eq!(config.settings.delimiter, '|');
        assert!(config.settings.has_headers);
    }

    #[test]
    fn delimiter_must_be_one_character() {
        let vars = env(&[(ENV_DELIMITER, ";;")]);
        let err = Config::resolve(&SourceArgs::default(), &vars).unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));

        let vars = env(&[(ENV_DELIMITER, "\\t")]);
        let config = Config::resolve(&SourceArgs::default(), &vars).unwrap();
        assert_eq!(config.settings.delimiter, '\t');
    }
}
