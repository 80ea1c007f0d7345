use std::env;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::parse(&raw)
    }

    /// Splits a comma separated origin list, dropping blanks.
    pub fn parse(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let config = CorsConfig::parse(" http://a.dz , ,http://b.dz,");
        assert_eq!(config.allowed_origins, vec!["http://a.dz", "http://b.dz"]);
    }

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::parse(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(config.allowed_origins.len(), 2);
    }
}
