use std::path::Path;

use anyhow::{Context, Result};
use lotofacil_engine::ScorerConfig;

/// Substituições vindas da linha de comando, aplicadas sobre o arquivo.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigOverrides {
    pub frequency_weight: Option<f64>,
    pub trend_weight: Option<f64>,
    pub pattern_weight: Option<f64>,
    pub hot_weight: Option<f64>,
    pub trend_window: Option<usize>,
    pub hot_window: Option<usize>,
}

pub fn load_config(path: &Path) -> Result<ScorerConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossível ler {}", path.display()))?;
    let config: ScorerConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON inválido em {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &ScorerConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossível escrever {}", path.display()))?;
    Ok(())
}

/// Arquivo (ou padrão), depois as flags; a validação fica para o seletor.
pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<ScorerConfig> {
    let mut config = match path {
        Some(p) => load_config(p)?,
        None => ScorerConfig::default(),
    };

    if let Some(w) = overrides.frequency_weight {
        config.frequency_weight = w;
    }
    if let Some(w) = overrides.trend_weight {
        config.trend_weight = w;
    }
    if let Some(w) = overrides.pattern_weight {
        config.pattern_weight = w;
    }
    if let Some(w) = overrides.hot_weight {
        config.hot_weight = w;
    }
    if let Some(k) = overrides.trend_window {
        config.trend_window = k;
    }
    if let Some(k) = overrides.hot_window {
        config.hot_window = k;
    }

    log::debug!("configuração do scorer: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorer.json");
        let config = ScorerConfig { trend_window: 30, ..ScorerConfig::default() };
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.trend_window, 30);
        assert!((loaded.hot_weight - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "hot_window": 10 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.hot_window, 10);
        assert_eq!(config.trend_window, 50);
        assert!((config.frequency_weight - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scorer.json");
        std::fs::write(&path, r#"{ "trend_window": 20, "hot_window": 3 }"#).unwrap();

        let overrides = ConfigOverrides { trend_window: Some(40), ..ConfigOverrides::default() };
        let config = resolve_config(Some(&path), overrides).unwrap();
        assert_eq!(config.trend_window, 40);
        assert_eq!(config.hot_window, 3);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
