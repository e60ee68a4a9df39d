//! Detection settings from an optional JSON config file plus CLI overrides.

use clap::Args;
use hw_data::calibration::CalibrationScope;
use hw_data::config::DetectionConfig;
use hw_data::extraction::GapPolicy;
use hw_lst::filter::{MonthSet, YearRange};
use hw_lst::percentile::Percentile;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// JSON file with detection settings; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Threshold percentile: 90, 95 or 97.5
    #[arg(short, long)]
    pub percentile: Option<Percentile>,

    /// Months to keep, e.g. "1-3" or "11,12,1,2"
    #[arg(short, long)]
    pub months: Option<MonthSet>,

    /// Inclusive year range to keep, e.g. "2003-2022"
    #[arg(short, long)]
    pub years: Option<YearRange>,

    /// Threshold scope: global, per-region or per-region-month
    #[arg(long)]
    pub scope: Option<CalibrationScope>,

    /// Whether calendar gaps end a run: index-adjacent or calendar-adjacent
    #[arg(long)]
    pub gap_policy: Option<GapPolicy>,
}

impl SelectionArgs {
    /// Build the effective configuration.
    pub fn resolve(&self) -> anyhow::Result<DetectionConfig> {
        let mut config = match &self.config {
            Some(path) => DetectionConfig::from_path(path).map_err(|e| {
                anyhow::anyhow!("Failed to read config {}: {}", path.display(), e)
            })?,
            None => DetectionConfig::default(),
        };
        if let Some(percentile) = self.percentile {
            config.percentile = percentile;
        }
        if let Some(months) = &self.months {
            config.months = months.clone();
        }
        if let Some(years) = self.years {
            config.years = Some(years);
        }
        if let Some(scope) = self.scope {
            config.scope = scope;
        }
        if let Some(gap_policy) = self.gap_policy {
            config.gap_policy = gap_policy;
        }
        log::info!(
            "[HW] selection: p{} months [{}] scope {} gaps {}",
            config.percentile,
            config.months,
            config.scope,
            config.gap_policy
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_flags_gives_defaults() {
        let config = SelectionArgs::default().resolve().unwrap();
        assert_eq!(config, DetectionConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "percentile": 95, "months": [6, 7, 8], "scope": "global" }}"#).unwrap();
        file.flush().unwrap();

        let args = SelectionArgs {
            config: Some(file.path().to_path_buf()),
            percentile: Some(Percentile::P97_5),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.percentile, Percentile::P97_5);
        assert_eq!(config.months.iter().collect::<Vec<_>>(), vec![6, 7, 8]);
        assert_eq!(config.scope, CalibrationScope::Global);
    }

    #[test]
    fn bad_config_file_names_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "percentile": 50 }}"#).unwrap();
        file.flush().unwrap();

        let args = SelectionArgs {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err().to_string();
        assert!(err.contains(&file.path().display().to_string()));
    }
}
