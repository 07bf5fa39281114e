use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scores for game-ending positions. These dominate every other term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalWeights {
    pub win: i64,
    pub loss: i64,
    pub tie: i64,
}

impl Default for TerminalWeights {
    fn default() -> Self {
        TerminalWeights {
            win: 1_000_000,
            loss: -1_000_000,
            tie: 0,
        }
    }
}

/// Weights for being one move away from winning or losing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImmediateWeights {
    pub can_win: f64,
    pub must_block: f64,
    #[serde(alias = "create_multiple_threats")]
    pub fork_opportunity: f64,
}

impl Default for ImmediateWeights {
    fn default() -> Self {
        ImmediateWeights {
            can_win: 900.0,
            must_block: 1000.0,
            fork_opportunity: 5000.0,
        }
    }
}

/// Weights for runs one piece short of winning that are not yet immediate
/// threats, split by how many extension cells remain empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunWeights {
    pub both_ends_open: f64,
    pub one_end_open: f64,
    pub block_opponent_both_ends: f64,
    pub block_opponent_one_end: f64,
}

impl Default for RunWeights {
    fn default() -> Self {
        RunWeights {
            both_ends_open: 120.0,
            one_end_open: 60.0,
            block_opponent_both_ends: 130.0,
            block_opponent_one_end: 70.0,
        }
    }
}

/// Weights for runs two pieces short of winning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortRunWeights {
    pub both_ends_open: f64,
    pub one_end_open: f64,
    pub block_opponent_both_ends: f64,
    pub block_opponent_one_end: f64,
    pub center_column: f64,
}

impl Default for ShortRunWeights {
    fn default() -> Self {
        ShortRunWeights {
            both_ends_open: 20.0,
            one_end_open: 8.0,
            block_opponent_both_ends: 22.0,
            block_opponent_one_end: 9.0,
            center_column: 6.0,
        }
    }
}

/// Static positional value, independent of runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalWeights {
    pub center_control: f64,
    pub foundation_pieces: f64,
    pub one_in_row_center: f64,
    pub one_in_row_edge: f64,
    pub adjacent_to_pieces: f64,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        PositionalWeights {
            center_control: 8.0,
            foundation_pieces: 3.0,
            one_in_row_center: 2.0,
            one_in_row_edge: 1.0,
            adjacent_to_pieces: 2.0,
        }
    }
}

/// Magnitudes of negative adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    pub edge_columns: f64,
    pub isolated_pieces: f64,
    pub blocking_own_sequence: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        PenaltyWeights {
            edge_columns: 2.0,
            isolated_pieces: 1.0,
            blocking_own_sequence: 5.0,
        }
    }
}

/// Every weight the heuristic evaluator reads, grouped by category.
///
/// All magnitudes except `terminal.loss` are non-negative; the evaluator
/// applies the sign depending on whose pattern it is scoring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub terminal: TerminalWeights,
    pub immediate: ImmediateWeights,
    #[serde(alias = "three_in_row")]
    pub run_minus_one: RunWeights,
    #[serde(alias = "two_in_row")]
    pub run_minus_two: ShortRunWeights,
    pub positional: PositionalWeights,
    pub penalties: PenaltyWeights,
}

impl EvaluationConfig {
    pub fn with_immediate(self, immediate: ImmediateWeights) -> Self {
        EvaluationConfig { immediate, ..self }
    }

    pub fn with_run_minus_one(self, run_minus_one: RunWeights) -> Self {
        EvaluationConfig {
            run_minus_one,
            ..self
        }
    }

    pub fn with_positional(self, positional: PositionalWeights) -> Self {
        EvaluationConfig { positional, ..self }
    }

    /// Validate weight values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.win <= 0 {
            return Err(ConfigError::Validation("terminal.win must be > 0".into()));
        }
        if self.terminal.loss >= 0 {
            return Err(ConfigError::Validation("terminal.loss must be < 0".into()));
        }

        let magnitudes = [
            ("immediate.can_win", self.immediate.can_win),
            ("immediate.must_block", self.immediate.must_block),
            ("immediate.fork_opportunity", self.immediate.fork_opportunity),
            ("run_minus_one.both_ends_open", self.run_minus_one.both_ends_open),
            ("run_minus_one.one_end_open", self.run_minus_one.one_end_open),
            (
                "run_minus_one.block_opponent_both_ends",
                self.run_minus_one.block_opponent_both_ends,
            ),
            (
                "run_minus_one.block_opponent_one_end",
                self.run_minus_one.block_opponent_one_end,
            ),
            ("run_minus_two.both_ends_open", self.run_minus_two.both_ends_open),
            ("run_minus_two.one_end_open", self.run_minus_two.one_end_open),
            (
                "run_minus_two.block_opponent_both_ends",
                self.run_minus_two.block_opponent_both_ends,
            ),
            (
                "run_minus_two.block_opponent_one_end",
                self.run_minus_two.block_opponent_one_end,
            ),
            ("run_minus_two.center_column", self.run_minus_two.center_column),
            ("positional.center_control", self.positional.center_control),
            ("positional.foundation_pieces", self.positional.foundation_pieces),
            ("positional.one_in_row_center", self.positional.one_in_row_center),
            ("positional.one_in_row_edge", self.positional.one_in_row_edge),
            ("positional.adjacent_to_pieces", self.positional.adjacent_to_pieces),
            ("penalties.edge_columns", self.penalties.edge_columns),
            ("penalties.isolated_pieces", self.penalties.isolated_pieces),
            ("penalties.blocking_own_sequence", self.penalties.blocking_own_sequence),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a finite value >= 0 (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// Named difficulty presets. Each is the baseline with the `immediate`,
/// `run_minus_one` and `positional` groups overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Easy, Preset::Medium, Preset::Hard];

    /// The preset's weights, built on first use and shared afterwards.
    pub fn config(self) -> &'static EvaluationConfig {
        static EASY: OnceLock<EvaluationConfig> = OnceLock::new();
        static MEDIUM: OnceLock<EvaluationConfig> = OnceLock::new();
        static HARD: OnceLock<EvaluationConfig> = OnceLock::new();

        match self {
            Preset::Easy => EASY.get_or_init(|| {
                EvaluationConfig::default()
                    .with_immediate(ImmediateWeights {
                        can_win: 600.0,
                        must_block: 700.0,
                        fork_opportunity: 2500.0,
                    })
                    .with_run_minus_one(RunWeights {
                        both_ends_open: 60.0,
                        one_end_open: 30.0,
                        block_opponent_both_ends: 65.0,
                        block_opponent_one_end: 35.0,
                    })
                    .with_positional(PositionalWeights {
                        center_control: 4.0,
                        foundation_pieces: 2.0,
                        one_in_row_center: 1.0,
                        one_in_row_edge: 1.0,
                        adjacent_to_pieces: 1.0,
                    })
            }),
            Preset::Medium => MEDIUM.get_or_init(EvaluationConfig::default),
            Preset::Hard => HARD.get_or_init(|| {
                EvaluationConfig::default()
                    .with_immediate(ImmediateWeights {
                        can_win: 1500.0,
                        must_block: 1800.0,
                        fork_opportunity: 8000.0,
                    })
                    .with_run_minus_one(RunWeights {
                        both_ends_open: 200.0,
                        one_end_open: 90.0,
                        block_opponent_both_ends: 220.0,
                        block_opponent_one_end: 100.0,
                    })
                    .with_positional(PositionalWeights {
                        center_control: 10.0,
                        foundation_pieces: 4.0,
                        one_in_row_center: 3.0,
                        one_in_row_edge: 1.0,
                        adjacent_to_pieces: 3.0,
                    })
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Easy => "easy",
            Preset::Medium => "medium",
            Preset::Hard => "hard",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Preset::Easy),
            "medium" => Ok(Preset::Medium),
            "hard" => Ok(Preset::Hard),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// When the minimax recursion stops descending before the depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalRule {
    /// Stop as soon as the static evaluation is nonzero.
    NonZeroScore,
    /// Stop only on a completed run or a full board.
    #[default]
    GameOver,
}

impl FromStr for TerminalRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "nonzero" | "nonzeroscore" => Ok(TerminalRule::NonZeroScore),
            "gameover" => Ok(TerminalRule::GameOver),
            _ => Err(ConfigError::Validation(format!(
                "unknown terminal rule '{s}' (expected 'nonzero' or 'gameover')"
            ))),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies explored below the root before falling back to the static score
    pub depth_limit: usize,
    pub terminal_rule: TerminalRule,
    /// Alpha-beta cutoffs with center-first ordering. Never changes the result.
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth_limit: 3,
            terminal_rule: TerminalRule::default(),
            alpha_beta: false,
        }
    }
}

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

impl EngineConfig {
    pub fn from_preset(preset: Preset) -> Self {
        EngineConfig {
            evaluation: *preset.config(),
            search: SearchConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth_limit == 0 {
            return Err(ConfigError::Validation(
                "search.depth_limit must be >= 1".into(),
            ));
        }
        self.evaluation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.search.depth_limit, 3);
        assert_eq!(config.search.terminal_rule, TerminalRule::GameOver);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            preset
                .config()
                .validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", preset.name()));
        }
    }

    #[test]
    fn test_medium_is_baseline() {
        assert_eq!(*Preset::Medium.config(), EvaluationConfig::default());
    }

    #[test]
    fn test_presets_only_differ_in_tuned_groups() {
        let base = EvaluationConfig::default();
        for preset in [Preset::Easy, Preset::Hard] {
            let config = preset.config();
            assert_eq!(config.terminal, base.terminal);
            assert_eq!(config.run_minus_two, base.run_minus_two);
            assert_eq!(config.penalties, base.penalties);
            assert_ne!(config.immediate, base.immediate);
            assert_ne!(config.run_minus_one, base.run_minus_one);
            assert_ne!(config.positional, base.positional);
        }
    }

    #[test]
    fn test_preset_built_once() {
        assert!(std::ptr::eq(Preset::Hard.config(), Preset::Hard.config()));
    }

    #[test]
    fn test_building_preset_leaves_baseline_alone() {
        let _ = Preset::Easy.config();
        assert_eq!(EvaluationConfig::default().immediate.can_win, 900.0);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("HARD".parse::<Preset>().unwrap(), Preset::Hard);
        assert!(matches!(
            "brutal".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_parse_terminal_rule() {
        assert_eq!(
            "nonzero".parse::<TerminalRule>().unwrap(),
            TerminalRule::NonZeroScore
        );
        assert_eq!(
            "game-over".parse::<TerminalRule>().unwrap(),
            TerminalRule::GameOver
        );
        assert!("sometimes".parse::<TerminalRule>().is_err());
    }

    #[test]
    fn test_partial_toml_overrides_baseline() {
        let toml_str = r#"
            [evaluation.immediate]
            can_win = 1234.0

            [evaluation.three_in_row]
            both_ends_open = 99.0

            [search]
            depth_limit = 5
            terminal_rule = "non_zero_score"
        "#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.evaluation.immediate.can_win, 1234.0);
        assert_eq!(config.evaluation.immediate.must_block, 1000.0);
        assert_eq!(config.evaluation.run_minus_one.both_ends_open, 99.0);
        assert_eq!(config.evaluation.positional, PositionalWeights::default());
        assert_eq!(config.search.depth_limit, 5);
        assert_eq!(config.search.terminal_rule, TerminalRule::NonZeroScore);
        assert!(!config.search.alpha_beta);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::from_preset(Preset::Hard);
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = EngineConfig::default();
        config.search.depth_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_negative_loss() {
        let mut config = EngineConfig::default();
        config.evaluation.terminal.loss = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_win() {
        let mut config = EngineConfig::default();
        config.evaluation.terminal.win = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_weight() {
        let mut config = EngineConfig::default();
        config.evaluation.penalties.edge_columns = -2.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("penalties.edge_columns"));
    }

    #[test]
    fn test_validation_rejects_nan_weight() {
        let mut config = EngineConfig::default();
        config.evaluation.positional.center_control = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let config =
            EngineConfig::load_or_default(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = EngineConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
