//! Tunable combat rules

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Combat balance knobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatRules {
    #[serde(default)]
    pub crit: CritRules,
    #[serde(default)]
    pub corrosion: CorrosionRules,
    #[serde(default)]
    pub status: StatusRules,
}

impl CombatRules {
    /// Load and validate rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let rules: CombatRules = super::load_toml(path)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Parse and validate rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let rules: CombatRules = super::parse_toml(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crit.multiplier < 1 {
            return Err(ConfigError::ValidationError(format!(
                "crit.multiplier must be at least 1, got {}",
                self.crit.multiplier
            )));
        }
        if self.corrosion.chance_percent > 100 {
            return Err(ConfigError::ValidationError(format!(
                "corrosion.chance_percent must be at most 100, got {}",
                self.corrosion.chance_percent
            )));
        }
        if !(self.corrosion.floor_ratio > 0.0 && self.corrosion.floor_ratio <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "corrosion.floor_ratio must be in (0, 1], got {}",
                self.corrosion.floor_ratio
            )));
        }
        let durations = [
            ("status.poison_duration", self.status.poison_duration),
            ("status.engulf_duration", self.status.engulf_duration),
            ("status.entangle_duration", self.status.entangle_duration),
        ];
        for (name, value) in durations {
            if value < 1 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be at least 1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritRules {
    /// Damage multiplier on a critical hit
    #[serde(default = "default_crit_multiplier")]
    pub multiplier: i32,
}

impl Default for CritRules {
    fn default() -> Self {
        CritRules {
            multiplier: default_crit_multiplier(),
        }
    }
}

fn default_crit_multiplier() -> i32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrosionRules {
    /// Chance per hit that a corrosive attacker eats into a weapon
    #[serde(default = "default_corrosion_chance")]
    pub chance_percent: u32,
    /// Fraction of the original `damage_max` corrosion can never go below
    #[serde(default = "default_corrosion_floor")]
    pub floor_ratio: f64,
}

impl Default for CorrosionRules {
    fn default() -> Self {
        CorrosionRules {
            chance_percent: default_corrosion_chance(),
            floor_ratio: default_corrosion_floor(),
        }
    }
}

fn default_corrosion_chance() -> u32 {
    5
}
fn default_corrosion_floor() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRules {
    #[serde(default = "default_poison_duration")]
    pub poison_duration: i32,
    /// Poison damage per turn
    #[serde(default = "default_poison_damage")]
    pub poison_damage: i32,
    #[serde(default = "default_engulf_duration")]
    pub engulf_duration: i32,
    #[serde(default = "default_entangle_duration")]
    pub entangle_duration: i32,
}

impl Default for StatusRules {
    fn default() -> Self {
        StatusRules {
            poison_duration: default_poison_duration(),
            poison_damage: default_poison_damage(),
            engulf_duration: default_engulf_duration(),
            entangle_duration: default_entangle_duration(),
        }
    }
}

fn default_poison_duration() -> i32 {
    5
}
fn default_poison_damage() -> i32 {
    1
}
fn default_engulf_duration() -> i32 {
    3
}
fn default_entangle_duration() -> i32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = CombatRules::default();
        assert_eq!(rules.crit.multiplier, 2);
        assert_eq!(rules.corrosion.chance_percent, 5);
        assert!((rules.corrosion.floor_ratio - 0.5).abs() < f64::EPSILON);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_rules() {
        let toml = r#"
[corrosion]
chance_percent = 25

[status]
poison_damage = 2
"#;
        let rules = CombatRules::parse(toml).unwrap();
        assert_eq!(rules.corrosion.chance_percent, 25);
        assert!((rules.corrosion.floor_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(rules.status.poison_damage, 2);
        assert_eq!(rules.status.poison_duration, 5);
        assert_eq!(rules.crit.multiplier, 2);
    }

    #[test]
    fn test_empty_rules_are_defaults() {
        let rules = CombatRules::parse("").unwrap();
        assert_eq!(rules, CombatRules::default());
    }

    #[test]
    fn test_validation_errors() {
        let err = CombatRules::parse("[corrosion]\nfloor_ratio = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let err = CombatRules::parse("[status]\nengulf_duration = 0\n").unwrap_err();
        assert!(err.to_string().contains("engulf_duration"));

        let err = CombatRules::parse("[crit]\nmultiplier = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
