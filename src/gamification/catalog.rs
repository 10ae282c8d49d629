use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{BadgeThreshold, GamificationConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate badge name: {0}")]
    DuplicateName(String),

    #[error("Badge name must not be empty")]
    EmptyName,

    #[error("At least one badge rule is required")]
    NoRules,

    #[error("Points for {event} must be positive, got {points}")]
    NonPositiveEventPoints { event: &'static str, points: i64 },
}

/// What a pet's total must satisfy to earn a badge.
#[derive(Clone)]
pub enum BadgeCriterion {
    MinPoints(i64),
    Predicate(Arc<dyn Fn(i64) -> bool + Send + Sync>),
}

impl BadgeCriterion {
    pub fn is_met(&self, total: i64) -> bool {
        match self {
            BadgeCriterion::MinPoints(min) => total >= *min,
            BadgeCriterion::Predicate(predicate) => predicate(total),
        }
    }
}

impl fmt::Debug for BadgeCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeCriterion::MinPoints(min) => write!(f, "MinPoints({})", min),
            BadgeCriterion::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl fmt::Display for BadgeCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeCriterion::MinPoints(min) => write!(f, "points >= {}", min),
            BadgeCriterion::Predicate(_) => write!(f, "custom predicate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BadgeRule {
    name: String,
    criterion: BadgeCriterion,
}

impl BadgeRule {
    pub fn min_points(name: impl Into<String>, threshold: i64) -> Self {
        Self {
            name: name.into(),
            criterion: BadgeCriterion::MinPoints(threshold),
        }
    }

    pub fn predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(i64) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            criterion: BadgeCriterion::Predicate(Arc::new(predicate)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn criterion(&self) -> &BadgeCriterion {
        &self.criterion
    }

    pub fn is_satisfied(&self, total: i64) -> bool {
        self.criterion.is_met(total)
    }
}

impl From<&BadgeThreshold> for BadgeRule {
    fn from(threshold: &BadgeThreshold) -> Self {
        BadgeRule::min_points(threshold.name.clone(), threshold.min_points)
    }
}

/// Ordered, read-only set of badge rules shared by every evaluator.
///
/// Rule names are unique; order is the order rules were added and is the order
/// in which qualifying badges are granted.
#[derive(Debug, Clone, Default)]
pub struct BadgeCatalog {
    rules: Vec<BadgeRule>,
}

impl BadgeCatalog {
    pub fn new(rules: impl IntoIterator<Item = BadgeRule>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for rule in rules {
            catalog.push(rule)?;
        }
        Ok(catalog)
    }

    /// Super Pet at 100, Veteran Pet at 200, Ultimate Pet at `ultimate_threshold`.
    pub fn standard(ultimate_threshold: i64) -> Self {
        Self {
            rules: vec![
                BadgeRule::min_points("Super Pet", 100),
                BadgeRule::min_points("Veteran Pet", 200),
                BadgeRule::min_points("Ultimate Pet", ultimate_threshold),
            ],
        }
    }

    pub fn from_config(config: &GamificationConfig) -> Result<Self, CatalogError> {
        let catalog = Self::new(config.badges.iter().map(BadgeRule::from))?;
        if catalog.is_empty() {
            return Err(CatalogError::NoRules);
        }
        Ok(catalog)
    }

    pub fn push(&mut self, rule: BadgeRule) -> Result<(), CatalogError> {
        if rule.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.rules.iter().any(|existing| existing.name == rule.name) {
            return Err(CatalogError::DuplicateName(rule.name));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule satisfied by `total`, not only the ones just crossed.
    pub fn qualified(&self, total: i64) -> impl Iterator<Item = &BadgeRule> {
        self.rules.iter().filter(move |rule| rule.is_satisfied(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualified_names(catalog: &BadgeCatalog, total: i64) -> Vec<&str> {
        catalog.qualified(total).map(BadgeRule::name).collect()
    }

    #[test]
    fn standard_catalog_thresholds() {
        let catalog = BadgeCatalog::standard(300);
        assert!(qualified_names(&catalog, 99).is_empty());
        assert_eq!(qualified_names(&catalog, 100), vec!["Super Pet"]);
        assert_eq!(qualified_names(&catalog, 299), vec!["Super Pet", "Veteran Pet"]);
        assert_eq!(
            qualified_names(&catalog, 300),
            vec!["Super Pet", "Veteran Pet", "Ultimate Pet"]
        );
    }

    #[test]
    fn ultimate_threshold_can_be_lowered_for_parity() {
        let catalog = BadgeCatalog::standard(150);
        assert_eq!(qualified_names(&catalog, 150), vec!["Super Pet", "Ultimate Pet"]);
    }

    #[test]
    fn from_config_follows_configured_order() {
        let catalog = BadgeCatalog::from_config(&GamificationConfig::default()).unwrap();
        let names: Vec<&str> = catalog.rules().iter().map(BadgeRule::name).collect();
        assert_eq!(names, vec!["Super Pet", "Veteran Pet", "Ultimate Pet"]);
    }

    #[test]
    fn from_config_requires_at_least_one_rule() {
        let config = GamificationConfig {
            badges: vec![],
            ..GamificationConfig::default()
        };
        assert_eq!(BadgeCatalog::from_config(&config).unwrap_err(), CatalogError::NoRules);
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let mut catalog = BadgeCatalog::standard(300);
        assert_eq!(
            catalog.push(BadgeRule::min_points("Super Pet", 5)),
            Err(CatalogError::DuplicateName("Super Pet".to_string()))
        );
        assert_eq!(catalog.push(BadgeRule::min_points("  ", 5)), Err(CatalogError::EmptyName));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn appended_predicate_rules_are_evaluated() {
        let mut catalog = BadgeCatalog::standard(300);
        catalog
            .push(BadgeRule::predicate("Round Hundred", |p| p > 0 && p % 100 == 0))
            .unwrap();

        assert_eq!(qualified_names(&catalog, 250), vec!["Super Pet", "Veteran Pet"]);
        assert_eq!(
            qualified_names(&catalog, 200),
            vec!["Super Pet", "Veteran Pet", "Round Hundred"]
        );
        assert_eq!(catalog.rules()[3].criterion().to_string(), "custom predicate");
    }
}
