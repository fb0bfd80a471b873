// crates/learnsync-analysis/src/level.rs
//
// Keyword-driven difficulty inference.
//
// Rules are checked in order and the first rule with a keyword contained in
// the lower-cased text wins. The default rule set classifies anything with an
// "advanced"/"project" signal as Intermediate, so Advanced is only reachable
// through configured rules or an explicit caller-supplied level.

use serde::Deserialize;

use learnsync_core::Level;

/// One keyword rule: any keyword present in the text selects `level`.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelRule {
    pub level: Level,
    pub keywords: Vec<String>,
}

/// Ordered keyword rules plus the level used when none match.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelRules {
    #[serde(default = "default_rules")]
    pub rules: Vec<LevelRule>,

    #[serde(default = "default_level")]
    pub default_level: Level,
}

fn default_rules() -> Vec<LevelRule> {
    vec![
        LevelRule {
            level: Level::Beginner,
            keywords: ["beginner", "intro", "مقدمة", "أساس", "basic", "مبتدئ"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        },
        LevelRule {
            level: Level::Intermediate,
            keywords: [
                "intermediate",
                "متوسط",
                "متقدم",
                "advanced",
                "project",
                "practical",
                "مشروع",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        },
    ]
}

fn default_level() -> Level {
    Level::Intermediate
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            default_level: default_level(),
        }
    }
}

/// Classifies combined resource text into a [`Level`].
#[derive(Debug, Clone)]
pub struct LevelInferencer {
    rules: Vec<(Level, Vec<String>)>,
    default_level: Level,
}

impl LevelInferencer {
    /// Build an inferencer, lower-casing keywords and dropping empty ones.
    pub fn new(rules: LevelRules) -> Self {
        let default_level = rules.default_level;
        let rules = rules
            .rules
            .into_iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.level, keywords)
            })
            .collect();
        Self {
            rules,
            default_level,
        }
    }

    pub fn infer(&self, text: &str) -> Level {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|(level, _)| *level)
            .unwrap_or(self.default_level)
    }
}

impl Default for LevelInferencer {
    fn default() -> Self {
        Self::new(LevelRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beginner_keyword_wins() {
        let inf = LevelInferencer::default();
        assert_eq!(inf.infer("An Intro to Ownership"), Level::Beginner);
        assert_eq!(inf.infer("مقدمة في البرمجة"), Level::Beginner);
    }

    #[test]
    fn beginner_takes_priority_over_advanced() {
        let inf = LevelInferencer::default();
        assert_eq!(
            inf.infer("Advanced patterns for the BEGINNER"),
            Level::Beginner
        );
    }

    #[test]
    fn advanced_signal_maps_to_intermediate() {
        let inf = LevelInferencer::default();
        assert_eq!(inf.infer("Advanced async internals"), Level::Intermediate);
        assert_eq!(inf.infer("بناء مشروع كامل"), Level::Intermediate);
    }

    #[test]
    fn no_keywords_defaults_to_intermediate() {
        let inf = LevelInferencer::default();
        assert_eq!(inf.infer("Lifetimes explained"), Level::Intermediate);
        assert_eq!(inf.infer(""), Level::Intermediate);
    }

    #[test]
    fn custom_rules_make_advanced_reachable() {
        let inf = LevelInferencer::new(LevelRules {
            rules: vec![
                LevelRule {
                    level: Level::Advanced,
                    keywords: vec!["  Deep Dive ".to_string(), String::new()],
                },
                LevelRule {
                    level: Level::Beginner,
                    keywords: vec!["basics".to_string()],
                },
            ],
            default_level: Level::Beginner,
        });
        assert_eq!(inf.infer("A deep dive into the basics"), Level::Advanced);
        assert_eq!(inf.infer("Basics of traits"), Level::Beginner);
        // The empty keyword is dropped rather than matching everything.
        assert_eq!(inf.infer("Generic bounds"), Level::Beginner);
    }
}
