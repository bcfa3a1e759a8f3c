//! Rule tables that drive suggestion generation.

use std::fs;
use std::path::Path;

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{EmendError, Result};

use super::Category;

/// A single find-and-suggest rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Short identifier, recorded as the suggester of each match.
    pub name: String,

    /// Regular expression, matched case-insensitively.
    pub pattern: String,

    /// Replacement template. `$0` and named groups expand from the match.
    pub replacement: String,

    /// Why the edit helps.
    pub rationale: String,

    pub category: Category,

    /// Stop this rule once the batch holds this many suggestions from all
    /// rules so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<usize>,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
            rationale: String::new(),
            category,
            cap: None,
        }
    }

    /// Set the rationale.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Set the cumulative cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Compile the pattern.
    pub fn compile(&self) -> Result<CompiledRule> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()?;

        Ok(CompiledRule {
            rule: self.clone(),
            regex,
        })
    }
}

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub regex: Regex,
}

impl CompiledRule {
    /// Expand the replacement template against one match.
    pub fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        caps.expand(&self.rule.replacement, &mut out);
        out
    }
}

/// An ordered table of rules. Earlier rules take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in table.
    pub fn standard() -> Self {
        Self::new(vec![
            Rule::new("end_of_q2", "end of Q2", "the end of Q2", Category::Grammar)
                .with_rationale("Added \"the\" for grammatical correctness"),
            Rule::new("report", "report", "detailed report", Category::Clarity)
                .with_rationale("Enhanced clarity with adjective")
                .with_cap(5),
            Rule::new("important", "important", "crucial", Category::Style)
                .with_rationale("Improved style with stronger adjective")
                .with_cap(10),
        ])
    }

    /// Parse a rule table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: RuleSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a rule table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| EmendError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Check the table is usable.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(EmendError::Config("rule table is empty".to_string()));
        }
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(EmendError::Config(format!(
                    "rule with pattern '{}' has no name",
                    rule.pattern
                )));
            }
            rule.compile()?;
        }
        Ok(())
    }

    /// Compile every rule, preserving order.
    pub fn compile(&self) -> Result<Vec<CompiledRule>> {
        self.rules.iter().map(Rule::compile).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let set = RuleSet::standard();
        assert_eq!(set.len(), 3);
        assert_eq!(set.rules[0].cap, None);
        assert_eq!(set.rules[1].cap, Some(5));
        assert_eq!(set.rules[2].cap, Some(10));
        assert!(set.validate().is_ok());
    }

    #[test]
    fn test_case_insensitive_match() {
        let compiled = Rule::new("r", "report", "detailed report", Category::Clarity)
            .compile()
            .unwrap();
        assert!(compiled.regex.is_match("The REPORT is late"));
    }

    #[test]
    fn test_template_expansion() {
        let compiled = Rule::new("utilize", r"utiliz(?<tail>ed|es|e)", "us$tail", Category::Style)
            .compile()
            .unwrap();
        let caps = compiled.regex.captures("we utilized it").unwrap();
        assert_eq!(compiled.expand(&caps), "used");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "rules": [
                {"name": "very", "pattern": "very ", "replacement": "", "rationale": "Filler", "category": "style", "cap": 3}
            ]
        }"#;
        let set = RuleSet::from_json(json).unwrap();
        assert_eq!(set.rules[0].category, Category::Style);
        assert_eq!(set.rules[0].cap, Some(3));
    }

    #[test]
    fn test_invalid_tables() {
        assert!(matches!(
            RuleSet::from_json(r#"{"rules": []}"#),
            Err(EmendError::Config(_))
        ));

        let bad = r#"{"rules": [{"name": "x", "pattern": "(", "replacement": "", "rationale": "", "category": "style"}]}"#;
        assert!(matches!(RuleSet::from_json(bad), Err(EmendError::Regex(_))));
    }
}
