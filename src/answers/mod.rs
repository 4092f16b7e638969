use std::collections::BTreeMap;

use crate::error::{Result, SproutError};

/// Key holding the project name; also the value substituted for the path token.
pub const PROJECT_NAME: &str = "projectName";
pub const DESCRIPTION: &str = "description";

/// The answer set gathered once per invocation and handed to the materializer.
///
/// Lookups are by exact key. Values are never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<String, String>,
}

impl Answers {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `projectName` answer, validated as a single path segment.
    pub fn project_name(&self) -> Result<&str> {
        let name = self
            .get(PROJECT_NAME)
            .ok_or_else(|| SproutError::AnswerValidation {
                name: PROJECT_NAME.to_string(),
                reason: "no value was supplied".into(),
            })?;
        validate_project_name(name)?;
        Ok(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Answers {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Answers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The project name becomes a directory under the output root, so it must be a
/// single non-empty path segment.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| SproutError::AnswerValidation {
        name: PROJECT_NAME.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("must not be '.' or '..'"));
    }

    let re = regex_lite::Regex::new(r"^[^/\\\x00]+$").map_err(|e| invalid(&e.to_string()))?;
    if !re.is_match(name) {
        return Err(invalid("must not contain path separators"));
    }

    Ok(())
}
