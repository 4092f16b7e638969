use std::collections::{BTreeMap, HashMap};

use crate::answers::{validate_project_name, Answers, PROJECT_NAME};
use crate::config::variable::Question;
use crate::error::{Result, SproutError};

#[derive(Default)]
pub struct PromptOptions {
    pub data_overrides: HashMap<String, String>,
    pub use_defaults: bool,
}

/// Gather one answer per question, then pass any extra overrides through as variables.
///
/// Per question the value comes from a `-d` override, then the default when
/// `use_defaults` is set, then an interactive prompt.
pub fn collect_answers(questions: &[Question], options: &PromptOptions) -> Result<Answers> {
    let mut values: BTreeMap<String, String> = BTreeMap::new();

    for question in questions {
        let answer = if let Some(override_val) = options.data_overrides.get(&question.name) {
            override_val.clone()
        } else if let (true, Some(default)) = (options.use_defaults, &question.default) {
            default.clone()
        } else {
            prompt_question(question)?
        };
        check_required(question, &answer)?;
        values.insert(question.name.clone(), answer);
    }

    for (name, value) in &options.data_overrides {
        values.entry(name.clone()).or_insert_with(|| value.clone());
    }

    let answers = Answers::from(values);
    answers.project_name()?;
    for (name, value) in answers.iter() {
        log::debug!("answer {name} = {value:?}");
    }
    Ok(answers)
}

fn check_required(question: &Question, answer: &str) -> Result<()> {
    if question.required && answer.trim().is_empty() {
        return Err(SproutError::AnswerValidation {
            name: question.name.clone(),
            reason: "a value is required".to_string(),
        });
    }
    Ok(())
}

fn prompt_question(question: &Question) -> Result<String> {
    let mut prompt = inquire::Text::new(&question.prompt);
    if let Some(default) = &question.default {
        prompt = prompt.with_default(default);
    }
    if question.name == PROJECT_NAME {
        prompt = prompt.with_validator(|input: &str| match validate_project_name(input) {
            Ok(()) => Ok(inquire::validator::Validation::Valid),
            Err(SproutError::AnswerValidation { reason, .. }) => Ok(
                inquire::validator::Validation::Invalid(
                    inquire::validator::ErrorMessage::Custom(reason),
                ),
            ),
            Err(e) => Err(inquire::CustomUserError::from(e.to_string())),
        });
    } else if question.required {
        prompt = prompt.with_validator(inquire::required!("a value is required"));
    }
    prompt.prompt().map_err(|_| SproutError::PromptCancelled)
}

/// Parse repeated `key=value` arguments. The value may itself contain `=`.
pub fn parse_data_pairs(data: &[String]) -> Result<Vec<(String, String)>> {
    data.iter()
        .map(|kv| {
            let (key, value) = kv.split_once('=').ok_or_else(|| SproutError::InvalidData {
                input: kv.clone(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(SproutError::InvalidData { input: kv.clone() });
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
