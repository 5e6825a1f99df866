use crate::{Quiz, QuizClientError, QuizClientResult, QuizEntities, QuizId, QuizQuestion};
use serde_json::{Map, Value};

/// Build a [`Quiz`] from a loosely structured backend payload.
///
/// Optional fields that are missing or have the wrong shape become `None` or
/// an empty `Vec`. Non-text items inside text lists and non-object items
/// inside `quiz` are dropped, but question options are kept in place so their
/// positional labels hold. Only a missing or blank `title` is an error.
///
/// Normalizing the serialized form of a normalized quiz yields the same quiz.
pub fn normalize(raw: &Value) -> QuizClientResult<Quiz> {
    let object = raw.as_object().ok_or_else(|| {
        QuizClientError::MalformedPayload("quiz payload is not a JSON object".to_string())
    })?;

    let title = text_field(object, "title").ok_or_else(|| {
        QuizClientError::MalformedPayload("quiz payload has no title".to_string())
    })?;

    Ok(Quiz {
        id: object.get("id").and_then(quiz_id),
        url: text_field(object, "url"),
        title,
        summary: text_field(object, "summary"),
        key_entities: object.get("key_entities").and_then(entities),
        sections: text_list(object.get("sections")),
        quiz: object
            .get("quiz")
            .and_then(Value::as_array)
            .map(|questions| questions.iter().filter_map(question).collect())
            .unwrap_or_default(),
        related_topics: text_list(object.get("related_topics")),
        date_generated: text_field(object, "date_generated"),
    })
}

fn question(value: &Value) -> Option<QuizQuestion> {
    let object = value.as_object()?;
    Some(QuizQuestion {
        question: text_field(object, "question").unwrap_or_default(),
        options: option_list(object.get("options")),
        answer: object.get("answer").and_then(scalar_text),
        difficulty: text_field(object, "difficulty"),
        explanation: text_field(object, "explanation"),
    })
}

fn entities(value: &Value) -> Option<QuizEntities> {
    let object = value.as_object()?;
    let entities = QuizEntities {
        people: text_list(object.get("people")),
        organizations: text_list(object.get("organizations")),
        locations: text_list(object.get("locations")),
    };
    (!entities.is_empty()).then_some(entities)
}

fn quiz_id(value: &Value) -> Option<QuizId> {
    match value {
        Value::Number(number) => number.as_i64().map(QuizId::Number),
        Value::String(text) if !text.trim().is_empty() => Some(QuizId::Text(text.clone())),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(ToString::to_string)
}

/// Every option keeps its position, since labels are assigned by index.
/// Scalars are rendered as text; `null` becomes an empty option.
fn option_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn text_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|text| !text.trim().is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
