// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed output schemas and prompts for each enrichment operation.
//!
//! Each operation is expressed as a single tool whose `input_schema` is the
//! output shape. The request forces that tool, so the structured answer
//! arrives as the tool call's input.

use serde_json::json;

use crate::types::ToolDefinition;

/// One enrichment operation: its tool and how to phrase the prompt.
pub struct OutputSpec {
    pub tool_name: &'static str,
    pub description: &'static str,
    schema: fn() -> serde_json::Value,
    prompt: fn(&str) -> String,
}

impl OutputSpec {
    pub fn tool(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.tool_name.to_string(),
            description: self.description.to_string(),
            input_schema: (self.schema)(),
        }
    }

    pub fn prompt(&self, input: &str) -> String {
        (self.prompt)(input)
    }
}

pub const CLASSIFY_MEDIA: OutputSpec = OutputSpec {
    tool_name: "record_media_classification",
    description: "Record the classification of a book, movie or TV show.",
    schema: media_schema,
    prompt: |input| {
        format!(
            "Classify the following text or URL as a book, movie, or TV show. Extract the \
             title, author (if book) or director (if movie/tv), and a brief summary.\n\n\
             Input: \"{input}\""
        )
    },
};

pub const EXTRACT_RECIPE: OutputSpec = OutputSpec {
    tool_name: "record_recipe",
    description: "Record a structured recipe.",
    schema: recipe_schema,
    prompt: |input| {
        format!(
            "Extract a structured recipe from the following text or URL content. Ignore \
             blog stories and fluff.\n\nInput: \"{input}\""
        )
    },
};

pub const DISCOVER_RESTAURANTS: OutputSpec = OutputSpec {
    tool_name: "record_restaurants",
    description: "Record restaurant recommendations.",
    schema: restaurants_schema,
    prompt: |query| {
        format!(
            "You are a London dining expert. Suggest 5 highly-rated, trending restaurants \
             for the following query: \"{query}\"\n\nFocus on curated, high-quality spots."
        )
    },
};

fn media_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "type": {"type": "string", "enum": ["book", "movie", "tv"]},
            "authorOrDirector": {"type": "string"},
            "summary": {"type": "string"},
            "tags": {"type": "array", "items": {"type": "string"}},
            "confidence": {
                "type": "number",
                "description": "Confidence in classification 0-1"
            }
        },
        "required": ["title", "type", "confidence"]
    })
}

fn recipe_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "item": {"type": "string"},
                        "amount": {"type": "string"}
                    },
                    "required": ["item"]
                }
            },
            "method": {"type": "string", "description": "Full step-by-step instructions"},
            "difficulty": {"type": "string", "enum": ["Easy", "Medium", "Hard"]},
            "summary": {"type": "string"}
        },
        "required": ["title", "ingredients", "method", "difficulty", "summary"]
    })
}

fn restaurants_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "restaurants": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "location": {"type": "string"},
                        "cuisine": {"type": "string"},
                        "priceRange": {"type": "string", "description": "$, $$, $$$, or $$$$"},
                        "reason": {"type": "string", "description": "Why it's recommended"},
                        "bookingUrl": {"type": "string"}
                    },
                    "required": ["name", "location", "cuisine", "priceRange", "reason"]
                }
            },
            "summary": {"type": "string"}
        },
        "required": ["restaurants", "summary"]
    })
}

/// Returns the first balanced JSON object embedded in `text`.
///
/// Braces inside string literals are ignored.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_embed_input() {
        assert!(CLASSIFY_MEDIA.prompt("Dune").contains("Input: \"Dune\""));
        assert!(DISCOVER_RESTAURANTS.prompt("Soho").contains("query: \"Soho\""));
    }

    #[test]
    fn schemas_name_their_required_fields() {
        let tool = EXTRACT_RECIPE.tool();
        assert_eq!(tool.name, "record_recipe");
        let required = tool.input_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "difficulty"));
        assert_eq!(
            CLASSIFY_MEDIA.tool().input_schema["properties"]["type"]["enum"][2],
            "tv"
        );
    }

    #[test]
    fn finds_json_wrapped_in_prose() {
        let text = "Sure! Here it is:\n```json\n{\"title\": \"a {b}\", \"n\": {\"x\": 1}}\n```";
        assert_eq!(
            first_json_object(text),
            Some("{\"title\": \"a {b}\", \"n\": {\"x\": 1}}")
        );
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        let text = r#"{"title": "say \"}\" twice"} trailing"#;
        assert_eq!(first_json_object(text), Some(r#"{"title": "say \"}\" twice"}"#));
    }

    #[test]
    fn unbalanced_or_missing_object_is_none() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("{\"open\": true"), None);
    }
}
