//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Substitutes `{name}` placeholders; absent optional arguments read as
    /// "not specified".
    pub fn apply<'a, F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.arguments
            .iter()
            .fold(self.template.clone(), |text, arg| {
                let value = lookup(&arg.name).unwrap_or("not specified");
                text.replace(&format!("{{{}}}", arg.name), value)
            })
    }
}

fn arg(name: &str, description: &str, required: bool) -> PromptTemplateArg {
    PromptTemplateArg {
        name: name.to_string(),
        description: description.to_string(),
        required,
    }
}

/// Predefined prompt templates for trip planning
pub fn get_prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan_yatra".to_string(),
            description: "Plan a Srisailam pilgrimage end to end using Yatra's MCP tools"
                .to_string(),
            template: r#"You are a pilgrim travel assistant for Srisailam.

# Trip
- Travelling from: {from}
- Arrival: {arrival}
- Group size: {group_size}
- Hotel: {hotel}

# Your Task
1. Call `get_safety_alerts` for Srisailam. If the ghat road is likely closed, say so first and suggest arriving between 6:00 AM and 9:00 PM.
2. Call `plan_trip` with the trip details above. Pass the arrival as an RFC 3339 timestamp with the +05:30 offset.
3. Summarize the itinerary day by day and list the packing checklist.
4. Call `darshan_faq` with the query "dress-code" and remind the group of the dress code.
5. Finish with the emergency numbers from `emergency_info` that matter for the ghat road.
"#
            .to_string(),
            arguments: vec![
                arg("from", "City or coordinates the group starts from", true),
                arg("arrival", "Expected arrival date and time", true),
                arg("group_size", "Number of people travelling", false),
                arg("hotel", "Hotel already booked", false),
            ],
        },
        PromptTemplate {
            name: "temple_phrases".to_string(),
            description: "Prepare useful Telugu phrases for a temple visit".to_string(),
            template: r#"Help a pilgrim get by in Telugu at Srisailam.

Situation: {situation}

Pick the five phrases most useful in this situation and call `translate_phrase` for each one. Present them as a table with the English phrase, the Telugu script and the transliteration."#
                .to_string(),
            arguments: vec![arg(
                "situation",
                "Where the phrases will be used, e.g. darshan queue, hotel, taxi",
                true,
            )],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_fills_missing_optional_args() {
        let templates = get_prompt_templates();
        let template = &templates[0];
        let text = template.apply(|name| match name {
            "from" => Some("Pune"),
            "arrival" => Some("2024-05-01 21:30"),
            _ => None,
        });
        assert!(text.contains("Travelling from: Pune"));
        assert!(text.contains("Hotel: not specified"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_template_names_are_unique() {
        let templates = get_prompt_templates();
        let mut names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), templates.len());
    }
}
