use serde::{Deserialize, Serialize};

/// Structured agenda produced by one successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    pub summary: String,
    /// Suggested date or relative time, e.g. "Next Monday".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub stakeholders: Vec<Stakeholder>,
    pub agenda: Vec<AgendaItem>,
}

impl AnalysisResult {
    pub fn total_minutes(&self) -> u64 {
        self.agenda.iter().map(|i| u64::from(i.duration_minutes)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
    /// Why they should attend.
    pub relevance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub id: String,
    pub topic: String,
    pub duration_minutes: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_camel_case_items() {
        let item: AgendaItem = serde_json::from_value(json!({
            "id": "a",
            "topic": "Intro",
            "durationMinutes": 10,
            "description": "Warm up"
        }))
        .unwrap();
        assert_eq!(item.duration_minutes, 10);
        assert_eq!(item.speaker, None);
    }

    #[test]
    fn rejects_negative_and_fractional_durations() {
        for bad in [json!(-5), json!(12.5), json!("15")] {
            let result = serde_json::from_value::<AgendaItem>(json!({
                "id": "a",
                "topic": "Intro",
                "durationMinutes": bad,
                "description": "Warm up"
            }));
            assert!(result.is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn missing_stakeholders_is_an_error() {
        let result = serde_json::from_value::<AnalysisResult>(json!({
            "title": "t",
            "summary": "s",
            "agenda": []
        }));
        assert!(result.is_err());
    }
}
