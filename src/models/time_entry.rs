use super::category::Category;
use serde::{Deserialize, Serialize};

/// One time slice of a day's activity log.
///
/// `time` and `content` are required; every other field may be empty.
/// Older payloads used `task`, `function`, `mall` and `costType` for the
/// same columns, so those names are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeEntry {
    pub time: String,
    #[serde(alias = "task")]
    pub content: String,
    pub client: String,
    pub purpose: String,
    #[serde(alias = "function")]
    pub action: String,
    #[serde(rename = "with", alias = "mall")]
    pub with_whom: String,
    #[serde(alias = "costType", alias = "cost_type")]
    pub pccc: String,
    pub remark: String,
}

impl TimeEntry {
    /// Both required fields are present.
    pub fn is_complete(&self) -> bool {
        !self.time.is_empty() && !self.content.is_empty()
    }

    pub fn field(&self, category: Category) -> &str {
        match category {
            Category::Content => &self.content,
            Category::Client => &self.client,
            Category::Purpose => &self.purpose,
            Category::Action => &self.action,
            Category::With => &self.with_whom,
            Category::Pccc => &self.pccc,
            Category::Remark => &self.remark,
        }
    }

    pub fn field_mut(&mut self, category: Category) -> &mut String {
        match category {
            Category::Content => &mut self.content,
            Category::Client => &mut self.client,
            Category::Purpose => &mut self.purpose,
            Category::Action => &mut self.action,
            Category::With => &mut self.with_whom,
            Category::Pccc => &mut self.pccc,
            Category::Remark => &mut self.remark,
        }
    }
}

/// A time entry as handed to callers that need a row identity.
/// The id is the 1-based position in the day and is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedEntry {
    pub id: usize,
    #[serde(flatten)]
    pub entry: TimeEntry,
}

pub fn number_entries(entries: Vec<TimeEntry>) -> Vec<NumberedEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| NumberedEntry { id: i + 1, entry })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_field_names_deserialize() {
        let json = r#"{"time":"09:00","task":"会議","mall":"A","costType":"PC","function":"調整"}"#;
        let e: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.content, "会議");
        assert_eq!(e.with_whom, "A");
        assert_eq!(e.pccc, "PC");
        assert_eq!(e.action, "調整");
        assert!(e.client.is_empty());
    }

    #[test]
    fn numbered_view_starts_at_one() {
        let entries = vec![
            TimeEntry {
                time: "09:00".into(),
                content: "a".into(),
                ..Default::default()
            },
            TimeEntry {
                time: "10:00".into(),
                content: "b".into(),
                ..Default::default()
            },
        ];
        let numbered = number_entries(entries);
        assert_eq!(numbered[0].id, 1);
        assert_eq!(numbered[1].id, 2);

        let v = serde_json::to_value(&numbered[1]).unwrap();
        assert_eq!(v["id"], 2);
        assert_eq!(v["content"], "b");
        assert_eq!(v["with"], "");
    }
}
