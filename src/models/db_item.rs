use super::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One catalog entry ("db item").
///
/// Items read from a repository always carry a canonical category key in
/// `item_type`. Items supplied by callers may use any historical label and
/// are normalized on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Type", alias = "type")]
    pub item_type: String,
    #[serde(rename = "Value", alias = "value")]
    pub value: String,
    #[serde(
        rename = "Group",
        alias = "group",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<String>,
}

impl DbItem {
    pub fn new(category: Category, value: impl Into<String>) -> Self {
        Self {
            id: None,
            item_type: category.key().to_string(),
            value: value.into(),
            group: None,
        }
    }

    /// Canonical category of this item, if its type label is recognized.
    pub fn category(&self) -> Option<Category> {
        Category::normalize(&self.item_type)
    }
}

/// The catalog grouped per category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub content: Vec<String>,
    pub client: Vec<String>,
    pub purpose: Vec<String>,
    pub action: Vec<String>,
    pub with: Vec<String>,
    pub pccc: Vec<String>,
    pub remark: Vec<String>,
}

impl CatalogView {
    pub fn from_items(items: &[DbItem]) -> Self {
        let mut view = CatalogView::default();
        let mut seen: HashSet<(Category, &str)> = HashSet::new();

        for item in items {
            let Some(category) = item.category() else {
                continue;
            };
            if !seen.insert((category, item.value.as_str())) {
                continue;
            }
            view.values_mut(category).push(item.value.clone());
        }
        view
    }

    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Content => &self.content,
            Category::Client => &self.client,
            Category::Purpose => &self.purpose,
            Category::Action => &self.action,
            Category::With => &self.with,
            Category::Pccc => &self.pccc,
            Category::Remark => &self.remark,
        }
    }

    fn values_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Content => &mut self.content,
            Category::Client => &mut self.client,
            Category::Purpose => &mut self.purpose,
            Category::Action => &mut self.action,
            Category::With => &mut self.with,
            Category::Pccc => &mut self.pccc,
            Category::Remark => &mut self.remark,
        }
    }
}
