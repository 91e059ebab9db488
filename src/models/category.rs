use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Canonical classification of a catalog value and of a time-entry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Content,
    Client,
    Purpose,
    Action,
    With,
    Pccc,
    Remark,
}

/// Every label ever observed in a spreadsheet header, a catalog type column
/// or an API payload, keyed in folded form.
const SYNONYMS: &[(&str, Category)] = &[
    ("内容", Category::Content),
    ("task", Category::Content),
    ("content", Category::Content),
    ("クライアント", Category::Client),
    ("クライアント（誰に、誰のために）", Category::Client),
    ("client", Category::Client),
    ("目的", Category::Purpose),
    ("purpose", Category::Purpose),
    ("アクション", Category::Action),
    ("機能別", Category::Action),
    ("function", Category::Action),
    ("action", Category::Action),
    ("誰と", Category::With),
    ("モール別", Category::With),
    ("mall", Category::With),
    ("with", Category::With),
    ("pc/cc", Category::Pccc),
    ("costtype", Category::Pccc),
    ("コスト区分", Category::Pccc),
    ("pccc", Category::Pccc),
    ("備考", Category::Remark),
    ("remark", Category::Remark),
];

static LOOKUP: LazyLock<HashMap<&'static str, Category>> =
    LazyLock::new(|| SYNONYMS.iter().copied().collect());

impl Category {
    /// All categories in column order.
    pub const ALL: [Category; 7] = [
        Category::Content,
        Category::Client,
        Category::Purpose,
        Category::Action,
        Category::With,
        Category::Pccc,
        Category::Remark,
    ];

    /// Map any historical label onto its canonical category.
    /// Returns `None` for labels that are not in the synonym table.
    pub fn normalize(raw: &str) -> Option<Self> {
        let folded = raw.trim().to_ascii_lowercase();
        LOOKUP.get(folded.as_str()).copied()
    }

    /// Canonical key, as stored in the catalog type column and in JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Client => "client",
            Category::Purpose => "purpose",
            Category::Action => "action",
            Category::With => "with",
            Category::Pccc => "pccc",
            Category::Remark => "remark",
        }
    }

    /// Display label used in date-sheet headers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Content => "内容",
            Category::Client => "クライアント",
            Category::Purpose => "目的",
            Category::Action => "アクション",
            Category::With => "誰と",
            Category::Pccc => "PC/CC",
            Category::Remark => "備考",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
