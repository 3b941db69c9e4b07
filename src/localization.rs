use std::collections::HashMap;

/// Label used when a record has no name at all.
pub const UNNAMED_LABEL: &str = "(unnamed location)";

/// English city names as returned by the weather service, mapped to their
/// Traditional Chinese labels.
const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("taipei", "台北"),
    ("new taipei", "新北"),
    ("keelung", "基隆"),
    ("taoyuan", "桃園"),
    ("hsinchu", "新竹"),
    ("miaoli", "苗栗"),
    ("taichung", "台中"),
    ("changhua", "彰化"),
    ("nantou", "南投"),
    ("yunlin", "雲林"),
    ("chiayi", "嘉義"),
    ("tainan", "台南"),
    ("kaohsiung", "高雄"),
    ("pingtung", "屏東"),
    ("yilan", "宜蘭"),
    ("hualien", "花蓮"),
    ("taitung", "台東"),
    ("penghu", "澎湖"),
    ("kinmen", "金門"),
    ("lienchiang", "連江"),
];

/// Immutable mapping from lowercase canonical names to display labels.
#[derive(Debug, Clone, Default)]
pub struct LocalizationTable {
    labels: HashMap<String, String>,
}

impl LocalizationTable {
    /// Creates an empty table. Every name resolves to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table shipped with the application.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_LABELS
                .iter()
                .map(|(name, label)| (name.to_string(), label.to_string())),
        )
    }

    /// Builds a table from `(name, label)` pairs. Keys are lowercased; entries
    /// with an empty label are skipped so a lookup never yields "".
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut table = Self::new();
        table.extend(entries);
        table
    }

    /// Adds or overrides entries. Only used while the table is being built.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        for (name, label) in entries {
            if label.is_empty() {
                continue;
            }
            self.labels.insert(name.to_lowercase(), label);
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolves a raw location name to its display label.
    ///
    /// The lookup is case-insensitive. Unknown names come back verbatim with
    /// their original casing.
    pub fn resolve<'a>(&'a self, raw_name: &'a str) -> &'a str {
        if raw_name.is_empty() {
            return UNNAMED_LABEL;
        }
        self.labels
            .get(&raw_name.to_lowercase())
            .map(String::as_str)
            .unwrap_or(raw_name)
    }
}
