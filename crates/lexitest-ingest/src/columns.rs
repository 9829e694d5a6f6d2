//! Header-alias resolution.
//!
//! A [`FieldSpec`] lists the accepted headers for one logical field in
//! priority order; [`ColumnMap::resolve`] walks the header row once and
//! pins each field to a column index for the rest of the import.

use std::collections::HashMap;

use csv::StringRecord;

/// A prioritized list of header aliases for one logical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        FieldSpec { name, aliases }
    }
}

/// Logical field name → resolved column index for one sheet.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolve the fields against a header row. For each field the first
    /// alias present among the headers wins; fields with no matching
    /// header are simply absent.
    pub fn resolve(headers: &StringRecord, fields: &[FieldSpec]) -> Self {
        let headers: Vec<&str> = headers.iter().map(str::trim).collect();
        let mut indices = HashMap::new();

        for field in fields {
            if let Some(index) = field
                .aliases
                .iter()
                .find_map(|alias| headers.iter().position(|h| h == alias))
            {
                indices.insert(field.name, index);
            }
        }

        ColumnMap { indices }
    }

    pub fn has(&self, field: &'static str) -> bool {
        self.indices.contains_key(field)
    }

    /// The trimmed cell value for a field, `None` when the column is
    /// absent or the cell is empty.
    pub fn get<'r>(&self, record: &'r StringRecord, field: &'static str) -> Option<&'r str> {
        self.indices
            .get(field)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// The cell value for a field, or an empty string.
    pub fn value(&self, record: &StringRecord, field: &'static str) -> String {
        self.get(record, field).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANZI: FieldSpec = FieldSpec::new("hanzi", &["中文", "zh", "ZH"]);
    const MEANING: FieldSpec = FieldSpec::new("meaning", &["越南语", "vi", "VI", "Tiếng Việt"]);

    fn headers(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn first_matching_alias_wins() {
        // Both 中文 and zh are present; the higher-priority 中文 column is used.
        let map = ColumnMap::resolve(&headers(&["zh", "中文", "vi"]), &[HANZI, MEANING]);
        let record = StringRecord::from(vec!["from-zh", "from-中文", "nghĩa"]);
        assert_eq!(map.get(&record, "hanzi"), Some("from-中文"));
        assert_eq!(map.get(&record, "meaning"), Some("nghĩa"));
    }

    #[test]
    fn lower_priority_alias_used_when_first_absent() {
        let map = ColumnMap::resolve(&headers(&["Tiếng Việt", "zh"]), &[HANZI, MEANING]);
        let record = StringRecord::from(vec!["xin chào", "你好"]);
        assert_eq!(map.get(&record, "hanzi"), Some("你好"));
        assert_eq!(map.get(&record, "meaning"), Some("xin chào"));
    }

    #[test]
    fn missing_field_is_absent_not_an_error() {
        let map = ColumnMap::resolve(&headers(&["zh"]), &[HANZI, MEANING]);
        assert!(map.has("hanzi"));
        assert!(!map.has("meaning"));

        let record = StringRecord::from(vec!["你好"]);
        assert_eq!(map.get(&record, "meaning"), None);
        assert_eq!(map.value(&record, "meaning"), "");
    }

    #[test]
    fn headers_and_cells_are_trimmed() {
        let map = ColumnMap::resolve(&headers(&[" zh ", "vi"]), &[HANZI, MEANING]);
        let record = StringRecord::from(vec!["  你好  ", ""]);
        assert_eq!(map.get(&record, "hanzi"), Some("你好"));
        // Empty cells read as absent.
        assert_eq!(map.get(&record, "meaning"), None);
    }

    #[test]
    fn short_records_do_not_panic() {
        let map = ColumnMap::resolve(&headers(&["zh", "vi"]), &[HANZI, MEANING]);
        let record = StringRecord::from(vec!["你好"]);
        assert_eq!(map.get(&record, "meaning"), None);
    }
}
