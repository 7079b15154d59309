use ahash::AHashMap;

use crate::FastaRecord;

/// Headers grouped by sequence value, in order of first appearance.
///
/// Inserting a sequence that is already present appends the header to the
/// existing group instead of adding a new record. When written, the headers
/// of one group are concatenated without a delimiter, e.g.
/// `>tcell_3_1>tcell_3_2`.
#[derive(Debug, Default, Clone)]
pub struct RecordGroups {
    groups: Vec<(String, Vec<String>)>,
    index: AHashMap<String, usize>,
}

impl RecordGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sequence: &str, header: String) {
        if let Some(&i) = self.index.get(sequence) {
            self.groups[i].1.push(header);
        } else {
            self.index.insert(sequence.to_string(), self.groups.len());
            self.groups.push((sequence.to_string(), vec![header]));
        }
    }

    /// Number of distinct sequences.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(s, h)| (s.as_str(), h.as_slice()))
    }

    /// One record per distinct sequence.
    pub fn records(&self) -> Vec<FastaRecord> {
        self.records_with(|s| s.to_string())
    }

    /// Like [`RecordGroups::records`], but every sequence body is replaced
    /// by `f(sequence)`. Grouping stays keyed on the original sequence.
    pub fn records_with<F>(&self, f: F) -> Vec<FastaRecord>
    where
        F: Fn(&str) -> String,
    {
        self.iter()
            .map(|(seq, headers)| FastaRecord::new(headers.concat(), f(seq)))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<(S, String)> for RecordGroups {
    fn from_iter<I: IntoIterator<Item = (S, String)>>(iter: I) -> Self {
        let mut groups = RecordGroups::new();
        for (seq, header) in iter {
            groups.insert(seq.as_ref(), header);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sequences_are_merged() {
        let groups: RecordGroups = vec![
            ("AAABBB", ">tcell_3_1".to_string()),
            ("BBBAAA", ">tcell_3_2".to_string()),
            ("AAABBB", ">tcell_3_3".to_string()),
        ].into_iter().collect();

        assert_eq!(groups.len(), 2);
        let records = groups.records();
        assert_eq!(records[0].header(), ">tcell_3_1>tcell_3_3");
        assert_eq!(records[0].sequence(), "AAABBB");
        assert_eq!(records[1].header(), ">tcell_3_2");
        assert_eq!(records[1].sequence(), "BBBAAA");
    }

    #[test]
    fn test_first_seen_order() {
        let mut groups = RecordGroups::new();
        for (i, s) in ["C", "A", "B", "A", "C"].iter().enumerate() {
            groups.insert(s, format!(">{}", i + 1));
        }
        let order: Vec<&str> = groups.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        let headers: Vec<String> = groups.records().iter()
            .map(|r| r.header().to_string()).collect();
        assert_eq!(headers, vec![">1>5", ">2>4", ">3"]);
    }

    #[test]
    fn test_records_with() {
        let mut groups = RecordGroups::new();
        groups.insert("DDEE", ">bcell_2_1".into());
        groups.insert("DDEE", ">bcell_2_2".into());
        let records = groups.records_with(|s| s.to_lowercase());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence(), "ddee");
        assert_eq!(records[0].header(), ">bcell_2_1>bcell_2_2");
    }

    #[test]
    fn test_empty() {
        let groups = RecordGroups::new();
        assert!(groups.is_empty());
        assert!(groups.records().is_empty());
    }
}

