use serde::{Deserialize, Serialize};

/// A log file that was discovered but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// File and test-case totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_discovered: u64,
    pub files_parsed: u64,
    pub files_skipped: Vec<SkippedFile>,
    pub test_cases: u64,
    /// Test cases whose log carries no error.
    pub successful: u64,
    /// Test cases whose log carries a non-empty error.
    pub failed: u64,
    /// Legacy logs whose console output reports a timeout, sorted.
    pub timed_out: Vec<String>,
}

impl RunSummary {
    pub fn record_skip(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.files_skipped.push(SkippedFile {
            path: path.into(),
            reason: reason.into(),
        });
    }

    pub fn record_timeout(&mut self, path: impl Into<String>) {
        self.timed_out.push(path.into());
    }

    pub fn record_test_case(&mut self, failed: bool) {
        self.test_cases += 1;
        if failed {
            self.failed += 1;
        } else {
            self.successful += 1;
        }
    }

    /// Adds another summary's totals. Skipped and timed-out files stay sorted by path.
    pub fn merge(&mut self, other: &RunSummary) {
        self.files_discovered += other.files_discovered;
        self.files_parsed += other.files_parsed;
        self.test_cases += other.test_cases;
        self.successful += other.successful;
        self.failed += other.failed;
        self.files_skipped.extend(other.files_skipped.iter().cloned());
        self.files_skipped.sort();
        self.timed_out.extend(other.timed_out.iter().cloned());
        self.timed_out.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_adds_totals_and_sorts_skips() {
        let mut a = RunSummary {
            files_discovered: 2,
            files_parsed: 1,
            ..Default::default()
        };
        a.record_skip("z.json", "invalid JSON");
        a.record_test_case(false);

        let mut b = RunSummary {
            files_discovered: 1,
            files_parsed: 0,
            ..Default::default()
        };
        b.record_skip("a.json", "File too large");
        b.record_test_case(true);
        b.record_timeout("format_experiment_json_en.log");

        a.merge(&b);
        assert_eq!(a.files_discovered, 3);
        assert_eq!(a.files_parsed, 1);
        assert_eq!(a.test_cases, 2);
        assert_eq!((a.successful, a.failed), (1, 1));
        let paths: Vec<&str> = a.files_skipped.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["a.json", "z.json"]);
        assert_eq!(a.timed_out, vec!["format_experiment_json_en.log".to_string()]);
    }
}
