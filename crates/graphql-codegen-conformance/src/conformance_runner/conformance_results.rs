use crate::conformance_runner::CaseFailure;
use crate::conformance_runner::CaseResult;
use crate::golden_matcher::MatchError;

/// Number of lines shown on either side of the first difference between a
/// golden file and its generated counterpart.
const MISMATCH_CONTEXT_LINES: usize = 3;

/// Results of a conformance run, one [`CaseResult`] per case.
#[derive(Debug)]
pub struct ConformanceResults {
    pub results: Vec<CaseResult>,
}

impl ConformanceResults {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub fn add(&mut self, result: CaseResult) {
        self.results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }

    pub fn get(&self, case_name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.case_name == case_name)
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    pub fn failure_report(&self) -> String {
        let failures: Vec<_> = self.failed_cases().collect();
        let failures_len = failures.len();
        let results_len = self.results.len();
        let failures_text = failures
            .iter()
            .map(|r| format_detailed_failure(r))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!("{failures_len} of {results_len} conformance cases failed:\n\n{failures_text}")
    }

    pub fn summary(&self) -> String {
        let all_passed = self.all_passed();
        let emoji = if all_passed { "✅" } else { "❌" };
        let banner = format!("{emoji} ========================================");
        let header = format!("{emoji} CODEGEN CONFORMANCE SUMMARY");
        let total = self.results.len();
        let golden_files: usize = self.results.iter().map(|r| r.golden_files_checked).sum();
        let compiled_units: usize = self.results.iter().map(|r| r.compiled_units).sum();
        let counts = format!(
            "Total cases: {total}\nGolden files checked: {golden_files}\n\
            Units compiled: {compiled_units}",
        );

        if all_passed {
            format!("{banner}\n{header}\n{banner}\n{counts}\nPassed: {total}\nFailed: 0\n\nAll conformance cases passed!\n{banner}")
        } else {
            let failures: Vec<_> = self.failed_cases().collect();
            let failures_len = failures.len();
            let passed = total - failures_len;
            let failed_list = failures
                .iter()
                .map(|r| {
                    let case_name = &r.case_name;
                    let num_failures = r.failures.len();
                    format!("  - {case_name} ({num_failures} failures)")
                })
                .collect::<Vec<_>>()
                .join("\n");

            format!("{banner}\n{header}\n{banner}\n{counts}\nPassed: {passed}\nFailed: {failures_len}\n\nFailed conformance cases:\n{failed_list}\n\nSee details above for each failure.\n{banner}")
        }
    }
}

impl std::default::Default for ConformanceResults {
    fn default() -> Self {
        Self::new()
    }
}

fn format_detailed_failure(result: &CaseResult) -> String {
    let mut output = format!("❌ {}\n", result.case_name);
    for failure in &result.failures {
        output.push_str(&format!("   {failure}\n"));
        if let CaseFailure::Match {
            error: MatchError::ContentMismatch { expected, actual, .. },
            ..
        } = failure {
            output.push_str(&mismatch_excerpt(expected, actual, MISMATCH_CONTEXT_LINES));
        }
    }
    output
}

/// Renders the lines around the first difference between `expected` and
/// `actual`, with line numbers.
pub fn mismatch_excerpt(expected: &str, actual: &str, context_lines: usize) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    if expected_lines == actual_lines {
        return "   Contents differ only in line endings or trailing newline\n".to_string();
    }

    let first_diff = expected_lines
        .iter()
        .zip(actual_lines.iter())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected_lines.len().min(actual_lines.len()));

    let start = first_diff.saturating_sub(context_lines);
    let end = first_diff + context_lines + 1;
    let line_num_width = end.to_string().len();

    let render = |lines: &[&str]| {
        let mut snippet = String::new();
        for line_idx in start..end.min(lines.len()) {
            let line_num = line_idx + 1;
            let marker = if line_idx == first_diff { '→' } else { '│' };
            snippet.push_str(&format!("     {line_num:>line_num_width$} {marker} {}\n", lines[line_idx]));
        }
        if first_diff >= lines.len() {
            snippet.push_str("     <end of file>\n");
        }
        snippet
    };

    let mut output = format!("   First difference at line {}:\n", first_diff + 1);
    output.push_str("   expected:\n");
    output.push_str(&render(expected_lines.as_slice()));
    output.push_str("   actual:\n");
    output.push_str(&render(actual_lines.as_slice()));
    output
}
