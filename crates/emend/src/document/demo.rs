//! Bundled sample document for trying a review without a file.

use super::DocumentSource;

/// File name the sample is presented under.
pub const DEMO_FILE: &str = "quarterly-report.txt";

/// A short business report that exercises every standard rule but one.
pub const DEMO_TEXT: &str = "QUARTERLY BUSINESS REPORT
Q2 2023

EXECUTIVE SUMMARY
This report provides a comprehensive overview of our business performance during end of Q2 2023. The company has experienced significant growth across multiple product lines and expanded into new markets.

KEY FINDINGS
- Revenue increased by 18% compared to Q1
- Customer acquisition costs decreased by 7%
- New product line exceeded expectations with 125% of target sales
- Market share grew from 23% to 27% in core segments

CHALLENGES
The engineering team faced some delays in the development of our mobile application update. The marketing team also reported difficulties in penetrating the European market despite increased spending on advertising.

RECOMMENDATIONS
Based on the report findings, we recommend:
1. Increasing investment in the successful product lines
2. Reassessing the European market strategy
3. Allocating additional resources to the engineering team
4. Developing a more comprehensive report for stakeholders

CONCLUSION
Overall, the business is performing well and is on track to meet annual targets. The executive team should continue monitoring the identified challenges while capitalizing on the growth opportunities.";

/// Source metadata for the sample document.
pub fn demo_source() -> DocumentSource {
    DocumentSource {
        file: DEMO_FILE.to_string(),
        format: "txt".to_string(),
        ..DocumentSource::inline(DEMO_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_source() {
        let source = demo_source();
        assert_eq!(source.file, "quarterly-report.txt");
        assert_eq!(source.size_bytes, DEMO_TEXT.len() as u64);
        assert!(source.decoded);
    }
}
