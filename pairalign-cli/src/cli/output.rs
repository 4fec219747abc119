/// Rendering of alignment results for the terminal and for JSON consumers
use colored::*;
use pairalign_bio::alignment::Alignment;
use pairalign_core::{Config, PairAlignResult};
use serde::Serialize;

/// Columns per block in text output.
pub const LINE_WIDTH: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub algorithm: String,
    pub matrix: String,
    pub score: i32,
    pub aligned_x: String,
    pub aligned_y: String,
    pub match_line: String,
    pub summary: SummaryReport,
    /// Aligned X, match line and aligned Y as raw column bytes
    #[serde(skip)]
    rows: [Vec<u8>; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub columns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub identity: f64,
}

impl AlignmentReport {
    pub fn new(config: &Config, alignment: &Alignment<u8, i32>) -> Self {
        let gap = config.gap_byte();
        let summary = alignment.summary(gap);
        let match_line = alignment.alignment_string(gap);

        Self {
            algorithm: config.alignment.algorithm.to_string(),
            matrix: config.scoring.matrix.to_string(),
            score: alignment.score,
            aligned_x: String::from_utf8_lossy(&alignment.aligned_x).into_owned(),
            aligned_y: String::from_utf8_lossy(&alignment.aligned_y).into_owned(),
            match_line: String::from_utf8_lossy(&match_line).into_owned(),
            summary: SummaryReport {
                columns: alignment.len(),
                matches: summary.matches,
                mismatches: summary.mismatches,
                insertions: summary.insertions,
                deletions: summary.deletions,
                identity: summary.identity,
            },
            rows: [
                alignment.aligned_x.clone(),
                match_line,
                alignment.aligned_y.clone(),
            ],
        }
    }

    pub fn to_json(&self) -> PairAlignResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Aligned rows in blocks of [`LINE_WIDTH`] columns, without styling.
    ///
    /// Blocks are cut on alignment columns (bytes), so the three rows stay
    /// in step whatever the input encoding.
    pub fn body_lines(&self) -> Vec<String> {
        let [x, m, y] = &self.rows;

        let mut lines = Vec::new();
        for (block, start) in (0..x.len()).step_by(LINE_WIDTH).enumerate() {
            let end = (start + LINE_WIDTH).min(x.len());
            if block > 0 {
                lines.push(String::new());
            }
            for (label, row) in [("X  ", x), ("   ", m), ("Y  ", y)] {
                let chunk = row.get(start..end.min(row.len())).unwrap_or_default();
                lines.push(format!("{}{}", label, String::from_utf8_lossy(chunk)));
            }
        }
        lines
    }

    pub fn summary_line(&self) -> String {
        let s = &self.summary;
        format!(
            "Identity {:.1}% ({}/{}), {} mismatches, {} insertions, {} deletions",
            s.identity * 100.0,
            s.matches,
            s.columns,
            s.mismatches,
            s.insertions,
            s.deletions
        )
    }

    pub fn print_text(&self) {
        println!(
            "{} {} {}",
            "Score:".bold().cyan(),
            self.score.to_string().bold(),
            format!("({}, {})", self.algorithm, self.matrix).dimmed()
        );

        if !self.rows[0].is_empty() {
            println!();
            for line in self.body_lines() {
                println!("{}", line);
            }
        }

        println!();
        println!("{}", self.summary_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report(x: &[u8], y: &[u8], score: i32) -> AlignmentReport {
        let alignment = Alignment {
            score,
            aligned_x: x.to_vec(),
            aligned_y: y.to_vec(),
        };
        AlignmentReport::new(&Config::default(), &alignment)
    }

    #[test]
    fn test_report_fields() {
        let r = report(b"GCA-TGCU", b"G-ATTACA", 0);

        assert_eq!(r.algorithm, "linear-space");
        assert_eq!(r.matrix, "identity");
        assert_eq!(r.match_line, "| | |X|X");
        assert_eq!(r.summary.columns, 8);
        assert_eq!(r.summary.matches, 4);
        assert_eq!(r.summary.mismatches, 2);
        assert_eq!(r.summary.insertions, 1);
        assert_eq!(r.summary.deletions, 1);
    }

    #[test]
    fn test_body_lines_single_block() {
        let r = report(b"AC-GT", b"AGTG-", 0);
        assert_eq!(
            r.body_lines(),
            vec![
                "X  AC-GT".to_string(),
                "   |X | ".to_string(),
                "Y  AGTG-".to_string(),
            ]
        );
    }

    #[test]
    fn test_body_lines_wrap() {
        let x = vec![b'A'; LINE_WIDTH + 5];
        let r = report(&x, &x, 0);
        let lines = r.body_lines();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0].len(), 3 + LINE_WIDTH);
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "X  AAAAA");
    }

    #[test]
    fn test_body_lines_multibyte_rows_stay_aligned() {
        let x = vec![b'A'; 70];
        let y = "é".repeat(35).into_bytes();
        let r = report(&x, &y, -70);
        let lines = r.body_lines();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], format!("X  {}", "A".repeat(60)));
        assert_eq!(lines[1], format!("   {}", "X".repeat(60)));
        assert_eq!(lines[2], format!("Y  {}", "é".repeat(30)));
        assert_eq!(lines[4], format!("X  {}", "A".repeat(10)));
        assert_eq!(lines[6], format!("Y  {}", "é".repeat(5)));
    }

    #[test]
    fn test_empty_alignment_has_no_body() {
        let r = report(b"", b"", 0);
        assert!(r.body_lines().is_empty());
        assert_eq!(
            r.summary_line(),
            "Identity 0.0% (0/0), 0 mismatches, 0 insertions, 0 deletions"
        );
    }

    #[test]
    fn test_json_output() {
        let r = report(b"ACGT", b"ACGA", 2);
        let json: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();

        assert_eq!(json["score"], 2);
        assert_eq!(json["aligned_x"], "ACGT");
        assert_eq!(json["aligned_y"], "ACGA");
        assert_eq!(json["match_line"], "|||X");
        assert_eq!(json["summary"]["matches"], 3);
        assert_eq!(json["summary"]["identity"], 0.75);
    }
}
