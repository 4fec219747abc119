use crate::cli::output::{AlignmentReport, OutputFormat};
use crate::cli::{init_thread_pool, GlobalOptions};
use anyhow::Result;
use clap::Args;
use pairalign_bio::alignment::{
    global_align, Alignment, BasicScore, Blosum62, Hirschberg, NucleotideMatrix, ScoringPolicy,
};
use pairalign_core::{load_config, Algorithm, Config, MatrixKind, PairAlignError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args)]
pub struct AlignArgs {
    /// Sequences to align, first then second. A side read from a file is skipped here
    #[arg(value_name = "SEQUENCE")]
    pub sequences: Vec<String>,

    /// Read the first sequence from a file
    #[arg(long, value_name = "FILE")]
    pub x_file: Option<PathBuf>,

    /// Read the second sequence from a file
    #[arg(long, value_name = "FILE")]
    pub y_file: Option<PathBuf>,

    /// Configuration file (TOML); flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Alignment algorithm
    #[arg(short, long, value_enum)]
    pub algorithm: Option<Algorithm>,

    /// Substitution scoring
    #[arg(short, long, value_enum)]
    pub matrix: Option<MatrixKind>,

    /// Score for identical symbols (identity matrix only)
    #[arg(long, allow_negative_numbers = true)]
    pub match_score: Option<i32>,

    /// Score for differing symbols (identity matrix only)
    #[arg(long, allow_negative_numbers = true)]
    pub mismatch_score: Option<i32>,

    /// Score for a column that consumes only the second sequence
    #[arg(long, allow_negative_numbers = true)]
    pub insertion: Option<i32>,

    /// Score for a column that consumes only the first sequence
    #[arg(long, allow_negative_numbers = true)]
    pub deletion: Option<i32>,

    /// Gap symbol written into the aligned rows
    #[arg(long, value_name = "CHAR")]
    pub gap: Option<char>,

    /// Check the alignment against the inputs and rescore it before printing
    #[arg(long)]
    pub verify: bool,

    /// Split large linear-space sub-problems across threads
    #[arg(long)]
    pub parallel: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AlignArgs {
    /// Configuration file (or defaults) with command-line overrides applied.
    pub fn effective_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(algorithm) = self.algorithm {
            config.alignment.algorithm = algorithm;
        }
        if let Some(matrix) = self.matrix {
            config.scoring.matrix = matrix;
        }
        if let Some(score) = self.match_score {
            config.scoring.match_score = score;
        }
        if let Some(score) = self.mismatch_score {
            config.scoring.mismatch_score = score;
        }
        if let Some(score) = self.insertion {
            config.scoring.insertion = score;
        }
        if let Some(score) = self.deletion {
            config.scoring.deletion = score;
        }
        if let Some(gap) = self.gap {
            config.alignment.gap_symbol = gap;
        }
        if self.verify {
            config.alignment.verify = true;
        }
        if self.parallel {
            config.performance.parallel = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Both input sequences, taking files first and positionals in order.
    pub fn read_sequences(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let mut positional = self.sequences.iter();

        let x = match &self.x_file {
            Some(path) => read_sequence_file(path)?,
            None => positional
                .next()
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| {
                    PairAlignError::InvalidInput(
                        "missing first sequence (pass it inline or with --x-file)".to_string(),
                    )
                })?,
        };

        let y = match &self.y_file {
            Some(path) => read_sequence_file(path)?,
            None => positional
                .next()
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| {
                    PairAlignError::InvalidInput(
                        "missing second sequence (pass it inline or with --y-file)".to_string(),
                    )
                })?,
        };

        if positional.next().is_some() {
            return Err(PairAlignError::InvalidInput(
                "too many sequences given; expected two".to_string(),
            )
            .into());
        }

        Ok((x, y))
    }
}

/// Sequence text from `path`. Lines starting with `>` are headers and are
/// skipped; all whitespace is dropped.
fn read_sequence_file(path: &Path) -> Result<Vec<u8>> {
    let contents = std::fs::read_to_string(path).map_err(PairAlignError::from)?;

    let sequence: Vec<u8> = contents
        .lines()
        .filter(|line| !line.starts_with('>'))
        .flat_map(|line| line.bytes())
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    debug!("Read {} symbols from {}", sequence.len(), path.display());
    Ok(sequence)
}

/// Align `x` against `y` as `config` describes.
pub fn align_sequences(config: &Config, x: &[u8], y: &[u8]) -> Result<Alignment<u8, i32>> {
    let scoring = &config.scoring;

    match scoring.matrix {
        MatrixKind::Identity => align_with(
            config,
            BasicScore::new(
                scoring.match_score,
                scoring.mismatch_score,
                scoring.insertion,
                scoring.deletion,
            ),
            x,
            y,
        ),
        MatrixKind::Nucleotide => align_with(
            config,
            NucleotideMatrix::new().with_gap_costs(scoring.insertion, scoring.deletion),
            x,
            y,
        ),
        MatrixKind::Blosum62 => align_with(
            config,
            Blosum62::new().with_gap_costs(scoring.insertion, scoring.deletion),
            x,
            y,
        ),
    }
}

fn align_with<P>(config: &Config, scoring: P, x: &[u8], y: &[u8]) -> Result<Alignment<u8, i32>>
where
    P: ScoringPolicy<u8, Score = i32> + Sync,
{
    let gap = config.gap_byte();

    let alignment = match config.alignment.algorithm {
        Algorithm::Global => global_align(x, y, gap, &scoring)?,
        Algorithm::LinearSpace => {
            let aligner = Hirschberg::new(&scoring)
                .with_min_parallel_cells(config.performance.min_parallel_cells);
            if config.performance.parallel {
                aligner.par_align(x, y, gap)?
            } else {
                aligner.align(x, y, gap)?
            }
        }
    };

    if config.alignment.verify {
        alignment.verify(x, y, gap)?;
        let rescored = alignment.rescore(&scoring, gap);
        if rescored != alignment.score {
            return Err(PairAlignError::Invariant(format!(
                "reported score {} but columns sum to {}",
                alignment.score, rescored
            ))
            .into());
        }
        debug!("Alignment verified against inputs");
    }

    Ok(alignment)
}

pub fn run(args: AlignArgs, options: &GlobalOptions) -> Result<()> {
    let config = args.effective_config()?;
    let (x, y) = args.read_sequences()?;

    if config.performance.parallel {
        init_thread_pool(
            options.resolve_threads(config.performance.threads),
            options.verbose,
        );
    }

    debug!(
        "Aligning {} x {} symbols with {} ({})",
        x.len(),
        y.len(),
        config.alignment.algorithm,
        config.scoring.matrix
    );

    let alignment = align_sequences(&config, &x, &y)?;
    let report = AlignmentReport::new(&config, &alignment);

    match args.format {
        OutputFormat::Text => report.print_text(),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AlignArgs,
    }

    fn parse(argv: &[&str]) -> AlignArgs {
        let mut full = vec!["align"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "A",
            "C",
            "--algorithm",
            "global",
            "--matrix",
            "nucleotide",
            "--mismatch-score",
            "-3",
            "--insertion",
            "-2",
            "--gap",
            ".",
            "--verify",
        ]);
        let config = args.effective_config().unwrap();

        assert_eq!(config.alignment.algorithm, Algorithm::Global);
        assert_eq!(config.scoring.matrix, MatrixKind::Nucleotide);
        assert_eq!(config.scoring.mismatch_score, -3);
        assert_eq!(config.scoring.insertion, -2);
        assert_eq!(config.scoring.deletion, -1);
        assert_eq!(config.alignment.gap_symbol, '.');
        assert!(config.alignment.verify);
        assert!(!config.performance.parallel);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[scoring]\nmatch_score = 2\nmismatch_score = -1\n\n[alignment]\nalgorithm = \"global\"\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["A", "C", "--config", path, "--match-score", "5"])
            .effective_config()
            .unwrap();

        assert_eq!(config.scoring.match_score, 5);
        assert_eq!(config.scoring.mismatch_score, -1);
        assert_eq!(config.alignment.algorithm, Algorithm::Global);
    }

    #[test]
    fn test_invalid_gap_is_configuration_error() {
        let err = parse(&["A", "C", "--gap", "é"]).effective_config().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairAlignError>(),
            Some(PairAlignError::Configuration(_))
        ));
    }

    #[test]
    fn test_sequences_from_positionals() {
        let (x, y) = parse(&["GCATGCU", "GATTACA"]).read_sequences().unwrap();
        assert_eq!(x, b"GCATGCU");
        assert_eq!(y, b"GATTACA");
    }

    #[test]
    fn test_sequence_file_skips_headers_and_whitespace() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">first sequence").unwrap();
        writeln!(file, "GCAT GC").unwrap();
        writeln!(file, "U").unwrap();
        let path = file.path().to_str().unwrap();

        let (x, y) = parse(&["--x-file", path, "GATTACA"]).read_sequences().unwrap();
        assert_eq!(x, b"GCATGCU");
        assert_eq!(y, b"GATTACA");
    }

    #[test]
    fn test_missing_and_extra_sequences() {
        let err = parse(&["ACGT"]).read_sequences().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairAlignError>(),
            Some(PairAlignError::InvalidInput(_))
        ));

        let err = parse(&["A", "C", "G"]).read_sequences().unwrap_err();
        assert!(err.to_string().contains("too many sequences"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse(&["--x-file", "/nonexistent/x.txt", "A"])
            .read_sequences()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairAlignError>(),
            Some(PairAlignError::Io(_))
        ));
    }

    #[test]
    fn test_align_sequences_per_algorithm() {
        let mut config = Config::default();
        config.scoring.match_score = 2;
        config.scoring.mismatch_score = -1;
        config.scoring.insertion = -2;
        config.scoring.deletion = -2;
        config.alignment.verify = true;

        for algorithm in [Algorithm::Global, Algorithm::LinearSpace] {
            config.alignment.algorithm = algorithm;
            let alignment = align_sequences(&config, b"AGTACGCA", b"TATGC").unwrap();
            assert_eq!(alignment.score, 1);
            assert_eq!(alignment.aligned_y, b"--TATGC-");
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let x: Vec<u8> = (0..300usize).map(|i| b"ACGT"[(i * 7 + i / 3) % 4]).collect();
        let y: Vec<u8> = (0..280usize).map(|i| b"ACGT"[(i * 5 + i / 2) % 4]).collect();

        let mut config = Config::default();
        let sequential = align_sequences(&config, &x, &y).unwrap();

        config.performance.parallel = true;
        config.performance.min_parallel_cells = 64;
        let parallel = align_sequences(&config, &x, &y).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_matrix_gap_costs_come_from_config() {
        let mut config = Config::default();
        config.scoring.matrix = MatrixKind::Blosum62;
        config.scoring.insertion = -4;
        config.scoring.deletion = -4;

        let alignment = align_sequences(&config, b"ACDEFG", b"").unwrap();
        assert_eq!(alignment.score, -24);

        config.scoring.matrix = MatrixKind::Nucleotide;
        let alignment = align_sequences(&config, b"ACGT", b"ACGT").unwrap();
        assert_eq!(alignment.score, 40);
    }

    #[test]
    fn test_custom_gap_symbol() {
        let mut config = Config::default();
        config.alignment.gap_symbol = '.';
        config.alignment.verify = true;

        let alignment = align_sequences(&config, b"ACGT", b"AGT").unwrap();
        assert_eq!(alignment.aligned_y, b"A.GT");
    }
}
