use crate::cli::commands::RunSettings;
use crate::core::{ValidationError, ValidationResult};
use crate::services::config::{DefaultPipelineConfig, DEFAULT_CHANNEL_BUFFER_SIZE};
use crate::source::CyclicSource;
use clap::{ArgAction, CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(name = "fanout_pipeline")]
#[command(about = "Sums the squares of generated values with a fan-out/fan-in worker pipeline")]
#[command(version)]
pub struct Cli {
    /// Total number of values to produce (must be greater than 0)
    #[arg(short = 'n', value_name = "N", allow_negative_numbers = true)]
    pub num_values: Option<i64>,

    /// Number of parallel workers (must be greater than 0)
    #[arg(short = 'w', value_name = "WORKERS", allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Batch size; enables the batched pipeline variant
    #[arg(short = 'b', value_name = "SIZE", allow_negative_numbers = true)]
    pub batch_size: Option<i64>,

    /// Seed for the source list generator (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Explicit 10-element source list, e.g. 1,2,3,4,5,6,7,8,9,10
    #[arg(long, value_delimiter = ',', conflicts_with = "seed")]
    pub source: Option<Vec<u64>>,

    /// Capacity of the input and output queues
    #[arg(long, default_value_t = DEFAULT_CHANNEL_BUFFER_SIZE)]
    pub buffer_size: usize,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// 引数を検証して実行設定へ変換
    pub fn into_settings(self) -> ValidationResult<RunSettings> {
        let num_values = require_positive("-n", self.num_values)?;
        let workers = require_positive("-w", self.workers)?;

        let mut config = DefaultPipelineConfig::new(num_values, workers)
            .with_buffer_size(self.buffer_size)
            .with_progress_reporting(self.verbose > 0);
        if self.batch_size.is_some() {
            config = config.with_batch_size(require_positive("-b", self.batch_size)?);
        }
        config.validate()?;

        let source = match (&self.source, self.seed) {
            (Some(values), _) => CyclicSource::from_slice(values)?,
            (None, Some(seed)) => CyclicSource::from_seed(seed),
            (None, None) => CyclicSource::from_entropy(),
        };

        Ok(RunSettings {
            config,
            source,
            verbose: self.verbose,
        })
    }

    /// 検証失敗時に表示する使い方
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }
}

fn require_positive(flag: &str, value: Option<i64>) -> ValidationResult<usize> {
    match value {
        None => Err(ValidationError::new(flag, "必須の引数です")),
        Some(v) if v <= 0 => Err(ValidationError::new(
            flag,
            format!("0より大きい値である必要があります: {v}"),
        )),
        Some(v) => usize::try_from(v)
            .map_err(|_| ValidationError::new(flag, format!("値が大きすぎます: {v}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BatchingMode, PipelineConfig, ValueSource, MAX_CHANNEL_BUFFER_SIZE};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fanout_pipeline").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_batched_arguments() {
        let settings = parse(&["-n", "10", "-w", "2", "-b", "3"])
            .into_settings()
            .unwrap();

        assert_eq!(settings.config.num_values(), 10);
        assert_eq!(settings.config.worker_count(), 2);
        assert_eq!(settings.config.batching(), BatchingMode::Batched(3));
        assert_eq!(settings.config.channel_buffer_size(), 1_000);
    }

    #[test]
    fn test_unbatched_when_b_absent() {
        let settings = parse(&["-n", "5", "-w", "1"]).into_settings().unwrap();
        assert_eq!(settings.config.batching(), BatchingMode::PerValue);
    }

    #[test]
    fn test_missing_required_flag() {
        let error = parse(&["-w", "2"]).into_settings().unwrap_err();
        assert_eq!(error.field, "-n");

        let error = parse(&["-n", "2"]).into_settings().unwrap_err();
        assert_eq!(error.field, "-w");
    }

    #[test]
    fn test_non_positive_values_rejected() {
        for (args, field) in [
            (vec!["-n", "0", "-w", "2"], "-n"),
            (vec!["-n", "-5", "-w", "2"], "-n"),
            (vec!["-n", "5", "-w", "0"], "-w"),
            (vec!["-n", "5", "-w", "2", "-b", "0"], "-b"),
            (vec!["-n", "5", "-w", "2", "-b", "-1"], "-b"),
        ] {
            let error = parse(&args).into_settings().unwrap_err();
            assert_eq!(error.field, field, "args: {args:?}");
        }
    }

    #[test]
    fn test_explicit_source_and_seed() {
        let settings = parse(&[
            "-n",
            "10",
            "-w",
            "2",
            "--source",
            "1,2,3,4,5,6,7,8,9,10",
        ])
        .into_settings()
        .unwrap();
        assert_eq!(settings.source.value_at(9), 10);

        let seeded = parse(&["-n", "10", "-w", "2", "--seed", "5"])
            .into_settings()
            .unwrap();
        assert_eq!(seeded.source, CyclicSource::from_seed(5));
    }

    #[test]
    fn test_invalid_source_rejected() {
        let error = parse(&["-n", "10", "-w", "2", "--source", "1,2,3"])
            .into_settings()
            .unwrap_err();
        assert_eq!(error.field, "source");

        assert!(Cli::try_parse_from([
            "fanout_pipeline",
            "--seed",
            "1",
            "--source",
            "1,2,3,4,5,6,7,8,9,10"
        ])
        .is_err());
    }

    #[test]
    fn test_verbosity_enables_progress() {
        let quiet = parse(&["-n", "3", "-w", "1"]).into_settings().unwrap();
        assert!(!quiet.config.enable_progress_reporting());

        for (flag, level) in [("-v", 1), ("-vv", 2)] {
            let settings = parse(&["-n", "3", "-w", "1", flag]).into_settings().unwrap();
            assert_eq!(settings.verbose, level);
            assert!(settings.config.enable_progress_reporting(), "flag: {flag}");
        }
    }

    #[test]
    fn test_oversized_buffer_rejected() {
        let too_large = (MAX_CHANNEL_BUFFER_SIZE + 1).to_string();
        let error = parse(&["-n", "10", "-w", "2", "--buffer-size", &too_large])
            .into_settings()
            .unwrap_err();
        assert_eq!(error.field, "buffer_size");

        let error = parse(&["-n", "10", "-w", "2", "--buffer-size", "0"])
            .into_settings()
            .unwrap_err();
        assert_eq!(error.field, "buffer_size");
    }

    #[test]
    fn test_usage_mentions_flags() {
        let usage = Cli::usage();
        assert!(usage.contains("-n"));
        assert!(usage.contains("-w"));
        assert!(usage.contains("-b"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
