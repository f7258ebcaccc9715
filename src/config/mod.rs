//! Configuration
//!
//! Handles conversion of parsed CLI arguments into the immutable [`Config`]
//! consumed by the core, including range validation and offset alignment.
//! Every validation failure category carries its own exit code so scripted
//! callers can distinguish what was rejected.

pub mod cli;

use crate::util::align::{align_address, SECTOR_SIZE};
use self::cli::Cli;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Addressing pattern for successive requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Advance one page per request, wrapping at the end of the span
    Sequential,
    /// Draw each offset uniformly from the span
    Random,
}

impl std::fmt::Display for AddressMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressMode::Sequential => write!(f, "sequential"),
            AddressMode::Random => write!(f, "random"),
        }
    }
}

/// Configuration validation failure
///
/// One variant per option category; `exit_code` yields the process exit
/// code for that category.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("incorrect value {0} for -d <duration>, must be positive")]
    Duration(i64),
    #[error("failed to validate or create path for {}", .0.display())]
    TargetPath(PathBuf),
    #[error("incorrect value {0} for -n <count>, must be positive")]
    RequestCount(i64),
    #[error("failed to validate or create path for {}", .0.display())]
    OutputPath(PathBuf),
    #[error("incorrect value {0} for -p <size>, must be within [1, 2048] sectors")]
    PageSize(i64),
    #[error("incorrect value {0} for -R <time>, must be positive")]
    RampupInterval(i64),
    #[error("incorrect value {0} for -s <addr>, must be non-negative")]
    StartOffset(i64),
    #[error("incorrect value {0} for -S <addr>, must be at least one sector")]
    Span(i64),
    #[error("incorrect value {0} for -t <count>, must be at least 1")]
    ThreadCount(i64),
    #[error("incorrect value {0} for -w <percent>, should be [0, 100]")]
    WritePercent(i64),
    #[error("invalid or extraneous arguments")]
    ExtraneousArguments,
}

impl ConfigError {
    /// Process exit code for this failure category
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Duration(_) => 1,
            ConfigError::TargetPath(_) => 2,
            ConfigError::RequestCount(_) => 3,
            ConfigError::OutputPath(_) => 4,
            ConfigError::PageSize(_) => 5,
            ConfigError::RampupInterval(_) => 6,
            ConfigError::StartOffset(_) => 7,
            ConfigError::Span(_) => 8,
            ConfigError::ThreadCount(_) => 9,
            ConfigError::WritePercent(_) => 10,
            ConfigError::ExtraneousArguments => 11,
        }
    }
}

/// Immutable parameters for one benchmark run
///
/// Shared read-only by every worker for the lifetime of the run. At least
/// one of `duration`/`max_requests` is always `Some` after CLI resolution.
#[derive(Debug, Clone)]
pub struct Config {
    /// File or device under test
    pub target_path: PathBuf,
    /// Append report output here instead of the console
    pub output_path: Option<PathBuf>,
    /// Per-worker wall-clock budget; `None` = unbounded
    pub duration: Option<Duration>,
    /// Per-worker request budget; `None` = unbounded
    pub max_requests: Option<u64>,
    /// Bytes per request; positive multiple of the sector size
    pub page_size: u64,
    /// Share of write requests, 0-100
    pub write_percent: u8,
    /// Sequential or random addressing
    pub mode: AddressMode,
    /// First byte of the addressable region, sector-aligned
    pub start_offset: u64,
    /// Size of the addressable region, sector-aligned
    pub span: u64,
    /// Number of worker threads
    pub threads: usize,
    /// Delay between successive worker starts, 0 = none
    pub rampup_interval_us: u64,
    /// Emit one line per request
    pub trace: bool,
    /// Newline separators in the config dump and summary
    pub human_readable: bool,
    /// Open the target with O_DIRECT (always set by the CLI; tests may
    /// clear it on filesystems that reject direct IO)
    pub direct: bool,
    /// Open the target with O_SYNC
    pub sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from("testfile.tmp"),
            output_path: None,
            duration: Some(Duration::from_secs(10)),
            max_requests: Some(100),
            page_size: 4096,
            write_percent: 50,
            mode: AddressMode::Sequential,
            start_offset: 0,
            span: 16 * 1024 * 1024,
            threads: 1,
            rampup_interval_us: 0,
            trace: false,
            human_readable: false,
            direct: true,
            sync: true,
        }
    }
}

impl Config {
    /// Validate parsed CLI arguments and build the run configuration
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(duration) = cli.duration {
            if duration <= 0 {
                return Err(ConfigError::Duration(duration));
            }
        }

        ensure_reachable(&cli.filename)
            .map_err(|_| ConfigError::TargetPath(cli.filename.clone()))?;

        if let Some(count) = cli.request_count {
            if count <= 0 {
                return Err(ConfigError::RequestCount(count));
            }
        }

        if let Some(ref output) = cli.output {
            ensure_reachable(output).map_err(|_| ConfigError::OutputPath(output.clone()))?;
        }

        if cli.page_sectors < 1 || cli.page_sectors > 2048 {
            return Err(ConfigError::PageSize(cli.page_sectors));
        }

        if let Some(rampup) = cli.rampup_interval {
            if rampup < 1 {
                return Err(ConfigError::RampupInterval(rampup));
            }
        }

        if cli.start_offset < 0 {
            return Err(ConfigError::StartOffset(cli.start_offset));
        }

        let span = align_address(cli.span.max(0) as u64);
        if cli.span <= 0 || span == 0 {
            return Err(ConfigError::Span(cli.span));
        }

        if cli.threads < 1 {
            return Err(ConfigError::ThreadCount(cli.threads));
        }

        if cli.write_percent < 0 || cli.write_percent > 100 {
            return Err(ConfigError::WritePercent(cli.write_percent));
        }

        // When only one stop condition is given, the other is unbounded;
        // when neither is given, both defaults apply.
        let (duration, max_requests) = match (cli.duration, cli.request_count) {
            (None, None) => (Some(10), Some(100)),
            (duration, count) => (duration, count),
        };

        Ok(Self {
            target_path: cli.filename.clone(),
            output_path: cli.output.clone(),
            duration: duration.map(|secs| Duration::from_secs(secs as u64)),
            max_requests: max_requests.map(|count| count as u64),
            page_size: cli.page_sectors as u64 * SECTOR_SIZE,
            write_percent: cli.write_percent as u8,
            mode: if cli.random {
                AddressMode::Random
            } else {
                AddressMode::Sequential
            },
            start_offset: align_address(cli.start_offset as u64),
            span,
            threads: cli.threads as usize,
            rampup_interval_us: cli.rampup_interval.unwrap_or(0) as u64,
            trace: cli.trace,
            human_readable: cli.human_readable,
            direct: true,
            sync: true,
        })
    }
}

/// Check that a path exists or can be created, making parent directories
/// as needed. Block device paths already exist and pass the first check.
fn ensure_reachable(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["iobench"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_resolve_both_stop_conditions() {
        let config = Config::from_cli(&parse(&[])).unwrap();
        assert_eq!(config.duration, Some(Duration::from_secs(10)));
        assert_eq!(config.max_requests, Some(100));
        assert_eq!(config.page_size, 4096);
        assert_eq!(config.write_percent, 50);
        assert_eq!(config.mode, AddressMode::Sequential);
        assert!(config.direct);
        assert!(config.sync);
    }

    #[test]
    fn test_duration_only_unbounds_requests() {
        let config = Config::from_cli(&parse(&["-d", "5"])).unwrap();
        assert_eq!(config.duration, Some(Duration::from_secs(5)));
        assert_eq!(config.max_requests, None);
    }

    #[test]
    fn test_requests_only_unbounds_duration() {
        let config = Config::from_cli(&parse(&["-n", "42"])).unwrap();
        assert_eq!(config.duration, None);
        assert_eq!(config.max_requests, Some(42));
    }

    #[test]
    fn test_both_stop_conditions_kept() {
        let config = Config::from_cli(&parse(&["-d", "3", "-n", "7"])).unwrap();
        assert_eq!(config.duration, Some(Duration::from_secs(3)));
        assert_eq!(config.max_requests, Some(7));
    }

    #[test]
    fn test_page_size_in_sectors() {
        let config = Config::from_cli(&parse(&["-p", "1"])).unwrap();
        assert_eq!(config.page_size, 512);
        let config = Config::from_cli(&parse(&["-p", "2048"])).unwrap();
        assert_eq!(config.page_size, 2048 * 512);
    }

    #[test]
    fn test_offsets_aligned_down() {
        let config = Config::from_cli(&parse(&["-s", "1000", "-S", "10000"])).unwrap();
        assert_eq!(config.start_offset, 512);
        assert_eq!(config.span, 9728);
        assert_eq!(config.span % SECTOR_SIZE, 0);
    }

    #[test]
    fn test_random_flag_selects_mode() {
        let config = Config::from_cli(&parse(&["-r"])).unwrap();
        assert_eq!(config.mode, AddressMode::Random);
    }

    #[test]
    fn test_validation_exit_codes() {
        let cases: &[(&[&str], i32)] = &[
            (&["-d", "0"], 1),
            (&["-n", "-1"], 3),
            (&["-p", "0"], 5),
            (&["-p", "2049"], 5),
            (&["-R", "0"], 6),
            (&["-s", "-512"], 7),
            (&["-S", "0"], 8),
            (&["-S", "100"], 8), // below one sector after alignment
            (&["-t", "0"], 9),
            (&["-w", "101"], 10),
            (&["-w", "-1"], 10),
        ];
        for (args, code) in cases {
            let err = Config::from_cli(&parse(args)).unwrap_err();
            assert_eq!(err.exit_code(), *code, "args: {:?}", args);
        }
    }

    #[test]
    fn test_every_category_code_distinct() {
        let codes = [
            ConfigError::Duration(0).exit_code(),
            ConfigError::TargetPath(PathBuf::new()).exit_code(),
            ConfigError::RequestCount(0).exit_code(),
            ConfigError::OutputPath(PathBuf::new()).exit_code(),
            ConfigError::PageSize(0).exit_code(),
            ConfigError::RampupInterval(0).exit_code(),
            ConfigError::StartOffset(0).exit_code(),
            ConfigError::Span(0).exit_code(),
            ConfigError::ThreadCount(0).exit_code(),
            ConfigError::WritePercent(0).exit_code(),
            ConfigError::ExtraneousArguments.exit_code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn test_target_parent_dirs_created() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/target.dat");
        let nested_str = nested.to_str().unwrap();

        let config = Config::from_cli(&parse(&["-f", nested_str])).unwrap();
        assert_eq!(config.target_path, nested);
        assert!(nested.parent().unwrap().is_dir());
    }
}
