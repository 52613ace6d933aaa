//! Fixture utilities for the deterministic CLI harness.
//!
//! This module discovers fixture assets, loads recorded loudness series
//! from JSON, parses optional expectation files, and verifies analysis
//! results against them. It is intentionally desktop-focused to support
//! CI and QA workflows: fixtures are committed sample nights whose
//! expected events and score ranges pin the pipeline's behavior.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisResult, SoundEventType};

/// Default location for fixture assets.
pub const DEFAULT_FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// Metadata describing an available fixture.
#[derive(Clone, Debug)]
pub struct FixtureMetadata {
    pub name: String,
    pub sample_path: PathBuf,
    pub expect_path: Option<PathBuf>,
}

/// Loaded fixture with its decoded loudness series.
pub struct RecordingFixture {
    pub metadata: FixtureMetadata,
    pub duration_secs: f64,
    pub start_epoch_secs: Option<u64>,
    pub samples: Vec<f32>,
    pub expectations: Option<FixtureExpectations>,
}

/// On-disk schema for a fixture sample file.
#[derive(Debug, Deserialize)]
struct FixtureFile {
    /// Recording length in seconds; defaults to the sample count
    duration_secs: Option<f64>,
    /// Unix epoch seconds of recording start, for report rendering
    start_epoch_secs: Option<u64>,
    samples: Vec<f32>,
}

/// JSON expectation schema for fixture verification.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureExpectations {
    pub fixture: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Inclusive bounds on the snore score, when pinned
    #[serde(default)]
    pub score_range: Option<(u8, u8)>,
    pub events: Vec<ExpectedEvent>,
}

/// Expected event definition, matched by list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedEvent {
    #[serde(rename = "type")]
    pub kind: SoundEventType,
    pub offset_secs: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance_secs: f64,
    #[serde(default)]
    pub min_duration_secs: Option<f64>,
}

fn default_tolerance() -> f64 {
    5.0
}

impl FixtureExpectations {
    /// Compare an analysis result against these expectations.
    pub fn verify(&self, actual: &AnalysisResult) -> std::result::Result<(), ExpectationDiff> {
        let mut failures = Vec::new();

        for (idx, expected) in self.events.iter().enumerate() {
            match actual.events.get(idx) {
                Some(event) => {
                    let delta = (event.timestamp - expected.offset_secs).abs();
                    let too_short = expected
                        .min_duration_secs
                        .map(|min| event.duration < min)
                        .unwrap_or(false);
                    if event.kind != expected.kind || delta > expected.tolerance_secs || too_short {
                        failures.push(ExpectationFailure {
                            index: idx,
                            expected: expected.clone(),
                            actual: Some(event.clone()),
                            delta_secs: Some(delta),
                        });
                    }
                }
                None => failures.push(ExpectationFailure {
                    index: idx,
                    expected: expected.clone(),
                    actual: None,
                    delta_secs: None,
                }),
            }
        }

        for (idx, event) in actual.events.iter().enumerate().skip(self.events.len()) {
            failures.push(ExpectationFailure {
                index: idx,
                expected: ExpectedEvent {
                    kind: event.kind,
                    offset_secs: event.timestamp,
                    tolerance_secs: 0.0,
                    min_duration_secs: None,
                },
                actual: Some(event.clone()),
                delta_secs: Some(0.0),
            });
        }

        if let Some((min, max)) = self.score_range {
            if actual.snore_score < min || actual.snore_score > max {
                failures.push(ExpectationFailure {
                    index: actual.events.len(),
                    expected: ExpectedEvent {
                        kind: SoundEventType::Snoring,
                        offset_secs: 0.0,
                        tolerance_secs: 0.0,
                        min_duration_secs: None,
                    },
                    actual: None,
                    delta_secs: Some(actual.snore_score as f64),
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ExpectationDiff { failures })
        }
    }
}

/// Outcome of comparing actual results with expectations.
#[derive(Debug)]
pub struct ExpectationDiff {
    pub failures: Vec<ExpectationFailure>,
}

impl ExpectationDiff {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "failures": self.failures.iter().map(|failure| {
                serde_json::json!({
                    "index": failure.index,
                    "expected": {
                        "type": failure.expected.kind,
                        "offset_secs": failure.expected.offset_secs,
                        "tolerance_secs": failure.expected.tolerance_secs,
                    },
                    "actual": failure.actual,
                    "delta_secs": failure.delta_secs,
                })
            }).collect::<Vec<_>>()
        })
    }
}

/// Detailed diff entry for a single failure.
#[derive(Debug)]
pub struct ExpectationFailure {
    pub index: usize,
    pub expected: ExpectedEvent,
    pub actual: Option<crate::analysis::SoundEvent>,
    pub delta_secs: Option<f64>,
}

/// Catalog responsible for discovering fixtures on disk.
pub struct FixtureCatalog {
    root: PathBuf,
}

impl FixtureCatalog {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all fixtures by their metadata.
    pub fn discover(&self) -> Result<Vec<FixtureMetadata>> {
        let mut fixtures = Vec::new();
        if !self.root.exists() {
            return Ok(fixtures);
        }

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let is_sample_file = path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && !path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(".expect.json"));
            if is_sample_file {
                fixtures.push(self.metadata_for_path(&path)?);
            }
        }

        fixtures.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fixtures)
    }

    /// Load fixture samples + expectations for the provided name or path.
    pub fn load(
        &self,
        fixture: &str,
        override_expect: Option<PathBuf>,
    ) -> Result<RecordingFixture> {
        let sample_path = self.resolve_fixture_path(fixture)?;
        let metadata = self.metadata_for_path(&sample_path)?;

        let json = fs::read_to_string(&sample_path)
            .with_context(|| format!("reading fixture {}", sample_path.display()))?;
        let file: FixtureFile = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", sample_path.display()))?;

        let expectation_path = override_expect.or(metadata.expect_path.clone());
        let expectations = match expectation_path {
            Some(path) => {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("reading expectation {}", path.display()))?;
                Some(
                    serde_json::from_str(&json)
                        .with_context(|| format!("parsing {}", path.display()))?,
                )
            }
            None => None,
        };

        Ok(RecordingFixture {
            metadata,
            duration_secs: file.duration_secs.unwrap_or(file.samples.len() as f64),
            start_epoch_secs: file.start_epoch_secs,
            samples: file.samples,
            expectations,
        })
    }

    fn resolve_fixture_path(&self, fixture: &str) -> Result<PathBuf> {
        let as_path = Path::new(fixture);
        if as_path.exists() {
            return Ok(as_path.to_path_buf());
        }

        let candidate = self.root.join(format!("{fixture}.json"));
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(anyhow!(
                "Fixture '{fixture}' not found in {}",
                self.root.display()
            ))
        }
    }

    fn metadata_for_path(&self, sample_path: &Path) -> Result<FixtureMetadata> {
        let name = sample_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("Invalid fixture name for {}", sample_path.display()))?
            .to_string();
        let expect_path = sample_path.with_extension("expect.json");
        Ok(FixtureMetadata {
            name,
            sample_path: sample_path.to_path_buf(),
            expect_path: expect_path.exists().then_some(expect_path),
        })
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_ROOT)
    }
}
