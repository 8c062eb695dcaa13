use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Difficulty division of a USACO contest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// One input / expected output pair from a problem's test data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "inp")]
    pub input: String,
    #[serde(rename = "out")]
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    #[serde(rename = "description")]
    pub statement: String,
    /// `None` when the results page offered no test data link, which is not
    /// the same as an archive without any cases.
    #[serde(rename = "test_data")]
    pub test_cases: Option<Vec<TestCase>>,
    pub solution: String,
}

/// Problems of one contest, grouped by the divisions that were kept.
pub type ContestResult = BTreeMap<Level, Vec<Problem>>;

/// Every scraped contest, in the order the contests were requested.
pub type PipelineOutput = Vec<ContestResult>;
