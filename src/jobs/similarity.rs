//! Relationship weight between two jobs

use super::model::JobKey;
use crate::config::SimilarityWeights;
use std::fmt;

/// How two distinct jobs relate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Similarity {
    SameCompany,
    SameTitle,
    Unrelated,
}

impl Similarity {
    /// Classify two distinct jobs. Company is checked before title; two jobs
    /// sharing both would be the same job.
    pub fn classify(a: JobKey<'_>, b: JobKey<'_>) -> Self {
        if a.company == b.company {
            Similarity::SameCompany
        } else if a.job_title == b.job_title {
            Similarity::SameTitle
        } else {
            Similarity::Unrelated
        }
    }

    pub fn weight(self, weights: &SimilarityWeights) -> f64 {
        match self {
            Similarity::SameCompany => weights.same_company,
            Similarity::SameTitle => weights.same_title,
            Similarity::Unrelated => weights.unrelated,
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Similarity::SameCompany => "same company",
            Similarity::SameTitle => "same title",
            Similarity::Unrelated => "unrelated",
        };
        f.write_str(name)
    }
}

/// Relationship weight between two distinct jobs
pub fn similarity(weights: &SimilarityWeights, a: JobKey<'_>, b: JobKey<'_>) -> f64 {
    Similarity::classify(a, b).weight(weights)
}
