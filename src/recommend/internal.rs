//! Internal implementation of the recommendation pipeline

use tracing::{debug, warn};

use super::criteria::{DegeneratePolicy, FilterCriteria, UrlExclusion};
use super::{Recommendations, ScoredCandidate};
use crate::dataset::Dataset;
use crate::error::{RecommendError, RecommendResult, SimilarityError};
use crate::similarity::{similarity_each, to_percent_score};

pub(super) fn run(
    dataset: &Dataset,
    reference_url: &str,
    criteria: &FilterCriteria,
) -> RecommendResult<Recommendations> {
    // Criteria errors win over dataset errors
    criteria.validate()?;
    let exclusion = UrlExclusion::compile(criteria)?;

    let reference = dataset.resolve(reference_url)?;
    if reference.embedding.iter().all(|x| *x == 0.0) {
        return Err(RecommendError::DegenerateVector {
            url: reference.url.clone(),
        });
    }

    let records = dataset.records();
    let candidates: Vec<(usize, &[f32])> = records
        .iter()
        .enumerate()
        .map(|(index, record)| (index, record.embedding.as_slice()))
        .collect();

    let scored = similarity_each(&reference.embedding, &candidates);

    let mut skipped = Vec::new();
    let mut below_threshold = 0usize;
    let mut excluded = 0usize;
    let mut ranked = Vec::new();

    for (index, result) in scored {
        let record = &records[index];

        let similarity = match result {
            Ok(similarity) => similarity,
            Err(SimilarityError::DegenerateVector)
                if criteria.on_degenerate == DegeneratePolicy::Skip =>
            {
                warn!(url = %record.url, "Skipping page with zero-magnitude embedding");
                skipped.push(record.url.clone());
                continue;
            }
            Err(err) => return Err(RecommendError::from_similarity(&record.url, err)),
        };

        // Rounded before comparison so 80.00 passes a threshold of 80
        let similarity_score = to_percent_score(similarity);

        if record.url == reference.url {
            continue;
        }
        if similarity_score < criteria.threshold {
            below_threshold += 1;
            continue;
        }
        if exclusion.excludes(&record.url) {
            excluded += 1;
            continue;
        }

        ranked.push(ScoredCandidate {
            url: record.url.clone(),
            title: record.title.clone(),
            similarity_score,
        });
    }

    ranked.sort_by(|a, b| {
        b.similarity_score
            .total_cmp(&a.similarity_score)
            .then_with(|| a.url.cmp(&b.url))
    });

    if let Some(limit) = criteria.limit {
        ranked.truncate(limit);
    }

    debug!(
        reference = %reference.url,
        scored = records.len(),
        below_threshold,
        excluded,
        skipped = skipped.len(),
        returned = ranked.len(),
        "Ranked recommendations"
    );

    Ok(Recommendations {
        reference_url: reference.url.clone(),
        reference_title: reference.title.clone(),
        candidates: ranked,
        skipped,
    })
}
