// Trainer directory queries and recommendation ranking

use std::cmp::Ordering;

use crate::requests::errors::StoreError;
use crate::requests::traits::UserDirectory;
use crate::requests::types::{Availability, TrainingRequest, User};
use crate::roles::Role;

fn serves_location(trainer: &User, request: &TrainingRequest) -> bool {
    let region = trainer.region.trim();
    !region.is_empty()
        && (region.eq_ignore_ascii_case(request.details.location.trim())
            || region.eq_ignore_ascii_case(request.region.trim()))
}

/// Rank trainers for a request.
///
/// Only trainers whose specialization matches the request are kept (all
/// trainers when the request has none yet), minus anyone marked unavailable.
/// Trainers based where the training takes place come first, then higher
/// ratings.
pub fn recommend_trainers(trainers: Vec<User>, request: &TrainingRequest) -> Vec<User> {
    let wanted = request.details.specialization;
    let mut matches: Vec<User> = trainers
        .into_iter()
        .filter(|t| t.role == Role::Tr)
        .filter(|t| t.availability != Some(Availability::Unavailable))
        .filter(|t| wanted.is_none() || t.specialization == wanted)
        .collect();

    matches.sort_by(|a, b| {
        let local = serves_location(b, request).cmp(&serves_location(a, request));
        if local != Ordering::Equal {
            return local;
        }
        let (ra, rb) = (a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0));
        rb.total_cmp(&ra)
    });
    matches
}

/// Trainer directory lookup: a case-insensitive substring match over name,
/// specialization and region. A blank query lists every trainer.
pub fn search_trainers(trainers: Vec<User>, query: &str) -> Vec<User> {
    let needle = query.trim().to_lowercase();
    trainers
        .into_iter()
        .filter(|t| t.role == Role::Tr)
        .filter(|t| {
            if needle.is_empty() {
                return true;
            }
            let spec = t.specialization.map(|s| s.label()).unwrap_or_default();
            [t.name.as_str(), spec, t.region.as_str()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

pub async fn recommended_trainers<D>(
    directory: &D,
    request: &TrainingRequest,
) -> Result<Vec<User>, StoreError>
where
    D: UserDirectory + ?Sized,
{
    let trainers = directory.list_trainers().await?;
    let ranked = recommend_trainers(trainers, request);
    tracing::debug!(
        request.id = %request.id,
        candidates = ranked.len(),
        "Trainer recommendations computed"
    );
    Ok(ranked)
}
