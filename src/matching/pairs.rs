//! Candidate pair generation.
//!
//! Every available donor is evaluated against every waiting recipient. Each
//! evaluation yields a `PairEvaluation`; eligible ones expand into one
//! `CandidatePair` per shared organ. Nothing here touches storage.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use super::compatibility::compatibility_score;
use crate::models::{
    BloodType, DonorProfile, DonorStatus, Organ, RecipientProfile, RecipientStatus, UrgencyLevel,
};

/// Ephemeral donor/recipient/organ proposal. Recomputed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CandidatePair {
    pub donor_id: Uuid,
    pub recipient_id: Uuid,
    pub organ: Organ,
    pub compatibility_score: u8,
    pub urgency_level: UrgencyLevel,
    pub donor_blood_type: BloodType,
    pub recipient_blood_type: BloodType,
}

/// Why a donor/recipient pair produced no candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DonorNotAvailable,
    RecipientNotWaiting,
    BloodTypeIncompatible,
    NoSharedOrgans,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairEvaluation {
    Eligible { organs: BTreeSet<Organ>, score: u8 },
    Rejected(RejectReason),
}

pub fn evaluate_pair(donor: &DonorProfile, recipient: &RecipientProfile) -> PairEvaluation {
    if donor.status != DonorStatus::Available {
        return PairEvaluation::Rejected(RejectReason::DonorNotAvailable);
    }
    if recipient.status != RecipientStatus::Waiting {
        return PairEvaluation::Rejected(RejectReason::RecipientNotWaiting);
    }
    let Some(score) = compatibility_score(donor.blood_type, recipient.blood_type) else {
        return PairEvaluation::Rejected(RejectReason::BloodTypeIncompatible);
    };

    let organs: BTreeSet<Organ> = donor
        .organs_available
        .intersection(&recipient.organs_needed)
        .copied()
        .collect();
    if organs.is_empty() {
        return PairEvaluation::Rejected(RejectReason::NoSharedOrgans);
    }

    PairEvaluation::Eligible { organs, score }
}

/// Cross-product of donors and recipients, one pair per shared organ.
///
/// Emission follows donor order, then recipient order, then organ order.
pub fn generate_candidate_pairs(
    donors: &[DonorProfile],
    recipients: &[RecipientProfile],
) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();

    for donor in donors {
        for recipient in recipients {
            if let PairEvaluation::Eligible { organs, score } = evaluate_pair(donor, recipient) {
                pairs.extend(organs.into_iter().map(|organ| CandidatePair {
                    donor_id: donor.id,
                    recipient_id: recipient.id,
                    organ,
                    compatibility_score: score,
                    urgency_level: recipient.urgency_level,
                    donor_blood_type: donor.blood_type,
                    recipient_blood_type: recipient.blood_type,
                }));
            }
        }
    }

    pairs
}
