//! ABO donor-eligibility rule.
//!
//! The table is spelled out row by row so each of the 64 ordered pairs can be
//! checked against a reference chart. Rows are donors, columns recipients,
//! both in `BloodType::ALL` order: O-, O+, A-, A+, B-, B+, AB-, AB+.

use crate::models::BloodType;

/// Score for an identical blood type.
pub const SCORE_IDENTICAL: u8 = 100;
/// Score for a compatible but different blood type.
pub const SCORE_COMPATIBLE: u8 = 80;

const Y: bool = true;
const N: bool = false;

#[rustfmt::skip]
const ABO_TABLE: [[bool; 8]; 8] = [
    //          O-  O+  A-  A+  B-  B+  AB- AB+
    /* O-  */ [ Y,  Y,  Y,  Y,  Y,  Y,  Y,  Y ],
    /* O+  */ [ N,  Y,  N,  Y,  N,  Y,  N,  Y ],
    /* A-  */ [ N,  N,  Y,  Y,  N,  N,  Y,  Y ],
    /* A+  */ [ N,  N,  N,  Y,  N,  N,  N,  Y ],
    /* B-  */ [ N,  N,  N,  N,  Y,  Y,  Y,  Y ],
    /* B+  */ [ N,  N,  N,  N,  N,  Y,  N,  Y ],
    /* AB- */ [ N,  N,  N,  N,  N,  N,  Y,  Y ],
    /* AB+ */ [ N,  N,  N,  N,  N,  N,  N,  Y ],
];

/// Whether blood of `donor` type may be given to a `recipient` type.
pub fn is_compatible(donor: BloodType, recipient: BloodType) -> bool {
    ABO_TABLE[donor.index()][recipient.index()]
}

/// `Some(100)` for identical types, `Some(80)` for compatible ones, `None` otherwise.
pub fn compatibility_score(donor: BloodType, recipient: BloodType) -> Option<u8> {
    if !is_compatible(donor, recipient) {
        return None;
    }
    Some(if donor == recipient {
        SCORE_IDENTICAL
    } else {
        SCORE_COMPATIBLE
    })
}

/// Donor blood types a recipient of the given type can receive from.
pub fn compatible_donors_for(recipient: BloodType) -> Vec<BloodType> {
    BloodType::ALL
        .iter()
        .copied()
        .filter(|donor| is_compatible(*donor, recipient))
        .collect()
}
