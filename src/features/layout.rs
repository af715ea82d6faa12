//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! The order below is the column order the classifier was trained on.
//! Changing it (or the count) without re-exporting the model artifact
//! produces silently wrong predictions.

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Raw inputs (0-4) ===
    "disaster_score",        // 0: Disaster history score 0-10
    "population_density",    // 1: People per km²
    "urbanization_level",    // 2: Fraction 0.0-1.0
    "houses_affected",       // 3: Count
    "human_deaths",          // 4: Count

    // === Derived (5-6) ===
    "risk_index",            // 5: Weighted sum of score, density, urbanization
    "damage_scale",          // 6: Houses affected + 10 * deaths
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 7;
