//! Static high-risk reference regions

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighRiskRegion {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Overlaid on every map regardless of input
pub const HIGH_RISK_REGIONS: [HighRiskRegion; 5] = [
    HighRiskRegion { name: "Bihar", latitude: 25.9, longitude: 85.1 },
    HighRiskRegion { name: "Assam", latitude: 26.2, longitude: 91.7 },
    HighRiskRegion { name: "Odisha", latitude: 20.9, longitude: 85.1 },
    HighRiskRegion { name: "Uttarakhand", latitude: 30.1, longitude: 79.3 },
    HighRiskRegion { name: "Tamil Nadu", latitude: 11.1, longitude: 78.7 },
];
